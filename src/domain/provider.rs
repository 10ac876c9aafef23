use std::fmt;

use serde::{Deserialize, Serialize};

/// Third-party services the pipeline talks to. Credentials are keyed by these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Crunchbase,
    Apollo,
    Hunter,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Crunchbase => "crunchbase",
            Provider::Apollo => "apollo",
            Provider::Hunter => "hunter",
        };
        f.write_str(name)
    }
}
