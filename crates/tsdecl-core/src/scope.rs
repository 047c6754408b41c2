//! Namespace scope policy.

use serde::{Deserialize, Serialize};

/// What happens to the current namespace when a walk leaves a namespace body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMode {
    /// The most recently entered namespace stays current after its body ends.
    #[default]
    Flat,
    /// Leaving a namespace body restores the enclosing namespace.
    Stack,
}

impl std::fmt::Display for ScopeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Flat => "flat",
            Self::Stack => "stack",
        };
        write!(f, "{s}")
    }
}
