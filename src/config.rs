use serde::{Deserialize, Serialize};

/// Default bound on box nesting; matches the depth limit `fragdump` prints to.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Reader knobs. All fields are optional when loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Emit log events to the reader's logger.
    pub log: bool,
    /// Deepest allowed nesting level; root boxes are level 0.
    pub max_depth: usize,
    /// Reject inputs longer than this before parsing.
    pub max_input_len: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            log: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: None,
        }
    }
}

impl ReaderConfig {
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
