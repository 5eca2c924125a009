use serde::Serialize;

/// Fatal structural failures. Any of these aborts the whole parse.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("truncated box header at offset {offset}: {remaining} bytes left, need 8")]
    TruncatedHeader { offset: usize, remaining: usize },
    #[error("unknown box type {tag:?} at offset {offset}")]
    UnknownBoxType { offset: usize, tag: String },
    #[error("invalid box size {size} at offset {offset} ({remaining} bytes left)")]
    InvalidSize { offset: usize, size: u32, remaining: usize },
    #[error("children of box at offset {parent} overrun its end {parent_end} (child ends at {child_end})")]
    MalformedNesting { parent: usize, parent_end: usize, child_end: usize },
    #[error("box at offset {offset} nested deeper than {max_depth} levels")]
    NestingTooDeep { offset: usize, max_depth: usize },
    #[error("input of {len} bytes exceeds limit of {limit} bytes")]
    InputTooLarge { len: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Recoverable conditions noticed during a parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// `mdat` body is not valid UTF-8; the text was decoded with replacement characters.
    PayloadDecode { offset: usize, valid_up_to: usize },
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::PayloadDecode { offset, valid_up_to } => write!(
                f,
                "mdat at offset {offset} is not valid UTF-8 after {valid_up_to} bytes; decoded lossily"
            ),
        }
    }
}
