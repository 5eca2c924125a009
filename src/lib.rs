pub mod api;
pub mod boxes;
pub mod config;
pub mod error;
pub mod known_boxes;
pub mod logger;
pub mod parser;
pub mod reader;
pub mod util;

pub use api::{Analysis, HexDump, analyze, analyze_with_logger, hex_range};
pub use boxes::{BoxHeader, BoxNode, FourCC, HEADER_LEN};
pub use config::ReaderConfig;
pub use error::{ParseError, ParseWarning};
pub use known_boxes::BoxType;
pub use logger::{ConsoleLogger, LogEvent, Logger, TracingLogger};
pub use parser::{parse_box, parse_children, read_box_header};
pub use reader::{BoxReader, Report};
