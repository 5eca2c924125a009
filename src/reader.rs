use crate::boxes::BoxNode;
use crate::config::ReaderConfig;
use crate::error::{ParseError, ParseWarning, Result};
use crate::logger::{ConsoleLogger, Logger};
use crate::parser::{Descent, parse_root};
use serde::Serialize;

/// Single-use reader over one in-memory fragment buffer.
///
/// ```
/// use fragbox::BoxReader;
///
/// let mut data = Vec::new();
/// data.extend_from_slice(&12u32.to_be_bytes());
/// data.extend_from_slice(b"mdat");
/// data.extend_from_slice(b"<tt>");
///
/// let mut reader = BoxReader::load(&data);
/// reader.parse()?;
/// assert_eq!(reader.report().payload_text, Some("<tt>"));
/// # Ok::<(), fragbox::ParseError>(())
/// ```
pub struct BoxReader<'a> {
    data: &'a [u8],
    cursor: usize,
    config: ReaderConfig,
    logger: Box<dyn Logger + 'a>,
    boxes: Vec<BoxNode>,
    payload: Option<Vec<usize>>,
    warnings: Vec<ParseWarning>,
}

/// Read-only view of a finished parse.
#[derive(Debug, Serialize)]
pub struct Report<'r> {
    pub boxes: &'r [BoxNode],
    pub payload_text: Option<&'r str>,
    pub warnings: &'r [ParseWarning],
}

impl<'a> BoxReader<'a> {
    /// Bind `data`; nothing is parsed until [`BoxReader::parse`].
    pub fn load(data: &'a [u8]) -> Self {
        BoxReader {
            data,
            cursor: 0,
            config: ReaderConfig::default(),
            logger: Box::new(ConsoleLogger),
            boxes: Vec::new(),
            payload: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: impl Logger + 'a) -> Self {
        self.logger = Box::new(logger);
        self
    }

    pub fn set_logging(&mut self, enabled: bool) -> &mut Self {
        self.config.log = enabled;
        self
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Current absolute read position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Walk the buffer from the cursor to its end.
    ///
    /// Results are committed only when every box parses; on error the reader
    /// keeps no boxes and the cursor stays where it was. Calling again after a
    /// successful parse is a no-op since the cursor already sits at the end.
    pub fn parse(&mut self) -> Result<()> {
        if let Some(limit) = self.config.max_input_len {
            if self.data.len() > limit {
                return Err(ParseError::InputTooLarge { len: self.data.len(), limit });
            }
        }

        let logger = self.config.log.then_some(&*self.logger as &dyn Logger);
        let mut descent = Descent::new(self.config.max_depth, logger);
        let mut roots = Vec::new();
        let mut cursor = self.cursor;

        while cursor < self.data.len() {
            let (node, next) = parse_root(self.data, cursor, self.boxes.len() + roots.len(), &mut descent)?;
            roots.push(node);
            cursor = next;
        }

        self.boxes.append(&mut roots);
        if descent.payload.is_some() {
            self.payload = descent.payload;
        }
        self.warnings.append(&mut descent.warnings);
        self.cursor = cursor;
        Ok(())
    }

    pub fn boxes(&self) -> &[BoxNode] {
        &self.boxes
    }

    /// Decoded text of the last `mdat` encountered.
    pub fn payload_text(&self) -> Option<&str> {
        let (first, rest) = self.payload.as_deref()?.split_first()?;
        let mut node = self.boxes.get(*first)?;
        for &i in rest {
            node = node.children.get(i)?;
        }
        node.payload.as_deref()
    }

    pub fn report(&self) -> Report<'_> {
        Report {
            boxes: &self.boxes,
            payload_text: self.payload_text(),
            warnings: &self.warnings,
        }
    }

    pub fn into_boxes(self) -> Vec<BoxNode> {
        self.boxes
    }
}
