use crate::boxes::{BoxHeader, BoxNode, FourCC, HEADER_LEN};
use crate::error::{ParseError, ParseWarning, Result};
use crate::known_boxes::BoxType;
use crate::logger::{LogEvent, Logger};
use byteorder::{BigEndian, ByteOrder};

/// Decode the 8-byte header at `offset`.
///
/// Checks run in stream order: enough bytes for a header, a known tag, then
/// a size that covers the header and fits in the buffer.
pub fn read_box_header(buf: &[u8], offset: usize) -> Result<BoxHeader> {
    let remaining = buf.len().saturating_sub(offset);
    if remaining < HEADER_LEN {
        return Err(ParseError::TruncatedHeader { offset, remaining });
    }

    let size = BigEndian::read_u32(&buf[offset..offset + 4]);
    let mut tag = [0u8; 4];
    tag.copy_from_slice(&buf[offset + 4..offset + 8]);

    let typ = BoxType::from_tag(tag).ok_or_else(|| ParseError::UnknownBoxType {
        offset,
        tag: FourCC(tag).as_str_lossy(),
    })?;

    if (size as usize) < HEADER_LEN || size as usize > remaining {
        return Err(ParseError::InvalidSize { offset, size, remaining });
    }

    Ok(BoxHeader { size, typ, start: offset })
}

/// Per-parse bookkeeping shared by every level of the descent.
///
/// The cursor is not part of it: each call to [`parse_box`] returns the
/// position after the box it consumed.
pub struct Descent<'l> {
    pub max_depth: usize,
    pub logger: Option<&'l dyn Logger>,
    pub warnings: Vec<ParseWarning>,
    /// Child-index path of the last `mdat` seen, rooted at the top-level list.
    pub payload: Option<Vec<usize>>,
    path: Vec<usize>,
}

impl<'l> Descent<'l> {
    pub fn new(max_depth: usize, logger: Option<&'l dyn Logger>) -> Self {
        Descent {
            max_depth,
            logger,
            warnings: Vec::new(),
            payload: None,
            path: Vec::new(),
        }
    }

    fn emit(&self, event: LogEvent<'_>) {
        if let Some(l) = self.logger {
            l.log(&event);
        }
    }
}

/// Parse the top-level box at `offset`, recording it as root number `index`.
pub fn parse_root(buf: &[u8], offset: usize, index: usize, descent: &mut Descent<'_>) -> Result<(BoxNode, usize)> {
    descent.path.clear();
    descent.path.push(index);
    parse_box(buf, offset, 0, descent)
}

/// Parse one box (and, for containers, its whole subtree) starting at `offset`.
///
/// Returns the node and the cursor just past it, which is always `node.end`.
pub fn parse_box(buf: &[u8], offset: usize, depth: usize, descent: &mut Descent<'_>) -> Result<(BoxNode, usize)> {
    if depth > descent.max_depth {
        return Err(ParseError::NestingTooDeep { offset, max_depth: descent.max_depth });
    }

    let h = read_box_header(buf, offset)?;
    descent.emit(LogEvent::BoxFound { box_type: h.typ, size: h.size, offset });

    let mut node = BoxNode {
        size: h.size,
        start: h.start,
        end: h.end(),
        typ: h.typ,
        payload: None,
        extended_type: None,
        children: Vec::new(),
        nested: depth > 0,
    };

    let body = &buf[h.data_start()..h.end()];
    match h.typ {
        BoxType::Moof | BoxType::Traf => {
            node.children = parse_children(buf, &h, depth, descent)?;
        }
        BoxType::Mdat => {
            node.payload = Some(decode_payload(body, offset, descent));
            descent.payload = Some(descent.path.clone());
        }
        BoxType::Uuid => {
            node.extended_type = body.get(..16).map(hex::encode);
        }
        BoxType::Mfhd | BoxType::Tfhd | BoxType::Trun => {}
    }

    Ok((node, h.end()))
}

/// Parse the boxes filling the body of container `parent`.
///
/// The children must tile `[data_start, end)` exactly.
pub fn parse_children(buf: &[u8], parent: &BoxHeader, depth: usize, descent: &mut Descent<'_>) -> Result<Vec<BoxNode>> {
    let parent_end = parent.end();
    let mut kids = Vec::new();
    let mut cursor = parent.data_start();

    while cursor < parent_end {
        if parent_end - cursor < HEADER_LEN {
            return Err(ParseError::MalformedNesting {
                parent: parent.start,
                parent_end,
                child_end: cursor + HEADER_LEN,
            });
        }

        descent.path.push(kids.len());
        let (child, next) = parse_box(buf, cursor, depth + 1, descent)?;
        descent.path.pop();

        if next > parent_end {
            return Err(ParseError::MalformedNesting {
                parent: parent.start,
                parent_end,
                child_end: next,
            });
        }
        cursor = next;
        kids.push(child);
    }
    Ok(kids)
}

fn decode_payload(body: &[u8], offset: usize, descent: &mut Descent<'_>) -> String {
    let text = match std::str::from_utf8(body) {
        Ok(s) => s.to_owned(),
        Err(e) => {
            let warning = ParseWarning::PayloadDecode { offset, valid_up_to: e.valid_up_to() };
            descent.emit(LogEvent::Warning(&warning));
            descent.warnings.push(warning);
            String::from_utf8_lossy(body).into_owned()
        }
    };
    descent.emit(LogEvent::Payload { offset, text: &text });
    text
}
