use crate::known_boxes::BoxType;
use serde::Serialize;
use std::fmt;

/// Size of the plain box header: 4-byte big-endian size + 4-byte tag.
pub const HEADER_LEN: usize = 8;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else { None }
    }
    pub fn as_str_lossy(&self) -> String {
        self.0.iter().map(|&c| if (32..=126).contains(&c) { c as char } else { '.' })
            .collect()
    }
}
impl fmt::Debug for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }
impl fmt::Display for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxHeader {
    pub size: u32,          // total size including the 8-byte header
    pub typ: BoxType,
    pub start: usize,       // absolute offset of header start
}

impl BoxHeader {
    pub fn data_start(&self) -> usize {
        self.start + HEADER_LEN
    }

    pub fn end(&self) -> usize {
        self.start + self.size as usize
    }
}

/// One node of the parsed box tree.
///
/// Nodes are fully built by the recursive call that discovers them and are
/// not touched afterwards. Children are owned by their parent only.
#[derive(Debug, Clone, Serialize)]
pub struct BoxNode {
    pub size: u32,
    #[serde(rename = "offset")]
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub typ: BoxType,
    /// Decoded text of an `mdat` body; `None` for every other type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    /// Hex of the 16-byte extended type of a `uuid` box, if the body holds one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_type: Option<String>,
    pub children: Vec<BoxNode>,
    pub nested: bool,
}

impl BoxNode {
    pub fn data_start(&self) -> usize {
        self.start + HEADER_LEN
    }

    pub fn data_len(&self) -> usize {
        self.end - self.data_start()
    }

    /// Depth-first search for the first box of `typ`, including `self`.
    pub fn find(&self, typ: BoxType) -> Option<&BoxNode> {
        self.walk().map(|(_, b)| b).find(|b| b.typ == typ)
    }

    /// Pre-order iteration yielding each node with its depth below `self`.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![(0, self)] }
    }
}

pub struct Walk<'a> {
    stack: Vec<(usize, &'a BoxNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a BoxNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        Some((depth, node))
    }
}
