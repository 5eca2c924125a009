use crate::boxes::FourCC;
use serde::Serialize;

/// The closed set of box types a fragment reader understands.
///
/// Tags are matched case-insensitively; anything else is rejected by the
/// parser with [`crate::error::ParseError::UnknownBoxType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxType {
    Moof,
    Mdat,
    Mfhd,
    Traf,
    Tfhd,
    Trun,
    Uuid,
}

impl BoxType {
    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        match &tag.map(|c| c.to_ascii_uppercase()) {
            b"MOOF" => Some(BoxType::Moof),
            b"MDAT" => Some(BoxType::Mdat),
            b"MFHD" => Some(BoxType::Mfhd),
            b"TRAF" => Some(BoxType::Traf),
            b"TFHD" => Some(BoxType::Tfhd),
            b"TRUN" => Some(BoxType::Trun),
            b"UUID" => Some(BoxType::Uuid),
            _ => None,
        }
    }

    /// Canonical lowercase tag as written by muxers.
    pub fn fourcc(&self) -> FourCC {
        FourCC(match self {
            BoxType::Moof => *b"moof",
            BoxType::Mdat => *b"mdat",
            BoxType::Mfhd => *b"mfhd",
            BoxType::Traf => *b"traf",
            BoxType::Tfhd => *b"tfhd",
            BoxType::Trun => *b"trun",
            BoxType::Uuid => *b"uuid",
        })
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            BoxType::Moof => "Movie Fragment Box",
            BoxType::Mdat => "Media Data Box",
            BoxType::Mfhd => "Movie Fragment Header Box",
            BoxType::Traf => "Track Fragment Box",
            BoxType::Tfhd => "Track Fragment Header Box",
            BoxType::Trun => "Track Fragment Run Box",
            BoxType::Uuid => "User Extension Box",
        }
    }

    /// Does this box's body consist of further boxes?
    pub fn is_container(&self) -> bool {
        matches!(self, BoxType::Moof | BoxType::Traf)
    }

    /// Is the body opaque application data decoded as text?
    pub fn is_payload(&self) -> bool {
        matches!(self, BoxType::Mdat)
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_container() && !self.is_payload()
    }
}

impl std::fmt::Display for BoxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fourcc())
    }
}
