use serde::{Deserialize, Serialize};

/// The classification a line received, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Heading,
    Step,
    BulletItem,
    Paragraph,
    ShortLine,
}

/// Block-level elements recovered from a plain-text solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// A short line ending in `:`, colon included
    Heading { text: String },
    /// A numbered instruction; `number` is echoed exactly as written
    Step { number: String, text: String },
    BulletItem { text: String },
    Paragraph { text: String },
    /// A short fragment that renders with a forced line break after it
    ShortLine { text: String },
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::Step { .. } => BlockKind::Step,
            Block::BulletItem { .. } => BlockKind::BulletItem,
            Block::Paragraph { .. } => BlockKind::Paragraph,
            Block::ShortLine { .. } => BlockKind::ShortLine,
        }
    }

    /// The text payload, without step number or bullet marker.
    pub fn text(&self) -> &str {
        match self {
            Block::Heading { text }
            | Block::Step { text, .. }
            | Block::BulletItem { text }
            | Block::Paragraph { text }
            | Block::ShortLine { text } => text,
        }
    }
}
