use serde::{Deserialize, Serialize};

/// Completion state of a checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Open,
    Done,
}

impl ItemStatus {
    /// `done` for true, `open` for false
    pub fn from_done(done: bool) -> Self {
        if done { ItemStatus::Done } else { ItemStatus::Open }
    }

    pub fn is_done(self) -> bool {
        self == ItemStatus::Done
    }

    /// The character used inside the checkbox `[ ]`
    pub fn checkbox_char(self) -> char {
        match self {
            ItemStatus::Open => ' ',
            ItemStatus::Done => 'x',
        }
    }

    /// Parse a status name (`open` or `done`)
    pub fn parse_status(s: &str) -> Option<ItemStatus> {
        match s {
            "open" => Some(ItemStatus::Open),
            "done" => Some(ItemStatus::Done),
            _ => None,
        }
    }
}

/// A single checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque identifier, fixed at creation
    pub id: String,
    /// Trimmed, non-empty title
    pub title: String,
    pub status: ItemStatus,
    /// Milliseconds since the Unix epoch
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl Item {
    /// Create an open item with the given id and creation time
    pub fn new(id: String, title: String, created_at: i64) -> Self {
        Item {
            id,
            title,
            status: ItemStatus::Open,
            created_at,
        }
    }

    /// The first 8 characters of the id, used in listings
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((end, _)) => &self.id[..end],
            None => &self.id,
        }
    }
}
