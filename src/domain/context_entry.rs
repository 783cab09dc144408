use uuid::Uuid;

/// A snippet of past posts or knowledge held in the context index.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextEntry {
    pub id: EntryId,
    pub text: String,
}

impl ContextEntry {
    pub fn new(text: String) -> Self {
        Self {
            id: EntryId::new(),
            text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

/// A search hit. Smaller distance means closer to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMatch {
    pub text: String,
    pub distance: f32,
}
