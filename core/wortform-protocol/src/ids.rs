use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Unique identifier for a dictionary entry inside a compiled lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(transparent)] // Same layout as u32
pub struct EntryId(pub u32);

impl EntryId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl From<u32> for EntryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<EntryId> for u32 {
    fn from(id: EntryId) -> u32 {
        id.0
    }
}
