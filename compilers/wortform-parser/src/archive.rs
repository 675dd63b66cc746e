use rkyv::{AlignedVec, Deserialize};
use wortform_protocol::{ArchivedEntry, ArchivedLexicon, Entry, EntryId, Lexicon};

use crate::IngestError;

/// Serializes a lexicon into an rkyv archive.
pub fn compile_lexicon(lexicon: &Lexicon) -> Result<AlignedVec, IngestError> {
    rkyv::to_bytes::<_, 256>(lexicon).map_err(|e| IngestError::Archive(format!("{:?}", e)))
}

/// Copies bytes from an arbitrary buffer (fetch, file) into an aligned one.
pub fn align(bytes: &[u8]) -> AlignedVec {
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);
    aligned
}

/// Validates an archive and borrows it in place.
pub fn archived_lexicon(bytes: &[u8]) -> Result<&ArchivedLexicon, IngestError> {
    rkyv::check_archived_root::<Lexicon>(bytes).map_err(|e| IngestError::Archive(format!("{:?}", e)))
}

fn archived_lemma(entry: &ArchivedEntry) -> &str {
    match entry {
        ArchivedEntry::Noun(noun) => noun.lemma.as_str(),
        ArchivedEntry::Verb(verb) => verb.lemma.as_str(),
    }
}

/// Linear scan over the archive, no deserialization.
pub fn find_lemma(lexicon: &ArchivedLexicon, lemma: &str) -> Option<EntryId> {
    lexicon
        .entries
        .iter()
        .find(|entry| archived_lemma(&entry.entry) == lemma)
        .map(|entry| EntryId(entry.id.0))
}

/// Copies one entry out of the archive.
pub fn extract_entry(lexicon: &ArchivedLexicon, id: EntryId) -> Option<Entry> {
    let archived = lexicon.entries.iter().find(|entry| entry.id.0 == id.0)?;
    archived.entry.deserialize(&mut rkyv::Infallible).ok()
}
