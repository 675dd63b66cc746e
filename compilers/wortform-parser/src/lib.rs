pub mod archive;
pub mod parser;
pub mod record;
pub mod token;

use thiserror::Error;
use wortform_protocol::{Entry, Lexicon, ParseGrammarError};

pub use archive::{align, archived_lexicon, compile_lexicon, extract_entry, find_lemma};
pub use parser::{normalize_form, parse_lemma, tokenize, LemmaShape};
pub use record::DictionaryRecord;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported part of speech: {0:?}")]
    UnsupportedPartOfSpeech(String),
    #[error("record is missing {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    Grammar(#[from] ParseGrammarError),
    #[error("lexicon archive rejected: {0}")]
    Archive(String),
}

/// Primary entry point: one JSON record -> typed entry
pub fn ingest_record(json: &str) -> Result<Entry, IngestError> {
    let record: DictionaryRecord = serde_json::from_str(json)?;
    record.into_entry()
}

/// A JSON array of records -> lexicon. Records that fail are reported with
/// their index and left out.
pub fn ingest_lexicon(json: &str, version: u32) -> Result<(Lexicon, Vec<(usize, IngestError)>), IngestError> {
    let records: Vec<DictionaryRecord> = serde_json::from_str(json)?;
    let mut lexicon = Lexicon {
        version,
        entries: Vec::with_capacity(records.len()),
    };
    let mut rejected = Vec::new();
    for (index, record) in records.into_iter().enumerate() {
        match record.into_entry() {
            Ok(entry) => {
                lexicon.push(entry);
            }
            Err(err) => rejected.push((index, err)),
        }
    }
    Ok((lexicon, rejected))
}
