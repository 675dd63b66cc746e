use rkyv::{Archive, Deserialize, Serialize};
use crate::grammar::{Auxiliary, ConjugationSlot, Gender, Irregularity, PartOfSpeech, Tense, VerbSubtype};
use crate::ids::EntryId;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[archive(check_bytes)]
pub struct NounEntry {
    pub lemma: String,
    pub gender: Gender,
    pub plural_lemma: Option<String>,
}

/// One cell of the upstream conjugation table, stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct RawForm {
    pub tense: Tense,
    pub slot: ConjugationSlot,
    pub form: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[archive(check_bytes)]
pub struct VerbEntry {
    pub lemma: String,
    pub subtype: VerbSubtype,
    /// Upstream claim; checked against the lemma before use.
    pub separable: bool,
    pub reflexive: bool,
    pub auxiliary: Option<Auxiliary>,
    pub irregularity: Option<Irregularity>,
    pub raw_forms: Vec<RawForm>,
}

impl VerbEntry {
    pub fn new(lemma: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            subtype: VerbSubtype::Full,
            separable: false,
            reflexive: false,
            auxiliary: None,
            irregularity: None,
            raw_forms: Vec::new(),
        }
    }

    /// Stored form for a slot. A later duplicate replaces an earlier one.
    pub fn raw_form(&self, tense: Tense, slot: ConjugationSlot) -> Option<&str> {
        self.raw_forms
            .iter()
            .rev()
            .find(|raw| raw.tense == tense && raw.slot == slot)
            .map(|raw| raw.form.as_str())
    }

    pub fn set_raw_form(&mut self, tense: Tense, slot: ConjugationSlot, form: impl Into<String>) {
        let form = form.into();
        match self.raw_forms.iter_mut().find(|raw| raw.tense == tense && raw.slot == slot) {
            Some(existing) => existing.form = form,
            None => self.raw_forms.push(RawForm { tense, slot, form }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "partOfSpeech", rename_all = "lowercase"))]
#[archive(check_bytes)]
pub enum Entry {
    Noun(NounEntry),
    Verb(VerbEntry),
}

impl Entry {
    pub fn lemma(&self) -> &str {
        match self {
            Entry::Noun(noun) => &noun.lemma,
            Entry::Verb(verb) => &verb.lemma,
        }
    }

    pub fn part_of_speech(&self) -> PartOfSpeech {
        match self {
            Entry::Noun(_) => PartOfSpeech::Noun,
            Entry::Verb(_) => PartOfSpeech::Verb,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LexiconEntry {
    pub id: EntryId,
    pub entry: Entry,
}

/// A compiled set of entries, shipped to the browser as an rkyv archive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub entries: Vec<LexiconEntry>,
}

impl Lexicon {
    pub fn push(&mut self, entry: Entry) -> EntryId {
        let id = EntryId::new(self.entries.len() as u32);
        self.entries.push(LexiconEntry { id, entry });
        id
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.entry)
    }
}
