use std::collections::BTreeMap;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use wortform_protocol::{
    Auxiliary, ConjugationSlot, Entry, Gender, Irregularity, NounEntry, PartOfSpeech, Tense, VerbEntry, VerbSubtype,
};

use crate::parser::{normalize_form, parse_lemma};
use crate::IngestError;

/// The record handed over by the dictionary-lookup service, as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryRecord {
    pub part_of_speech: String,
    pub base_form: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub plural: Option<String>,
    #[serde(default)]
    pub verb_subtype: Option<String>,
    #[serde(default)]
    pub separable: Option<bool>,
    #[serde(default)]
    pub reflexive: Option<bool>,
    #[serde(default)]
    pub auxiliary: Option<String>,
    #[serde(default)]
    pub irregularity: Option<String>,
    /// tense -> person -> raw form
    #[serde(default, alias = "conjugations")]
    pub conjugation: BTreeMap<String, BTreeMap<String, Option<String>>>,
}

/// Parses an optional label, logging and dropping values outside the domain.
fn lenient<T: FromStr>(field: &str, value: Option<&str>) -> Option<T> {
    let value = value.map(str::trim).filter(|v| !v.is_empty())?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("ignoring unrecognized {} {:?}", field, value);
            None
        }
    }
}

/// Upstream writes a dash or nothing for "no plural".
fn plural_lemma(plural: Option<&str>) -> Option<String> {
    let plural = plural?.trim();
    match plural {
        "" | "-" | "—" | "–" => None,
        _ => Some(plural.to_string()),
    }
}

impl DictionaryRecord {
    pub fn into_entry(self) -> Result<Entry, IngestError> {
        let lemma = self.base_form.trim();
        if lemma.is_empty() {
            return Err(IngestError::MissingField("baseForm"));
        }

        let part_of_speech: PartOfSpeech = self
            .part_of_speech
            .parse()
            .map_err(|_| IngestError::UnsupportedPartOfSpeech(self.part_of_speech.clone()))?;

        match part_of_speech {
            PartOfSpeech::Noun => {
                let gender: Gender = self.gender.as_deref().ok_or(IngestError::MissingField("gender"))?.parse()?;
                Ok(Entry::Noun(NounEntry {
                    lemma: lemma.to_string(),
                    gender,
                    plural_lemma: plural_lemma(self.plural.as_deref()),
                }))
            }
            PartOfSpeech::Verb => Ok(Entry::Verb(self.verb_entry(lemma))),
        }
    }

    fn verb_entry(&self, lemma: &str) -> VerbEntry {
        let shape = parse_lemma(lemma);
        let mut verb = VerbEntry::new(lemma);
        verb.subtype = lenient::<VerbSubtype>("verb subtype", self.verb_subtype.as_deref()).unwrap_or_default();
        verb.separable = self.separable.unwrap_or(false);
        verb.reflexive = self.reflexive.unwrap_or(shape.reflexive);
        verb.auxiliary = lenient::<Auxiliary>("auxiliary", self.auxiliary.as_deref());
        verb.irregularity = lenient::<Irregularity>("irregularity", self.irregularity.as_deref());

        for (tense_key, persons) in &self.conjugation {
            let Some(tense) = lenient::<Tense>("tense", Some(tense_key.as_str())) else {
                continue;
            };
            for (person_key, form) in persons {
                let Some(slot) = lenient::<ConjugationSlot>("person", Some(person_key.as_str())) else {
                    continue;
                };
                let form = normalize_form(form.as_deref().unwrap_or_default());
                if !form.is_empty() {
                    verb.set_raw_form(tense, slot, form);
                }
            }
        }
        verb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noun_record() {
        let record: DictionaryRecord = serde_json::from_str(
            r#"{"partOfSpeech": "noun", "gender": "der", "baseForm": " Tisch ", "plural": "Tische"}"#,
        )
        .unwrap();
        assert_eq!(
            record.into_entry().unwrap(),
            Entry::Noun(NounEntry {
                lemma: "Tisch".to_string(),
                gender: Gender::Masculine,
                plural_lemma: Some("Tische".to_string()),
            })
        );
    }

    #[test]
    fn test_noun_without_plural() {
        let record = DictionaryRecord {
            part_of_speech: "noun".to_string(),
            base_form: "Milch".to_string(),
            gender: Some("die".to_string()),
            plural: Some("—".to_string()),
            ..Default::default()
        };
        let Entry::Noun(noun) = record.into_entry().unwrap() else {
            panic!("expected a noun");
        };
        assert_eq!(noun.plural_lemma, None);
    }

    #[test]
    fn test_noun_requires_gender() {
        let record = DictionaryRecord {
            part_of_speech: "noun".to_string(),
            base_form: "Tisch".to_string(),
            ..Default::default()
        };
        assert!(matches!(record.into_entry(), Err(IngestError::MissingField("gender"))));

        let record = DictionaryRecord {
            part_of_speech: "noun".to_string(),
            base_form: "Tisch".to_string(),
            gender: Some("dem".to_string()),
            ..Default::default()
        };
        assert!(matches!(record.into_entry(), Err(IngestError::Grammar(_))));
    }

    #[test]
    fn test_verb_record() {
        let record: DictionaryRecord = serde_json::from_str(
            r#"{
                "partOfSpeech": "verb",
                "baseForm": "sich vorbereiten",
                "verbSubtype": "full",
                "separable": true,
                "auxiliary": "haben",
                "irregularity": "weird",
                "conjugations": {
                    "präsens": {"ich": "bereite  vor", "du": "bereitest vor", "er/sie/es": null},
                    "perfect": {"sie/Sie": "haben vorbereitet", "they": "ignored"},
                    "futur": {"ich": "werde vorbereiten"}
                }
            }"#,
        )
        .unwrap();
        let Entry::Verb(verb) = record.into_entry().unwrap() else {
            panic!("expected a verb");
        };
        assert!(verb.separable);
        assert!(verb.reflexive, "reflexive defaults from the lemma");
        assert_eq!(verb.auxiliary, Some(Auxiliary::Haben));
        assert_eq!(verb.irregularity, None);
        assert_eq!(verb.raw_forms.len(), 3);
        assert_eq!(verb.raw_form(Tense::Present, ConjugationSlot::Ich), Some("bereite vor"));
        assert_eq!(verb.raw_form(Tense::Perfect, ConjugationSlot::SieSie), Some("haben vorbereitet"));
        assert_eq!(verb.raw_form(Tense::Present, ConjugationSlot::ErSieEs), None);
    }

    #[test]
    fn test_explicit_reflexive_flag_wins() {
        let record = DictionaryRecord {
            part_of_speech: "verb".to_string(),
            base_form: "sich freuen".to_string(),
            reflexive: Some(false),
            ..Default::default()
        };
        let Entry::Verb(verb) = record.into_entry().unwrap() else {
            panic!("expected a verb");
        };
        assert!(!verb.reflexive);
    }

    #[test]
    fn test_unsupported_part_of_speech() {
        let record = DictionaryRecord {
            part_of_speech: "adjective".to_string(),
            base_form: "schön".to_string(),
            ..Default::default()
        };
        assert!(matches!(record.into_entry(), Err(IngestError::UnsupportedPartOfSpeech(pos)) if pos == "adjective"));
    }
}
