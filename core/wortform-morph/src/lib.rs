#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

use alloc::string::String;

use wortform_protocol::ParseGrammarError;

use core::fmt;

pub mod noun;
pub mod tables;
pub mod verb;

pub use noun::{NounForm, NounParams, SpokenForm};
pub use verb::VerbForm;

/// Shown wherever the source data has no form to offer.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MorphError {
    InvalidGrammarParameter(String),
}

impl fmt::Display for MorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MorphError::InvalidGrammarParameter(reason) => write!(f, "Invalid grammar parameter: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MorphError {}

impl From<ParseGrammarError> for MorphError {
    fn from(err: ParseGrammarError) -> Self {
        MorphError::InvalidGrammarParameter(alloc::format!("{}", err))
    }
}

/// A computed word, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Surface {
    Form(String),
    /// The entry lacks the data (no plural, no raw conjugation).
    Missing,
    /// Grammatically impossible, e.g. an indefinite article in the plural.
    Unavailable,
}

impl Surface {
    pub fn text(&self) -> Option<&str> {
        match self {
            Surface::Form(text) => Some(text.as_str()),
            Surface::Missing | Surface::Unavailable => None,
        }
    }

    /// Text to render; gaps render as [`PLACEHOLDER`], never as an empty string.
    pub fn display(&self) -> &str {
        self.text().unwrap_or(PLACEHOLDER)
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Surface::Form(_))
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use proptest::prelude::*;
    use wortform_protocol::{
        Case, ConjugationSlot, DeterminerType, Gender, NounEntry, Number, Person, Tense, VerbEntry,
    };

    fn any_case() -> impl Strategy<Value = Case> {
        prop::sample::select(Case::ALL.to_vec())
    }

    fn any_person() -> impl Strategy<Value = Person> {
        prop::sample::select(Person::ALL.to_vec())
    }

    fn any_determiner() -> impl Strategy<Value = DeterminerType> {
        prop::sample::select(DeterminerType::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn test_genitive_suffix_rule(stem in "[A-Z][a-z]{1,8}") {
            let entry = NounEntry { lemma: stem.clone(), gender: Gender::Masculine, plural_lemma: None };
            let form = noun::resolve(&entry, NounParams::new(Case::Genitive, Number::Singular, DeterminerType::Definite)).unwrap();
            let last = stem.chars().last().unwrap();
            let expected = if "aeiouy".contains(last) { alloc::format!("{}s", stem) } else { alloc::format!("{}es", stem) };
            prop_assert_eq!(form.noun, Surface::Form(expected));

            let feminine = NounEntry { gender: Gender::Feminine, ..entry };
            let form = noun::resolve(&feminine, NounParams::new(Case::Genitive, Number::Singular, DeterminerType::Definite)).unwrap();
            prop_assert_eq!(form.noun, Surface::Form(stem));
        }

        #[test]
        fn test_dative_plural_rule(plural in "[A-Z][a-z]{1,8}") {
            let entry = NounEntry { lemma: "X".to_string(), gender: Gender::Neuter, plural_lemma: Some(plural.clone()) };
            let form = noun::resolve(&entry, NounParams::new(Case::Dative, Number::Plural, DeterminerType::Definite)).unwrap();
            let text = form.noun.text().unwrap().to_string();
            if plural.ends_with('n') || plural.ends_with('s') {
                prop_assert_eq!(text, plural);
            } else {
                prop_assert_eq!(text, alloc::format!("{}n", plural));
            }
        }

        #[test]
        fn test_noun_resolution_is_deterministic(
            case in any_case(),
            plural in any::<bool>(),
            determiner in any_determiner(),
            person in any_person(),
        ) {
            let entry = NounEntry { lemma: "Haus".to_string(), gender: Gender::Neuter, plural_lemma: Some("Häuser".to_string()) };
            let number = if plural { Number::Plural } else { Number::Singular };
            let params = NounParams::new(case, number, determiner).with_person(person);
            prop_assert_eq!(noun::resolve(&entry, params), noun::resolve(&entry, params));
            prop_assert_eq!(params.is_selectable(), noun::resolve(&entry, params).unwrap().is_selectable());
        }

        #[test]
        fn test_verb_resolution_is_deterministic(person in any_person(), reflexive in any::<bool>()) {
            let mut entry = VerbEntry::new("sich vorbereiten");
            entry.separable = true;
            entry.reflexive = reflexive;
            for slot in ConjugationSlot::ALL {
                entry.set_raw_form(Tense::Present, slot, "bereite vor");
                entry.set_raw_form(Tense::Perfect, slot, "habe vorbereitet");
            }
            for tense in [Tense::Present, Tense::Perfect] {
                let first = verb::resolve(&entry, tense, person);
                prop_assert_eq!(&first, &verb::resolve(&entry, tense, person));
                // Recomposition never duplicates the reflexive pronoun.
                let text = first.surface.text().unwrap();
                let pronoun = verb::reflexive_pronoun(person);
                let count = text.split_whitespace().filter(|t| *t == pronoun).count();
                prop_assert_eq!(count, usize::from(reflexive));
            }
        }
    }

    #[test]
    fn test_surface_display() {
        assert_eq!(Surface::Form("den".to_string()).to_string(), "den");
        assert_eq!(Surface::Missing.to_string(), PLACEHOLDER);
        assert_eq!(Surface::Unavailable.display(), PLACEHOLDER);
        assert!(!Surface::Unavailable.is_available());
    }

    #[test]
    fn test_parse_error_converts() {
        let err: MorphError = "vocative".parse::<Case>().unwrap_err().into();
        assert_eq!(err.to_string(), "Invalid grammar parameter: invalid case value: \"vocative\"");
    }
}
