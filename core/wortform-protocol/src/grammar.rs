use core::fmt;
use core::str::FromStr;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Error produced when a grammar parameter arrives as text outside its domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGrammarError {
    pub parameter: &'static str,
    pub value: alloc::string::String,
}

impl ParseGrammarError {
    fn new(parameter: &'static str, value: &str) -> Self {
        Self {
            parameter,
            value: value.into(),
        }
    }
}

impl fmt::Display for ParseGrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} value: {:?}", self.parameter, self.value)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseGrammarError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Case {
    Nominative = 0,
    Accusative = 1,
    Dative = 2,
    Genitive = 3,
}

impl Case {
    /// Table order: nominative, accusative, dative, genitive.
    pub const ALL: [Case; 4] = [Case::Nominative, Case::Accusative, Case::Dative, Case::Genitive];

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Gender {
    Masculine = 0,
    Feminine = 1,
    Neuter = 2,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Masculine, Gender::Feminine, Gender::Neuter];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Number {
    Singular = 0,
    Plural = 1,
}

impl Number {
    pub const ALL: [Number; 2] = [Number::Singular, Number::Plural];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum DeterminerType {
    Definite = 0,
    Indefinite = 1,
    Negation = 2,
    Possessive = 3,
    Demonstrative = 4,
    Interrogative = 5,
}

impl DeterminerType {
    pub const ALL: [DeterminerType; 6] = [
        DeterminerType::Definite,
        DeterminerType::Indefinite,
        DeterminerType::Negation,
        DeterminerType::Possessive,
        DeterminerType::Demonstrative,
        DeterminerType::Interrogative,
    ];

    /// Whether the determiner class has any plural realization at all.
    pub const fn has_plural(self) -> bool {
        !matches!(self, DeterminerType::Indefinite)
    }
}

/// Grammatical person as the learner picks it. The 3rd person singular and the
/// 3rd plural/formal pair are split into their pronoun variants here and merged
/// again by [`Person::slot`] for conjugation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Person {
    FirstSingular = 0,
    SecondSingular = 1,
    ThirdSingularMasculine = 2,
    ThirdSingularFeminine = 3,
    ThirdSingularNeuter = 4,
    FirstPlural = 5,
    SecondPlural = 6,
    ThirdPlural = 7,
    Formal = 8,
}

impl Person {
    pub const ALL: [Person; 9] = [
        Person::FirstSingular,
        Person::SecondSingular,
        Person::ThirdSingularMasculine,
        Person::ThirdSingularFeminine,
        Person::ThirdSingularNeuter,
        Person::FirstPlural,
        Person::SecondPlural,
        Person::ThirdPlural,
        Person::Formal,
    ];

    pub const fn slot(self) -> ConjugationSlot {
        match self {
            Person::FirstSingular => ConjugationSlot::Ich,
            Person::SecondSingular => ConjugationSlot::Du,
            Person::ThirdSingularMasculine
            | Person::ThirdSingularFeminine
            | Person::ThirdSingularNeuter => ConjugationSlot::ErSieEs,
            Person::FirstPlural => ConjugationSlot::Wir,
            Person::SecondPlural => ConjugationSlot::Ihr,
            Person::ThirdPlural | Person::Formal => ConjugationSlot::SieSie,
        }
    }

    /// Default nominative subject pronoun for spoken forms.
    pub const fn subject_pronoun(self) -> &'static str {
        match self {
            Person::FirstSingular => "ich",
            Person::SecondSingular => "du",
            Person::ThirdSingularMasculine => "er",
            Person::ThirdSingularFeminine => "sie",
            Person::ThirdSingularNeuter => "es",
            Person::FirstPlural => "wir",
            Person::SecondPlural => "ihr",
            Person::ThirdPlural => "sie",
            Person::Formal => "Sie",
        }
    }
}

/// The six verb agreement columns of a conjugation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum ConjugationSlot {
    Ich = 0,
    Du = 1,
    ErSieEs = 2,
    Wir = 3,
    Ihr = 4,
    SieSie = 5,
}

impl ConjugationSlot {
    pub const ALL: [ConjugationSlot; 6] = [
        ConjugationSlot::Ich,
        ConjugationSlot::Du,
        ConjugationSlot::ErSieEs,
        ConjugationSlot::Wir,
        ConjugationSlot::Ihr,
        ConjugationSlot::SieSie,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ConjugationSlot::Ich => "ich",
            ConjugationSlot::Du => "du",
            ConjugationSlot::ErSieEs => "er/sie/es",
            ConjugationSlot::Wir => "wir",
            ConjugationSlot::Ihr => "ihr",
            ConjugationSlot::SieSie => "sie/Sie",
        }
    }

    /// Representative person used when a whole column is resolved at once.
    pub const fn default_person(self) -> Person {
        match self {
            ConjugationSlot::Ich => Person::FirstSingular,
            ConjugationSlot::Du => Person::SecondSingular,
            ConjugationSlot::ErSieEs => Person::ThirdSingularMasculine,
            ConjugationSlot::Wir => Person::FirstPlural,
            ConjugationSlot::Ihr => Person::SecondPlural,
            ConjugationSlot::SieSie => Person::ThirdPlural,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Tense {
    Present = 0,
    Preterite = 1,
    Perfect = 2,
}

impl Tense {
    pub const ALL: [Tense; 3] = [Tense::Present, Tense::Preterite, Tense::Perfect];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum VerbSubtype {
    #[default]
    Full = 0,
    Modal = 1,
    Auxiliary = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Auxiliary {
    Haben = 0,
    Sein = 1,
}

/// Irregular-verb class as delivered upstream. Carried through but never
/// used to pick a surface form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Irregularity {
    Strong = 0,
    Mixed = 1,
    Suppletive = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PartOfSpeech {
    Noun = 0,
    Verb = 1,
}

bitflags! {
    /// What a resolver did (or could not do) while producing a surface form.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct FormFlags: u32 {
        // Outcomes (Bits 0-3)
        const PARTIAL = 1;
        const MISSING_DATA = 2;
        const UNAVAILABLE = 4;

        // Noun rules (Bits 4-5)
        const GENITIVE_SUFFIX = 16;
        const DATIVE_PLURAL_N = 32;

        // Verb recomposition (Bits 8-12)
        const PREFIX_DETACHED = 256;
        const PREFIX_UNGLUED = 512;
        const PRONOUN_INSERTED = 1024;
        const PRONOUN_DEDUPLICATED = 2048;
        const SEPARABLE_OVERRIDDEN = 4096;
    }
}

impl Default for FormFlags {
    fn default() -> Self {
        Self::empty()
    }
}

macro_rules! display_and_parse {
    ($ty:ident, $param:expr, { $($variant:ident => $label:expr, [$($alias:expr),*]);+ $(;)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let label = match self {
                    $($ty::$variant => $label,)+
                };
                f.write_str(label)
            }
        }

        impl FromStr for $ty {
            type Err = ParseGrammarError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($label) $(|| trimmed.eq_ignore_ascii_case($alias))* {
                        return Ok($ty::$variant);
                    }
                )+
                Err(ParseGrammarError::new($param, s))
            }
        }
    };
}

display_and_parse!(Case, "case", {
    Nominative => "nominative", ["nom", "nominativ"];
    Accusative => "accusative", ["acc", "akk", "akkusativ"];
    Dative => "dative", ["dat", "dativ"];
    Genitive => "genitive", ["gen", "genitiv"];
});

display_and_parse!(Gender, "gender", {
    Masculine => "masculine", ["m", "masc", "der", "maskulin"];
    Feminine => "feminine", ["f", "fem", "die", "feminin"];
    Neuter => "neuter", ["n", "neut", "das", "neutrum"];
});

display_and_parse!(Number, "number", {
    Singular => "singular", ["sg"];
    Plural => "plural", ["pl"];
});

display_and_parse!(DeterminerType, "determiner type", {
    Definite => "definite", ["def"];
    Indefinite => "indefinite", ["indef"];
    Negation => "negation", ["neg", "kein"];
    Possessive => "possessive", ["poss"];
    Demonstrative => "demonstrative", ["dem", "dies"];
    Interrogative => "interrogative", ["int", "welch"];
});

display_and_parse!(Tense, "tense", {
    Present => "present", ["präsens", "praesens"];
    Preterite => "preterite", ["präteritum", "praeteritum", "past"];
    Perfect => "perfect", ["perfekt"];
});

display_and_parse!(VerbSubtype, "verb subtype", {
    Full => "full", ["vollverb"];
    Modal => "modal", ["modalverb"];
    Auxiliary => "auxiliary", ["hilfsverb"];
});

display_and_parse!(Auxiliary, "auxiliary", {
    Haben => "haben", [];
    Sein => "sein", [];
});

display_and_parse!(Irregularity, "irregularity", {
    Strong => "strong", ["stark"];
    Mixed => "mixed", ["gemischt"];
    Suppletive => "suppletive", ["suppletiv"];
});

display_and_parse!(PartOfSpeech, "part of speech", {
    Noun => "noun", ["substantiv", "nomen"];
    Verb => "verb", [];
});

display_and_parse!(ConjugationSlot, "person", {
    Ich => "ich", ["1sg"];
    Du => "du", ["2sg"];
    ErSieEs => "er/sie/es", ["er", "es", "3sg"];
    Wir => "wir", ["1pl"];
    Ihr => "ihr", ["2pl"];
    SieSie => "sie/Sie", ["sie", "3pl"];
});

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Person::FirstSingular => "1sg",
            Person::SecondSingular => "2sg",
            Person::ThirdSingularMasculine => "3sg-masc",
            Person::ThirdSingularFeminine => "3sg-fem",
            Person::ThirdSingularNeuter => "3sg-neut",
            Person::FirstPlural => "1pl",
            Person::SecondPlural => "2pl",
            Person::ThirdPlural => "3pl",
            Person::Formal => "formal2",
        };
        f.write_str(code)
    }
}

impl FromStr for Person {
    type Err = ParseGrammarError;

    /// Accepts the person codes and the unambiguous pronouns. Lowercase "sie"
    /// is rejected because it names both 3sg-fem and 3pl; "Sie" is formal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == "Sie" {
            return Ok(Person::Formal);
        }
        let person = match trimmed.to_lowercase().as_str() {
            "1sg" | "ich" => Person::FirstSingular,
            "2sg" | "du" => Person::SecondSingular,
            "3sg-masc" | "er" => Person::ThirdSingularMasculine,
            "3sg-fem" => Person::ThirdSingularFeminine,
            "3sg-neut" | "es" => Person::ThirdSingularNeuter,
            "1pl" | "wir" => Person::FirstPlural,
            "2pl" | "ihr" => Person::SecondPlural,
            "3pl" => Person::ThirdPlural,
            "formal2" | "formal" => Person::Formal,
            _ => return Err(ParseGrammarError::new("person", s)),
        };
        Ok(person)
    }
}
