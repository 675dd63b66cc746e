//! Closed determiner tables. Every table is indexed `[column][case]` and is
//! total over its key space, so a hole fails to compile.

use alloc::string::String;

use wortform_protocol::{Case, DeterminerType, Gender, Number, Person};

/// Gender column in the singular, or the shared plural column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Masculine = 0,
    Feminine = 1,
    Neuter = 2,
    Plural = 3,
}

impl Column {
    pub const fn of(gender: Gender, number: Number) -> Self {
        match (number, gender) {
            (Number::Plural, _) => Column::Plural,
            (Number::Singular, Gender::Masculine) => Column::Masculine,
            (Number::Singular, Gender::Feminine) => Column::Feminine,
            (Number::Singular, Gender::Neuter) => Column::Neuter,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Cases in table order: nominative, accusative, dative, genitive.
pub type CaseRow = [&'static str; 4];

/// A complete article paradigm. `plural` is `None` when the determiner class
/// has no plural at all.
#[derive(Debug, Clone, Copy)]
pub struct ArticleTable {
    pub singular: [CaseRow; 3],
    pub plural: Option<CaseRow>,
}

impl ArticleTable {
    pub const fn get(&self, column: Column, case: Case) -> Option<&'static str> {
        match column {
            Column::Plural => match self.plural {
                Some(row) => Some(row[case.index()]),
                None => None,
            },
            _ => Some(self.singular[column.index()][case.index()]),
        }
    }
}

/// Endings appended to a stem, same layout as [`ArticleTable`] with a plural row.
pub type EndingTable = [CaseRow; 4];

pub const DEFINITE: ArticleTable = ArticleTable {
    singular: [
        ["der", "den", "dem", "des"],
        ["die", "die", "der", "der"],
        ["das", "das", "dem", "des"],
    ],
    plural: Some(["die", "die", "den", "der"]),
};

pub const INDEFINITE: ArticleTable = ArticleTable {
    singular: [
        ["ein", "einen", "einem", "eines"],
        ["eine", "eine", "einer", "einer"],
        ["ein", "ein", "einem", "eines"],
    ],
    plural: None,
};

pub const NEGATION: ArticleTable = ArticleTable {
    singular: [
        ["kein", "keinen", "keinem", "keines"],
        ["keine", "keine", "keiner", "keiner"],
        ["kein", "kein", "keinem", "keines"],
    ],
    plural: Some(["keine", "keine", "keinen", "keiner"]),
};

/// Possessive endings follow the ein-word pattern, with a plural row.
pub const POSSESSIVE_ENDINGS: EndingTable = [
    ["", "en", "em", "es"],
    ["e", "e", "er", "er"],
    ["", "", "em", "es"],
    ["e", "e", "en", "er"],
];

/// der-word endings shared by dies- and welch-.
pub const DER_WORD_ENDINGS: EndingTable = [
    ["er", "en", "em", "es"],
    ["e", "e", "er", "er"],
    ["es", "es", "em", "es"],
    ["e", "e", "en", "er"],
];

pub const DEMONSTRATIVE_STEM: &str = "dies";
pub const INTERROGATIVE_STEM: &str = "welch";

pub const fn possessive_stem(person: Person) -> &'static str {
    match person {
        Person::FirstSingular => "mein",
        Person::SecondSingular => "dein",
        Person::ThirdSingularMasculine | Person::ThirdSingularNeuter => "sein",
        Person::ThirdSingularFeminine | Person::ThirdPlural => "ihr",
        Person::FirstPlural => "unser",
        Person::SecondPlural => "euer",
        Person::Formal => "Ihr",
    }
}

/// Joins stem and ending. "euer" loses its second e before any real ending.
pub fn attach(stem: &str, ending: &str) -> String {
    if ending.is_empty() {
        return String::from(stem);
    }
    let stem = if stem == "euer" { "eur" } else { stem };
    let mut word = String::with_capacity(stem.len() + ending.len());
    word.push_str(stem);
    word.push_str(ending);
    word
}

/// Where a determiner type gets its forms from.
#[derive(Debug, Clone, Copy)]
pub enum Paradigm {
    Article(&'static ArticleTable),
    PersonStem(&'static EndingTable),
    Stem(&'static str, &'static EndingTable),
}

pub const fn paradigm(determiner: DeterminerType) -> Paradigm {
    match determiner {
        DeterminerType::Definite => Paradigm::Article(&DEFINITE),
        DeterminerType::Indefinite => Paradigm::Article(&INDEFINITE),
        DeterminerType::Negation => Paradigm::Article(&NEGATION),
        DeterminerType::Possessive => Paradigm::PersonStem(&POSSESSIVE_ENDINGS),
        DeterminerType::Demonstrative => Paradigm::Stem(DEMONSTRATIVE_STEM, &DER_WORD_ENDINGS),
        DeterminerType::Interrogative => Paradigm::Stem(INTERROGATIVE_STEM, &DER_WORD_ENDINGS),
    }
}

/// Looks up a determiner surface. `Ok(None)` is an unavailable combination;
/// a possessive without a person is an invalid request.
pub fn determiner(
    determiner: DeterminerType,
    column: Column,
    case: Case,
    person: Option<Person>,
) -> Result<Option<String>, crate::MorphError> {
    let form = match paradigm(determiner) {
        Paradigm::Article(table) => table.get(column, case).map(String::from),
        Paradigm::PersonStem(endings) => {
            let person = person.ok_or_else(|| {
                crate::MorphError::InvalidGrammarParameter(String::from("possessive determiner requires a person"))
            })?;
            Some(attach(possessive_stem(person), endings[column.index()][case.index()]))
        }
        Paradigm::Stem(stem, endings) => Some(attach(stem, endings[column.index()][case.index()])),
    };
    Ok(form)
}
