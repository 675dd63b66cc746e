use alloc::format;
use alloc::string::String;

use wortform_protocol::{Case, DeterminerType, FormFlags, Gender, NounEntry, Number, Person};

use crate::tables::{self, Column};
use crate::{MorphError, Surface};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y', 'ä', 'ö', 'ü'];

/// The grammatical coordinates of one declension cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NounParams {
    pub case: Case,
    pub number: Number,
    pub determiner: DeterminerType,
    /// Owner for possessive determiners; ignored otherwise.
    pub person: Option<Person>,
}

impl NounParams {
    pub const fn new(case: Case, number: Number, determiner: DeterminerType) -> Self {
        Self {
            case,
            number,
            determiner,
            person: None,
        }
    }

    pub const fn with_person(mut self, person: Person) -> Self {
        self.person = Some(person);
        self
    }

    /// Combinations the UI must grey out instead of offering.
    pub const fn is_selectable(&self) -> bool {
        self.determiner.has_plural() || !matches!(self.number, Number::Plural)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounForm {
    pub determiner: Surface,
    pub noun: Surface,
    pub flags: FormFlags,
}

/// What gets spoken aloud. `partial` marks a bare noun without its determiner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenForm {
    pub text: String,
    pub partial: bool,
}

impl NounForm {
    /// `None` when there is no noun to speak.
    pub fn spoken_form(&self) -> Option<SpokenForm> {
        let noun = self.noun.text()?;
        match self.determiner.text() {
            Some(determiner) => Some(SpokenForm {
                text: format!("{} {}", determiner, noun),
                partial: false,
            }),
            None => Some(SpokenForm {
                text: String::from(noun),
                partial: true,
            }),
        }
    }

    pub fn is_selectable(&self) -> bool {
        !self.flags.contains(FormFlags::UNAVAILABLE)
    }
}

fn ends_in_vowel(word: &str) -> bool {
    word.chars()
        .last()
        .map(|c| c.to_lowercase().any(|lower| VOWELS.contains(&lower)))
        .unwrap_or(false)
}

/// Genitive singular of masculine and neuter nouns: "-s" after a vowel, "-es" otherwise.
pub fn genitive_singular(lemma: &str) -> String {
    if ends_in_vowel(lemma) {
        format!("{}s", lemma)
    } else {
        format!("{}es", lemma)
    }
}

/// Dative plural gains an "-n" unless the plural already ends in "n" or "s".
pub fn dative_plural(plural: &str) -> String {
    if plural.ends_with('n') || plural.ends_with('s') {
        String::from(plural)
    } else {
        format!("{}n", plural)
    }
}

fn noun_surface(entry: &NounEntry, case: Case, number: Number, flags: &mut FormFlags) -> Surface {
    match number {
        Number::Singular => {
            if case == Case::Genitive && entry.gender != Gender::Feminine {
                flags.insert(FormFlags::GENITIVE_SUFFIX);
                Surface::Form(genitive_singular(&entry.lemma))
            } else {
                Surface::Form(entry.lemma.clone())
            }
        }
        Number::Plural => match entry.plural_lemma.as_deref().map(str::trim) {
            Some(plural) if !plural.is_empty() => {
                if case == Case::Dative {
                    let form = dative_plural(plural);
                    if form.len() != plural.len() {
                        flags.insert(FormFlags::DATIVE_PLURAL_N);
                    }
                    Surface::Form(form)
                } else {
                    Surface::Form(String::from(plural))
                }
            }
            _ => {
                flags.insert(FormFlags::MISSING_DATA);
                Surface::Missing
            }
        },
    }
}

/// Declines a noun together with its determiner.
pub fn resolve(entry: &NounEntry, params: NounParams) -> Result<NounForm, MorphError> {
    let mut flags = FormFlags::empty();
    let column = Column::of(entry.gender, params.number);

    let determiner = match tables::determiner(params.determiner, column, params.case, params.person)? {
        Some(word) => Surface::Form(word),
        None => {
            flags.insert(FormFlags::UNAVAILABLE | FormFlags::PARTIAL);
            Surface::Unavailable
        }
    };
    let noun = noun_surface(entry, params.case, params.number, &mut flags);

    Ok(NounForm { determiner, noun, flags })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn noun(lemma: &str, gender: Gender, plural: Option<&str>) -> NounEntry {
        NounEntry {
            lemma: lemma.to_string(),
            gender,
            plural_lemma: plural.map(str::to_string),
        }
    }

    #[test]
    fn test_definite_genitive_masculine() {
        let tisch = noun("Tisch", Gender::Masculine, Some("Tische"));
        let form = resolve(&tisch, NounParams::new(Case::Genitive, Number::Singular, DeterminerType::Definite)).unwrap();
        assert_eq!(form.spoken_form().unwrap().text, "des Tisches");
        assert!(form.flags.contains(FormFlags::GENITIVE_SUFFIX));
    }

    #[test]
    fn test_genitive_after_vowel() {
        let auto = noun("Auto", Gender::Neuter, Some("Autos"));
        let form = resolve(&auto, NounParams::new(Case::Genitive, Number::Singular, DeterminerType::Indefinite)).unwrap();
        assert_eq!(form.spoken_form().unwrap().text, "eines Autos");
    }

    #[test]
    fn test_feminine_genitive_unchanged() {
        let lampe = noun("Lampe", Gender::Feminine, Some("Lampen"));
        let form = resolve(&lampe, NounParams::new(Case::Genitive, Number::Singular, DeterminerType::Definite)).unwrap();
        assert_eq!(form.noun, Surface::Form("Lampe".to_string()));
        assert!(!form.flags.contains(FormFlags::GENITIVE_SUFFIX));
    }

    #[test]
    fn test_dative_plural() {
        let kind = noun("Kind", Gender::Neuter, Some("Kinder"));
        let form = resolve(&kind, NounParams::new(Case::Dative, Number::Plural, DeterminerType::Definite)).unwrap();
        assert_eq!(form.spoken_form().unwrap().text, "den Kindern");
        assert!(form.flags.contains(FormFlags::DATIVE_PLURAL_N));

        let frau = noun("Frau", Gender::Feminine, Some("Frauen"));
        let form = resolve(&frau, NounParams::new(Case::Dative, Number::Plural, DeterminerType::Negation)).unwrap();
        assert_eq!(form.spoken_form().unwrap().text, "keinen Frauen");

        let auto = noun("Auto", Gender::Neuter, Some("Autos"));
        let form = resolve(&auto, NounParams::new(Case::Dative, Number::Plural, DeterminerType::Demonstrative)).unwrap();
        assert_eq!(form.spoken_form().unwrap().text, "diesen Autos");
        assert!(!form.flags.contains(FormFlags::DATIVE_PLURAL_N));
    }

    #[test]
    fn test_indefinite_plural_is_unavailable() {
        let kind = noun("Kind", Gender::Neuter, Some("Kinder"));
        for case in Case::ALL {
            let params = NounParams::new(case, Number::Plural, DeterminerType::Indefinite);
            assert!(!params.is_selectable());
            let form = resolve(&kind, params).unwrap();
            assert_eq!(form.determiner, Surface::Unavailable);
            assert!(!form.is_selectable());
            let spoken = form.spoken_form().unwrap();
            assert!(spoken.partial);
            assert!(spoken.text.starts_with("Kinder"));
        }
    }

    #[test]
    fn test_missing_plural_placeholder() {
        let milch = noun("Milch", Gender::Feminine, None);
        let form = resolve(&milch, NounParams::new(Case::Nominative, Number::Plural, DeterminerType::Definite)).unwrap();
        assert_eq!(form.noun, Surface::Missing);
        assert_eq!(form.noun.display(), crate::PLACEHOLDER);
        assert!(form.flags.contains(FormFlags::MISSING_DATA));
        assert_eq!(form.spoken_form(), None);
    }

    #[test]
    fn test_possessive_phrase() {
        let hund = noun("Hund", Gender::Masculine, Some("Hunde"));
        let params = NounParams::new(Case::Accusative, Number::Singular, DeterminerType::Possessive)
            .with_person(Person::SecondPlural);
        let form = resolve(&hund, params).unwrap();
        assert_eq!(form.spoken_form().unwrap().text, "euren Hund");

        let missing_person = NounParams::new(Case::Accusative, Number::Singular, DeterminerType::Possessive);
        assert!(resolve(&hund, missing_person).is_err());
    }
}
