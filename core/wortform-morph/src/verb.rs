use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use log::debug;
use wortform_protocol::{FormFlags, Person, Tense, VerbEntry};

use crate::Surface;

/// Known separable prefixes, longest first so "zurück" wins over "zu".
pub const SEPARABLE_PREFIXES: [&str; 20] = [
    "zusammen", "nieder", "weiter", "zurück", "fest", "fort", "nach", "auf", "aus", "bei", "ein", "her", "hin",
    "los", "mit", "vor", "weg", "ab", "an", "zu",
];

const REFLEXIVE_MARKER: &str = "sich";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbForm {
    pub surface: Surface,
    pub flags: FormFlags,
}

impl VerbForm {
    fn missing() -> Self {
        Self {
            surface: Surface::Missing,
            flags: FormFlags::MISSING_DATA,
        }
    }
}

/// Accusative reflexive pronoun agreeing with the subject.
pub const fn reflexive_pronoun(person: Person) -> &'static str {
    match person {
        Person::FirstSingular => "mich",
        Person::SecondSingular => "dich",
        Person::FirstPlural => "uns",
        Person::SecondPlural => "euch",
        Person::ThirdSingularMasculine
        | Person::ThirdSingularFeminine
        | Person::ThirdSingularNeuter
        | Person::ThirdPlural
        | Person::Formal => "sich",
    }
}

/// Drops a leading "sich " marker from a lemma.
pub fn strip_reflexive_marker(lemma: &str) -> &str {
    let lemma = lemma.trim_start();
    match lemma.split_once(char::is_whitespace) {
        Some((head, rest)) if head.eq_ignore_ascii_case(REFLEXIVE_MARKER) => rest.trim_start(),
        _ => lemma,
    }
}

/// Finds the separable prefix of the lemma's last word, if any.
pub fn detect_prefix(lemma: &str) -> Option<&'static str> {
    let word = strip_reflexive_marker(lemma).split_whitespace().last()?.to_lowercase();
    SEPARABLE_PREFIXES
        .iter()
        .copied()
        .find(|prefix| word.len() > prefix.len() && word.starts_with(prefix))
}

/// The prefix to detach: only when upstream says separable *and* the lemma agrees.
pub fn effective_prefix(entry: &VerbEntry, flags: &mut FormFlags) -> Option<&'static str> {
    if !entry.separable {
        return None;
    }
    let prefix = detect_prefix(&entry.lemma);
    if prefix.is_none() {
        debug!("'{}' is flagged separable but has no known prefix; treating as inseparable", entry.lemma);
        flags.insert(FormFlags::SEPARABLE_OVERRIDDEN);
    }
    prefix
}

/// Lowercased token with punctuation removed, for pronoun comparison.
pub fn normalize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether `word` occurs in `text` as a standalone token.
pub fn contains_token(text: &str, word: &str) -> bool {
    text.split_whitespace().any(|token| normalize_token(token) == word)
}

/// Splits off a prefix at the front of `word`, ignoring case.
fn strip_prefix_ignore_case<'a>(word: &'a str, prefix: &str) -> Option<(&'a str, &'a str)> {
    let mut chars = word.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    let split = chars.next().map(|(index, _)| index)?;
    Some(word.split_at(split))
}

/// `(core, suffix)` of a present/preterite form of a separable verb.
fn split_separable(tokens: &[&str], prefix: &str, flags: &mut FormFlags) -> (String, String) {
    if let [head @ .., last] = tokens {
        if !head.is_empty() && normalize_token(last) == prefix {
            flags.insert(FormFlags::PREFIX_DETACHED);
            return (head.join(" "), String::from(*last));
        }
    }

    if let Some((first, rest)) = tokens.split_first() {
        if let Some((glued, remainder)) = strip_prefix_ignore_case(first, prefix) {
            debug!("unglued prefix '{}' from legacy form '{}'", glued, first);
            flags.insert(FormFlags::PREFIX_UNGLUED);
            let mut core = Vec::with_capacity(tokens.len());
            core.push(remainder);
            core.extend_from_slice(rest);
            return (core.join(" "), String::from(glued));
        }
    }

    (tokens.join(" "), String::new())
}

fn compose(parts: &[&str]) -> String {
    parts
        .iter()
        .copied()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_perfect(entry: &VerbEntry, person: Person, raw: &str, tokens: &[&str], flags: &mut FormFlags) -> String {
    if !entry.reflexive {
        return tokens.join(" ");
    }
    let pronoun = reflexive_pronoun(person);
    if contains_token(raw, pronoun) {
        debug!("'{}' already carries '{}'", raw, pronoun);
        flags.insert(FormFlags::PRONOUN_DEDUPLICATED);
        return tokens.join(" ");
    }
    flags.insert(FormFlags::PRONOUN_INSERTED);
    let (auxiliary, participle) = tokens.split_at(1);
    let mut parts = Vec::with_capacity(tokens.len() + 1);
    parts.extend_from_slice(auxiliary);
    parts.push(pronoun);
    parts.extend_from_slice(participle);
    parts.join(" ")
}

fn resolve_simple(entry: &VerbEntry, person: Person, raw: &str, tokens: &[&str], flags: &mut FormFlags) -> String {
    let (core, suffix) = match effective_prefix(entry, flags) {
        Some(prefix) => split_separable(tokens, prefix, flags),
        None => (tokens.join(" "), String::new()),
    };

    let mut pronoun = "";
    if entry.reflexive {
        let candidate = reflexive_pronoun(person);
        if contains_token(&core, candidate) || contains_token(&suffix, candidate) || contains_token(raw, candidate) {
            debug!("'{}' already carries '{}'", raw, candidate);
            flags.insert(FormFlags::PRONOUN_DEDUPLICATED);
        } else {
            flags.insert(FormFlags::PRONOUN_INSERTED);
            pronoun = candidate;
        }
    }

    compose(&[&core, pronoun, &suffix])
}

/// Recomposes the stored form for `(tense, person)` into clause order.
pub fn resolve(entry: &VerbEntry, tense: Tense, person: Person) -> VerbForm {
    let Some(raw) = entry.raw_form(tense, person.slot()) else {
        return VerbForm::missing();
    };
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.is_empty() {
        return VerbForm::missing();
    }

    let mut flags = FormFlags::empty();
    let surface = match tense {
        Tense::Perfect => resolve_perfect(entry, person, raw, &tokens, &mut flags),
        Tense::Present | Tense::Preterite => resolve_simple(entry, person, raw, &tokens, &mut flags),
    };

    VerbForm {
        surface: Surface::Form(surface),
        flags,
    }
}

/// Like [`resolve`], with the subject pronoun in front ("ich bereite mich vor").
pub fn spoken_form(entry: &VerbEntry, tense: Tense, person: Person, subject_pronoun: &str) -> VerbForm {
    let mut form = resolve(entry, tense, person);
    let subject = subject_pronoun.trim();
    if let Surface::Form(surface) = &form.surface {
        if !subject.is_empty() {
            form.surface = Surface::Form(format!("{} {}", subject, surface));
        }
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use wortform_protocol::ConjugationSlot;

    fn verb(lemma: &str, separable: bool, reflexive: bool, forms: &[(Tense, ConjugationSlot, &str)]) -> VerbEntry {
        let mut entry = VerbEntry::new(lemma);
        entry.separable = separable;
        entry.reflexive = reflexive;
        for (tense, slot, form) in forms {
            entry.set_raw_form(*tense, *slot, *form);
        }
        entry
    }

    fn surface(form: VerbForm) -> String {
        match form.surface {
            Surface::Form(text) => text,
            other => panic!("expected a form, got {:?}", other),
        }
    }

    #[test]
    fn test_prefix_list_is_longest_first() {
        for (i, shorter) in SEPARABLE_PREFIXES.iter().enumerate() {
            for longer in &SEPARABLE_PREFIXES[i + 1..] {
                assert!(
                    !(longer.starts_with(shorter) && longer.len() > shorter.len()),
                    "'{}' must come before '{}'",
                    longer,
                    shorter
                );
            }
        }
    }

    #[test]
    fn test_detect_prefix() {
        assert_eq!(detect_prefix("aufstehen"), Some("auf"));
        assert_eq!(detect_prefix("sich vorbereiten"), Some("vor"));
        assert_eq!(detect_prefix("Sich zurückziehen"), Some("zurück"));
        assert_eq!(detect_prefix("zusammenarbeiten"), Some("zusammen"));
        assert_eq!(detect_prefix("weitergehen"), Some("weiter"));
        assert_eq!(detect_prefix("wegfahren"), Some("weg"));
        assert_eq!(detect_prefix("verstehen"), None);
        assert_eq!(detect_prefix("sich"), None);
        assert_eq!(detect_prefix(""), None);
    }

    #[test]
    fn test_separable_present_already_ordered() {
        let entry = verb("aufstehen", true, false, &[(Tense::Present, ConjugationSlot::Ich, "stehe auf")]);
        let form = resolve(&entry, Tense::Present, Person::FirstSingular);
        assert!(form.flags.contains(FormFlags::PREFIX_DETACHED));
        assert_eq!(surface(form), "stehe auf");
    }

    #[test]
    fn test_separable_present_glued_legacy_form() {
        let entry = verb("aufstehen", true, false, &[(Tense::Present, ConjugationSlot::Ich, "aufstehe")]);
        let form = resolve(&entry, Tense::Present, Person::FirstSingular);
        assert!(form.flags.contains(FormFlags::PREFIX_UNGLUED));
        assert_eq!(surface(form), "stehe auf");
    }

    #[test]
    fn test_separable_flag_without_prefix_is_ignored() {
        let entry = verb("verstehen", true, false, &[(Tense::Present, ConjugationSlot::Ich, "verstehe")]);
        let form = resolve(&entry, Tense::Present, Person::FirstSingular);
        assert!(form.flags.contains(FormFlags::SEPARABLE_OVERRIDDEN));
        assert_eq!(surface(form), "verstehe");
    }

    #[test]
    fn test_unflagged_prefix_is_left_alone() {
        // "an" matches but upstream says inseparable.
        let entry = verb("antworten", false, false, &[(Tense::Preterite, ConjugationSlot::Ich, "antwortete")]);
        assert_eq!(surface(resolve(&entry, Tense::Preterite, Person::FirstSingular)), "antwortete");
    }

    #[test]
    fn test_perfect_reflexive_inserts_pronoun() {
        let entry = verb("sich freuen", false, true, &[(Tense::Perfect, ConjugationSlot::Ich, "habe gefreut")]);
        let form = resolve(&entry, Tense::Perfect, Person::FirstSingular);
        assert!(form.flags.contains(FormFlags::PRONOUN_INSERTED));
        assert_eq!(surface(form), "habe mich gefreut");
    }

    #[test]
    fn test_perfect_reflexive_dedup() {
        let entry = verb("sich freuen", false, true, &[(Tense::Perfect, ConjugationSlot::Wir, "haben uns  gefreut")]);
        let form = resolve(&entry, Tense::Perfect, Person::FirstPlural);
        assert!(form.flags.contains(FormFlags::PRONOUN_DEDUPLICATED));
        assert_eq!(surface(form), "haben uns gefreut");
    }

    #[test]
    fn test_separable_reflexive_present() {
        let entry = verb(
            "sich vorbereiten",
            true,
            true,
            &[(Tense::Present, ConjugationSlot::Du, "bereitest vor")],
        );
        assert_eq!(surface(resolve(&entry, Tense::Present, Person::SecondSingular)), "bereitest dich vor");
    }

    #[test]
    fn test_glued_reflexive_with_embedded_pronoun() {
        let entry = verb(
            "sich vorbereiten",
            true,
            true,
            &[(Tense::Present, ConjugationSlot::Du, "vorbereitest dich")],
        );
        assert_eq!(surface(resolve(&entry, Tense::Present, Person::SecondSingular)), "bereitest dich vor");
    }

    #[test]
    fn test_reflexive_dedup_is_idempotent() {
        let entry = verb("sich waschen", false, true, &[(Tense::Present, ConjugationSlot::Ich, "wasche mich")]);
        let form = resolve(&entry, Tense::Present, Person::FirstSingular);
        assert!(form.flags.contains(FormFlags::PRONOUN_DEDUPLICATED));
        assert_eq!(surface(form), "wasche mich");
    }

    #[test]
    fn test_dedup_ignores_case_and_punctuation() {
        let entry = verb("sich waschen", false, true, &[(Tense::Present, ConjugationSlot::Ich, "wasche (Mich)")]);
        assert_eq!(surface(resolve(&entry, Tense::Present, Person::FirstSingular)), "wasche (Mich)");
    }

    #[test]
    fn test_third_person_variants_share_slot() {
        let entry = verb("sich freuen", false, true, &[(Tense::Present, ConjugationSlot::ErSieEs, "freut")]);
        for person in [
            Person::ThirdSingularMasculine,
            Person::ThirdSingularFeminine,
            Person::ThirdSingularNeuter,
        ] {
            assert_eq!(surface(resolve(&entry, Tense::Present, person)), "freut sich");
        }
    }

    #[test]
    fn test_missing_raw_form() {
        let entry = verb("gehen", false, false, &[(Tense::Present, ConjugationSlot::Ich, "  ")]);
        let form = resolve(&entry, Tense::Present, Person::FirstSingular);
        assert_eq!(form.surface, Surface::Missing);
        assert!(form.flags.contains(FormFlags::MISSING_DATA));
        assert_eq!(resolve(&entry, Tense::Perfect, Person::FirstSingular).surface, Surface::Missing);
    }

    #[test]
    fn test_spoken_form_prepends_subject() {
        let entry = verb(
            "sich vorbereiten",
            true,
            true,
            &[(Tense::Present, ConjugationSlot::Ich, "bereite vor")],
        );
        let form = spoken_form(&entry, Tense::Present, Person::FirstSingular, "ich");
        assert_eq!(surface(form), "ich bereite mich vor");

        let form = spoken_form(&entry, Tense::Present, Person::FirstSingular, "");
        assert_eq!(surface(form), "bereite mich vor");
    }
}
