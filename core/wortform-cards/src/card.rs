use log::debug;
use wortform_morph::{noun, verb, NounForm, NounParams, Surface, VerbForm};
use wortform_protocol::{Case, ConjugationSlot, DeterminerType, Entry, FormFlags, Number, Person, Tense};

use crate::config::EngineConfig;
use crate::selection::{Selection, SelectionState, VerbParams};
use crate::sinks::{HeadwordSink, OverrideMeta, PronunciationSink};
use crate::CardError;

/// The outcome of one selection, as pushed to the sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The inflected headword (noun or verb form, no determiner or subject).
    pub headword: Surface,
    /// What is spoken aloud, if anything can be.
    pub spoken: Option<String>,
    /// Spoken text lacks part of the phrase (e.g. no plural indefinite article).
    pub partial: bool,
    pub flags: FormFlags,
    pub meta: Option<OverrideMeta>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounCell {
    pub params: NounParams,
    pub form: NounForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbCell {
    pub tense: Tense,
    pub slot: ConjugationSlot,
    pub form: VerbForm,
}

/// A mounted word card: the read-only entry plus what the learner picked.
#[derive(Debug, Clone)]
pub struct WordCard {
    entry: Entry,
    state: SelectionState,
}

impl WordCard {
    pub fn new(entry: Entry) -> Self {
        Self {
            entry,
            state: SelectionState::Unselected,
        }
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Resolves a selection without touching the card state.
    pub fn resolve(&self, selection: &Selection) -> Result<Resolved, CardError> {
        match (&self.entry, selection) {
            (Entry::Noun(entry), Selection::Noun(params)) => {
                if !params.is_selectable() {
                    return Err(CardError::NotSelectable(*params));
                }
                let form = noun::resolve(entry, *params)?;
                let spoken = form.spoken_form();
                Ok(Resolved {
                    partial: spoken.as_ref().map(|s| s.partial).unwrap_or(false),
                    spoken: spoken.map(|s| s.text),
                    headword: form.noun,
                    flags: form.flags,
                    meta: Some(OverrideMeta {
                        case: Some(params.case),
                        number: Some(params.number),
                    }),
                })
            }
            (Entry::Verb(entry), Selection::Verb(params)) => {
                let form = verb::resolve(entry, params.tense, params.person);
                let spoken = verb::spoken_form(entry, params.tense, params.person, params.person.subject_pronoun());
                Ok(Resolved {
                    headword: form.surface,
                    spoken: spoken.surface.text().map(str::to_string),
                    partial: false,
                    flags: form.flags,
                    meta: None,
                })
            }
            (entry, selection) => Err(CardError::KindMismatch {
                card: entry.part_of_speech(),
                selection: selection.part_of_speech(),
            }),
        }
    }

    /// Moves to `selected(selection)` and pushes the result to both sinks.
    /// A rejected selection leaves the state and the sinks untouched.
    pub fn select<S>(&mut self, selection: Selection, config: &EngineConfig, sinks: &mut S) -> Result<Resolved, CardError>
    where
        S: PronunciationSink + HeadwordSink + ?Sized,
    {
        let resolved = self.resolve(&selection)?;
        debug!("card '{}': {:?} -> {:?}", self.entry.lemma(), self.state, selection);
        self.state = SelectionState::Selected(selection);

        if let Some(spoken) = &resolved.spoken {
            sinks.speak(spoken, &config.language_tag);
        }
        sinks.notify_headword_override(resolved.headword.text(), resolved.meta);
        Ok(resolved)
    }

    /// Back to `unselected`; clears the headword override.
    pub fn clear<S>(&mut self, sinks: &mut S)
    where
        S: HeadwordSink + ?Sized,
    {
        if self.state.is_selected() {
            debug!("card '{}': cleared", self.entry.lemma());
        }
        self.state = SelectionState::Unselected;
        sinks.notify_headword_override(None, None);
    }

    /// Every (number, case) cell for one determiner type, unavailable ones included.
    pub fn noun_grid(&self, determiner: DeterminerType, person: Option<Person>) -> Result<Vec<NounCell>, CardError> {
        let Entry::Noun(entry) = &self.entry else {
            return Err(CardError::KindMismatch {
                card: self.entry.part_of_speech(),
                selection: wortform_protocol::PartOfSpeech::Noun,
            });
        };
        let mut cells = Vec::with_capacity(Number::ALL.len() * Case::ALL.len());
        for number in Number::ALL {
            for case in Case::ALL {
                let mut params = NounParams::new(case, number, determiner);
                params.person = person;
                cells.push(NounCell {
                    params,
                    form: noun::resolve(entry, params)?,
                });
            }
        }
        Ok(cells)
    }

    /// Every (tense, slot) cell of the conjugation table.
    pub fn verb_grid(&self) -> Result<Vec<VerbCell>, CardError> {
        let Entry::Verb(entry) = &self.entry else {
            return Err(CardError::KindMismatch {
                card: self.entry.part_of_speech(),
                selection: wortform_protocol::PartOfSpeech::Verb,
            });
        };
        let cells = Tense::ALL
            .into_iter()
            .flat_map(|tense| ConjugationSlot::ALL.into_iter().map(move |slot| (tense, slot)))
            .map(|(tense, slot)| VerbCell {
                tense,
                slot,
                form: verb::resolve(entry, tense, slot.default_person()),
            })
            .collect();
        Ok(cells)
    }

    /// The same cell under the paired determiner type, for side-by-side display.
    pub fn comparison(&self, config: &EngineConfig) -> Result<Option<NounForm>, CardError> {
        let (Entry::Noun(entry), Some(Selection::Noun(params))) = (&self.entry, self.state.selection()) else {
            return Ok(None);
        };
        let Some(partner) = config.comparison.partner(params.determiner) else {
            return Ok(None);
        };
        let paired = NounParams {
            determiner: partner,
            ..*params
        };
        Ok(Some(noun::resolve(entry, paired)?))
    }
}

impl From<VerbParams> for Selection {
    fn from(params: VerbParams) -> Self {
        Selection::Verb(params)
    }
}

impl From<NounParams> for Selection {
    fn from(params: NounParams) -> Self {
        Selection::Noun(params)
    }
}
