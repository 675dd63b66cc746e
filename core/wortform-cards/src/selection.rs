use wortform_morph::NounParams;
use wortform_protocol::{PartOfSpeech, Person, Tense};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerbParams {
    pub tense: Tense,
    /// Carries the chosen pronoun variant (er/sie/es, sie/Sie).
    pub person: Person,
}

/// One choice of grammatical parameters on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection {
    Noun(NounParams),
    Verb(VerbParams),
}

impl Selection {
    pub fn part_of_speech(&self) -> PartOfSpeech {
        match self {
            Selection::Noun(_) => PartOfSpeech::Noun,
            Selection::Verb(_) => PartOfSpeech::Verb,
        }
    }
}

/// Per-card selection. Compared by value, owns nothing shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(Selection),
}

impl SelectionState {
    pub fn selection(&self) -> Option<&Selection> {
        match self {
            SelectionState::Unselected => None,
            SelectionState::Selected(selection) => Some(selection),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionState::Selected(_))
    }
}
