use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wortform_protocol::DeterminerType;

pub const DEFAULT_LANGUAGE_TAG: &str = "de-DE";

/// Which determiner type is shown next to the active one for comparison.
/// The default pairs are asymmetric: possessive sits next to negation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonPairing(BTreeMap<DeterminerType, DeterminerType>);

impl ComparisonPairing {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn partner(&self, active: DeterminerType) -> Option<DeterminerType> {
        self.0.get(&active).copied()
    }

    pub fn set(&mut self, active: DeterminerType, partner: DeterminerType) {
        self.0.insert(active, partner);
    }
}

impl Default for ComparisonPairing {
    fn default() -> Self {
        Self(BTreeMap::from([
            (DeterminerType::Definite, DeterminerType::Indefinite),
            (DeterminerType::Indefinite, DeterminerType::Definite),
            (DeterminerType::Negation, DeterminerType::Indefinite),
            (DeterminerType::Possessive, DeterminerType::Negation),
            (DeterminerType::Demonstrative, DeterminerType::Definite),
            (DeterminerType::Interrogative, DeterminerType::Definite),
        ]))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// BCP 47 tag handed to the pronunciation sink.
    pub language_tag: String,
    pub comparison: ComparisonPairing,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            language_tag: DEFAULT_LANGUAGE_TAG.to_string(),
            comparison: ComparisonPairing::default(),
        }
    }
}
