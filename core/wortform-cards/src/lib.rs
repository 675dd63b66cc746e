pub mod card;
pub mod config;
pub mod selection;
pub mod sinks;

use hecs::{Entity, World};
use log::debug;
use thiserror::Error;
use wortform_morph::{MorphError, NounParams};
use wortform_protocol::{Entry, PartOfSpeech};

pub use card::{NounCell, Resolved, VerbCell, WordCard};
pub use config::{ComparisonPairing, EngineConfig};
pub use selection::{Selection, SelectionState, VerbParams};
pub use sinks::{EventLog, HeadwordSink, OverrideMeta, PronunciationSink, SinkEvent};

/// Handle to a mounted card.
pub type CardHandle = Entity;

#[derive(Debug, Error)]
pub enum CardError {
    #[error("{selection} selection on a {card} card")]
    KindMismatch { card: PartOfSpeech, selection: PartOfSpeech },
    #[error("combination is not selectable: {} {} {}", .0.determiner, .0.number, .0.case)]
    NotSelectable(NounParams),
    #[error(transparent)]
    Morph(#[from] MorphError),
    #[error("no card mounted for handle {0:?}")]
    NoSuchCard(CardHandle),
}

/// All word cards currently on screen. Each card is its own entity; nothing
/// is shared between them.
pub struct CardDeck {
    world: World,
    config: EngineConfig,
}

impl Default for CardDeck {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl CardDeck {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            world: World::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Number of mounted cards.
    pub fn len(&self) -> u32 {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    /// A card appears on screen: it starts `unselected`.
    pub fn mount(&mut self, entry: Entry) -> CardHandle {
        debug!("mounting card for '{}'", entry.lemma());
        self.world.spawn((WordCard::new(entry),))
    }

    /// The card is gone; its selection goes with it.
    pub fn unmount(&mut self, handle: CardHandle) -> Result<(), CardError> {
        self.world.despawn(handle).map_err(|_| CardError::NoSuchCard(handle))
    }

    pub fn card(&self, handle: CardHandle) -> Result<hecs::Ref<'_, WordCard>, CardError> {
        self.world
            .get::<&WordCard>(handle)
            .map_err(|_| CardError::NoSuchCard(handle))
    }

    pub fn select<S>(&mut self, handle: CardHandle, selection: Selection, sinks: &mut S) -> Result<Resolved, CardError>
    where
        S: PronunciationSink + HeadwordSink + ?Sized,
    {
        let mut card = self
            .world
            .get::<&mut WordCard>(handle)
            .map_err(|_| CardError::NoSuchCard(handle))?;
        card.select(selection, &self.config, sinks)
    }

    pub fn clear<S>(&mut self, handle: CardHandle, sinks: &mut S) -> Result<(), CardError>
    where
        S: HeadwordSink + ?Sized,
    {
        let mut card = self
            .world
            .get::<&mut WordCard>(handle)
            .map_err(|_| CardError::NoSuchCard(handle))?;
        card.clear(sinks);
        Ok(())
    }
}
