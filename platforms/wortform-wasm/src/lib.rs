use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use rkyv::AlignedVec;
use wortform_cards::{CardDeck, CardError, CardHandle, EngineConfig, EventLog, Selection, SinkEvent, VerbParams};
use wortform_morph::{MorphError, NounParams, PLACEHOLDER};
use wortform_parser::{DictionaryRecord, IngestError};
use wortform_protocol::{DeterminerType, Entry, Person, Tense};

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn init_logging() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Grammar(#[from] MorphError),
    #[error("no lexicon loaded")]
    NoLexicon,
    #[error("lemma not in lexicon: {0}")]
    UnknownLemma(String),
    #[error("invalid card handle {0}")]
    InvalidHandle(u64),
}

/// A selection event as the UI sends it: grammar values as plain strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SelectionRequest {
    Noun {
        case: String,
        number: String,
        determiner: String,
        #[serde(default)]
        person: Option<String>,
    },
    Verb {
        tense: String,
        person: String,
    },
}

impl SelectionRequest {
    pub fn into_selection(self) -> Result<Selection, MorphError> {
        let selection = match self {
            SelectionRequest::Noun {
                case,
                number,
                determiner,
                person,
            } => {
                let mut params = NounParams::new(case.parse()?, number.parse()?, determiner.parse()?);
                params.person = person.map(|p| p.parse::<Person>()).transpose()?;
                Selection::Noun(params)
            }
            SelectionRequest::Verb { tense, person } => Selection::Verb(VerbParams {
                tense: tense.parse::<Tense>()?,
                person: person.parse()?,
            }),
        };
        Ok(selection)
    }
}

/// The structured response sent back to JavaScript after each selection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionReport {
    pub headword: String,
    pub available: bool,
    pub spoken: Option<String>,
    pub partial: bool,
    pub flags: String,
    /// Same cell under the paired determiner type (nouns only)
    pub comparison: Option<String>,
    /// Sink calls in the order they were made
    pub events: Vec<SinkEvent>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellReport {
    pub row: String,
    pub column: String,
    pub text: String,
    pub selectable: bool,
    pub available: bool,
}

fn card_handle(handle: u64) -> Result<CardHandle, SessionError> {
    CardHandle::from_bits(handle).ok_or(SessionError::InvalidHandle(handle))
}

/// Everything the binding does, minus the JS value conversions.
pub struct Session {
    deck: CardDeck,
    lexicon: Option<AlignedVec>,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            deck: CardDeck::new(config),
            lexicon: None,
        }
    }

    /// Applies to selections made from now on; mounted cards keep their state.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.deck.set_config(config);
    }

    /// Validates and keeps a compiled lexicon; returns its entry count.
    pub fn load_lexicon(&mut self, data: &[u8]) -> Result<usize, SessionError> {
        let aligned = wortform_parser::align(data);
        let count = wortform_parser::archived_lexicon(&aligned)?.entries.len();
        self.lexicon = Some(aligned);
        Ok(count)
    }

    fn mount(&mut self, entry: Entry) -> u64 {
        self.deck.mount(entry).to_bits().get()
    }

    pub fn mount_record(&mut self, record: DictionaryRecord) -> Result<u64, SessionError> {
        let entry = record.into_entry()?;
        Ok(self.mount(entry))
    }

    pub fn mount_lemma(&mut self, lemma: &str) -> Result<u64, SessionError> {
        let bytes = self.lexicon.as_ref().ok_or(SessionError::NoLexicon)?;
        let archived = wortform_parser::archived_lexicon(bytes)?;
        let entry = wortform_parser::find_lemma(archived, lemma)
            .and_then(|id| wortform_parser::extract_entry(archived, id))
            .ok_or_else(|| SessionError::UnknownLemma(lemma.to_string()))?;
        Ok(self.mount(entry))
    }

    pub fn select(&mut self, handle: u64, request: SelectionRequest) -> Result<SelectionReport, SessionError> {
        let handle = card_handle(handle)?;
        let selection = request.into_selection()?;
        let mut log = EventLog::new();
        let resolved = self.deck.select(handle, selection, &mut log)?;

        let comparison = self
            .deck
            .card(handle)?
            .comparison(self.deck.config())?
            .filter(|form| form.is_selectable())
            .and_then(|form| form.spoken_form())
            .map(|spoken| spoken.text);

        Ok(SelectionReport {
            headword: resolved.headword.display().to_string(),
            available: resolved.headword.is_available(),
            spoken: resolved.spoken,
            partial: resolved.partial,
            flags: format!("{:?}", resolved.flags),
            comparison,
            events: log.drain(),
        })
    }

    pub fn clear(&mut self, handle: u64) -> Result<Vec<SinkEvent>, SessionError> {
        let mut log = EventLog::new();
        self.deck.clear(card_handle(handle)?, &mut log)?;
        Ok(log.drain())
    }

    pub fn unmount(&mut self, handle: u64) -> Result<(), SessionError> {
        self.deck.unmount(card_handle(handle)?)?;
        Ok(())
    }

    /// The card's whole paradigm, for rendering the selectable table.
    pub fn grid(&self, handle: u64, determiner: Option<&str>, person: Option<&str>) -> Result<Vec<CellReport>, SessionError> {
        let card = self.deck.card(card_handle(handle)?)?;
        let cells = match card.entry() {
            Entry::Noun(_) => {
                let determiner = determiner.map(str::parse::<DeterminerType>).transpose().map_err(MorphError::from)?;
                let person = person.map(str::parse::<Person>).transpose().map_err(MorphError::from)?;
                card.noun_grid(determiner.unwrap_or(DeterminerType::Definite), person)?
                    .into_iter()
                    .map(|cell| {
                        let spoken = cell.form.spoken_form();
                        CellReport {
                            row: cell.params.number.to_string(),
                            column: cell.params.case.to_string(),
                            available: spoken.is_some(),
                            text: spoken.map(|s| s.text).unwrap_or_else(|| PLACEHOLDER.to_string()),
                            selectable: cell.form.is_selectable(),
                        }
                    })
                    .collect()
            }
            Entry::Verb(_) => card
                .verb_grid()?
                .into_iter()
                .map(|cell| CellReport {
                    row: cell.tense.to_string(),
                    column: cell.slot.label().to_string(),
                    text: cell.form.surface.display().to_string(),
                    selectable: true,
                    available: cell.form.surface.is_available(),
                })
                .collect(),
        };
        Ok(cells)
    }
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The Engine Instance running in the Browser
#[wasm_bindgen]
pub struct WortformEngine {
    session: Session,
}

#[wasm_bindgen]
impl WortformEngine {
    /// `config` may be omitted; missing fields fall back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WortformEngine, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            session: Session::new(config),
        })
    }

    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: EngineConfig = serde_wasm_bindgen::from_value(config)?;
        self.session.set_config(config);
        Ok(())
    }

    /// Accepts the bytes of a lexicon compiled by wortform-atlas (loaded via fetch() in JS)
    pub fn load_lexicon(&mut self, data: Vec<u8>) -> Result<usize, JsValue> {
        self.session.load_lexicon(&data).map_err(js_error)
    }

    pub fn mount_record(&mut self, record: JsValue) -> Result<u64, JsValue> {
        let record: DictionaryRecord = serde_wasm_bindgen::from_value(record)?;
        self.session.mount_record(record).map_err(js_error)
    }

    pub fn mount_lemma(&mut self, lemma: &str) -> Result<u64, JsValue> {
        self.session.mount_lemma(lemma).map_err(js_error)
    }

    pub fn select(&mut self, handle: u64, request: JsValue) -> Result<JsValue, JsValue> {
        let request: SelectionRequest = serde_wasm_bindgen::from_value(request)?;
        let report = self.session.select(handle, request).map_err(js_error)?;
        Ok(serde_wasm_bindgen::to_value(&report)?)
    }

    pub fn clear(&mut self, handle: u64) -> Result<JsValue, JsValue> {
        let events = self.session.clear(handle).map_err(js_error)?;
        Ok(serde_wasm_bindgen::to_value(&events)?)
    }

    pub fn unmount(&mut self, handle: u64) -> Result<(), JsValue> {
        self.session.unmount(handle).map_err(js_error)
    }

    pub fn grid(&self, handle: u64, determiner: Option<String>, person: Option<String>) -> Result<JsValue, JsValue> {
        let cells = self
            .session
            .grid(handle, determiner.as_deref(), person.as_deref())
            .map_err(js_error)?;
        Ok(serde_wasm_bindgen::to_value(&cells)?)
    }
}
