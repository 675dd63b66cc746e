use serde::Serialize;
use wortform_protocol::{Case, Number};

/// Grammatical context attached to a headword override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<Case>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
}

/// Fire-and-forget speech output. Implementations own cancellation of
/// earlier, still-playing requests.
pub trait PronunciationSink {
    fn speak(&mut self, text: &str, language_tag: &str);
}

/// Receives the inflected headword to highlight elsewhere; `None` clears it.
pub trait HeadwordSink {
    fn notify_headword_override(&mut self, text: Option<&str>, meta: Option<OverrideMeta>);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SinkEvent {
    #[serde(rename_all = "camelCase")]
    Speak { text: String, language_tag: String },
    #[serde(rename_all = "camelCase")]
    HeadwordOverride {
        text: Option<String>,
        meta: Option<OverrideMeta>,
    },
}

/// Buffers sink calls in order, for hosts that drain them after each event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<SinkEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }
}

impl PronunciationSink for EventLog {
    fn speak(&mut self, text: &str, language_tag: &str) {
        self.events.push(SinkEvent::Speak {
            text: text.to_string(),
            language_tag: language_tag.to_string(),
        });
    }
}

impl HeadwordSink for EventLog {
    fn notify_headword_override(&mut self, text: Option<&str>, meta: Option<OverrideMeta>) {
        self.events.push(SinkEvent::HeadwordOverride {
            text: text.map(str::to_string),
            meta,
        });
    }
}
