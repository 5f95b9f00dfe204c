use crate::consumers::ConsumerError;
use crate::i18n::{FormatArg, MessageLookup};
use std::marker::PhantomData;

/// Message key used when an event value is used outside its event.
pub const WRONG_EVENT_KEY: &str = "event values.wrong event";

/// An event of kind `kind` carrying a value of type `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<T> {
    pub kind: String,
    pub value: T,
}

impl<T> Event<T> {
    pub fn new(kind: impl Into<String>, value: T) -> Self {
        Self {
            kind: kind.into(),
            value,
        }
    }
}

/// A typed value that only exists within one kind of event.
#[derive(Debug, Clone)]
pub struct EventValue<T> {
    name_key: String,
    event_kind: String,
    _value: PhantomData<fn() -> T>,
}

impl<T> EventValue<T> {
    /// `name_key` is the message key of the value's display name.
    pub fn new(name_key: impl Into<String>, event_kind: impl Into<String>) -> Self {
        Self {
            name_key: name_key.into(),
            event_kind: event_kind.into(),
            _value: PhantomData,
        }
    }

    pub fn event_kind(&self) -> &str {
        &self.event_kind
    }

    pub fn display_name(&self, lookup: &impl MessageLookup) -> String {
        lookup.resolve_or_key(&self.name_key)
    }

    /// Check that the value is used inside its event.
    pub fn init(
        &self,
        current_event: &str,
        lookup: &impl MessageLookup,
    ) -> Result<(), ConsumerError> {
        if self.matches(current_event) {
            return Ok(());
        }
        Err(ConsumerError::WrongEvent(lookup.format(
            WRONG_EVENT_KEY,
            &[
                FormatArg::from(self.display_name(lookup)),
                FormatArg::from(self.event_kind.as_str()),
            ],
        )))
    }

    /// The event's value, if the event is of the right kind.
    pub fn get<'e>(&self, event: &'e Event<T>) -> Option<&'e T> {
        self.matches(&event.kind).then_some(&event.value)
    }

    fn matches(&self, kind: &str) -> bool {
        kind.eq_ignore_ascii_case(&self.event_kind)
    }
}
