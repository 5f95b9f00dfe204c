//! Language change observers with two priority tiers.

use crate::i18n::lookup::LanguageView;
use anyhow::Result;
use std::fmt;

/// Notification tier. Listeners in `Earliest` always run before `Normal` ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerPriority {
    Earliest,
    Normal,
}

/// Something that reacts to the language state changing.
///
/// Implementations must not switch languages or register listeners from
/// inside `on_language_change`.
pub trait LanguageChangeListener: Send {
    fn on_language_change(&self, view: &LanguageView<'_>) -> Result<()>;
}

impl<F> LanguageChangeListener for F
where
    F: Fn(&LanguageView<'_>) -> Result<()> + Send,
{
    fn on_language_change(&self, view: &LanguageView<'_>) -> Result<()> {
        self(view)
    }
}

/// Identifies a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// A listener invocation that returned an error.
#[derive(Debug)]
pub struct ListenerFailure {
    pub handle: ListenerHandle,
    pub priority: ListenerPriority,
    pub error: anyhow::Error,
}

struct ListenerEntry {
    handle: ListenerHandle,
    priority: ListenerPriority,
    listener: Box<dyn LanguageChangeListener>,
}

/// Ordered listener list: by tier, then by registration order within a tier.
#[derive(Default)]
pub struct ListenerRegistry {
    entries: Vec<ListenerEntry>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `listener` at the end of its tier's segment.
    pub fn register(
        &mut self,
        listener: Box<dyn LanguageChangeListener>,
        priority: ListenerPriority,
    ) -> ListenerHandle {
        let handle = ListenerHandle(self.next_id);
        self.next_id += 1;

        let position = self.entries.partition_point(|e| e.priority <= priority);
        self.entries.insert(
            position,
            ListenerEntry {
                handle,
                priority,
                listener,
            },
        );
        handle
    }

    /// Invoke every listener in order. A failing listener does not stop the
    /// remaining ones; failures are returned to the caller.
    pub fn notify_all(&self, view: &LanguageView<'_>) -> Vec<ListenerFailure> {
        self.entries
            .iter()
            .filter_map(|entry| Self::invoke(entry, view))
            .collect()
    }

    /// Invoke a single listener.
    pub fn notify_one(
        &self,
        handle: ListenerHandle,
        view: &LanguageView<'_>,
    ) -> Option<ListenerFailure> {
        self.entries
            .iter()
            .find(|entry| entry.handle == handle)
            .and_then(|entry| Self::invoke(entry, view))
    }

    fn invoke(entry: &ListenerEntry, view: &LanguageView<'_>) -> Option<ListenerFailure> {
        entry
            .listener
            .on_language_change(view)
            .err()
            .map(|error| ListenerFailure {
                handle: entry.handle,
                priority: entry.priority,
                error,
            })
    }

    /// Handles in notification order.
    pub fn order(&self) -> Vec<ListenerHandle> {
        self.entries.iter().map(|e| e.handle).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field(
                "entries",
                &self
                    .entries
                    .iter()
                    .map(|e| (e.handle, e.priority))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
