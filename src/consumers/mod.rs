//! Components that consume localized strings.
//!
//! Neither component touches the language stores; all user-facing text goes
//! through [`MessageLookup`](crate::i18n::MessageLookup).

mod event_value;
mod stack_size;

pub use event_value::{Event, EventValue};
pub use stack_size::{ChangeMode, Inventory, Item, MaxStackSize, StackHolder};

use thiserror::Error;

/// Errors reported to script authors. Messages are already localized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsumerError {
    #[error("{0}")]
    WrongEvent(String),

    #[error("{0}")]
    Unsupported(String),
}
