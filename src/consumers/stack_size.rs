use crate::consumers::ConsumerError;
use crate::i18n::{FormatArg, MessageLookup};

/// Message key of the property's display name.
pub const PROPERTY_NAME_KEY: &str = "max stack.name";

/// Message key used when item stack sizes cannot be changed.
pub const UNSUPPORTED_KEY: &str = "max stack.unsupported";

/// Message key used for change modes the property does not accept.
pub const UNSUPPORTED_MODE_KEY: &str = "max stack.unsupported mode";

/// Smallest and largest stack size an item may be given.
pub const ITEM_STACK_RANGE: (i32, i32) = (1, 99);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeMode {
    Add,
    Remove,
    Set,
    Reset,
    Delete,
    RemoveAll,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    material_max_stack: i32,
    max_stack_override: Option<i32>,
}

impl Item {
    pub fn new(material_max_stack: i32) -> Self {
        Self {
            material_max_stack,
            max_stack_override: None,
        }
    }

    pub fn max_stack_size(&self) -> i32 {
        self.max_stack_override.unwrap_or(self.material_max_stack)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    default_max_stack: i32,
    max_stack: i32,
}

impl Inventory {
    pub fn new(default_max_stack: i32) -> Self {
        Self {
            default_max_stack,
            max_stack: default_max_stack,
        }
    }

    pub fn max_stack_size(&self) -> i32 {
        self.max_stack
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackHolder {
    Item(Item),
    Inventory(Inventory),
}

/// The "maximum stack size" property of items and inventories.
#[derive(Debug, Clone, Copy)]
pub struct MaxStackSize {
    /// Whether the host allows changing the stack size of individual items
    pub item_stack_size_changeable: bool,
}

impl MaxStackSize {
    pub fn new(item_stack_size_changeable: bool) -> Self {
        Self {
            item_stack_size_changeable,
        }
    }

    pub fn display_name(lookup: &impl MessageLookup) -> String {
        lookup.resolve_or_key(PROPERTY_NAME_KEY)
    }

    pub fn get(holder: &StackHolder) -> i32 {
        match holder {
            StackHolder::Item(item) => item.max_stack_size(),
            StackHolder::Inventory(inventory) => inventory.max_stack_size(),
        }
    }

    /// Check whether `mode` can be applied to holders of the given kind.
    pub fn accept_change(
        &self,
        mode: ChangeMode,
        holds_items: bool,
        lookup: &impl MessageLookup,
    ) -> Result<(), ConsumerError> {
        match mode {
            ChangeMode::Add | ChangeMode::Remove | ChangeMode::Set | ChangeMode::Reset => {
                if holds_items && !self.item_stack_size_changeable {
                    return Err(ConsumerError::Unsupported(lookup.format(UNSUPPORTED_KEY, &[])));
                }
                Ok(())
            }
            ChangeMode::Delete | ChangeMode::RemoveAll => Err(ConsumerError::Unsupported(
                lookup.format(
                    UNSUPPORTED_MODE_KEY,
                    &[FormatArg::from(Self::display_name(lookup))],
                ),
            )),
        }
    }

    /// Apply `mode` with `delta` to every holder. `delta` is ignored on reset.
    ///
    /// Item sizes are clamped to [`ITEM_STACK_RANGE`]; items are left alone
    /// when the host cannot change them.
    pub fn change(&self, holders: &mut [StackHolder], delta: i32, mode: ChangeMode) {
        for holder in holders.iter_mut() {
            match holder {
                StackHolder::Item(item) => {
                    if !self.item_stack_size_changeable {
                        continue;
                    }
                    item.max_stack_override = match mode {
                        ChangeMode::Reset => None,
                        _ => {
                            let size = apply(item.max_stack_size(), delta, mode);
                            Some(size.clamp(ITEM_STACK_RANGE.0, ITEM_STACK_RANGE.1))
                        }
                    };
                }
                StackHolder::Inventory(inventory) => {
                    inventory.max_stack = match mode {
                        ChangeMode::Reset => inventory.default_max_stack,
                        _ => apply(inventory.max_stack, delta, mode),
                    };
                }
            }
        }
    }
}

fn apply(current: i32, delta: i32, mode: ChangeMode) -> i32 {
    match mode {
        ChangeMode::Add => current.saturating_add(delta),
        ChangeMode::Remove => current.saturating_sub(delta),
        ChangeMode::Set => delta,
        _ => current,
    }
}
