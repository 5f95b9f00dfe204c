//! Grammar-related constants shared with message consumers.

use bitflags::bitflags;

/// Key prefix of the structured grammatical gender data.
///
/// Entries in this section are exempt from completeness validation.
pub const GENDERS_SECTION: &str = "genders.";

bitflags! {
    /// Noun rendering flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NounFlags: u32 {
        const PLURAL = 1;
        const DEFINITE_ARTICLE = 2;
        const INDEFINITE_ARTICLE = 4;
    }
}
