//! The persisted metadata record
//!
//! Fixed-capacity text fields with hard byte caps, so one record has a
//! known worst-case footprint on the storage medium.
//! Setters truncate on overflow (at character boundaries), so an oversized
//! value can never corrupt an adjacent field.

use heapless::String;

/// Capacity of the paint name field (chars of ASCII / bytes of UTF-8)
pub const MAX_PAINT_NAME: usize = 31;
/// Capacity of the recipe name field
pub const MAX_RECIPE_NAME: usize = 31;
/// Capacity of the recipe id field
pub const MAX_RECIPE_ID: usize = 23;
/// Capacity of the notes field
pub const MAX_NOTES: usize = 95;

/// Metadata describing one identified syringe base
///
/// Empty string is a valid value for every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaseRecord {
    paint_name: String<MAX_PAINT_NAME>,
    recipe_name: String<MAX_RECIPE_NAME>,
    recipe_id: String<MAX_RECIPE_ID>,
    notes: String<MAX_NOTES>,
}

impl BaseRecord {
    /// A record with every field empty
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paint_name(&self) -> &str {
        &self.paint_name
    }

    pub fn recipe_name(&self) -> &str {
        &self.recipe_name
    }

    pub fn recipe_id(&self) -> &str {
        &self.recipe_id
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Set the paint name, truncating on overflow
    pub fn set_paint_name(&mut self, value: &str) {
        self.paint_name = truncated(value);
    }

    /// Set the recipe name, truncating on overflow
    pub fn set_recipe_name(&mut self, value: &str) {
        self.recipe_name = truncated(value);
    }

    /// Set the recipe id, truncating on overflow
    pub fn set_recipe_id(&mut self, value: &str) {
        self.recipe_id = truncated(value);
    }

    /// Set the notes, truncating on overflow
    pub fn set_notes(&mut self, value: &str) {
        self.notes = truncated(value);
    }
}

/// Copy as much of `value` as fits, never splitting a character
fn truncated<const N: usize>(value: &str) -> String<N> {
    let mut out = String::new();
    for ch in value.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_are_valid() {
        let record = BaseRecord::new();
        assert_eq!(record.paint_name(), "");
        assert_eq!(record.notes(), "");
    }

    #[test]
    fn test_overflow_truncates_without_corrupting_neighbours() {
        let mut record = BaseRecord::new();
        record.set_recipe_name("short");
        record.set_recipe_id("0123456789012345678901234567890123456789");
        record.set_notes("untouched");

        assert_eq!(record.recipe_id().len(), MAX_RECIPE_ID);
        assert_eq!(record.recipe_id(), "01234567890123456789012");
        assert_eq!(record.recipe_name(), "short");
        assert_eq!(record.notes(), "untouched");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 'é' is two bytes; 15 of them fit in 31 bytes, the 16th must not split
        let long = "éééééééééééééééééééé";
        let mut record = BaseRecord::new();
        record.set_paint_name(long);
        assert!(record.paint_name().len() <= MAX_PAINT_NAME);
        assert!(record.paint_name().chars().all(|c| c == 'é'));
    }
}
