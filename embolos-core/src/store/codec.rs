//! JSON encoding of the base record
//!
//! One typed wire struct in each direction. Decoding tolerates missing
//! fields (they default to empty string) and truncates overlong values
//! into the record; it never yields a half-filled result - any structural
//! failure rejects the whole document.

use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::record::BaseRecord;

/// Incoming shape: any subset of the four fields
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecordFields {
    paint_name: String,
    recipe_name: String,
    recipe_id: String,
    notes: String,
}

/// Outgoing shape: always all four fields
#[derive(Serialize)]
struct RecordFieldsRef<'a> {
    paint_name: &'a str,
    recipe_name: &'a str,
    recipe_id: &'a str,
    notes: &'a str,
}

/// Decode a JSON document into a record
///
/// Fails with [`Error::Malformed`] unless the document is a JSON object;
/// unknown keys are ignored.
pub fn decode(json: &str) -> Result<BaseRecord, Error> {
    let fields: RecordFields = serde_json::from_str(json).map_err(|_| Error::Malformed)?;
    let mut record = BaseRecord::new();
    record.set_paint_name(&fields.paint_name);
    record.set_recipe_name(&fields.recipe_name);
    record.set_recipe_id(&fields.recipe_id);
    record.set_notes(&fields.notes);
    Ok(record)
}

/// Encode a record as a JSON object with all four field names present
pub fn encode(record: &BaseRecord) -> Result<String, Error> {
    serde_json::to_string(&RecordFieldsRef {
        paint_name: record.paint_name(),
        recipe_name: record.recipe_name(),
        recipe_id: record.recipe_id(),
        notes: record.notes(),
    })
    .map_err(|_| Error::StorageFailure)
}
