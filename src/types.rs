use serde::Serialize;
use serde_json::{Map, Value};

//==============================================================================
// Records
//==============================================================================

/// One converted row: header name → cell value.
///
/// `serde_json` is built with `preserve_order`, so keys keep the column order
/// of the header row they came from. That order is part of a record's identity
/// when deduplicating.
pub type Record = Map<String, Value>;

/// Build a record from `(key, value)` pairs, keeping their order.
///
/// ```
/// use royalbit_tabula::types::record;
///
/// let r = record([("Name", "Ana"), ("Age", "30")]);
/// assert_eq!(r.keys().collect::<Vec<_>>(), ["Name", "Age"]);
/// ```
pub fn record<K, V, I>(pairs: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

//==============================================================================
// Field Listing
//==============================================================================

/// What was on disk when a category's fields were listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetState {
    /// No document exists for the category yet
    Missing,
    /// A document exists but holds no records
    Empty,
    /// At least one record is stored
    Populated,
}

/// Field names of a category, taken from its first stored record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldListing {
    pub category: String,
    pub fields: Vec<String>,
    pub state: DatasetState,
}

impl FieldListing {
    /// Human readable summary, suitable for UI hints
    pub fn message(&self) -> String {
        match self.state {
            DatasetState::Populated => {
                format!("Using the existing fields of category \"{}\".", self.category)
            }
            DatasetState::Empty => format!(
                "Category \"{}\" has no records yet. Fill in the form to add the first one.",
                self.category
            ),
            DatasetState::Missing => format!(
                "No data file exists for category \"{}\". Fill in the form to add the first record.",
                self.category
            ),
        }
    }
}
