use serde::{Deserialize, Serialize};

use crate::config::ALL_OPTION;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Selection state for the two filter controls
// ---------------------------------------------------------------------------

/// The value of one selection control.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No restriction (control unset, empty, or the `All` sentinel).
    #[default]
    All,
    /// Exact, case-sensitive match on the column value.
    Only(String),
}

impl Selection {
    /// Interpret a raw control value.
    pub fn from_control(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Selection::All,
            Some(v) if v == ALL_OPTION => Selection::All,
            Some(v) => Selection::Only(v.to_string()),
        }
    }

    /// The concrete value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Only(v) => Some(v.as_str()),
        }
    }

    /// Whether a cell passes this selection. Absent cells never match a
    /// concrete value.
    pub fn matches(&self, cell: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(v) => cell == Some(v.as_str()),
        }
    }
}

/// Both controls together, as submitted by the page on every change.
/// Concrete selections combine with AND; a missing field is `All`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    #[serde(with = "control_value")]
    pub enslaver: Selection,
    #[serde(with = "control_value")]
    pub data_source: Selection,
}

#[cfg(test)]
impl FilterSelection {
    pub fn new(enslaver: Selection, data_source: Selection) -> Self {
        Self {
            enslaver,
            data_source,
        }
    }
}

/// A selection goes over the wire as the control value (`null` for All).
mod control_value {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Selection;

    pub fn serialize<S: Serializer>(sel: &Selection, s: S) -> Result<S::Ok, S::Error> {
        match sel.value() {
            Some(v) => s.serialize_some(v),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Selection, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(Selection::from_control(raw.as_deref()))
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Return the records that pass both selections, in dataset order.
///
/// The dataset is only borrowed; the returned view can be shared freely.
pub fn filter_records<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> Vec<&'a Record> {
    dataset
        .records()
        .iter()
        .filter(|r| {
            selection.enslaver.matches(r.enslaver.as_deref())
                && selection.data_source.matches(r.data_source.as_deref())
        })
        .collect()
}
