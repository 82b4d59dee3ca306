use serde::Serialize;

use crate::data::filter::Selection;
use crate::data::model::{distinct, Record};

/// Contents of the scrollable name panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameList {
    pub heading: String,
    /// Distinct non-null names, first-seen order.
    pub names: Vec<String>,
}

pub fn name_list(records: &[&Record], enslaver: &Selection) -> NameList {
    let heading = match enslaver.value() {
        Some(name) => format!("Enslaved People Listed by Name under {name}"),
        None => "Enslaved People Listed by Name (All Records)".to_string(),
    };
    NameList {
        heading,
        names: distinct(records.iter().map(|r| r.enslaved_name.as_deref())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Dataset, MetadataValue, RawRecord};

    fn dataset(names: &[Option<&str>]) -> Dataset {
        Dataset::from_raw(
            names
                .iter()
                .map(|n| RawRecord {
                    enslaver: MetadataValue::String("A".into()),
                    data_source: MetadataValue::Null,
                    enslaved_name: n
                        .map(|s| MetadataValue::String(s.into()))
                        .unwrap_or(MetadataValue::Null),
                    enslaved_age: MetadataValue::Null,
                    enslaved_genagedesc: MetadataValue::Null,
                })
                .collect(),
        )
    }

    #[test]
    fn names_are_unique_and_non_null() {
        let ds = dataset(&[Some("Mary"), None, Some("Sam"), Some("Mary"), Some("")]);
        let records: Vec<&Record> = ds.records().iter().collect();
        let list = name_list(&records, &Selection::All);
        assert_eq!(list.names, vec!["Mary".to_string(), "Sam".to_string()]);
        assert_eq!(list.heading, "Enslaved People Listed by Name (All Records)");
    }

    #[test]
    fn heading_names_the_selected_enslaver() {
        let list = name_list(&[], &Selection::Only("John Smith".into()));
        assert_eq!(list.heading, "Enslaved People Listed by Name under John Smith");
        assert!(list.names.is_empty());
    }
}
