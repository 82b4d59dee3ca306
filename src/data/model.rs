use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::age;

// ---------------------------------------------------------------------------
// MetadataValue – a single raw cell as read from the source table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common spreadsheet dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, "<null>"),
        }
    }
}

impl MetadataValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Text form of a categorical cell. Null and empty strings are absent.
    pub fn into_text(self) -> Option<String> {
        match self {
            MetadataValue::Null => None,
            MetadataValue::String(s) if s.is_empty() => None,
            MetadataValue::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// AgeGroup – the eleven fixed age buckets
// ---------------------------------------------------------------------------

/// Decade bucket of a record's age. `Unknown` covers missing, zero and
/// negative ages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AgeGroup {
    #[serde(rename = "0-10")]
    Age0To10,
    #[serde(rename = "11-20")]
    Age11To20,
    #[serde(rename = "21-30")]
    Age21To30,
    #[serde(rename = "31-40")]
    Age31To40,
    #[serde(rename = "41-50")]
    Age41To50,
    #[serde(rename = "51-60")]
    Age51To60,
    #[serde(rename = "61-70")]
    Age61To70,
    #[serde(rename = "71-80")]
    Age71To80,
    #[serde(rename = "81-90")]
    Age81To90,
    #[serde(rename = "91-100")]
    Age91To100,
    Unknown,
}

impl AgeGroup {
    /// All labels in display order.
    pub const ALL: [AgeGroup; 11] = [
        AgeGroup::Age0To10,
        AgeGroup::Age11To20,
        AgeGroup::Age21To30,
        AgeGroup::Age31To40,
        AgeGroup::Age41To50,
        AgeGroup::Age51To60,
        AgeGroup::Age61To70,
        AgeGroup::Age71To80,
        AgeGroup::Age81To90,
        AgeGroup::Age91To100,
        AgeGroup::Unknown,
    ];

    /// The decade buckets, indexed by `floor(age / 10)`.
    pub const DECADES: [AgeGroup; 10] = [
        AgeGroup::Age0To10,
        AgeGroup::Age11To20,
        AgeGroup::Age21To30,
        AgeGroup::Age31To40,
        AgeGroup::Age41To50,
        AgeGroup::Age51To60,
        AgeGroup::Age61To70,
        AgeGroup::Age71To80,
        AgeGroup::Age81To90,
        AgeGroup::Age91To100,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Age0To10 => "0-10",
            AgeGroup::Age11To20 => "11-20",
            AgeGroup::Age21To30 => "21-30",
            AgeGroup::Age31To40 => "31-40",
            AgeGroup::Age41To50 => "41-50",
            AgeGroup::Age51To60 => "51-60",
            AgeGroup::Age61To70 => "61-70",
            AgeGroup::Age71To80 => "71-80",
            AgeGroup::Age81To90 => "81-90",
            AgeGroup::Age91To100 => "91-100",
            AgeGroup::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// Raw cells of one row, before the age bucketing pass.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub enslaver: MetadataValue,
    pub data_source: MetadataValue,
    pub enslaved_name: MetadataValue,
    pub enslaved_age: MetadataValue,
    pub enslaved_genagedesc: MetadataValue,
}

/// A single cleaned record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub enslaver: Option<String>,
    pub data_source: Option<String>,
    pub enslaved_name: Option<String>,
    /// The cell exactly as it was read.
    pub enslaved_age_raw: MetadataValue,
    /// Parsed age; missing or unparseable values are 0.
    pub enslaved_age: f64,
    pub age_group: AgeGroup,
    pub enslaved_genagedesc: Option<String>,
}

impl Record {
    /// Clean a raw row: categorical cells to text, age parsed and bucketed.
    pub fn from_raw(raw: RawRecord) -> Self {
        let enslaved_age = age::clean_age(&raw.enslaved_age);
        Record {
            enslaver: raw.enslaver.into_text(),
            data_source: raw.data_source.into_text(),
            enslaved_name: raw.enslaved_name.into_text(),
            enslaved_age_raw: raw.enslaved_age,
            enslaved_age,
            age_group: age::age_group(enslaved_age),
            enslaved_genagedesc: raw.enslaved_genagedesc.into_text(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full cleaned dataset. Built once, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    /// Distinct non-null enslavers, first-seen order.
    enslavers: Vec<String>,
    /// Distinct non-null data sources, first-seen order.
    data_sources: Vec<String>,
}

impl Dataset {
    /// Run the bucketing pass over raw rows and build the option indices.
    pub fn from_raw(rows: Vec<RawRecord>) -> Self {
        Self::from_records(rows.into_iter().map(Record::from_raw).collect())
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        let enslavers = distinct(records.iter().map(|r| r.enslaver.as_deref()));
        let data_sources = distinct(records.iter().map(|r| r.data_source.as_deref()));
        Dataset {
            records,
            enslavers,
            data_sources,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn enslavers(&self) -> &[String] {
        &self.enslavers
    }

    pub fn data_sources(&self) -> &[String] {
        &self.data_sources
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Distinct non-null values in first-seen order.
pub(crate) fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(enslaver: Option<&str>, source: Option<&str>, age: MetadataValue) -> RawRecord {
        let text = |v: Option<&str>| {
            v.map(|s| MetadataValue::String(s.to_string()))
                .unwrap_or(MetadataValue::Null)
        };
        RawRecord {
            enslaver: text(enslaver),
            data_source: text(source),
            enslaved_name: MetadataValue::String("Jane".into()),
            enslaved_age: age,
            enslaved_genagedesc: MetadataValue::Null,
        }
    }

    #[test]
    fn from_raw_buckets_every_row() {
        let ds = Dataset::from_raw(vec![
            raw(Some("A"), Some("Troy"), MetadataValue::Integer(5)),
            raw(Some("A"), None, MetadataValue::String("25".into())),
            raw(Some("B"), Some("Census"), MetadataValue::String("n/a".into())),
        ]);
        let groups: Vec<AgeGroup> = ds.records().iter().map(|r| r.age_group).collect();
        assert_eq!(
            groups,
            vec![AgeGroup::Age0To10, AgeGroup::Age21To30, AgeGroup::Unknown]
        );
        assert_eq!(ds.records()[2].enslaved_age, 0.0);
        assert_eq!(
            ds.records()[2].enslaved_age_raw,
            MetadataValue::String("n/a".into())
        );
    }

    #[test]
    fn option_lists_are_distinct_non_null_first_seen() {
        let ds = Dataset::from_raw(vec![
            raw(Some("B"), Some("Troy"), MetadataValue::Null),
            raw(None, Some("Census"), MetadataValue::Null),
            raw(Some("A"), Some("Troy"), MetadataValue::Null),
            raw(Some("B"), None, MetadataValue::Null),
        ]);
        assert_eq!(ds.enslavers(), ["B".to_string(), "A".to_string()]);
        assert_eq!(ds.data_sources(), ["Troy".to_string(), "Census".to_string()]);
    }

    #[test]
    fn empty_and_numeric_cells_become_text_or_absent() {
        assert_eq!(MetadataValue::String(String::new()).into_text(), None);
        assert_eq!(MetadataValue::Null.into_text(), None);
        assert_eq!(MetadataValue::Integer(1850).into_text(), Some("1850".into()));
        assert_eq!(MetadataValue::Float(2.5).into_text(), Some("2.5".into()));
    }

    #[test]
    fn age_group_serializes_as_label() {
        let json = serde_json::to_string(&AgeGroup::ALL).unwrap();
        let labels: Vec<&str> = AgeGroup::ALL.iter().map(|g| g.label()).collect();
        assert_eq!(json, serde_json::to_string(&labels).unwrap());
    }
}
