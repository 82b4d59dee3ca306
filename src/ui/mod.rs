//! Presentation: aggregation results → chart specifications, name panel,
//! and the page that renders them.

pub mod charts;
pub mod names;
pub mod page;

use serde::Serialize;

use crate::color::AgeGroupColors;
use crate::data::aggregate::{age_group_counts, descriptor_counts, enslaver_counts};
use crate::data::filter::FilterSelection;
use crate::data::model::Record;

use charts::Figure;
use names::NameList;

/// The four artifacts published after every filter change.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardArtifacts {
    pub enslaver_chart: Figure,
    pub descriptor_chart: Figure,
    pub age_group_chart: Figure,
    pub names: NameList,
}

impl DashboardArtifacts {
    /// Aggregate the filtered records and lay the results out for display.
    pub fn assemble(
        records: &[&Record],
        selection: &FilterSelection,
        colors: &AgeGroupColors,
    ) -> Self {
        DashboardArtifacts {
            enslaver_chart: charts::enslaver_chart(&enslaver_counts(records)),
            descriptor_chart: charts::descriptor_chart(&descriptor_counts(records)),
            age_group_chart: charts::age_group_chart(&age_group_counts(records), colors),
            names: names::name_list(records, &selection.enslaver),
        }
    }
}
