use std::sync::Arc;

use serde::Serialize;

use crate::color::AgeGroupColors;
use crate::data::filter::{filter_records, FilterSelection};
use crate::data::model::Dataset;
use crate::ui::DashboardArtifacts;

/// Whether a recomputation is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Computing,
}

/// Selection plus artifacts, as published to the page.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub selection: FilterSelection,
    pub artifacts: DashboardArtifacts,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// One dashboard session, independent of transport.
///
/// A change event carries the values of both controls, so a session holds
/// no selection between events and two clients never see each other's
/// filters. Each event runs filter → aggregate → assemble to completion
/// before the controller returns to `Idle`.
pub struct Controller {
    dataset: Arc<Dataset>,
    colors: Arc<AgeGroupColors>,
    phase: Phase,
}

impl Controller {
    pub fn new(dataset: Arc<Dataset>, colors: Arc<AgeGroupColors>) -> Self {
        Self {
            dataset,
            colors,
            phase: Phase::Idle,
        }
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Recompute all four artifacts for the submitted control values.
    pub fn handle(&mut self, selection: FilterSelection) -> DashboardView {
        self.transition(Phase::Computing);

        let artifacts = compute(&self.dataset, &selection, &self.colors);
        log::debug!(
            "filter {:?}: {} names listed",
            selection,
            artifacts.names.names.len()
        );

        self.transition(Phase::Idle);
        DashboardView {
            selection,
            artifacts,
        }
    }

    fn transition(&mut self, next: Phase) {
        log::trace!("controller {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}

/// One full pass: filter, aggregate, assemble.
fn compute(
    dataset: &Dataset,
    selection: &FilterSelection,
    colors: &AgeGroupColors,
) -> DashboardArtifacts {
    let records = filter_records(dataset, selection);
    log::debug!("{} of {} records pass the filter", records.len(), dataset.len());
    DashboardArtifacts::assemble(&records, selection, colors)
}
