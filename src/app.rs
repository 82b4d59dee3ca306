use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::{Html, Json};
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;

use crate::color::AgeGroupColors;
use crate::config::ALL_OPTION;
use crate::data::filter::FilterSelection;
use crate::data::model::Dataset;
use crate::state::{Controller, DashboardView};
use crate::ui::page::DASHBOARD_HTML;

// ---------------------------------------------------------------------------
// Shared server state
// ---------------------------------------------------------------------------

/// Handles shared by every request. Both are read-only after startup, so
/// no lock is needed.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    colors: Arc<AgeGroupColors>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
            colors: Arc::new(AgeGroupColors::default()),
        }
    }

    /// A fresh session for one request.
    fn session(&self) -> Controller {
        Controller::new(Arc::clone(&self.dataset), Arc::clone(&self.colors))
    }
}

#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub enslavers: Vec<String>,
    pub data_sources: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub records: usize,
}

// ---------------------------------------------------------------------------
// Router and server loop
// ---------------------------------------------------------------------------

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_home))
        .route("/api/options", get(filter_options))
        .route("/api/dashboard", get(current_view))
        .route("/api/filter", post(apply_filter))
        .route("/api/health", get(health_check))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    log::info!("Dashboard listening on http://{addr}");

    axum::serve(listener, app).await.context("serving dashboard")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn dashboard_home() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

async fn filter_options(State(state): State<AppState>) -> Json<FilterOptions> {
    let with_all = |values: &[String]| -> Vec<String> {
        std::iter::once(ALL_OPTION.to_string())
            .chain(values.iter().cloned())
            .collect()
    };
    Json(FilterOptions {
        enslavers: with_all(state.dataset.enslavers()),
        data_sources: with_all(state.dataset.data_sources()),
    })
}

/// The unfiltered view shown on first load.
async fn current_view(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.session().handle(FilterSelection::default()))
}

/// The page posts both control values on every change.
async fn apply_filter(
    State(state): State<AppState>,
    Json(selection): Json<FilterSelection>,
) -> Json<DashboardView> {
    Json(state.session().handle(selection))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        records: state.dataset.len(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::filter::Selection;
    use crate::data::model::{MetadataValue, RawRecord};

    fn state() -> AppState {
        let row = |enslaver: &str, source: &str, name: Option<&str>| RawRecord {
            enslaver: MetadataValue::String(enslaver.into()),
            data_source: MetadataValue::String(source.into()),
            enslaved_name: name
                .map(|n| MetadataValue::String(n.into()))
                .unwrap_or(MetadataValue::Null),
            enslaved_age: MetadataValue::String("31".into()),
            enslaved_genagedesc: MetadataValue::Null,
        };
        AppState::new(Dataset::from_raw(vec![
            row("A", "Troy Records", Some("Mary")),
            row("B", "1850 Slave Schedule", None),
            row("A", "1850 Slave Schedule", Some("Sam")),
            row("B", "Troy Records", Some("Ann")),
        ]))
    }

    async fn post(state: &AppState, body: serde_json::Value) -> DashboardView {
        let selection: FilterSelection = serde_json::from_value(body).unwrap();
        let Json(view) = apply_filter(State(state.clone()), Json(selection)).await;
        view
    }

    #[tokio::test]
    async fn options_lead_with_all_sentinel() {
        let Json(opts) = filter_options(State(state())).await;
        assert_eq!(opts.enslavers, vec!["All", "A", "B"]);
        assert_eq!(
            opts.data_sources,
            vec!["All", "Troy Records", "1850 Slave Schedule"]
        );
    }

    #[tokio::test]
    async fn filter_post_applies_both_controls() {
        let state = state();
        let view = post(
            &state,
            json!({"enslaver": "All", "data_source": "1850 Slave Schedule"}),
        )
        .await;
        assert_eq!(view.artifacts.names.names, vec!["Sam"]);

        let v = serde_json::to_value(&view).unwrap();
        assert_eq!(
            v["selection"],
            json!({"enslaver": null, "data_source": "1850 Slave Schedule"})
        );
        assert_eq!(v["artifacts"]["enslaver_chart"]["data"][0]["x"], json!(["A", "B"]));
        assert_eq!(v["artifacts"]["enslaver_chart"]["data"][0]["y"], json!([1, 0]));
    }

    #[tokio::test]
    async fn clients_do_not_see_each_others_filters() {
        let state = state();
        let first = post(&state, json!({"enslaver": "A", "data_source": null})).await;
        assert_eq!(first.artifacts.names.names, vec!["Mary", "Sam"]);

        let second = post(&state, json!({"enslaver": null, "data_source": "Troy Records"})).await;
        assert_eq!(second.selection.enslaver, Selection::All);
        assert_eq!(second.artifacts.names.names, vec!["Mary", "Ann"]);
        assert_eq!(
            second.artifacts.names.heading,
            "Enslaved People Listed by Name (All Records)"
        );

        let Json(fresh) = current_view(State(state.clone())).await;
        assert_eq!(fresh.selection, FilterSelection::default());
        assert_eq!(fresh.artifacts.names.names.len(), 3);
    }

    #[tokio::test]
    async fn health_reports_record_count() {
        let Json(health) = health_check(State(state())).await;
        assert_eq!(health.records, 4);
        assert_eq!(health.status, "healthy");
    }

    #[tokio::test]
    async fn page_hosts_all_four_outputs() {
        let Html(page) = dashboard_home().await;
        for id in [
            "enslaver_filter",
            "data_source_filter",
            "bar_chart",
            "doughnut_chart",
            "age_bubble_chart",
            "enslaved_names_list",
        ] {
            assert!(page.contains(&format!("id=\"{id}\"")), "missing {id}");
        }
    }

    #[tokio::test]
    async fn page_posts_both_controls_and_syncs_them_back() {
        let Html(page) = dashboard_home().await;
        assert!(page.contains("JSON.stringify(currentSelection())"));
        assert!(page.contains("syncSelect(enslaverSelect(), view.selection.enslaver)"));
        assert!(page.contains("syncSelect(sourceSelect(), view.selection.data_source)"));
    }
}
