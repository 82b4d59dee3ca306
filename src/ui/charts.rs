use serde::Serialize;

use crate::color::{AgeGroupColors, MARKER_OUTLINE};
use crate::data::aggregate::{AgeGroupCount, DescriptorCount, EnslaverCount};

pub const ENSLAVER_CHART_TITLE: &str = "Total Count of Enslaved People by Enslaver Names<br>\
<span style='font-size:14px; font-style:italic;'>\
Note: Total count assessed from Troy Records and 1850 Slave Schedule may include some \
duplication where individuals appear in both sources.</span>";

pub const DESCRIPTOR_CHART_TITLE: &str = "Distribution of Enslaved People by Gender Description";

pub const AGE_GROUP_CHART_TITLE: &str = "Distribution of Enslaved People by Age Group";

/// Diameter in px of the largest bubble.
const BUBBLE_SIZE_MAX: f64 = 60.0;

const DOUGHNUT_HOLE: f64 = 0.4;

// ---------------------------------------------------------------------------
// Declarative figure model (Plotly figure JSON)
// ---------------------------------------------------------------------------

/// A chart specification handed to the renderer untouched.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(BarTrace),
    Pie(PieTrace),
    Scatter(ScatterTrace),
}

#[derive(Debug, Clone, Serialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<usize>,
    pub text: Vec<String>,
    pub texttemplate: &'static str,
    pub textposition: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub hole: f64,
    pub textinfo: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    pub hovertext: Vec<String>,
    pub hoverinfo: &'static str,
    pub marker: Marker,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub size: Vec<usize>,
    pub sizemode: &'static str,
    pub sizeref: f64,
    pub color: Vec<String>,
    pub line: MarkerLine,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkerLine {
    pub width: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    /// Force a categorical axis so numeric-looking labels stay labels.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

impl Axis {
    fn category(title: &str) -> Self {
        Axis {
            title: Some(Title::new(title)),
            kind: Some("category"),
            visible: None,
        }
    }

    fn titled(title: &str) -> Self {
        Axis {
            title: Some(Title::new(title)),
            ..Default::default()
        }
    }

    fn hidden() -> Self {
        Axis {
            visible: Some(false),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Chart builders
// ---------------------------------------------------------------------------

/// Bar chart of named people per enslaver, with the count printed above
/// each bar.
pub fn enslaver_chart(counts: &[EnslaverCount]) -> Figure {
    let x = counts.iter().map(|c| c.enslaver.clone()).collect();
    let y: Vec<usize> = counts.iter().map(|c| c.count).collect();
    let text = y.iter().map(usize::to_string).collect();

    Figure {
        data: vec![Trace::Bar(BarTrace {
            x,
            y,
            text,
            texttemplate: "%{text}",
            textposition: "outside",
        })],
        layout: Layout {
            title: Title::new(ENSLAVER_CHART_TITLE),
            xaxis: Some(Axis::category("Enslaver")),
            yaxis: Some(Axis::titled("Number of Enslaved People")),
            showlegend: None,
        },
    }
}

/// Doughnut of rows per gender/age descriptor.
pub fn descriptor_chart(counts: &[DescriptorCount]) -> Figure {
    Figure {
        data: vec![Trace::Pie(PieTrace {
            labels: counts.iter().map(|c| c.label().to_string()).collect(),
            values: counts.iter().map(|c| c.count).collect(),
            hole: DOUGHNUT_HOLE,
            textinfo: "percent+label",
        })],
        layout: Layout {
            title: Title::new(DESCRIPTOR_CHART_TITLE),
            xaxis: None,
            yaxis: None,
            showlegend: None,
        },
    }
}

/// Bubble row of age groups; bubble area is proportional to the count.
pub fn age_group_chart(counts: &[AgeGroupCount], colors: &AgeGroupColors) -> Figure {
    let labels: Vec<String> = counts.iter().map(|c| c.group.label().to_string()).collect();
    let size: Vec<usize> = counts.iter().map(|c| c.count).collect();
    let hovertext = counts
        .iter()
        .map(|c| format!("{}: {}", c.group, c.count))
        .collect();

    Figure {
        data: vec![Trace::Scatter(ScatterTrace {
            y: vec![0.0; labels.len()],
            x: labels,
            mode: "markers",
            hovertext,
            hoverinfo: "text",
            marker: Marker {
                sizeref: bubble_sizeref(size.iter().copied().max().unwrap_or(0)),
                size,
                sizemode: "area",
                color: counts
                    .iter()
                    .map(|c| colors.color_for(c.group).to_string())
                    .collect(),
                line: MarkerLine {
                    width: 2.0,
                    color: MARKER_OUTLINE,
                },
            },
        })],
        layout: Layout {
            title: Title::new(AGE_GROUP_CHART_TITLE),
            xaxis: Some(Axis::category("Age Group")),
            yaxis: Some(Axis::hidden()),
            showlegend: Some(false),
        },
    }
}

/// Area-mode scale so the largest count renders `BUBBLE_SIZE_MAX` px wide.
fn bubble_sizeref(max_count: usize) -> f64 {
    if max_count == 0 {
        return 1.0;
    }
    2.0 * max_count as f64 / (BUBBLE_SIZE_MAX * BUBBLE_SIZE_MAX)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::model::AgeGroup;

    #[test]
    fn enslaver_chart_keeps_order_and_subtitle() {
        let fig = enslaver_chart(&[
            EnslaverCount { enslaver: "B".into(), count: 3 },
            EnslaverCount { enslaver: "A".into(), count: 1 },
        ]);
        let v = serde_json::to_value(&fig).unwrap();
        assert_eq!(v["data"][0]["type"], "bar");
        assert_eq!(v["data"][0]["x"], json!(["B", "A"]));
        assert_eq!(v["data"][0]["y"], json!([3, 1]));
        assert_eq!(v["data"][0]["text"], json!(["3", "1"]));
        assert_eq!(v["layout"]["xaxis"]["type"], "category");
        assert_eq!(v["layout"]["yaxis"]["title"]["text"], "Number of Enslaved People");
        let title = v["layout"]["title"]["text"].as_str().unwrap();
        assert!(title.contains("may include some duplication"));
        assert!(v["layout"].get("showlegend").is_none());
    }

    #[test]
    fn descriptor_chart_is_a_doughnut() {
        let fig = descriptor_chart(&[
            DescriptorCount { descriptor: Some("Female".into()), count: 2 },
            DescriptorCount { descriptor: None, count: 1 },
        ]);
        let v = serde_json::to_value(&fig).unwrap();
        assert_eq!(v["data"][0]["type"], "pie");
        assert_eq!(v["data"][0]["hole"], 0.4);
        assert_eq!(v["data"][0]["labels"], json!(["Female", "Not recorded"]));
        assert_eq!(v["data"][0]["values"], json!([2, 1]));
    }

    #[test]
    fn age_chart_sizes_largest_bubble_to_max() {
        let colors = AgeGroupColors::default();
        let fig = age_group_chart(
            &[
                AgeGroupCount { group: AgeGroup::Age21To30, count: 9 },
                AgeGroupCount { group: AgeGroup::Unknown, count: 18 },
            ],
            &colors,
        );
        let v = serde_json::to_value(&fig).unwrap();
        let trace = &v["data"][0];
        assert_eq!(trace["type"], "scatter");
        assert_eq!(trace["x"], json!(["21-30", "Unknown"]));
        assert_eq!(trace["y"], json!([0.0, 0.0]));
        assert_eq!(trace["marker"]["size"], json!([9, 18]));
        assert_eq!(trace["marker"]["line"]["color"], "DarkSlateGrey");
        assert_eq!(trace["marker"]["color"][1], colors.color_for(AgeGroup::Unknown));

        let sizeref = trace["marker"]["sizeref"].as_f64().unwrap();
        assert!((sizeref - 2.0 * 18.0 / 3600.0).abs() < 1e-12);
        assert_eq!(v["layout"]["showlegend"], false);
    }

    #[test]
    fn empty_counts_give_valid_empty_figures() {
        let colors = AgeGroupColors::default();
        for fig in [
            enslaver_chart(&[]),
            descriptor_chart(&[]),
            age_group_chart(&[], &colors),
        ] {
            assert_eq!(fig.data.len(), 1);
            let v = serde_json::to_value(&fig).unwrap();
            assert!(v["layout"]["title"]["text"].is_string());
        }
        let v = serde_json::to_value(age_group_chart(&[], &colors)).unwrap();
        assert_eq!(v["data"][0]["x"], json!([]));
        assert_eq!(v["data"][0]["marker"]["sizeref"], 1.0);
    }
}
