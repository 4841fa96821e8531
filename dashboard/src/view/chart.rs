//! Chart specifications and the chart backend seam

use serde::Serialize;
use shared::{sold_unsold_totals, ChartPoint, WasteBand};

use super::ElementId;

const SOLD_LINE: &str = "#4a7c59";
const SOLD_FILL: &str = "rgba(74, 124, 89, 0.1)";
const UNSOLD_LINE: &str = "#dc3545";
const UNSOLD_FILL: &str = "rgba(220, 53, 69, 0.1)";
const SOLD_SLICE: &str = "#28a745";
const UNSOLD_SLICE: &str = "#dc3545";
const SCATTER_BORDER: &str = "#2c5530";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Scatter,
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Legend {
    Default,
    Top,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Series {
    Values(Vec<f64>),
    /// `(x, y)` pairs for scatter plots
    Points(Vec<(f64, f64)>),
}

impl Series {
    pub fn len(&self) -> usize {
        match self {
            Series::Values(v) => v.len(),
            Series::Points(p) => p.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: Option<String>,
    pub data: Series,
    pub border_color: Option<String>,
    /// One colour for the whole series, or one per point
    pub background_colors: Vec<String>,
    pub tension: Option<f64>,
}

impl Dataset {
    fn line(label: &str, data: Vec<f64>, border: &str, fill: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            data: Series::Values(data),
            border_color: Some(border.to_string()),
            background_colors: vec![fill.to_string()],
            tension: Some(0.4),
        }
    }
}

/// Everything a chart backend needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub legend: Legend,
    pub begin_at_zero: bool,
    pub y_max: Option<f64>,
    /// Appended to y-axis tick labels
    pub y_tick_suffix: Option<String>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

impl ChartSpec {
    fn new(kind: ChartKind, labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self {
            kind,
            labels,
            datasets,
            legend: Legend::Default,
            begin_at_zero: false,
            y_max: None,
            y_tick_suffix: None,
            x_title: None,
            y_title: None,
        }
    }
}

fn week_labels(points: &[ChartPoint]) -> Vec<String> {
    points.iter().map(|p| p.week.clone()).collect()
}

/// Sold and unsold kilograms per bucket; `None` when there is nothing to draw
pub fn sales_chart(points: &[ChartPoint]) -> Option<ChartSpec> {
    if points.is_empty() {
        return None;
    }
    let mut spec = ChartSpec::new(
        ChartKind::Line,
        week_labels(points),
        vec![
            Dataset::line(
                "Rice Sold (kg)",
                points.iter().map(|p| p.sold).collect(),
                SOLD_LINE,
                SOLD_FILL,
            ),
            Dataset::line(
                "Rice Unsold (kg)",
                points.iter().map(|p| p.unsold).collect(),
                UNSOLD_LINE,
                UNSOLD_FILL,
            ),
        ],
    );
    spec.legend = Legend::Top;
    spec.begin_at_zero = true;
    Some(spec)
}

/// Waste percentage bars coloured by band, capped at 100 %
pub fn waste_chart(points: &[ChartPoint]) -> Option<ChartSpec> {
    if points.is_empty() {
        return None;
    }
    let dataset = Dataset {
        label: Some("Waste Percentage".to_string()),
        data: Series::Values(points.iter().map(|p| p.waste_percentage).collect()),
        border_color: None,
        background_colors: points
            .iter()
            .map(|p| WasteBand::classify(p.waste_percentage).color().to_string())
            .collect(),
        tension: None,
    };
    let mut spec = ChartSpec::new(ChartKind::Bar, week_labels(points), vec![dataset]);
    spec.legend = Legend::Hidden;
    spec.begin_at_zero = true;
    spec.y_max = Some(100.0);
    spec.y_tick_suffix = Some("%".to_string());
    Some(spec)
}

/// Revenue plotted against waste percentage
pub fn revenue_waste_chart(points: &[ChartPoint]) -> Option<ChartSpec> {
    if points.is_empty() {
        return None;
    }
    let dataset = Dataset {
        label: Some("Revenue vs Waste".to_string()),
        data: Series::Points(points.iter().map(|p| (p.waste_percentage, p.revenue)).collect()),
        border_color: Some(SCATTER_BORDER.to_string()),
        background_colors: vec![SOLD_LINE.to_string()],
        tension: None,
    };
    let mut spec = ChartSpec::new(ChartKind::Scatter, Vec::new(), vec![dataset]);
    spec.x_title = Some("Waste Percentage (%)".to_string());
    spec.y_title = Some("Revenue (₱)".to_string());
    Some(spec)
}

pub fn price_chart(points: &[ChartPoint]) -> Option<ChartSpec> {
    if points.is_empty() {
        return None;
    }
    Some(ChartSpec::new(
        ChartKind::Line,
        week_labels(points),
        vec![Dataset::line(
            "Price per kg (₱)",
            points.iter().map(|p| p.price).collect(),
            SOLD_LINE,
            SOLD_FILL,
        )],
    ))
}

/// Share of stock sold versus left unsold over the whole series
pub fn distribution_chart(points: &[ChartPoint]) -> Option<ChartSpec> {
    if points.is_empty() {
        return None;
    }
    let (sold, unsold) = sold_unsold_totals(points);
    let dataset = Dataset {
        label: None,
        data: Series::Values(vec![sold, unsold]),
        border_color: None,
        background_colors: vec![SOLD_SLICE.to_string(), UNSOLD_SLICE.to_string()],
        tension: None,
    };
    Some(ChartSpec::new(
        ChartKind::Doughnut,
        vec!["Sold".to_string(), "Unsold".to_string()],
        vec![dataset],
    ))
}

/// A charting library drawing onto canvases
pub trait ChartBackend {
    /// A live chart instance
    type Handle;

    /// Whether charts can be drawn at all on this page
    fn available(&self) -> bool {
        true
    }

    fn draw(&mut self, canvas: ElementId, spec: &ChartSpec) -> Self::Handle;

    fn destroy(&mut self, handle: Self::Handle);

    /// Wipe whatever is painted on the canvas
    fn clear(&mut self, canvas: ElementId);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(week: &str, sold: f64, unsold: f64, waste: f64) -> ChartPoint {
        ChartPoint {
            week: week.to_string(),
            sold,
            unsold,
            waste_percentage: waste,
            price: 50.0,
            revenue: sold * 50.0,
        }
    }

    #[test]
    fn test_empty_series_has_no_chart() {
        assert!(sales_chart(&[]).is_none());
        assert!(waste_chart(&[]).is_none());
        assert!(revenue_waste_chart(&[]).is_none());
        assert!(price_chart(&[]).is_none());
        assert!(distribution_chart(&[]).is_none());
    }

    #[test]
    fn test_sales_chart_datasets() {
        let spec = sales_chart(&[point("W1", 80.0, 20.0, 20.0)]).unwrap();
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.labels, vec!["W1"]);
        assert_eq!(spec.datasets[0].label.as_deref(), Some("Rice Sold (kg)"));
        assert_eq!(spec.datasets[0].border_color.as_deref(), Some("#4a7c59"));
        assert_eq!(spec.datasets[1].data, Series::Values(vec![20.0]));
        assert_eq!(spec.legend, Legend::Top);
    }

    #[test]
    fn test_waste_bars_coloured_by_band() {
        let spec = waste_chart(&[
            point("W1", 90.0, 10.0, 5.0),
            point("W2", 85.0, 15.0, 15.0),
            point("W3", 70.0, 30.0, 30.0),
        ])
        .unwrap();
        assert_eq!(
            spec.datasets[0].background_colors,
            vec!["#28a745", "#ffc107", "#dc3545"]
        );
        assert_eq!(spec.y_max, Some(100.0));
        assert_eq!(spec.legend, Legend::Hidden);
    }

    #[test]
    fn test_advanced_charts() {
        let points = [point("W1", 80.0, 20.0, 20.0), point("W2", 60.0, 40.0, 40.0)];
        let scatter = revenue_waste_chart(&points).unwrap();
        assert_eq!(
            scatter.datasets[0].data,
            Series::Points(vec![(20.0, 4000.0), (40.0, 3000.0)])
        );
        let doughnut = distribution_chart(&points).unwrap();
        assert_eq!(doughnut.datasets[0].data, Series::Values(vec![140.0, 60.0]));
        assert_eq!(doughnut.labels, vec!["Sold", "Unsold"]);
    }
}
