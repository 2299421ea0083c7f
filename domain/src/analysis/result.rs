//! Analysis result entities
//!
//! The JSON field names mirror the response schema declared to the
//! generation service (camelCase).

use serde::{Deserialize, Serialize};

/// Chart kind the service picked for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
        }
    }

    /// Every value accepted by the response schema's enum constraint
    pub fn all() -> [ChartType; 3] {
        [ChartType::Bar, ChartType::Line, ChartType::Pie]
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One data point of the report chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ChartDataPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Structured report produced by one successful analysis (Entity)
///
/// Created atomically from a single service response and never merged with
/// a previous result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// A catchy title for the analysis
    pub title: String,
    /// High-level summary for decision makers
    pub executive_summary: String,
    /// Easy-to-understand points for operational staff
    pub operational_insights: Vec<String>,
    /// Tools or scripts worth building, within the job scope
    pub tool_suggestions: Vec<String>,
    pub chart_type: ChartType,
    pub chart_title: String,
    pub chart_data: Vec<ChartDataPoint>,
    /// Best-effort 0-100 score supplied by the service; not range-checked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score: Option<f64>,
}

impl AnalysisResult {
    /// Sum of all chart values (used for pie shares)
    pub fn chart_total(&self) -> f64 {
        self.chart_data.iter().map(|p| p.value).sum()
    }

    /// Largest chart value, or `None` for an empty chart
    pub fn chart_max(&self) -> Option<f64> {
        self.chart_data
            .iter()
            .map(|p| p.value)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            title: "Sales".to_string(),
            executive_summary: "Up".to_string(),
            operational_insights: vec!["a".to_string()],
            tool_suggestions: vec!["dashboard".to_string()],
            chart_type: ChartType::Pie,
            chart_title: "Share".to_string(),
            chart_data: vec![
                ChartDataPoint::new("Jan", 100.0),
                ChartDataPoint::new("Feb", 300.0).with_category("Q1"),
            ],
            impact_score: None,
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("executiveSummary").is_some());
        assert!(json.get("operationalInsights").is_some());
        assert_eq!(json["chartType"], "pie");
        // optional fields are omitted, not null
        assert!(json.get("impactScore").is_none());
        assert!(json["chartData"][0].get("category").is_none());
        assert_eq!(json["chartData"][1]["category"], "Q1");
    }

    #[test]
    fn test_chart_aggregates() {
        let result = sample();
        assert_eq!(result.chart_total(), 400.0);
        assert_eq!(result.chart_max(), Some(300.0));

        let empty = AnalysisResult {
            chart_data: vec![],
            ..sample()
        };
        assert_eq!(empty.chart_max(), None);
    }

    #[test]
    fn test_chart_type_rejects_unknown() {
        assert!(serde_json::from_str::<ChartType>("\"scatter\"").is_err());
        assert_eq!(
            serde_json::from_str::<ChartType>("\"line\"").unwrap(),
            ChartType::Line
        );
    }
}
