//! Text rendering of the result chart (bar, line, pie)

use colored::Colorize;
use scopelens_domain::{AnalysisResult, ChartDataPoint, ChartType};

const BAR_WIDTH: usize = 30;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the chart of `result` as terminal text
pub fn render(result: &AnalysisResult) -> String {
    if result.chart_data.is_empty() {
        return format!("  {}\n", "(no data)".dimmed());
    }

    match result.chart_type {
        ChartType::Bar => bar(&result.chart_data),
        ChartType::Line => line(&result.chart_data),
        ChartType::Pie => pie(&result.chart_data, result.chart_total()),
    }
}

/// `5000` for whole numbers, `4.25` otherwise
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn label_width(points: &[ChartDataPoint]) -> usize {
    points
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0)
}

fn pad(label: &str, width: usize) -> String {
    let fill = width.saturating_sub(label.chars().count());
    format!("{}{}", label, " ".repeat(fill))
}

fn scaled(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

fn category(point: &ChartDataPoint) -> String {
    point
        .category
        .as_deref()
        .map(|c| format!(" [{}]", c).dimmed().to_string())
        .unwrap_or_default()
}

fn bar(points: &[ChartDataPoint]) -> String {
    let width = label_width(points);
    let max = points.iter().map(|p| p.value).fold(0.0, f64::max);

    points
        .iter()
        .map(|p| {
            let length = scaled(p.value, max, BAR_WIDTH);
            format!(
                "  {} {} {}{}\n",
                pad(&p.name, width),
                "█".repeat(length).cyan(),
                format_value(p.value),
                category(p)
            )
        })
        .collect()
}

fn sparkline(points: &[ChartDataPoint]) -> String {
    let min = points.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let top = SPARK_LEVELS.len() - 1;

    points
        .iter()
        .map(|p| {
            let level = if span > 0.0 {
                (((p.value - min) / span) * top as f64).round() as usize
            } else {
                top / 2
            };
            SPARK_LEVELS[level.min(top)]
        })
        .collect()
}

fn line(points: &[ChartDataPoint]) -> String {
    let width = label_width(points);
    let mut output = format!("  {}\n\n", sparkline(points).cyan());

    let mut previous: Option<f64> = None;
    for p in points {
        let trend = match previous {
            Some(prev) if p.value > prev => "↑".green(),
            Some(prev) if p.value < prev => "↓".red(),
            Some(_) => "→".normal(),
            None => " ".normal(),
        };
        output.push_str(&format!(
            "  {} {} {}{}\n",
            pad(&p.name, width),
            trend,
            format_value(p.value),
            category(p)
        ));
        previous = Some(p.value);
    }

    output
}

fn pie(points: &[ChartDataPoint], total: f64) -> String {
    if total <= 0.0 {
        return format!("  {}\n", "(values do not add up to a positive total)".dimmed());
    }

    let width = label_width(points);
    points
        .iter()
        .map(|p| {
            let share = p.value / total * 100.0;
            format!(
                "  {} {:>5.1}% {} ({}){}\n",
                pad(&p.name, width),
                share,
                "■".repeat(scaled(share, 100.0, BAR_WIDTH)).magenta(),
                format_value(p.value),
                category(p)
            )
        })
        .collect()
}
