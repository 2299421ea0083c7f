//! Console output formatter for analysis reports

use crate::output::chart;
use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use scopelens_domain::{AmbitionBand, AmbitionLevel, AnalysisResult, ChatHistory, Role, Session};

/// Formats analysis results and session state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete report
    pub fn format(result: &AnalysisResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&result.title));
        output.push('\n');

        output.push_str(&Self::section_header("Executive Summary"));
        output.push_str(&format!("{}\n", result.executive_summary));

        if let Some(score) = result.impact_score {
            output.push_str(&format!("\n{} {}\n", "Impact Score:".cyan().bold(), Self::score(score)));
        }

        output.push_str(&Self::section_header("Operational Insights"));
        output.push_str(&Self::bullets(&result.operational_insights));

        output.push_str(&Self::section_header(&format!(
            "Chart: {} ({})",
            result.chart_title,
            result.chart_type.as_str()
        )));
        output.push_str(&chart::render(result));

        output.push_str(&Self::section_header("Suggested Tools"));
        output.push_str(&Self::bullets(&result.tool_suggestions));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(result: &AnalysisResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    /// Title, summary and score only
    pub fn format_summary(result: &AnalysisResult) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n\n", format!("=== {} ===", result.title).cyan().bold()));
        output.push_str(&result.executive_summary);
        output.push('\n');

        if let Some(score) = result.impact_score {
            output.push_str(&format!("\n{} {}\n", "Impact Score:".dimmed(), Self::score(score)));
        }

        output
    }

    /// Ambition level with its band, coloured by band
    pub fn ambition_label(level: AmbitionLevel) -> ColoredString {
        let text = format!("{} ({})", level, level.band());
        match level.band() {
            AmbitionBand::Basic => text.blue(),
            AmbitionBand::Standard => text.green(),
            AmbitionBand::Advanced => text.yellow(),
            AmbitionBand::Visionary => text.magenta().bold(),
        }
    }

    /// Inputs, phase and result of the session, for `/status`
    pub fn format_status(session: &Session, model: &str, has_credential: bool) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Session"));
        output.push_str(&format!("{:<10} {}\n", "Model:", model));
        output.push_str(&format!(
            "{:<10} {}\n",
            "API key:",
            if has_credential {
                "configured".green()
            } else {
                "missing".red()
            }
        ));
        output.push_str(&format!("{:<10} {}\n", "Phase:", session.phase()));
        output.push_str(&format!(
            "{:<10} {}\n",
            "Ambition:",
            Self::ambition_label(session.ambition())
        ));
        output.push_str(&format!(
            "{:<10} {}\n",
            "Dataset:",
            Self::preview(session.dataset_text())
        ));
        output.push_str(&format!(
            "{:<10} {}\n",
            "Scope:",
            Self::preview(session.scope_text())
        ));
        if let Some(result) = session.result() {
            output.push_str(&format!("{:<10} {}\n", "Result:", result.title));
        }
        output.push_str(&format!("{:<10} {} messages\n", "Chat:", session.history().len()));
        if let Some(error) = session.last_error() {
            output.push_str(&format!("{:<10} {}\n", "Error:", error.red()));
        }

        output
    }

    /// Chat transcript for `/history`
    pub fn format_history(history: &ChatHistory) -> String {
        if history.is_empty() {
            return format!("{}\n", "No follow-up questions yet.".dimmed());
        }

        let mut output = String::new();
        for message in history.messages() {
            let speaker = match message.role {
                Role::User => "You".cyan().bold(),
                Role::Assistant => "Analyst".green().bold(),
            };
            output.push_str(&format!(
                "{} {}\n{}\n\n",
                speaker,
                message.timestamp.format("%H:%M:%S").to_string().dimmed(),
                message.content
            ));
        }
        output
    }

    fn score(score: f64) -> ColoredString {
        let text = format!("{}/100", chart::format_value(score));
        if score >= 70.0 {
            text.green().bold()
        } else if score >= 40.0 {
            text.yellow().bold()
        } else {
            text.red().bold()
        }
    }

    fn bullets(items: &[String]) -> String {
        if items.is_empty() {
            return format!("  {}\n", "(none)".dimmed());
        }
        items.iter().map(|item| format!("  * {}\n", item)).collect()
    }

    fn preview(text: &str) -> String {
        let first_line = text.lines().find(|l| !l.trim().is_empty());
        match first_line {
            None => "(empty)".dimmed().to_string(),
            Some(line) => {
                let lines = text.lines().count();
                let head: String = line.chars().take(50).collect();
                let ellipsis = if line.chars().count() > 50 { "..." } else { "" };
                format!("{}{} ({} lines, {} bytes)", head, ellipsis, lines, text.len())
            }
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, result: &AnalysisResult) -> String {
        Self::format(result)
    }

    fn format_json(&self, result: &AnalysisResult) -> String {
        Self::format_json(result)
    }

    fn format_summary(&self, result: &AnalysisResult) -> String {
        Self::format_summary(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use scopelens_domain::{ChartDataPoint, ChartType, ChatMessage};

    fn sample() -> AnalysisResult {
        AnalysisResult {
            title: "Costs outpace sales".to_string(),
            executive_summary: "Cost grew 30% while sales grew 10%.".to_string(),
            operational_insights: vec!["Review supplier contracts".to_string()],
            tool_suggestions: vec!["Cost tracking sheet".to_string()],
            chart_type: ChartType::Bar,
            chart_title: "Cost by month".to_string(),
            chart_data: vec![
                ChartDataPoint::new("Jan", 5000.0),
                ChartDataPoint::new("Feb", 5200.0),
            ],
            impact_score: Some(82.0),
        }
    }

    #[test]
    fn test_full_report_sections() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&sample());

        assert!(output.contains("Costs outpace sales"));
        assert!(output.contains("Executive Summary"));
        assert!(output.contains("Impact Score: 82/100"));
        assert!(output.contains("* Review supplier contracts"));
        assert!(output.contains("Chart: Cost by month (bar)"));
        assert!(output.contains("Jan"));
        assert!(output.contains("* Cost tracking sheet"));
    }

    #[test]
    fn test_score_omitted_when_absent() {
        colored::control::set_override(false);
        let mut result = sample();
        result.impact_score = None;

        assert!(!ConsoleFormatter::format(&result).contains("Impact Score"));
        assert!(!ConsoleFormatter::format_summary(&result).contains("Impact Score"));
    }

    #[test]
    fn test_json_round_trips_field_names() {
        let json = ConsoleFormatter::format_json(&sample());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["executiveSummary"], "Cost grew 30% while sales grew 10%.");
        assert_eq!(value["chartType"], "bar");
        assert_eq!(value["impactScore"], 82.0);
    }

    #[test]
    fn test_summary_is_short() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_summary(&sample());
        assert!(output.contains("=== Costs outpace sales ==="));
        assert!(!output.contains("Operational Insights"));
    }

    #[test]
    fn test_ambition_label() {
        colored::control::set_override(false);
        let label = ConsoleFormatter::ambition_label(AmbitionLevel::new(90).unwrap());
        assert_eq!(label.to_string(), "90% (Visionary)");
    }

    #[test]
    fn test_status_shows_error_and_inputs() {
        colored::control::set_override(false);
        let mut session = Session::new();
        session.load_demo();
        session.set_error("Could not read file x.csv: not found");

        let output = ConsoleFormatter::format_status(&session, "gemini-2.5-flash", false);
        assert!(output.contains("missing"));
        assert!(output.contains("Month,Sales,Cost,CustomerSatisfaction"));
        assert!(output.contains("Could not read file x.csv"));
        assert!(output.contains("0 messages"));
    }

    #[test]
    fn test_history_lists_speakers() {
        colored::control::set_override(false);
        let mut history = ChatHistory::new();
        history.push(ChatMessage::user("ลดต้นทุนยังไง", Utc::now()));
        history.push(ChatMessage::assistant("ลองลด...", Utc::now()));

        let output = ConsoleFormatter::format_history(&history);
        assert!(output.contains("You"));
        assert!(output.contains("ลดต้นทุนยังไง"));
        assert!(output.contains("Analyst"));
        assert!(output.contains("ลองลด..."));
    }
}
