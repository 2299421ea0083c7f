//! CLI command definitions

use clap::{Parser, ValueEnum};
use scopelens_domain::AmbitionLevel;
use std::path::PathBuf;

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report with insights, chart and tool suggestions
    Full,
    /// Title, summary and impact score only
    Summary,
    /// Raw result as JSON
    Json,
}

impl From<OutputFormat> for scopelens_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => scopelens_domain::OutputFormat::Full,
            OutputFormat::Summary => scopelens_domain::OutputFormat::Summary,
            OutputFormat::Json => scopelens_domain::OutputFormat::Json,
        }
    }
}

fn parse_ambition(s: &str) -> Result<AmbitionLevel, String> {
    s.parse::<AmbitionLevel>().map_err(|e| e.to_string())
}

/// CLI arguments for scopelens
#[derive(Parser, Debug)]
#[command(name = "scopelens")]
#[command(author, version, about = "Scope-bound data analysis with a generative model")]
#[command(long_about = r#"
Scopelens analyzes a raw dataset against a job scope and reports insights,
a chart and tool suggestions that stay inside that scope. Follow-up questions
can be asked in an interactive chat.

The API key is read from API_KEY, falling back to GEMINI_API_KEY.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./scopelens.toml    Project-level config
3. ~/.config/scopelens/config.toml   Global config

Example:
  scopelens --demo
  scopelens --data sales.csv --scope "Monthly sales reporting" --ambition 70
  scopelens --data sales.csv --scope-file jd.txt --chat
  scopelens --chat
"#)]
pub struct Cli {
    /// Dataset file (CSV, plain text or JSON)
    #[arg(short, long, value_name = "FILE", conflicts_with = "data_text")]
    pub data: Option<PathBuf>,

    /// Dataset given inline
    #[arg(long, value_name = "TEXT")]
    pub data_text: Option<String>,

    /// Job scope / job description the analysis must stay within
    #[arg(short, long, value_name = "TEXT", conflicts_with = "scope_file")]
    pub scope: Option<String>,

    /// Read the job scope from a file
    #[arg(long, value_name = "FILE")]
    pub scope_file: Option<PathBuf>,

    /// Ambition level, 20-100 in steps of 10 (e.g. 70 or 70%)
    #[arg(short, long, value_name = "LEVEL", value_parser = parse_ambition)]
    pub ambition: Option<AmbitionLevel>,

    /// Generation model
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Response language (e.g. Thai, English)
    #[arg(short, long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Use the bundled demo dataset and scope
    #[arg(long)]
    pub demo: bool,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Report whether an API key is configured and exit
    #[arg(long)]
    pub check_key: bool,

    /// Write analysis and chat events to a JSONL file
    #[arg(long, value_name = "PATH")]
    pub log_conversation: Option<PathBuf>,
}

impl Cli {
    /// Whether any dataset or scope input was given on the command line
    pub fn has_inputs(&self) -> bool {
        self.demo
            || self.data.is_some()
            || self.data_text.is_some()
            || self.scope.is_some()
            || self.scope_file.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analysis_args() {
        let cli = Cli::try_parse_from([
            "scopelens",
            "--data",
            "sales.csv",
            "--scope",
            "sales reporting",
            "--ambition",
            "70%",
            "-o",
            "summary",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.data, Some(PathBuf::from("sales.csv")));
        assert_eq!(cli.scope.as_deref(), Some("sales reporting"));
        assert_eq!(cli.ambition.unwrap().value(), 70);
        assert_eq!(cli.output, Some(OutputFormat::Summary));
        assert_eq!(cli.verbose, 2);
        assert!(cli.has_inputs());
    }

    #[test]
    fn test_invalid_ambition_rejected() {
        assert!(Cli::try_parse_from(["scopelens", "--ambition", "55"]).is_err());
        assert!(Cli::try_parse_from(["scopelens", "--ambition", "110"]).is_err());
    }

    #[test]
    fn test_data_and_data_text_conflict() {
        let result =
            Cli::try_parse_from(["scopelens", "--data", "a.csv", "--data-text", "a,b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_chat_only() {
        let cli = Cli::try_parse_from(["scopelens", "--chat"]).unwrap();
        assert!(cli.chat);
        assert!(!cli.has_inputs());
        assert!(cli.output.is_none());
    }
}
