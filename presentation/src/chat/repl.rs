//! REPL (Read-Eval-Print Loop) for interactive analysis and follow-up chat

use crate::ConsoleFormatter;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use scopelens_application::{RunAnalysisError, SessionController};
use scopelens_domain::{AmbitionLevel, SessionPhase};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

const HISTORY_CAPACITY: usize = 500;

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Analyze,
    Load(PathBuf),
    Scope(String),
    Ambition(String),
    Demo,
    Result,
    History,
    Status,
    Help,
    Quit,
    /// Slash command that needs an argument but got none
    MissingArgument(&'static str),
    Unknown(String),
    /// Anything not starting with `/` is a follow-up question
    Question(String),
}

impl ReplCommand {
    /// Parse a trimmed, non-empty input line
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.strip_prefix('/') else {
            return ReplCommand::Question(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "analyze" | "a" => ReplCommand::Analyze,
            "load" | "l" if arg.is_empty() => ReplCommand::MissingArgument("/load <file>"),
            "load" | "l" => ReplCommand::Load(PathBuf::from(arg)),
            "scope" | "s" if arg.is_empty() => ReplCommand::MissingArgument("/scope <text>"),
            "scope" | "s" => ReplCommand::Scope(arg.to_string()),
            "ambition" if arg.is_empty() => ReplCommand::MissingArgument("/ambition <20-100>"),
            "ambition" => ReplCommand::Ambition(arg.to_string()),
            "demo" => ReplCommand::Demo,
            "result" | "r" => ReplCommand::Result,
            "history" => ReplCommand::History,
            "status" => ReplCommand::Status,
            "help" | "h" | "?" => ReplCommand::Help,
            "quit" | "exit" | "q" => ReplCommand::Quit,
            _ => ReplCommand::Unknown(line.to_string()),
        }
    }
}

/// Interactive REPL driving one [`SessionController`]
pub struct ChatRepl {
    controller: Arc<SessionController>,
    history_path: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: Arc<SessionController>) -> Self {
        Self {
            controller,
            history_path: None,
        }
    }

    /// Persist line-editor history to `path`
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_path else {
            return editor;
        };

        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("Could not open history file {}: {}", path.display(), e);
                editor
            }
        }
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> std::io::Result<()> {
        let mut line_editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("scopelens".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt) {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    if self.handle(ReplCommand::parse(line)).await {
                        break;
                    }
                }
                Ok(Signal::CtrlC) => {
                    println!("^C");
                    continue;
                }
                Ok(Signal::CtrlD) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    fn print_welcome(&self) {
        let session = self.controller.snapshot();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Scopelens - Interactive Mode         │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Model:    {}", self.controller.params().model);
        println!(
            "Ambition: {}",
            ConsoleFormatter::ambition_label(session.ambition())
        );
        if !self.controller.has_credential() {
            println!(
                "{}",
                "No API key found. Set API_KEY or GEMINI_API_KEY to run analyses.".yellow()
            );
        }
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /load <file>      - Load the dataset from a file");
        println!("  /scope <text>     - Set the job scope");
        println!("  /ambition <n>     - Set ambition (20-100, step 10)");
        println!("  /demo             - Load the demo dataset and scope");
        println!("  /analyze, /a      - Run the analysis");
        println!("  /result, /r       - Show the current result");
        println!("  /history          - Show the follow-up conversation");
        println!("  /status           - Show inputs and session state");
        println!("  /help, /h, /?     - Show this help");
        println!("  /quit, /exit, /q  - Exit");
        println!();
        println!("Anything else is sent as a follow-up question about the result.");
        println!();
    }

    /// Handle one command. Returns true if the REPL should exit.
    async fn handle(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::Analyze => self.analyze().await,
            ReplCommand::Load(path) => match self.controller.load_dataset(&path).await {
                Ok(bytes) => println!("Loaded {} ({} bytes)", path.display(), bytes),
                Err(e) => eprintln!("{} {}", "Error:".red(), e),
            },
            ReplCommand::Scope(text) => {
                self.controller.set_scope(text);
                println!("Scope updated.");
            }
            ReplCommand::Ambition(arg) => match arg.parse::<AmbitionLevel>() {
                Ok(level) => {
                    self.controller.set_ambition(level);
                    println!("Ambition: {}", ConsoleFormatter::ambition_label(level));
                }
                Err(e) => eprintln!("{} {}", "Error:".red(), e),
            },
            ReplCommand::Demo => {
                self.controller.load_demo();
                println!("Demo dataset and scope loaded. Run /analyze to start.");
            }
            ReplCommand::Result => match self.controller.snapshot().result() {
                Some(result) => println!("{}", ConsoleFormatter::format(result)),
                None => println!("No result yet. Run /analyze first."),
            },
            ReplCommand::History => {
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format_history(self.controller.snapshot().history())
                );
            }
            ReplCommand::Status => {
                let session = self.controller.snapshot();
                println!(
                    "{}",
                    ConsoleFormatter::format_status(
                        &session,
                        self.controller.params().model.as_str(),
                        self.controller.has_credential(),
                    )
                );
            }
            ReplCommand::MissingArgument(usage) => println!("Usage: {}", usage),
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
            ReplCommand::Question(question) => self.ask(&question).await,
        }
        false
    }

    async fn analyze(&self) {
        println!();
        match self.controller.analyze().await {
            Ok(result) => println!("{}", ConsoleFormatter::format(&result)),
            Err(RunAnalysisError::Validation(e)) => eprintln!("{} {}", "Error:".red(), e),
            Err(e) => eprintln!("{} {}", "Error:".red(), e.user_message()),
        }
    }

    async fn ask(&self, question: &str) {
        if self.controller.snapshot().phase() != SessionPhase::HasResult {
            println!("Run /analyze before asking follow-up questions.");
            return;
        }

        println!();
        match self.controller.ask(question).await {
            Ok(answer) => println!("{}\n{}\n", "Analyst".green().bold(), answer),
            Err(rejection) => eprintln!("{} {}", "Error:".red(), rejection),
        }
    }
}
