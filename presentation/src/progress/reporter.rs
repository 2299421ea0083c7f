//! Progress reporting while a generation call is outstanding

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use scopelens_application::ports::progress::AnalysisProgressNotifier;
use std::sync::Mutex;
use std::time::Duration;

/// Spinner-based progress display
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn finish(&self, message: Option<String>) {
        let Ok(mut slot) = self.spinner.lock() else {
            return;
        };
        if let Some(pb) = slot.take() {
            match message {
                Some(message) => pb.finish_with_message(message),
                None => pb.finish_and_clear(),
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisProgressNotifier for ProgressReporter {
    fn on_analysis_start(&self, model: &str) {
        self.start(format!("Analyzing with {}...", model.bold()));
    }

    fn on_analysis_complete(&self, success: bool) {
        let message = if success {
            format!("{} Analysis complete", "v".green())
        } else {
            format!("{} Analysis failed", "x".red())
        };
        self.finish(Some(message));
    }

    fn on_follow_up_start(&self) {
        self.start("Thinking...".to_string());
    }

    fn on_follow_up_complete(&self) {
        self.finish(None);
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl AnalysisProgressNotifier for SimpleProgress {
    fn on_analysis_start(&self, model: &str) {
        println!("{} Analyzing with {}", "->".cyan(), model.bold());
    }

    fn on_analysis_complete(&self, success: bool) {
        if success {
            println!("  {} done", "v".green());
        } else {
            println!("  {} failed", "x".red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_analysis_start("gemini-2.5-flash");
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.on_analysis_complete(true);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_follow_up_replaces_stale_spinner() {
        let reporter = ProgressReporter::new();
        reporter.on_follow_up_start();
        reporter.on_follow_up_start();
        assert!(reporter.spinner.lock().unwrap().is_some());

        reporter.on_follow_up_complete();
        assert!(reporter.spinner.lock().unwrap().is_none());
        // completing twice is harmless
        reporter.on_follow_up_complete();
    }
}
