//! CLI entrypoint for scopelens
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use scopelens_application::{
    AnalysisParams, AnalysisProgressNotifier, ConversationLogger, NoProgress, SessionController,
};
use scopelens_domain::{AmbitionLevel, OutputLanguage};
use scopelens_infrastructure::{
    ConfigLoader, Credential, FileConfig, GeminiGateway, JsonlConversationLogger,
    LocalDatasetReader,
};
use scopelens_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, OutputFormatter, ProgressReporter,
    ReplConfig, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        println!("Configuration sources (highest priority first):");
        for source in ConfigLoader::config_sources(cli.config.as_deref()) {
            println!("  {}", source);
        }
        return Ok(());
    }

    // Load configuration from files
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(cli.verbose, &config);
    info!("Starting scopelens");

    // CLI flags win over file configuration
    let params = analysis_params(&cli, &config);
    let output_config = OutputConfig {
        format: config.output.format.unwrap_or_default(),
        color: config.output.color,
    }
    .with_format_override(cli.output);
    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress,
        history_file: config.repl.history_file.clone(),
    };

    colored::control::set_override(output_config.color);

    // === Dependency Injection ===
    let key_vars = config.generation.key_vars();
    let key_vars: Vec<&str> = key_vars.iter().map(String::as_str).collect();
    let credential = Credential::from_env(&key_vars);

    if cli.check_key {
        match &credential {
            Some(credential) => println!("API key found in {}", credential.source()),
            None => {
                println!("No API key found. Checked: {}", key_vars.join(", "));
                std::process::exit(1);
            }
        }
        return Ok(());
    }
    if credential.is_none() {
        warn!("No API key found in {}", key_vars.join(", "));
    }

    let gateway = Arc::new(
        GeminiGateway::new(config.generation.to_gemini_config(), credential)
            .context("Failed to create the Gemini client")?,
    );

    let show_progress = repl_config.progress_enabled(cli.quiet);
    let progress: Arc<dyn AnalysisProgressNotifier> = if !show_progress {
        Arc::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(SimpleProgress)
    };

    let mut controller = SessionController::new(
        gateway,
        Arc::new(LocalDatasetReader::new()),
        params,
    )
    .with_progress(progress);

    if let Some(logger) = conversation_logger(&cli, &config) {
        controller = controller.with_conversation_logger(logger);
    }
    let controller = Arc::new(controller);

    // Apply inputs given on the command line
    if cli.demo {
        controller.load_demo();
    }
    if let Some(path) = &cli.data {
        controller.load_dataset(path).await?;
    }
    if let Some(text) = &cli.data_text {
        controller.set_dataset_text(text.as_str());
    }
    if let Some(scope) = &cli.scope {
        controller.set_scope(scope.as_str());
    }
    if let Some(path) = &cli.scope_file {
        let scope = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Could not read scope file {}", path.display()))?;
        controller.set_scope(scope);
    }
    if let Some(level) = ambition(&cli, &config) {
        controller.set_ambition(level);
    }

    if cli.has_inputs() {
        match controller.analyze().await {
            Ok(result) => println!("{}", ConsoleFormatter.render(&result, output_config.format)),
            Err(e) if cli.chat => eprintln!("Error: {}", e.user_message()),
            Err(e) => bail!(e.user_message()),
        }
    }

    if cli.chat {
        ChatRepl::new(controller)
            .with_history_file(repl_config.history_path())
            .run()
            .await?;
    } else if !cli.has_inputs() {
        bail!("No input given. Use --data/--scope, --demo, or --chat for interactive mode.");
    }

    Ok(())
}

/// Install the tracing subscriber.
///
/// `-v` flags pick the level; `RUST_LOG` is not consulted. With
/// `logging.file_dir` set, records go to a daily file there instead of stderr.
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    match config.logging.file_dir.as_deref() {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "scopelens.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_env_filter(EnvFilter::new(level))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(level))
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
            None
        }
    }
}

fn analysis_params(cli: &Cli, config: &FileConfig) -> AnalysisParams {
    let mut params = config.analysis_params();
    if let Some(model) = cli.model.as_deref() {
        params = params.with_model(model.into());
    }
    if let Some(language) = cli.language.as_deref() {
        params = params.with_language(OutputLanguage::from(language));
    }
    params
}

fn ambition(cli: &Cli, config: &FileConfig) -> Option<AmbitionLevel> {
    cli.ambition.or_else(|| config.analysis.parse_ambition())
}

fn conversation_logger(cli: &Cli, config: &FileConfig) -> Option<Arc<dyn ConversationLogger>> {
    let path = cli
        .log_conversation
        .clone()
        .or_else(|| config.logging.conversation_log.as_deref().map(PathBuf::from))?;

    match JsonlConversationLogger::new(&path) {
        Some(logger) => {
            info!("Logging conversation to {}", path.display());
            Some(Arc::new(logger))
        }
        None => {
            warn!("Conversation log disabled: could not open {}", path.display());
            None
        }
    }
}
