// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, AssistantProvider};
use crate::analysis::AnalysisService;
use crate::document::Document;
use crate::session::Session;
use crate::voice::VoiceIo;

mod app_config;
mod analysis;
mod document;
mod language_utils;
mod prompts;
mod providers;
mod session;
mod voice;
mod errors;

/// CLI Wrapper for AssistantProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliAssistantProvider {
    Ollama,
    Anthropic,
}

impl From<CliAssistantProvider> for AssistantProvider {
    fn from(cli_provider: CliAssistantProvider) -> Self {
        match cli_provider {
            CliAssistantProvider::Ollama => AssistantProvider::Ollama,
            CliAssistantProvider::Anthropic => AssistantProvider::Anthropic,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive session over a legal document (default command)
    #[command(alias = "assist")]
    Assist(AssistArgs),

    /// Generate shell completions for legalens
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AssistArgs {
    /// Legal document to load (.txt or .pdf)
    #[arg(value_name = "FILEPATH")]
    filepath: PathBuf,

    /// Language of the document and of the answers (full name, e.g. 'Tamil')
    #[arg(short = 'L', long)]
    language: Option<String>,

    /// Assistant provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliAssistantProvider>,

    /// Model name to use for analysis and translation
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Start with spoken answers disabled
    #[arg(short, long)]
    quiet_speech: bool,
}

/// LegaLens - Legal Document Assistant with AI
///
/// An interactive assistant that loads a legal document and answers
/// questions about it in the user's language, quoting the exact source
/// passage each answer is based on.
#[derive(Parser, Debug)]
#[command(name = "legalens")]
#[command(author = "LegaLens Team")]
#[command(version = "0.2.0")]
#[command(about = "AI-powered legal document assistant")]
#[command(long_about = "LegaLens loads a legal document and answers questions about it using AI providers.

EXAMPLES:
    legalens contract.txt                       # Ask questions about an English contract
    legalens -L Tamil lease.pdf                 # Document and answers in Tamil
    legalens -p anthropic -m claude-3-haiku contract.txt
    legalens -q contract.txt                    # Start with spoken answers off
    legalens --log-level debug contract.txt     # Verbose session logging
    legalens completions bash > legalens.bash   # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    ollama    - Local Ollama server (default: llama3.2:3b)
    anthropic - Anthropic Claude API (requires API key)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Legal document to load (.txt or .pdf)
    #[arg(value_name = "FILEPATH")]
    filepath: Option<PathBuf>,

    /// Language of the document and of the answers (full name, e.g. 'Tamil')
    #[arg(short = 'L', long)]
    language: Option<String>,

    /// Assistant provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliAssistantProvider>,

    /// Model name to use for analysis and translation
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Start with spoken answers disabled
    #[arg(short, long)]
    quiet_speech: bool,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");

            let mut stderr = std::io::stderr();
            let emoji = Self::get_emoji_for_level(record.level());
            let color = match record.level() {
                Level::Error => "\x1B[1;31m",
                Level::Warn => "\x1B[1;33m",
                Level::Info => "\x1B[1;32m",
                Level::Debug => "\x1B[1;36m",
                Level::Trace => "\x1B[1;35m",
            };
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "legalens", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Assist(args)) => run_assist(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let filepath = cli.filepath.ok_or_else(|| {
                anyhow!("FILEPATH is required when no subcommand is specified")
            })?;

            let assist_args = AssistArgs {
                filepath,
                language: cli.language,
                provider: cli.provider,
                model: cli.model,
                config_path: cli.config_path,
                log_level: cli.log_level,
                quiet_speech: cli.quiet_speech,
            };
            run_assist(assist_args).await
        }
    }
}

async fn run_assist(options: AssistArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(provider) = &options.provider {
            config.assistant.provider = provider.clone().into();
        }

        if let Some(model) = &options.model {
            config.assistant.set_model(model);
        }

        if let Some(language) = &options.language {
            config.language = language.clone();
        }

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(provider) = &options.provider {
            config.assistant.provider = provider.clone().into();
        }

        if let Some(model) = &options.model {
            config.assistant.set_model(model);
        }

        if let Some(language) = &options.language {
            config.language = language.clone();
        }

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate()
        .context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    // Load the document up front; an unreadable or empty document is fatal
    let document = Document::load(&options.filepath, &config.language)
        .context(format!("Failed to load document: {:?}", options.filepath))?;

    info!(
        "Loaded document {:?} ({} characters, language: {})",
        options.filepath,
        document.text().chars().count(),
        document.language()
    );

    let analysis = AnalysisService::new(config.assistant.clone())
        .context("Failed to create analysis service")?;

    let voice = VoiceIo::new(config.speech.clone());

    let tts_enabled = config.speech.tts_enabled && !options.quiet_speech;

    let mut session = Session::new(document, analysis, Some(voice), tts_enabled);
    session.run().await
}
