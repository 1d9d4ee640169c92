// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use crate::app_config::{Config, TranslationProvider};
use crate::app_controller::{Controller, TranslateRequest};
use crate::lang::Language;
use crate::session::EditRequest;

mod app_config;
mod app_controller;
mod clients;
mod errors;
mod lang;
mod segmenter;
mod session;
mod translation;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Gemini,
    Ollama,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Gemini => TranslationProvider::Gemini,
            CliTranslationProvider::Ollama => TranslationProvider::Ollama,
        }
    }
}

/// CLI Wrapper for Language to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLanguage {
    French,
    English,
    Polish,
}

impl From<CliLanguage> for Language {
    fn from(cli_language: CliLanguage) -> Self {
        match cli_language {
            CliLanguage::French => Language::French,
            CliLanguage::English => Language::English,
            CliLanguage::Polish => Language::Polish,
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

impl From<CliLogLevel> for LevelFilter {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LevelFilter::Error,
            CliLogLevel::Warn => LevelFilter::Warn,
            CliLogLevel::Info => LevelFilter::Info,
            CliLogLevel::Debug => LevelFilter::Debug,
            CliLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a passage into the other two languages and print the result
    Translate {
        /// Text to translate; reads stdin when omitted
        text: Option<String>,

        /// The language the text is authored in
        #[arg(short, long, value_enum)]
        source_language: CliLanguage,
    },

    /// Apply an edit to a session and print the resulting snapshot
    Edit {
        /// Session id; a fresh one is generated when omitted
        #[arg(long)]
        session_id: Option<String>,

        /// The language being authored
        #[arg(short, long, value_enum)]
        language: CliLanguage,

        /// The new text for that language
        text: String,
    },

    /// Test the connection to the configured translation provider
    TestConnection,
}

/// Trilingua - collaborative three-language translation
///
/// Translates a jointly authored passage among French, English and Polish
/// using an external language model, and keeps shared sessions in sync.
#[derive(Parser, Debug)]
#[command(name = "trilingua")]
#[command(version = "1.0.0")]
#[command(about = "Collaborative three-language translation")]
#[command(long_about = "Trilingua translates a jointly authored passage among French, English \
and Polish using an external language model provider.

EXAMPLES:
    trilingua translate -s english \"Hello, world.\"
    echo \"Bonjour.\" | trilingua translate -s french
    trilingua edit -l polish \"Witaj\"                # fresh session
    trilingua test-connection
    trilingua -p ollama translate -s english \"Hi.\"

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.

SUPPORTED PROVIDERS:
    gemini - Google Gemini API (requires API key, or GEMINI_API_KEY)
    ollama - Local Ollama server (default: llama3.2:3b)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    /// New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    /// Initialize the global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    /// ANSI color for a log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
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

    let cli = CommandLineOptions::parse();

    if let Some(level) = &cli.log_level {
        log::set_max_level(level.clone().into());
    }

    let config = load_config(&cli)?;
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        let level = match config.log_level {
            app_config::LogLevel::Error => LevelFilter::Error,
            app_config::LogLevel::Warn => LevelFilter::Warn,
            app_config::LogLevel::Info => LevelFilter::Info,
            app_config::LogLevel::Debug => LevelFilter::Debug,
            app_config::LogLevel::Trace => LevelFilter::Trace,
        };
        log::set_max_level(level);
    }

    match cli.command {
        Commands::Translate {
            text,
            source_language,
        } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read text from stdin")?;
                    buffer
                }
            };

            let controller = Controller::with_config(config)?;
            let request = TranslateRequest {
                text,
                source_language: source_language.into(),
            };
            let result = controller.handle_translate(&request).await;

            println!("{}", serde_json::to_string_pretty(&result.texts)?);
        }

        Commands::Edit {
            session_id,
            language,
            text,
        } => {
            let session_id =
                session_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

            let controller = Controller::with_config(config)?;
            let request = EditRequest {
                session_id,
                language: language.into(),
                text,
            };
            let snapshot = controller
                .handle_edit(&request)
                .await
                .map_err(|e| anyhow!("Edit rejected: {}", e))?;

            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }

        Commands::TestConnection => {
            app_controller::test_connection(&config)
                .await
                .map_err(|e| anyhow!("Connection test failed: {}", e))?;
            println!("Connection OK ({})", config.translation.provider);
        }
    }

    Ok(())
}

/// Load the configuration file, creating a default one if missing, and apply
/// CLI overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let config_path = &cli.config_path;

    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(provider) = &cli.provider {
        config.translation.provider = provider.clone().into();
    }

    if let Some(model) = &cli.model {
        let provider_str = config.translation.provider.to_lowercase_string();
        if let Some(provider_config) = config
            .translation
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_str)
        {
            provider_config.model = model.clone();
        }
    }

    Ok(config)
}
