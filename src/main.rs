// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, debug, info};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use nexo::api::{self, TranslateReply};
use nexo::app_config::{Config, LogLevel};
use nexo::detection::{self, confidence_label};
use nexo::errors::AppError;
use nexo::language_utils::SUPPORTED_LANGUAGES;
use nexo::providers::transport::ReqwestTransport;
use nexo::text_stats::TextStats;
use nexo::translation::{SourceLanguage, TranslationOrchestrator, TranslationRequest};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate text through the configured providers
    Translate {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: String,

        /// Source language code, or 'auto' to let the provider detect it
        #[arg(short, long)]
        from: Option<String>,

        /// Target language code (e.g., 'en', 'es', 'fr')
        #[arg(short, long)]
        to: Option<String>,

        /// Print the JSON reply instead of the bare translation
        #[arg(long)]
        json: bool,

        /// Give up on the whole fallback chain after this many seconds
        #[arg(long, value_name = "SECONDS")]
        deadline_secs: Option<u64>,
    },

    /// Read a JSON request body from stdin and print the JSON reply
    Request,

    /// Guess the language of a text without any network call
    Detect {
        /// Text to inspect
        #[arg(value_name = "TEXT")]
        text: String,

        /// Print the signal as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print word, sentence and reading time statistics
    Stats {
        /// Text to inspect
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// List the supported languages
    Languages,

    /// Generate shell completions for nexo
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// nexo - translation with provider fallback
///
/// Translates text through DeepL, LibreTranslate and MyMemory, trying them in
/// priority order until one succeeds.
#[derive(Parser, Debug)]
#[command(name = "nexo")]
#[command(version)]
#[command(about = "Translate text with ordered provider fallback")]
#[command(long_about = "nexo translates text through several translation services, trying them in priority order.

EXAMPLES:
    nexo translate 'Hello world' --to es          # Translate to Spanish
    nexo translate 'Bonjour' --from fr --to en    # Explicit source language
    echo '{\"text\":\"Hi\",\"targetLang\":\"de\"}' | nexo request
    nexo detect 'Der Hund und die Katze'          # Offline language guess
    nexo completions bash > nexo.bash             # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. Credentials can be supplied through DEEPL_API_KEY,
    DEEPL_API_URL, LIBRETRANSLATE_URL, LIBRETRANSLATE_API_KEY, MYMEMORY_URL and
    MYMEMORY_EMAIL, or a .env file.

SUPPORTED PROVIDERS:
    deepl          - DeepL API (requires API key)
    libretranslate - LibreTranslate instance (default: libretranslate.com)
    mymemory       - MyMemory API (optional contact email)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "conf.json")]
    config: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
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
    // Start at info; the config may change the level once loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();
    if let Some(level) = &cli.log_level {
        log::set_max_level(LogLevel::from(level.clone()).to_level_filter());
    }

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "nexo", &mut std::io::stdout());
            Ok(())
        }
        Commands::Detect { text, json } => run_detect(&text, json),
        Commands::Stats { text } => {
            let stats = TextStats::of(&text);
            println!("Words:        {}", stats.words);
            println!("Characters:   {}", stats.characters);
            println!("Sentences:    {}", stats.sentences);
            println!("Reading time: {}", stats.reading_time);
            Ok(())
        }
        Commands::Languages => {
            for (code, name) in SUPPORTED_LANGUAGES {
                println!("{:<4} {}", code, name);
            }
            Ok(())
        }
        Commands::Translate {
            text,
            from,
            to,
            json,
            deadline_secs,
        } => {
            let (config, orchestrator) = load_orchestrator(&cli.config, cli.log_level.is_some())?;
            let source = from.unwrap_or_else(|| config.default_source_language.clone());
            let target = to.unwrap_or_else(|| config.default_target_language.clone());
            run_translate(&orchestrator, text, &source, &target, json, deadline_secs).await
        }
        Commands::Request => {
            let (_, orchestrator) = load_orchestrator(&cli.config, cli.log_level.is_some())?;
            run_request(&orchestrator).await
        }
    }
}

/// Load configuration and build the orchestrator over the reqwest transport
fn load_orchestrator(config_path: &Path, log_level_forced: bool) -> Result<(Config, TranslationOrchestrator)> {
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let mut config = Config::load_or_default(config_path)
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;
    config.apply_env_overrides(|name| std::env::var(name).ok());
    config
        .validate()
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;

    if !log_level_forced {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let orchestrator = TranslationOrchestrator::from_config(&config, Arc::new(ReqwestTransport::new()))
        .context("Failed to set up translation providers")?;
    debug!("Provider order: {}", orchestrator.provider_ids().join(", "));

    Ok((config, orchestrator))
}

async fn run_translate(
    orchestrator: &TranslationOrchestrator,
    text: String,
    source: &str,
    target: &str,
    json: bool,
    deadline_secs: Option<u64>,
) -> Result<()> {
    let request = TranslationRequest::new(text, SourceLanguage::from(source), target);

    if request.source_language.is_auto() {
        if let Some(signal) = detection::detect(&request.source_text) {
            debug!(
                "Local hint: {} ({:.2}, {})",
                signal.display_name,
                signal.confidence,
                confidence_label(signal.confidence)
            );
        }
    }

    let outcome = match deadline_secs {
        Some(secs) => {
            let deadline = Duration::from_secs(secs);
            tokio::time::timeout(deadline, orchestrator.translate(&request))
                .await
                .map_err(|_| AppError::DeadlineExceeded(deadline))?
        }
        None => orchestrator.translate(&request).await,
    };
    let result = outcome.map_err(AppError::from)?;

    info!("Translated with {}", result.provider_used);
    if json {
        let reply = TranslateReply::from(result);
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else {
        println!("{}", result.translated_text);
    }
    Ok(())
}

async fn run_request(orchestrator: &TranslationOrchestrator) -> Result<()> {
    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .map_err(|e| AppError::File(format!("Failed to read request from stdin: {}", e)))?;

    let reply = api::handle_translate(orchestrator, &body).await;
    println!("{}", serde_json::to_string_pretty(&reply.body)?);

    if !reply.is_success() {
        return Err(anyhow!("Request failed with status {}", reply.status));
    }
    Ok(())
}

fn run_detect(text: &str, json: bool) -> Result<()> {
    let signal = detection::detect(text);
    if json {
        println!("{}", serde_json::to_string_pretty(&signal)?);
        return Ok(());
    }

    match signal {
        Some(signal) => println!(
            "{} ({}) confidence {:.2} [{}]",
            signal.display_name,
            signal.code,
            signal.confidence,
            confidence_label(signal.confidence)
        ),
        None => println!("Not enough text to detect a language"),
    }
    Ok(())
}
