// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::io::Write;
use std::path::PathBuf;

use td_translate::Language;
use td_translate::app_config::{Config, LogLevel};
use td_translate::app_controller::Controller;
use td_translate::file_utils::{FileManager, STDIO_PATH};

/// CLI wrapper for Language to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLanguage {
    Ar,
    En,
}

impl From<CliLanguage> for Language {
    fn from(cli_language: CliLanguage) -> Self {
        match cli_language {
            CliLanguage::Ar => Language::Ar,
            CliLanguage::En => Language::En,
        }
    }
}

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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
    /// Translate a piece of text ('-' reads standard input)
    Text {
        /// Text to translate
        #[arg(value_name = "TEXT")]
        text: String,

        /// Target language (defaults to the configured one)
        #[arg(short, long, value_enum)]
        target_language: Option<CliLanguage>,

        /// Source language (detected from the script when omitted)
        #[arg(short, long, value_enum)]
        source_language: Option<CliLanguage>,
    },

    /// Translate a blog post JSON record
    Post {
        /// Post JSON file ('-' reads standard input)
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Target language (defaults to the configured one)
        #[arg(short, long, value_enum)]
        target_language: Option<CliLanguage>,

        /// Output file (standard output when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Translate a JSON array of blog posts
    Posts {
        /// Posts JSON file ('-' reads standard input)
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Target language (defaults to the configured one)
        #[arg(short, long, value_enum)]
        target_language: Option<CliLanguage>,

        /// Output file (standard output when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Posts translated at the same time
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Answer a translate request {text, targetLang, sourceLang}
    Request {
        /// Request JSON file ('-' reads standard input)
        #[arg(value_name = "INPUT_PATH", default_value = STDIO_PATH)]
        input_path: PathBuf,

        /// Output file (standard output when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the translation API is reachable
    Check,

    /// Generate shell completions for td-translate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// td-translate - Arabic/English content translation
#[derive(Parser, Debug)]
#[command(name = "td-translate")]
#[command(version)]
#[command(about = "Arabic/English translation of website content")]
#[command(long_about = "td-translate translates site content between Arabic and English using the MyMemory API.

EXAMPLES:
    td-translate text \"Hello world\" -t ar        # Translate a sentence to Arabic
    td-translate post post.json -t en -o out.json  # Translate one blog post
    td-translate posts posts.json --concurrency 4  # Translate a list of posts
    echo '{\"text\":\"مرحبا\",\"targetLang\":\"en\"}' | td-translate request
    td-translate completions bash > td-translate.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Colored stderr logger
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let (color, tag) = Self::style_for_level(record.level());
        let _ = writeln!(
            std::io::stderr(),
            "\x1B[{}m{} {} {}\x1B[0m",
            color,
            now,
            tag,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "td-translate", &mut std::io::stdout());
        return Ok(());
    }

    // A command-line level wins over the config file
    if let Some(level) = cli.log_level {
        log::set_max_level(LogLevel::from(level).into());
    }

    let (config, created) = Config::load_or_create(&cli.config_path)?;
    if created {
        warn!("Config file not found at '{}', created default config.", cli.config_path);
    }
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.into());
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Text {
            text,
            target_language,
            source_language,
        } => {
            let text = if text == STDIO_PATH {
                FileManager::read_input(STDIO_PATH)?
            } else {
                text
            };
            let translated = controller
                .run_text(
                    &text,
                    target_language.map(Language::from),
                    source_language.map(Language::from),
                )
                .await;
            println!("{}", translated);
        }
        Commands::Post {
            input_path,
            target_language,
            output,
        } => {
            controller
                .run_post(&input_path, output.as_deref(), target_language.map(Language::from))
                .await?;
        }
        Commands::Posts {
            input_path,
            target_language,
            output,
            concurrency,
        } => {
            controller
                .run_posts(
                    &input_path,
                    output.as_deref(),
                    target_language.map(Language::from),
                    concurrency,
                )
                .await?;
        }
        Commands::Request { input_path, output } => {
            controller.run_request(&input_path, output.as_deref()).await?;
        }
        Commands::Check => {
            controller.check_connection().await?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}
