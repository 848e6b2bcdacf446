use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    FileQuestionSource, HttpQuestionSource, QuestionBankService, QuestionSource,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { raw: String },
    InvalidSource { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::InvalidSource { raw } => write!(f, "invalid --source value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    question_bank: Arc<QuestionBankService>,
}

impl UiApp for DesktopApp {
    fn question_bank(&self) -> Arc<QuestionBankService> {
        Arc::clone(&self.question_bank)
    }
}

struct Args {
    source: String,
    count: usize,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--source <url-or-path>] [--count <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --source questions.txt");
    eprintln!("  --count 3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PROMPTER_SOURCE, PROMPTER_COUNT");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut source = std::env::var("PROMPTER_SOURCE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "questions.txt".into());
        let mut count = std::env::var("PROMPTER_COUNT")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|&value| value >= 1)
            .unwrap_or(3);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--source" => {
                    let value = require_value(args, "--source")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidSource { raw: value });
                    }
                    source = value;
                }
                "--count" => {
                    let value = require_value(args, "--count")?;
                    let parsed: usize = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidCount { raw: value.clone() })?;
                    if parsed == 0 {
                        return Err(ArgsError::InvalidCount { raw: value });
                    }
                    count = parsed;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { source, count })
    }
}

fn build_source(location: &str) -> Arc<dyn QuestionSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Arc::new(HttpQuestionSource::new(location))
    } else {
        Arc::new(FileQuestionSource::new(location))
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let source = build_source(&parsed.source);
    let question_bank =
        Arc::new(QuestionBankService::new(source).with_subset_size(parsed.count));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { question_bank });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Prompter")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
