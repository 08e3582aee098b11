mod driver;
mod input;

use std::fmt;
use std::path::PathBuf;

use quiz_core::model::{DifficultyFilter, QuestionCount, QuizSettings};
use services::QuizService;
use storage::JsonFileSource;
use tracing_subscriber::EnvFilter;

use crate::driver::Driver;

const DEFAULT_DATA_PATH: &str = "data/questions.json";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { raw: String },
    InvalidDifficulty { raw: String },
    InvalidDataPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::InvalidDifficulty { raw } => {
                write!(f, "invalid --difficulty value: {raw}")
            }
            ArgsError::InvalidDataPath { raw } => write!(f, "invalid --data value: {raw:?}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--data <path>] [--count <n|all>] [--difficulty <level>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data {DEFAULT_DATA_PATH}");
    eprintln!("  --count 10");
    eprintln!("  --difficulty all   (all, basic, intermediate, advanced)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA_PATH, QUIZ_QUESTION_COUNT, QUIZ_DIFFICULTY, RUST_LOG");
}

#[derive(Debug, PartialEq)]
struct Args {
    data_path: PathBuf,
    settings: QuizSettings,
}

impl Args {
    /// Environment first, then flags on top.
    fn parse(
        env: impl Fn(&str) -> Option<String>,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut data_path =
            env("QUIZ_DATA_PATH").map_or_else(|| DEFAULT_DATA_PATH.into(), PathBuf::from);
        let mut settings = QuizSettings::default();
        if let Some(raw) = env("QUIZ_QUESTION_COUNT") {
            settings = settings.with_question_count(parse_count(raw)?);
        }
        if let Some(raw) = env("QUIZ_DIFFICULTY") {
            settings = settings.with_difficulty(parse_difficulty(raw)?);
        }

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data" => {
                    let value = require_value(args, "--data")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDataPath { raw: value });
                    }
                    data_path = PathBuf::from(value);
                }
                "--count" => {
                    let value = require_value(args, "--count")?;
                    settings = settings.with_question_count(parse_count(value)?);
                }
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    settings = settings.with_difficulty(parse_difficulty(value)?);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self {
            data_path,
            settings,
        }))
    }
}

fn parse_count(raw: String) -> Result<QuestionCount, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidCount { raw })
}

fn parse_difficulty(raw: String) -> Result<DifficultyFilter, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidDifficulty { raw })
}

/// Logs go to stderr so they never interleave with the quiz on stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = match Args::parse(|key| std::env::var(key).ok(), &mut argv) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return Err(e.into());
        }
    };

    init_tracing();

    let source = JsonFileSource::new(parsed.data_path.clone());
    let service = QuizService::load(&source).await.map_err(|e| {
        format!(
            "cannot start the quiz from {}: {e}",
            parsed.data_path.display()
        )
    })?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Driver::new(service, parsed.settings, stdin.lock(), stdout.lock()).run()
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Difficulty;
    use std::collections::HashMap;

    fn parse(env: &[(&str, &str)], argv: &[&str]) -> Result<Option<Args>, ArgsError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        let mut argv = argv.iter().map(|s| (*s).to_owned());
        Args::parse(|key| env.get(key).cloned(), &mut argv)
    }

    #[test]
    fn defaults_without_env_or_flags() {
        let args = parse(&[], &[]).unwrap().unwrap();
        assert_eq!(args.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(args.settings, QuizSettings::default());
    }

    #[test]
    fn flags_override_env() {
        let args = parse(
            &[("QUIZ_QUESTION_COUNT", "5"), ("QUIZ_DIFFICULTY", "basic")],
            &["--count", "all", "--data", "exams.json"],
        )
        .unwrap()
        .unwrap();

        assert_eq!(args.data_path, PathBuf::from("exams.json"));
        assert_eq!(args.settings.question_count(), QuestionCount::All);
        assert_eq!(
            args.settings.difficulty(),
            DifficultyFilter::Only(Difficulty::Basic)
        );
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            parse(&[], &["--count", "0"]),
            Err(ArgsError::InvalidCount { .. })
        ));
        assert!(matches!(
            parse(&[("QUIZ_DIFFICULTY", "expert")], &[]),
            Err(ArgsError::InvalidDifficulty { .. })
        ));
        assert!(matches!(
            parse(&[], &["--count"]),
            Err(ArgsError::MissingValue { flag: "--count" })
        ));
        assert!(matches!(
            parse(&[], &["--verbose"]),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(parse(&[], &["--help"]).unwrap().is_none());
    }
}
