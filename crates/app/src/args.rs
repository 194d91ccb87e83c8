use std::fmt;

use quiz_core::model::{
    Level, ParseIdError, ParseLevelError, QuizId, QuizSettings, QuizSettingsDraft,
    QuizSettingsError,
};

pub const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";
pub const DEFAULT_HISTORY_LIMIT: u32 = 20;

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
    InvalidLevel(ParseLevelError),
    InvalidQuizId(ParseIdError),
    InvalidSettings(QuizSettingsError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidLevel(err) => write!(f, "invalid --level value: {err}"),
            ArgsError::InvalidQuizId(err) => write!(f, "invalid --quiz value: {err}"),
            ArgsError::InvalidSettings(err) => write!(f, "invalid settings: {err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ui,
    Play,
    Quizzes,
    History,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "play" => Some(Self::Play),
            "quizzes" => Some(Self::Quizzes),
            "history" => Some(Self::History),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Args {
    pub command: Command,
    pub db_url: String,
    pub settings: QuizSettings,
    pub level: Option<Level>,
    pub quiz: Option<QuizId>,
    pub limit: u32,
}

#[derive(Debug)]
pub enum Parsed {
    Run(Args),
    Help,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [ui]      [--db <sqlite_url>] [--policy <policy>] [--skip-threshold <px>]");
    eprintln!("  app play      [--db <sqlite_url>] [--policy <policy>] [--quiz <id>]");
    eprintln!("  app quizzes   [--level easy|medium|hard]");
    eprintln!("  app history   [--db <sqlite_url>] [--limit <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --policy advance              (or require-skip)");
    eprintln!("  --skip-threshold -200");
    eprintln!("  --limit {DEFAULT_HISTORY_LIMIT}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_INCORRECT_POLICY, QUIZ_SKIP_THRESHOLD, QUIZ_LOG / RUST_LOG");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_threshold(flag: &'static str, raw: &str) -> Result<f32, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidNumber {
        flag,
        raw: raw.to_owned(),
    })
}

impl Args {
    /// Parse `argv` (without the program name). Flags override values from `env`.
    ///
    /// # Errors
    ///
    /// Returns `ArgsError` for unknown flags, missing or malformed values.
    pub fn parse(
        argv: Vec<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Parsed, ArgsError> {
        let mut args = argv.into_iter().peekable();

        // No subcommand (or only flags) launches the UI.
        let first = args.peek().cloned();
        let command = match first.as_deref() {
            None => Command::Ui,
            Some("--help" | "-h") => return Ok(Parsed::Help),
            Some(first) if first.starts_with("--") => Command::Ui,
            Some(first) => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_owned()))?;
                args.next();
                command
            }
        };

        let mut db_url = env("QUIZ_DB_URL").unwrap_or_else(|| DEFAULT_DB_URL.to_owned());
        let mut draft = QuizSettingsDraft::new();
        if let Some(raw) = env("QUIZ_INCORRECT_POLICY") {
            draft.incorrect_policy = Some(raw.parse().map_err(ArgsError::InvalidSettings)?);
        }
        if let Some(raw) = env("QUIZ_SKIP_THRESHOLD") {
            draft.skip_threshold = Some(parse_threshold("QUIZ_SKIP_THRESHOLD", &raw)?);
        }
        let mut level = None;
        let mut quiz = None;
        let mut limit = DEFAULT_HISTORY_LIMIT;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--policy" => {
                    let value = require_value(&mut args, "--policy")?;
                    draft.incorrect_policy =
                        Some(value.parse().map_err(ArgsError::InvalidSettings)?);
                }
                "--skip-threshold" => {
                    let value = require_value(&mut args, "--skip-threshold")?;
                    draft.skip_threshold = Some(parse_threshold("--skip-threshold", &value)?);
                }
                "--level" => {
                    let value = require_value(&mut args, "--level")?;
                    level = Some(value.parse().map_err(ArgsError::InvalidLevel)?);
                }
                "--quiz" => {
                    let value = require_value(&mut args, "--quiz")?;
                    quiz = Some(QuizId::new(value).map_err(ArgsError::InvalidQuizId)?);
                }
                "--limit" => {
                    let value = require_value(&mut args, "--limit")?;
                    limit = value.parse().map_err(|_| ArgsError::InvalidNumber {
                        flag: "--limit",
                        raw: value.clone(),
                    })?;
                }
                "--help" | "-h" => return Ok(Parsed::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let settings = draft.validate().map_err(ArgsError::InvalidSettings)?;
        Ok(Parsed::Run(Self {
            command,
            db_url: normalize_sqlite_url(db_url),
            settings,
            level,
            quiz,
            limit,
        }))
    }
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::IncorrectAnswerPolicy;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn run(parsed: Parsed) -> Args {
        match parsed {
            Parsed::Run(args) => args,
            Parsed::Help => panic!("expected run"),
        }
    }

    #[test]
    fn empty_argv_launches_ui_with_defaults() {
        let args = run(Args::parse(Vec::new(), no_env).unwrap());
        assert_eq!(args.command, Command::Ui);
        assert_eq!(args.db_url, DEFAULT_DB_URL);
        assert_eq!(args.settings, QuizSettings::default());
        assert_eq!(args.limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn flags_override_environment() {
        let env = |key: &str| match key {
            "QUIZ_INCORRECT_POLICY" => Some("require-skip".to_owned()),
            "QUIZ_DB_URL" => Some("sqlite::memory:".to_owned()),
            _ => None,
        };
        let argv = argv(&["play", "--policy", "advance", "--quiz", "math-1"]);
        let args = run(Args::parse(argv, env).unwrap());
        assert_eq!(args.command, Command::Play);
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(
            args.settings.incorrect_policy(),
            IncorrectAnswerPolicy::AdvanceAfterFeedback
        );
        assert_eq!(args.quiz.as_ref().map(QuizId::as_str), Some("math-1"));
    }

    #[test]
    fn environment_policy_applies_without_flag() {
        let env = |key: &str| (key == "QUIZ_INCORRECT_POLICY").then(|| "require-skip".to_owned());
        let args = run(Args::parse(Vec::new(), env).unwrap());
        assert_eq!(args.settings.incorrect_policy(), IncorrectAnswerPolicy::RequireSkip);
    }

    #[test]
    fn positive_skip_threshold_is_rejected() {
        let err = Args::parse(argv(&["--skip-threshold", "50"]), no_env).unwrap_err();
        assert!(matches!(err, ArgsError::InvalidSettings(_)));
    }

    #[test]
    fn quizzes_accepts_level_filter() {
        let args = run(Args::parse(argv(&["quizzes", "--level", "hard"]), no_env).unwrap());
        assert_eq!(args.command, Command::Quizzes);
        assert_eq!(args.level, Some(Level::Hard));
    }

    #[test]
    fn unknown_inputs_are_errors() {
        assert!(matches!(
            Args::parse(argv(&["seed"]), no_env),
            Err(ArgsError::UnknownCommand(_))
        ));
        assert!(matches!(
            Args::parse(argv(&["history", "--verbose"]), no_env),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(
            Args::parse(argv(&["history", "--limit"]), no_env),
            Err(ArgsError::MissingValue { flag: "--limit" })
        ));
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/quiz.db".to_owned());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/quiz.db"), "{url}");
    }
}
