mod args;
mod logging;
mod play;

use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, Clock};
use ui::{App, UiApp, build_app_context};

use crate::args::{Args, ArgsError, Command, Parsed, print_usage};

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let parsed = match Args::parse(argv, |key| std::env::var(key).ok()) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    logging::init_logging();
    let clock = Clock::system();

    // Listing the bundled quizzes never touches the database.
    if parsed.command == Command::Quizzes {
        let services = AppServices::in_memory(clock, parsed.settings)?;
        for item in services.catalog().list(parsed.level) {
            println!(
                "{:<18} {:<7} {} ({} questions)",
                item.id.as_str(),
                item.level.label(),
                item.title,
                item.question_count
            );
        }
        return Ok(());
    }

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, clock, parsed.settings).await?;
    tracing::info!(
        db = %parsed.db_url,
        policy = %parsed.settings.incorrect_policy(),
        "services ready"
    );

    match parsed.command {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(services);
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Play => play::play(&services, parsed.quiz).await,
        Command::History => {
            let items = services.history().list_recent(parsed.limit).await?;
            if items.is_empty() {
                println!("No finished quizzes yet.");
            }
            for item in items {
                let when = item
                    .recorded_at
                    .map_or_else(|| "-".to_owned(), |at| at.format("%Y-%m-%d %H:%M").to_string());
                println!(
                    "{when}  {:<24} {:<7} {}/{}",
                    item.quiz_title,
                    item.level.label(),
                    item.points,
                    item.questions
                );
            }
            Ok(())
        }
        Command::Quizzes => Ok(()),
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
