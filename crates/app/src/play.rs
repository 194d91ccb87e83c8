//! Terminal front end: the same controller, driven from stdin.

use std::cell::Cell;
use std::error::Error;
use std::rc::Rc;

use async_trait::async_trait;
use quiz_core::model::{QuizId, SessionPhase};
use services::{
    AppServices, ConfirmPrompt, Confirmer, FeedbackSignal, FeedbackSink, HistoryWrite,
    NavigationTarget, Navigator, QuizSessionController, Resolution, SessionCapabilities,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

#[derive(Clone)]
struct TerminalInput {
    lines: Rc<Mutex<Lines<BufReader<Stdin>>>>,
}

impl TerminalInput {
    fn new() -> Self {
        Self {
            lines: Rc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines())),
        }
    }

    /// Next trimmed line, `None` on end of input.
    async fn read_line(&self) -> std::io::Result<Option<String>> {
        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?.map(|line| line.trim().to_owned()))
    }
}

#[derive(Default)]
struct TerminalNavigator {
    last: Cell<Option<NavigationTarget>>,
}

impl Navigator for TerminalNavigator {
    fn go_to(&self, target: NavigationTarget) {
        self.last.set(Some(target));
    }
}

struct TerminalConfirmer {
    input: TerminalInput,
}

#[async_trait(?Send)]
impl Confirmer for TerminalConfirmer {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> Option<usize> {
        println!("{}: {}", prompt.title, prompt.message);
        for (index, option) in prompt.options.iter().enumerate() {
            println!("  {}) {}", index + 1, option.label);
        }
        match self.input.read_line().await {
            Ok(Some(line)) => line
                .parse::<usize>()
                .ok()
                .and_then(|choice| choice.checked_sub(1)),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read confirmation");
                None
            }
        }
    }
}

struct TerminalFeedback;

#[async_trait(?Send)]
impl FeedbackSink for TerminalFeedback {
    async fn play(&self, signal: FeedbackSignal) {
        match signal {
            FeedbackSignal::Shake => println!("  Wrong answer."),
        }
    }
}

fn print_question(controller: &QuizSessionController) {
    let Some(session) = controller.session() else {
        return;
    };
    let progress = session.progress();
    let question = session.current_question();

    println!();
    println!("[{}/{}] {}", progress.current, progress.total, question.title());
    for (index, alternative) in question.alternatives().iter().enumerate() {
        let marker = if session.selected() == Some(index) { '*' } else { ' ' };
        println!(" {marker}{}) {alternative}", index + 1);
    }
    if session.awaiting_advance() {
        println!("Press Enter to continue.");
    } else {
        println!("Number to select, Enter to confirm, s to skip, q to stop.");
    }
}

/// Pick a quiz from the catalog when none was given on the command line.
async fn choose_quiz(
    services: &AppServices,
    input: &TerminalInput,
) -> Result<Option<QuizId>, Box<dyn Error>> {
    let quizzes = services.catalog().list(None);
    for (index, item) in quizzes.iter().enumerate() {
        println!("  {}) {} [{}]", index + 1, item.title, item.level);
    }
    println!("Choose a quiz:");
    let Some(line) = input.read_line().await? else {
        return Ok(None);
    };
    let picked = line
        .parse::<usize>()
        .ok()
        .and_then(|choice| choice.checked_sub(1))
        .and_then(|index| quizzes.get(index));
    Ok(picked.map(|item| item.id.clone()))
}

/// Play one quiz in the terminal until it finishes or the user stops.
///
/// # Errors
///
/// Returns an error if stdin fails or the quiz cannot be loaded.
pub async fn play(services: &AppServices, quiz: Option<QuizId>) -> Result<(), Box<dyn Error>> {
    let input = TerminalInput::new();
    let quiz_id = match quiz {
        Some(id) => id,
        None => match choose_quiz(services, &input).await? {
            Some(id) => id,
            None => {
                println!("No quiz selected.");
                return Ok(());
            }
        },
    };

    let navigator = Rc::new(TerminalNavigator::default());
    let capabilities = SessionCapabilities::new(
        navigator.clone(),
        Rc::new(TerminalConfirmer {
            input: input.clone(),
        }),
        Rc::new(TerminalFeedback),
    );
    let mut controller = services.quiz_sessions().controller(capabilities);
    let quiz_title = controller.load_quiz(&quiz_id)?.quiz().title().to_owned();
    println!("{quiz_title}");

    while controller.phase() == SessionPhase::Active {
        print_question(&controller);
        let Some(line) = input.read_line().await? else {
            controller.abort()?;
            break;
        };

        match line.as_str() {
            "" | "c" => {
                let alternatives = controller
                    .session()
                    .map(|session| session.current_question().alternatives().to_vec())
                    .unwrap_or_default();
                let report = controller.confirm_answer().await?;
                match report.resolution {
                    Resolution::Correct => println!("  Correct!"),
                    Resolution::Incorrect { correct_index } => {
                        if let Some(answer) = alternatives.get(correct_index) {
                            println!("  The answer was: {answer}");
                        }
                    }
                    Resolution::SkipDeclined => println!("  Pick an alternative first."),
                    Resolution::Skipped | Resolution::Continued => {}
                }
            }
            "s" => {
                controller.request_skip().await?;
            }
            "q" => {
                controller.request_stop().await?;
            }
            other => match other.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                Some(index) => {
                    if let Err(err) = controller.select_alternative(index) {
                        println!("  {err}");
                    }
                }
                None => println!("  Unknown input: {other}"),
            },
        }
    }

    match navigator.last.get() {
        Some(NavigationTarget::Finish { points, total }) => {
            println!();
            println!("Finished: {points}/{total}");
            if let Some(HistoryWrite::Failed(reason)) =
                controller.last_completion().map(|report| &report.write)
            {
                eprintln!("history was not saved: {reason}");
            }
        }
        _ => println!("Quiz stopped."),
    }
    Ok(())
}
