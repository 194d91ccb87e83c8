use dioxus::prelude::*;
use dioxus_router::Link;
use quiz_core::model::Level;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{QuizCardVm, level_class, map_quiz_cards};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let mut level = use_signal(|| None::<Level>);

    let cards = use_memo(move || map_quiz_cards(&catalog.list(level())));

    rsx! {
        div { class: "page",
            h2 { "Choose a quiz" }
            div { class: "levels",
                for option in Level::ALL {
                    LevelChip {
                        level: option,
                        checked: level() == Some(option),
                        on_toggle: move |picked: Level| {
                            let next = (level() != Some(picked)).then_some(picked);
                            level.set(next);
                        },
                    }
                }
            }
            if cards.read().is_empty() {
                p { class: "empty", "No quizzes for this level." }
            } else {
                ul { class: "quiz-list",
                    for card in cards.read().iter().cloned() {
                        QuizCard { key: "{card.id}", card }
                    }
                }
            }
        }
    }
}

#[component]
fn LevelChip(level: Level, checked: bool, on_toggle: EventHandler<Level>) -> Element {
    let class = if checked {
        format!("{} level--checked", level_class(level))
    } else {
        level_class(level).to_owned()
    };
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| on_toggle.call(level),
            "{level.label()}"
        }
    }
}

#[component]
fn QuizCard(card: QuizCardVm) -> Element {
    rsx! {
        li { class: "quiz-card",
            Link { to: Route::Quiz { id: card.id.clone() },
                span { class: "{card.level_class}", "{card.level.label()}" }
                h3 { "{card.title}" }
                p { class: "quiz-card__meta", "{card.questions_label}" }
            }
        }
    }
}
