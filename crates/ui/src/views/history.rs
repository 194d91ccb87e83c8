use dioxus::prelude::*;
use quiz_core::model::HistoryEntryId;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryRowVm, map_history_rows};

const HISTORY_LIMIT: u32 = 50;

#[derive(Clone, Debug, PartialEq)]
struct HistoryData {
    rows: Vec<HistoryRowVm>,
}

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let history = ctx.history();
    let remove_error = use_signal(|| None::<ViewError>);

    let history_for_resource = history.clone();
    let resource = use_resource(move || {
        let history = history_for_resource.clone();
        async move {
            let items = history
                .list_recent(HISTORY_LIMIT)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(HistoryData {
                rows: map_history_rows(&items),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    let on_remove = use_callback(move |id: u64| {
        let history = history.clone();
        let mut resource = resource;
        let mut remove_error = remove_error;
        spawn(async move {
            match history.remove(HistoryEntryId::new(id)).await {
                Ok(()) => remove_error.set(None),
                Err(err) => {
                    tracing::warn!(error = %err, entry_id = id, "failed to remove history entry");
                    remove_error.set(Some(ViewError::Unknown));
                }
            }
            resource.restart();
        });
    });

    rsx! {
        div { class: "page",
            h2 { "History" }

            if let Some(err) = remove_error() {
                p { class: "error", "{err.message()}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.rows.is_empty() {
                        p { class: "empty", "No finished quizzes yet." }
                    } else {
                        ul { class: "history-list",
                            for row in data.rows {
                                HistoryRow { key: "{row.id}", row, on_remove }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn HistoryRow(row: HistoryRowVm, on_remove: EventHandler<u64>) -> Element {
    let id = row.id;
    rsx! {
        li { class: "history-row",
            div { class: "history-row__info",
                h3 { "{row.title}" }
                p { class: "history-row__meta", "{row.level_label} · {row.recorded_at_str}" }
            }
            span { class: "history-row__score", "{row.score_label}" }
            button {
                class: "btn btn-ghost",
                r#type: "button",
                onclick: move |_| on_remove.call(id),
                "Remove"
            }
        }
    }
}
