use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::routes::Route;
use crate::vm::FinishVm;

#[component]
pub fn FinishView(points: u32, total: u32) -> Element {
    let navigator = use_navigator();
    let vm = FinishVm::new(points, total);

    rsx! {
        div { class: "page finish",
            div { class: "finish__trophy", "🏆" }
            h2 { class: "finish__headline", "{vm.headline}" }
            p { class: "finish__score", "{vm.score_label}" }
            div { class: "finish__actions",
                button {
                    class: "btn",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.replace(Route::Home {});
                    },
                    "Go home"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::History {});
                    },
                    "History"
                }
            }
        }
    }
}
