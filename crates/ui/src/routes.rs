use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};
use services::NavigationTarget;

use crate::views::{FinishView, HistoryView, HomeView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz/:id", QuizView)] Quiz { id: String },
        #[route("/finish/:points/:total", FinishView)] Finish { points: u32, total: u32 },
        #[route("/history", HistoryView)] History {},
}

impl From<NavigationTarget> for Route {
    fn from(target: NavigationTarget) -> Self {
        match target {
            NavigationTarget::Home => Route::Home {},
            NavigationTarget::Finish { points, total } => Route::Finish { points, total },
        }
    }
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Quiz" }
            ul {
                li { Link { to: Route::Home {}, "Quizzes" } }
                li { Link { to: Route::History {}, "History" } }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_target_maps_to_finish_route() {
        let route = Route::from(NavigationTarget::Finish {
            points: 2,
            total: 3,
        });
        assert_eq!(route.to_string(), "/finish/2/3");
        assert_eq!(Route::from(NavigationTarget::Home).to_string(), "/");
    }
}
