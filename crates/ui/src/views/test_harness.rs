use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::QuizSettings;
use quiz_core::time::fixed_clock;
use services::AppServices;
use storage::bank::{QuestionBank, StaticQuestionBank};
use storage::repository::{HistoryRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::{QuizIntent, QuizTestHandles};
use crate::views::{FinishView, HistoryView, HomeView, QuizView};

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    History,
    Finish { points: u32, total: u32 },
    Quiz(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::History => rsx! { HistoryView {} },
        ViewKind::Finish { points, total } => rsx! { FinishView { points, total } },
        ViewKind::Quiz(id) => rsx! { QuizView { id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Send an intent to the mounted quiz view and let its task run.
    pub async fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self
            .quiz_handles
            .as_ref()
            .expect("quiz view mounted")
            .dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory())
}

pub fn setup_view_harness_with_history(
    view: ViewKind,
    history: Arc<dyn HistoryRepository>,
) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage { history })
}

fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let bank: Arc<dyn QuestionBank> =
        Arc::new(StaticQuestionBank::builtin().expect("builtin bank"));
    let app = Arc::new(AppServices::from_parts(
        fixed_clock(),
        QuizSettings::default(),
        bank,
        &storage,
    ));
    let quiz_handles = matches!(view, ViewKind::Quiz(_)).then(QuizTestHandles::default);

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        quiz_handles,
    }
}
