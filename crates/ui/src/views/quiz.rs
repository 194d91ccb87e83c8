use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::gesture::DragEvent;
use quiz_core::model::{QuizId, QuizSessionError};
use services::{ConfirmRole, SessionCapabilities, SessionError};
use tokio::sync::Mutex;

use crate::capabilities::{DialogConfirmer, PendingDialog, RouterNavigator, ShakeFeedback};
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AlternativeVm, QuizVm, level_class};

#[cfg(test)]
use std::cell::RefCell;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum QuizIntent {
    Select(usize),
    Confirm,
    Stop,
    Drag(DragEvent),
}

/// Pointer drag in progress. `last` holds the latest reported translation.
#[derive(Clone, Copy, Debug, PartialEq)]
struct DragStart {
    x: f64,
    y: f64,
    last: Option<(f32, f32)>,
}

impl DragStart {
    fn new(x: f64, y: f64) -> Self {
        Self { x, y, last: None }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn delta(self, x: f64, y: f64) -> (f32, f32) {
        ((x - self.x) as f32, (y - self.y) as f32)
    }

    fn moved_to(self, x: f64, y: f64) -> (Self, DragEvent) {
        let (dx, dy) = self.delta(x, y);
        (
            Self {
                last: Some((dx, dy)),
                ..self
            },
            DragEvent::update(dx, dy),
        )
    }

    /// Release at `point`, or at the last known translation when the pointer
    /// left the page. `None` for a plain click.
    fn release(self, point: Option<(f64, f64)>) -> Option<DragEvent> {
        let last = self.last?;
        let (dx, dy) = point.map_or(last, |(x, y)| self.delta(x, y));
        Some(DragEvent::release(dx, dy))
    }
}

/// Rejections caused by input racing a transition the screen already shows.
fn is_stale_action(err: &SessionError) -> bool {
    matches!(
        err,
        SessionError::State(
            QuizSessionError::QuestionResolved | QuizSessionError::NotActive { .. }
        )
    )
}

#[component]
pub fn QuizView(id: String) -> Element {
    let ctx = use_context::<AppContext>();
    let router = use_navigator();
    let dialog = use_signal(|| None::<PendingDialog>);
    let shaking = use_signal(|| false);
    let snapshot = use_signal(|| None::<QuizVm>);
    let error = use_signal(|| None::<ViewError>);
    let mut drag = use_signal(|| None::<DragStart>);

    let controller = use_hook(|| {
        let capabilities = SessionCapabilities::new(
            Rc::new(RouterNavigator::new(router)),
            Rc::new(DialogConfirmer::new(dialog)),
            Rc::new(ShakeFeedback::new(shaking)),
        );
        Rc::new(Mutex::new(ctx.quiz_sessions().controller(capabilities)))
    });

    let controller_for_load = Rc::clone(&controller);
    let resource = use_resource(move || {
        let controller = Rc::clone(&controller_for_load);
        let id = id.clone();
        let mut snapshot = snapshot;

        async move {
            let quiz_id = QuizId::new(id).map_err(|_| ViewError::NotFound)?;
            let mut controller = controller.lock().await;
            match controller.load_quiz(&quiz_id) {
                Ok(_) | Err(SessionError::AlreadyStarted) => {}
                Err(SessionError::NotFound(_)) => return Err(ViewError::NotFound),
                Err(_) => return Err(ViewError::Unknown),
            }
            snapshot.set(QuizVm::from_controller(&controller));
            Ok::<_, ViewError>(())
        }
    });

    let dispatch = use_callback(move |intent: QuizIntent| {
        let controller = Rc::clone(&controller);
        let mut snapshot = snapshot;
        let mut error = error;

        spawn(async move {
            // Input arriving while a dialog or the shake is pending is dropped.
            let Ok(mut controller) = controller.try_lock() else {
                return;
            };
            let result = match intent {
                QuizIntent::Select(index) => controller.select_alternative(index),
                QuizIntent::Confirm => controller.confirm_answer().await.map(|_| ()),
                QuizIntent::Stop => controller.request_stop().await.map(|_| ()),
                QuizIntent::Drag(event) => controller.handle_drag(event).await.map(|_| ()),
            };
            match result {
                Ok(()) => error.set(None),
                Err(err) if is_stale_action(&err) => {
                    tracing::debug!(error = %err, ?intent, "stale quiz action ignored");
                }
                Err(err) => {
                    tracing::warn!(error = %err, ?intent, "quiz action rejected");
                    error.set(Some(ViewError::Unknown));
                }
            }
            snapshot.set(QuizVm::from_controller(&controller));
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch);
            }
        }
    }

    let state = view_state_from_resource(&resource);
    let card_class = if shaking() {
        "question-card question-card--shake"
    } else {
        "question-card"
    };

    rsx! {
        div {
            class: "page quiz",
            // Move and release are tracked on the page so the gesture survives the
            // card sliding out from under the pointer.
            onmousemove: move |evt: MouseEvent| {
                let Some(start) = drag() else { return };
                let point = evt.client_coordinates();
                let (moved, event) = start.moved_to(point.x, point.y);
                drag.set(Some(moved));
                dispatch.call(QuizIntent::Drag(event));
            },
            onmouseup: move |evt: MouseEvent| {
                let point = evt.client_coordinates();
                let released = drag.take().and_then(|start| start.release(Some((point.x, point.y))));
                if let Some(event) = released {
                    dispatch.call(QuizIntent::Drag(event));
                }
            },
            onmouseleave: move |_| {
                if let Some(event) = drag.take().and_then(|start| start.release(None)) {
                    dispatch.call(QuizIntent::Drag(event));
                }
            },
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    Link { class: "btn btn-secondary", to: Route::Home {}, "Back to quizzes" }
                },
                ViewState::Ready(()) => rsx! {
                    if let Some(vm) = snapshot() {
                        QuizHeader { vm: vm.clone() }
                        if let Some(err) = error() {
                            p { class: "error", "{err.message()}" }
                        }
                        div {
                            class: "{card_class}",
                            style: "{vm.card_style()}",
                            onmousedown: move |evt: MouseEvent| {
                                let point = evt.client_coordinates();
                                drag.set(Some(DragStart::new(point.x, point.y)));
                            },
                            h3 { class: "question-card__title", "{vm.question}" }
                            div { class: "alternatives",
                                for alternative in vm.alternatives.iter().cloned() {
                                    AlternativeButton {
                                        key: "{alternative.index}",
                                        alternative,
                                        disabled: vm.awaiting_advance,
                                        on_select: move |index| dispatch.call(QuizIntent::Select(index)),
                                    }
                                }
                            }
                        }
                        div { class: "quiz__footer",
                            button {
                                class: "btn btn-danger",
                                id: "quiz-stop",
                                r#type: "button",
                                onclick: move |_| dispatch.call(QuizIntent::Stop),
                                "Stop"
                            }
                            button {
                                class: "btn",
                                id: "quiz-confirm",
                                r#type: "button",
                                onclick: move |_| dispatch.call(QuizIntent::Confirm),
                                if vm.awaiting_advance { "Continue" } else { "Confirm" }
                            }
                        }
                    } else {
                        p { "Loading..." }
                    }
                },
            }
            if let Some(pending) = dialog() {
                ConfirmModal { pending }
            }
        }
    }
}

#[component]
fn QuizHeader(vm: QuizVm) -> Element {
    rsx! {
        header { class: "quiz__header",
            div { class: "quiz__heading",
                h2 { "{vm.title}" }
                span { class: "{level_class(vm.level)}", "{vm.level.label()}" }
            }
            span { class: "quiz__position", "{vm.position_label}" }
            div { class: "progress",
                div { class: "progress__bar", style: "width: {vm.progress_percent:.0}%;" }
            }
        }
    }
}

#[component]
fn AlternativeButton(
    alternative: AlternativeVm,
    disabled: bool,
    on_select: EventHandler<usize>,
) -> Element {
    let index = alternative.index;
    rsx! {
        button {
            class: "{alternative.state.class()}",
            r#type: "button",
            disabled,
            onclick: move |_| on_select.call(index),
            "{alternative.label}"
        }
    }
}

#[component]
fn ConfirmModal(pending: PendingDialog) -> Element {
    let prompt = pending.prompt().clone();
    let backdrop = pending.clone();

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| backdrop.answer(None),
            div {
                class: "modal",
                role: "dialog",
                aria_modal: "true",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                h3 { class: "modal__title", "{prompt.title}" }
                p { class: "modal__message", "{prompt.message}" }
                div { class: "modal__actions",
                    for (index, option) in prompt.options.iter().enumerate() {
                        button {
                            key: "{index}",
                            class: match option.role {
                                ConfirmRole::Accept => "btn",
                                ConfirmRole::Cancel => "btn btn-secondary",
                                ConfirmRole::Destructive => "btn btn-danger",
                            },
                            r#type: "button",
                            onclick: {
                                let pending = pending.clone();
                                move |_| pending.answer(Some(index))
                            },
                            "{option.label}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }
}

#[cfg(test)]
mod tests {
    use quiz_core::gesture::{SwipeConfig, SwipeOutcome, SwipeTracker};

    use super::*;

    #[test]
    fn leaving_the_page_releases_at_last_translation() {
        let start = DragStart::new(400.0, 100.0);
        let (start, update) = start.moved_to(140.0, 110.0);
        assert_eq!(update, DragEvent::update(-260.0, 10.0));

        let release = start.release(None).unwrap();
        assert_eq!(release, DragEvent::release(-260.0, 10.0));

        let mut tracker = SwipeTracker::new(SwipeConfig::default());
        tracker.handle(update);
        assert_eq!(tracker.handle(release), Some(SwipeOutcome::SkipRequested));
    }

    #[test]
    fn release_uses_pointer_position_when_known() {
        let (start, _) = DragStart::new(400.0, 100.0).moved_to(300.0, 100.0);
        assert_eq!(
            start.release(Some((150.0, 100.0))),
            Some(DragEvent::release(-250.0, 0.0))
        );
    }

    #[test]
    fn click_without_movement_is_not_a_drag() {
        assert_eq!(DragStart::new(10.0, 10.0).release(Some((10.0, 10.0))), None);
        assert_eq!(DragStart::new(10.0, 10.0).release(None), None);
    }

    #[test]
    fn stale_rejections_are_not_reported() {
        assert!(is_stale_action(&SessionError::State(
            QuizSessionError::QuestionResolved
        )));
        assert!(is_stale_action(&SessionError::State(
            QuizSessionError::NotActive {
                phase: quiz_core::model::SessionPhase::Completed,
            }
        )));
        assert!(!is_stale_action(&SessionError::NotLoaded));
        assert!(!is_stale_action(&SessionError::State(
            QuizSessionError::InvalidAlternative { index: 5, len: 3 }
        )));
    }
}
