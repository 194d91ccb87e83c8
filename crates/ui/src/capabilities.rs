//! Desktop implementations of the session capabilities.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use dioxus::prelude::*;
use services::{
    ConfirmPrompt, Confirmer, FeedbackSignal, FeedbackSink, NavigationTarget, Navigator,
};
use tokio::sync::oneshot;

use crate::routes::Route;

/// How long the card keeps the shake class. Matches the CSS animation.
pub const SHAKE_DURATION: Duration = Duration::from_millis(400);

/// Sends the controller's navigation requests through the router.
///
/// Uses `replace` so the back button never returns into a finished or aborted quiz.
#[derive(Clone)]
pub struct RouterNavigator {
    router: dioxus_router::Navigator,
}

impl RouterNavigator {
    #[must_use]
    pub fn new(router: dioxus_router::Navigator) -> Self {
        Self { router }
    }
}

impl Navigator for RouterNavigator {
    fn go_to(&self, target: NavigationTarget) {
        if self.router.replace(Route::from(target)).is_some() {
            tracing::warn!(screen = target.screen_name(), "navigation failed");
        }
    }
}

/// A prompt waiting for the user, rendered by `ConfirmModal`.
#[derive(Clone)]
pub struct PendingDialog {
    prompt: ConfirmPrompt,
    reply: Rc<RefCell<Option<oneshot::Sender<Option<usize>>>>>,
}

impl PendingDialog {
    fn new(prompt: ConfirmPrompt, reply: oneshot::Sender<Option<usize>>) -> Self {
        Self {
            prompt,
            reply: Rc::new(RefCell::new(Some(reply))),
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &ConfirmPrompt {
        &self.prompt
    }

    /// Resolve the dialog. Only the first answer counts.
    pub fn answer(&self, choice: Option<usize>) {
        if let Some(reply) = self.reply.borrow_mut().take() {
            let _ = reply.send(choice);
        }
    }
}

impl PartialEq for PendingDialog {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.reply, &other.reply)
    }
}

/// Shows prompts as a modal and waits for the button press.
#[derive(Clone, Copy)]
pub struct DialogConfirmer {
    dialog: Signal<Option<PendingDialog>>,
}

impl DialogConfirmer {
    #[must_use]
    pub fn new(dialog: Signal<Option<PendingDialog>>) -> Self {
        Self { dialog }
    }
}

#[async_trait(?Send)]
impl Confirmer for DialogConfirmer {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> Option<usize> {
        let (tx, rx) = oneshot::channel();
        let mut dialog = self.dialog;
        dialog.set(Some(PendingDialog::new(prompt.clone(), tx)));
        // A dropped sender counts as a dismissal.
        let choice = rx.await.ok().flatten();
        dialog.set(None);
        choice
    }
}

/// Plays feedback by toggling a flag the quiz card turns into a CSS class.
#[derive(Clone, Copy)]
pub struct ShakeFeedback {
    shaking: Signal<bool>,
    duration: Duration,
}

impl ShakeFeedback {
    #[must_use]
    pub fn new(shaking: Signal<bool>) -> Self {
        Self::with_duration(shaking, SHAKE_DURATION)
    }

    #[must_use]
    pub fn with_duration(shaking: Signal<bool>, duration: Duration) -> Self {
        Self { shaking, duration }
    }
}

#[async_trait(?Send)]
impl FeedbackSink for ShakeFeedback {
    async fn play(&self, signal: FeedbackSignal) {
        match signal {
            FeedbackSignal::Shake => {
                let mut shaking = self.shaking;
                shaking.set(true);
                tokio::time::sleep(self.duration).await;
                shaking.set(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pending_dialog_answers_once() {
        let (tx, rx) = oneshot::channel();
        let pending = PendingDialog::new(ConfirmPrompt::skip_question(), tx);
        let copy = pending.clone();
        pending.answer(Some(0));
        copy.answer(Some(1));
        assert_eq!(rx.await.ok(), Some(Some(0)));
        assert!(pending == copy);
    }
}
