//! Host-provided capabilities the session controller drives.
//!
//! All of them run on the UI thread, so none require `Send`.

use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;

//
// ─── NAVIGATION ────────────────────────────────────────────────────────────────
//

/// Screens the controller can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    Home,
    Finish { points: u32, total: u32 },
}

impl NavigationTarget {
    #[must_use]
    pub fn screen_name(&self) -> &'static str {
        match self {
            NavigationTarget::Home => "home",
            NavigationTarget::Finish { .. } => "finish",
        }
    }

    /// Route parameters in string form.
    #[must_use]
    pub fn params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if let NavigationTarget::Finish { points, total } = self {
            params.insert("points".to_owned(), points.to_string());
            params.insert("total".to_owned(), total.to_string());
        }
        params
    }
}

pub trait Navigator {
    fn go_to(&self, target: NavigationTarget);
}

//
// ─── CONFIRMATION ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmRole {
    Accept,
    Cancel,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmOption {
    pub label: String,
    pub role: ConfirmRole,
}

impl ConfirmOption {
    #[must_use]
    pub fn new(label: impl Into<String>, role: ConfirmRole) -> Self {
        Self {
            label: label.into(),
            role,
        }
    }
}

/// A blocking user decision: a message and the options to pick from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub options: Vec<ConfirmOption>,
}

impl ConfirmPrompt {
    #[must_use]
    pub fn skip_question() -> Self {
        Self {
            title: "Skip".to_owned(),
            message: "Do you really want to skip this question?".to_owned(),
            options: vec![
                ConfirmOption::new("Yes", ConfirmRole::Accept),
                ConfirmOption::new("No", ConfirmRole::Cancel),
            ],
        }
    }

    #[must_use]
    pub fn stop_quiz() -> Self {
        Self {
            title: "Stop".to_owned(),
            message: "Do you want to stop now?".to_owned(),
            options: vec![
                ConfirmOption::new("No", ConfirmRole::Cancel),
                ConfirmOption::new("Yes", ConfirmRole::Destructive),
            ],
        }
    }

    /// Whether the chosen option (if any) goes ahead with the action.
    #[must_use]
    pub fn is_accepted(&self, choice: Option<usize>) -> bool {
        choice
            .and_then(|index| self.options.get(index))
            .is_some_and(|option| option.role != ConfirmRole::Cancel)
    }
}

#[async_trait(?Send)]
pub trait Confirmer {
    /// Show the prompt and wait for the user. Returns the chosen option index,
    /// or `None` if the prompt was dismissed.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> Option<usize>;
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackSignal {
    /// Wrong answer: shake the question card.
    Shake,
}

#[async_trait(?Send)]
pub trait FeedbackSink {
    /// Play the signal; resolves when the animation finished.
    async fn play(&self, signal: FeedbackSignal);
}

/// Bundle of capabilities handed to one controller.
#[derive(Clone)]
pub struct SessionCapabilities {
    pub navigator: Rc<dyn Navigator>,
    pub confirmer: Rc<dyn Confirmer>,
    pub feedback: Rc<dyn FeedbackSink>,
}

impl SessionCapabilities {
    #[must_use]
    pub fn new(
        navigator: Rc<dyn Navigator>,
        confirmer: Rc<dyn Confirmer>,
        feedback: Rc<dyn FeedbackSink>,
    ) -> Self {
        Self {
            navigator,
            confirmer,
            feedback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_params_are_strings() {
        let target = NavigationTarget::Finish {
            points: 2,
            total: 3,
        };
        assert_eq!(target.screen_name(), "finish");
        let params = target.params();
        assert_eq!(params.get("points").map(String::as_str), Some("2"));
        assert_eq!(params.get("total").map(String::as_str), Some("3"));
        assert_eq!(NavigationTarget::Home.screen_name(), "home");
        assert!(NavigationTarget::Home.params().is_empty());
    }

    #[test]
    fn skip_prompt_accepts_yes_only() {
        let prompt = ConfirmPrompt::skip_question();
        assert!(prompt.is_accepted(Some(0)));
        assert!(!prompt.is_accepted(Some(1)));
        assert!(!prompt.is_accepted(None));
        assert!(!prompt.is_accepted(Some(9)));
    }

    #[test]
    fn stop_prompt_treats_destructive_as_accept() {
        let prompt = ConfirmPrompt::stop_quiz();
        assert!(!prompt.is_accepted(Some(0)));
        assert!(prompt.is_accepted(Some(1)));
    }
}
