use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::gesture::SwipeConfig;

/// What happens after an incorrect answer once the feedback animation finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IncorrectAnswerPolicy {
    /// Move to the next question as soon as the feedback resolves.
    #[default]
    AdvanceAfterFeedback,
    /// Stay on the answered question until the user confirms again or skips.
    RequireSkip,
}

impl IncorrectAnswerPolicy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IncorrectAnswerPolicy::AdvanceAfterFeedback => "advance",
            IncorrectAnswerPolicy::RequireSkip => "require-skip",
        }
    }
}

impl fmt::Display for IncorrectAnswerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IncorrectAnswerPolicy {
    type Err = QuizSettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advance" | "auto" | "advance-after-feedback" => {
                Ok(IncorrectAnswerPolicy::AdvanceAfterFeedback)
            }
            "require-skip" | "manual" | "skip" => Ok(IncorrectAnswerPolicy::RequireSkip),
            _ => Err(QuizSettingsError::UnknownPolicy(s.to_owned())),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("unknown incorrect-answer policy: {0}")]
    UnknownPolicy(String),

    #[error("skip threshold must be a negative finite number, got {0}")]
    InvalidSkipThreshold(f32),

    #[error("card inclination must be a positive finite number, got {0}")]
    InvalidInclination(f32),
}

/// Behavior knobs for a quiz session.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuizSettings {
    incorrect_policy: IncorrectAnswerPolicy,
    swipe: SwipeConfig,
}

#[derive(Debug, Clone, Default)]
pub struct QuizSettingsDraft {
    pub incorrect_policy: Option<IncorrectAnswerPolicy>,
    pub skip_threshold: Option<f32>,
    pub inclination: Option<f32>,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft, filling unset values with defaults.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError` when the threshold is not negative or the
    /// inclination is not positive.
    pub fn validate(self) -> Result<QuizSettings, QuizSettingsError> {
        let defaults = SwipeConfig::default();
        let skip_threshold = self.skip_threshold.unwrap_or(defaults.skip_threshold());
        let inclination = self.inclination.unwrap_or(defaults.inclination());

        if !skip_threshold.is_finite() || skip_threshold >= 0.0 {
            return Err(QuizSettingsError::InvalidSkipThreshold(skip_threshold));
        }
        if !inclination.is_finite() || inclination <= 0.0 {
            return Err(QuizSettingsError::InvalidInclination(inclination));
        }

        Ok(QuizSettings {
            incorrect_policy: self.incorrect_policy.unwrap_or_default(),
            swipe: SwipeConfig::new(skip_threshold, inclination),
        })
    }
}

impl QuizSettings {
    #[must_use]
    pub fn incorrect_policy(&self) -> IncorrectAnswerPolicy {
        self.incorrect_policy
    }

    #[must_use]
    pub fn swipe(&self) -> SwipeConfig {
        self.swipe
    }

    #[must_use]
    pub fn with_incorrect_policy(mut self, policy: IncorrectAnswerPolicy) -> Self {
        self.incorrect_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_uses_defaults() {
        let settings = QuizSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, QuizSettings::default());
        assert_eq!(settings.swipe().skip_threshold(), -200.0);
        assert_eq!(
            settings.incorrect_policy(),
            IncorrectAnswerPolicy::AdvanceAfterFeedback
        );
    }

    #[test]
    fn rejects_positive_threshold() {
        let draft = QuizSettingsDraft {
            skip_threshold: Some(150.0),
            ..QuizSettingsDraft::default()
        };
        assert_eq!(
            draft.validate(),
            Err(QuizSettingsError::InvalidSkipThreshold(150.0))
        );
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!(
            "require-skip".parse::<IncorrectAnswerPolicy>().unwrap(),
            IncorrectAnswerPolicy::RequireSkip
        );
        assert_eq!(
            "Advance".parse::<IncorrectAnswerPolicy>().unwrap(),
            IncorrectAnswerPolicy::AdvanceAfterFeedback
        );
        assert!("sometimes".parse::<IncorrectAnswerPolicy>().is_err());
    }
}
