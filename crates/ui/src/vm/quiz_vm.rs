use quiz_core::gesture::CardPose;
use quiz_core::model::{Level, SessionPhase};
use services::QuizSessionController;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlternativeState {
    Idle,
    Selected,
    /// The correct answer, shown while an incorrect answer waits for the skip.
    Revealed,
}

impl AlternativeState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            AlternativeState::Idle => "alternative",
            AlternativeState::Selected => "alternative alternative--checked",
            AlternativeState::Revealed => "alternative alternative--correct",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlternativeVm {
    pub index: usize,
    pub label: String,
    pub state: AlternativeState,
}

/// Everything the quiz screen renders for the current question.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizVm {
    pub title: String,
    pub level: Level,
    pub question: String,
    pub alternatives: Vec<AlternativeVm>,
    pub position_label: String,
    pub progress_percent: f32,
    pub awaiting_advance: bool,
    pub pose: CardPose,
}

impl QuizVm {
    /// Snapshot of an active session, `None` once it ended or before it loaded.
    #[must_use]
    pub fn from_controller(controller: &QuizSessionController) -> Option<Self> {
        let session = controller.session()?;
        if session.phase() != SessionPhase::Active {
            return None;
        }

        let question = session.current_question();
        let awaiting_advance = session.awaiting_advance();
        let alternatives = question
            .alternatives()
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let state = if awaiting_advance && question.is_correct(index) {
                    AlternativeState::Revealed
                } else if session.selected() == Some(index) {
                    AlternativeState::Selected
                } else {
                    AlternativeState::Idle
                };
                AlternativeVm {
                    index,
                    label: label.clone(),
                    state,
                }
            })
            .collect();
        let progress = session.progress();

        Some(Self {
            title: session.quiz().title().to_owned(),
            level: session.quiz().level(),
            question: question.title().to_owned(),
            alternatives,
            position_label: format!("{}/{}", progress.current, progress.total),
            progress_percent: progress.ratio() * 100.0,
            awaiting_advance,
            pose: controller.card_pose(),
        })
    }

    #[must_use]
    pub fn card_style(&self) -> String {
        card_style(self.pose)
    }
}

#[must_use]
pub fn card_style(pose: CardPose) -> String {
    format!(
        "transform: translate({:.1}px, {:.1}px) rotate({:.2}deg); opacity: {:.3};",
        pose.offset_x, pose.offset_y, pose.rotation_deg, pose.opacity
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_pose_has_identity_transform() {
        assert_eq!(
            card_style(CardPose::REST),
            "transform: translate(0.0px, 0.0px) rotate(0.00deg); opacity: 1.000;"
        );
    }
}
