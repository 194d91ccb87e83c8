//! Swipe-to-skip gesture handling for the question card.
//!
//! The host UI reports raw drag translations; this module turns them into a card pose
//! and, on release, decides whether the user asked to skip.

/// Horizontal displacement (negative = left) past which a release means "skip".
pub const DEFAULT_SKIP_THRESHOLD: f32 = -200.0;

/// Divisor turning horizontal offset into card rotation degrees.
pub const DEFAULT_INCLINATION: f32 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    skip_threshold: f32,
    inclination: f32,
}

impl SwipeConfig {
    /// Values are expected to be validated by `QuizSettingsDraft`.
    #[must_use]
    pub fn new(skip_threshold: f32, inclination: f32) -> Self {
        Self {
            skip_threshold,
            inclination,
        }
    }

    #[must_use]
    pub fn skip_threshold(&self) -> f32 {
        self.skip_threshold
    }

    #[must_use]
    pub fn inclination(&self) -> f32 {
        self.inclination
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_THRESHOLD, DEFAULT_INCLINATION)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Update,
    Release,
}

/// A drag report from the gesture runtime. Translations are relative to the drag start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub phase: DragPhase,
    pub translation_x: f32,
    pub translation_y: f32,
}

impl DragEvent {
    #[must_use]
    pub fn update(translation_x: f32, translation_y: f32) -> Self {
        Self {
            phase: DragPhase::Update,
            translation_x,
            translation_y,
        }
    }

    #[must_use]
    pub fn release(translation_x: f32, translation_y: f32) -> Self {
        Self {
            phase: DragPhase::Release,
            translation_x,
            translation_y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    SkipRequested,
    SnapBack,
}

/// Visual state of the card while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardPose {
    pub offset_x: f32,
    pub offset_y: f32,
    pub rotation_deg: f32,
    pub opacity: f32,
}

impl CardPose {
    pub const REST: CardPose = CardPose {
        offset_x: 0.0,
        offset_y: 0.0,
        rotation_deg: 0.0,
        opacity: 1.0,
    };

    #[must_use]
    pub fn is_rest(&self) -> bool {
        *self == Self::REST
    }
}

impl Default for CardPose {
    fn default() -> Self {
        Self::REST
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    config: SwipeConfig,
    pose: CardPose,
}

impl SwipeTracker {
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            pose: CardPose::REST,
        }
    }

    #[must_use]
    pub fn pose(&self) -> CardPose {
        self.pose
    }

    /// Feed a drag event. Returns an outcome only on release.
    pub fn handle(&mut self, event: DragEvent) -> Option<SwipeOutcome> {
        match event.phase {
            DragPhase::Update => {
                self.pose = self.pose_for(event.translation_x, event.translation_y);
                None
            }
            DragPhase::Release => {
                self.pose = CardPose::REST;
                if event.translation_x < self.config.skip_threshold {
                    Some(SwipeOutcome::SkipRequested)
                } else {
                    Some(SwipeOutcome::SnapBack)
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.pose = CardPose::REST;
    }

    fn pose_for(&self, translation_x: f32, translation_y: f32) -> CardPose {
        // Only leftward drags move the card horizontally.
        let offset_x = translation_x.min(0.0);
        let threshold = self.config.skip_threshold;
        let opacity = interpolate_clamped(
            offset_x,
            [0.0, threshold / 3.0, threshold * 2.0],
            [1.0, 1.0, 0.0],
        );

        CardPose {
            offset_x,
            offset_y: translation_y,
            rotation_deg: offset_x / self.config.inclination,
            opacity,
        }
    }
}

/// Piecewise-linear interpolation over a monotonic input range, clamped at both ends.
///
/// Input points may be ascending or descending.
#[must_use]
pub fn interpolate_clamped(value: f32, input: [f32; 3], output: [f32; 3]) -> f32 {
    let descending = input[0] > input[2];
    let before_start = if descending { value >= input[0] } else { value <= input[0] };
    let after_end = if descending { value <= input[2] } else { value >= input[2] };
    if before_start {
        return output[0];
    }
    if after_end {
        return output[2];
    }

    let segment = usize::from(if descending {
        value < input[1]
    } else {
        value > input[1]
    });
    let (x0, x1) = (input[segment], input[segment + 1]);
    let (y0, y1) = (output[segment], output[segment + 1]);
    if (x1 - x0).abs() < f32::EPSILON {
        return y1;
    }
    y0 + (value - x0) * (y1 - y0) / (x1 - x0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn leftward_drag_rotates_and_fades() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.handle(DragEvent::update(-70.0, 12.0)), None);
        let pose = tracker.pose();
        assert!(approx(pose.offset_x, -70.0));
        assert!(approx(pose.offset_y, 12.0));
        assert!(approx(pose.rotation_deg, -10.0));
        assert!(pose.opacity < 1.0 && pose.opacity > 0.9);
    }

    #[test]
    fn rightward_drag_keeps_card_horizontal() {
        let mut tracker = SwipeTracker::default();
        tracker.handle(DragEvent::update(80.0, -5.0));
        let pose = tracker.pose();
        assert!(approx(pose.offset_x, 0.0));
        assert!(approx(pose.rotation_deg, 0.0));
        assert!(approx(pose.opacity, 1.0));
    }

    #[test]
    fn far_drag_is_fully_transparent() {
        let mut tracker = SwipeTracker::default();
        tracker.handle(DragEvent::update(-500.0, 0.0));
        assert!(approx(tracker.pose().opacity, 0.0));
    }

    #[test]
    fn release_past_threshold_requests_skip() {
        let mut tracker = SwipeTracker::default();
        tracker.handle(DragEvent::update(-250.0, 0.0));
        assert_eq!(
            tracker.handle(DragEvent::release(-250.0, 0.0)),
            Some(SwipeOutcome::SkipRequested)
        );
        assert!(tracker.pose().is_rest());
    }

    #[test]
    fn release_short_of_threshold_snaps_back() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(
            tracker.handle(DragEvent::release(-200.0, 0.0)),
            Some(SwipeOutcome::SnapBack)
        );
        assert_eq!(
            tracker.handle(DragEvent::release(40.0, 0.0)),
            Some(SwipeOutcome::SnapBack)
        );
    }

    #[test]
    fn interpolation_handles_ascending_ranges() {
        let out = interpolate_clamped(75.0, [50.0, 70.0, 90.0], [0.0, 0.5, 1.0]);
        assert!(approx(out, 0.625));
        assert!(approx(
            interpolate_clamped(10.0, [50.0, 70.0, 90.0], [0.0, 0.5, 1.0]),
            0.0
        ));
        assert!(approx(
            interpolate_clamped(120.0, [50.0, 70.0, 90.0], [0.0, 0.5, 1.0]),
            1.0
        ));
    }
}
