#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FinishVm {
    pub headline: &'static str,
    pub score_label: String,
}

impl FinishVm {
    #[must_use]
    pub fn new(points: u32, total: u32) -> Self {
        let headline = if total > 0 && points >= total {
            "Perfect score!"
        } else if u64::from(points) * 2 >= u64::from(total) {
            "Well done!"
        } else {
            "Keep practicing"
        };
        Self {
            headline,
            score_label: format!("You got {points} out of {total} questions right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headline_follows_score() {
        assert_eq!(FinishVm::new(3, 3).headline, "Perfect score!");
        assert_eq!(FinishVm::new(2, 3).headline, "Well done!");
        assert_eq!(FinishVm::new(1, 3).headline, "Keep practicing");
        assert_eq!(
            FinishVm::new(1, 3).score_label,
            "You got 1 out of 3 questions right"
        );
    }

    #[test]
    fn large_route_values_do_not_overflow() {
        assert_eq!(FinishVm::new(u32::MAX - 1, u32::MAX).headline, "Well done!");
        assert_eq!(FinishVm::new(u32::MAX, u32::MAX).headline, "Perfect score!");
    }
}
