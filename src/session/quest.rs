use serde::{Deserialize, Serialize};

/// A one-shot progress counter.
///
/// Every action advances `current` by one until it reaches `goal`; the advance
/// that lands on the goal is the only one reported as a completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub title: String,
    pub description: String,
    pub goal: u32,
    pub current: u32,
}

impl Quest {
    pub fn new(title: impl Into<String>, description: impl Into<String>, goal: u32) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            goal,
            current: 0,
        }
    }

    /// Step towards the goal. Returns `true` only on the step that reaches it.
    pub fn advance(&mut self) -> bool {
        if self.current >= self.goal {
            return false;
        }
        self.current += 1;
        self.current == self.goal
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.goal
    }

    /// Progress in `[0.0, 1.0]`.
    pub fn fraction(&self) -> f64 {
        if self.goal == 0 {
            return 1.0;
        }
        (self.current as f64 / self.goal as f64).min(1.0)
    }
}

impl Default for Quest {
    fn default() -> Self {
        Self::new(
            "Operation: Open Science",
            "Publish 5 datasets or repositories openly.",
            5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_fires_once_at_goal() {
        let mut quest = Quest::default();
        let fired: Vec<bool> = (0..7).map(|_| quest.advance()).collect();
        assert_eq!(fired, vec![false, false, false, false, true, false, false]);
        assert_eq!(quest.current, 5);
        assert!(quest.is_complete());
    }

    #[test]
    fn test_goal_of_one() {
        let mut quest = Quest::new("Sprint", "One step", 1);
        assert!(quest.advance());
        assert!(!quest.advance());
        assert_eq!(quest.current, 1);
    }

    #[test]
    fn test_fraction() {
        let mut quest = Quest::default();
        assert_eq!(quest.fraction(), 0.0);
        quest.advance();
        quest.advance();
        assert!((quest.fraction() - 0.4).abs() < f64::EPSILON);
    }
}
