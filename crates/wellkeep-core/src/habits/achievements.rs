//! Achievement thresholds over the habit collection.

use serde::Serialize;

use super::UserHabit;

/// What an achievement measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Highest current streak of any habit.
    BestStreak,
    /// Number of habits being tracked.
    HabitsTracked,
    /// Number of habits whose streak is at least this long.
    HabitsWithStreak(u32),
}

impl Metric {
    fn measure(&self, habits: &[UserHabit]) -> u32 {
        let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        match self {
            Metric::BestStreak => habits.iter().map(|h| h.streak).max().unwrap_or(0),
            Metric::HabitsTracked => count(habits.len()),
            Metric::HabitsWithStreak(min) => {
                count(habits.iter().filter(|h| h.streak >= *min).count())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub metric: Metric,
    pub threshold: u32,
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first-step",
        title: "First Step",
        description: "Complete any habit once.",
        metric: Metric::BestStreak,
        threshold: 1,
    },
    Achievement {
        id: "week-warrior",
        title: "Week Warrior",
        description: "Reach a 7-day streak.",
        metric: Metric::BestStreak,
        threshold: 7,
    },
    Achievement {
        id: "monthly-master",
        title: "Monthly Master",
        description: "Reach a 30-day streak.",
        metric: Metric::BestStreak,
        threshold: 30,
    },
    Achievement {
        id: "centurion",
        title: "Centurion",
        description: "Reach a 100-day streak.",
        metric: Metric::BestStreak,
        threshold: 100,
    },
    Achievement {
        id: "habit-builder",
        title: "Habit Builder",
        description: "Track five habits at once.",
        metric: Metric::HabitsTracked,
        threshold: 5,
    },
    Achievement {
        id: "well-rounded",
        title: "Well Rounded",
        description: "Keep three habits on a 7-day streak.",
        metric: Metric::HabitsWithStreak(7),
        threshold: 3,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementStatus {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
    /// Current value, capped at the threshold.
    pub progress: u32,
    pub threshold: u32,
}

/// Status of every achievement, in declaration order.
pub fn evaluate(habits: &[UserHabit]) -> Vec<AchievementStatus> {
    ACHIEVEMENTS
        .iter()
        .map(|achievement| {
            let value = achievement.metric.measure(habits);
            AchievementStatus {
                id: achievement.id,
                title: achievement.title,
                description: achievement.description,
                unlocked: value >= achievement.threshold,
                progress: value.min(achievement.threshold),
                threshold: achievement.threshold,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habits::catalog;
    use chrono::NaiveDate;

    fn with_streaks(streaks: &[u32]) -> Vec<UserHabit> {
        streaks
            .iter()
            .enumerate()
            .map(|(i, &streak)| UserHabit {
                habit: catalog::HABIT_CATALOG[i % catalog::HABIT_CATALOG.len()].to_habit(),
                is_completed_today: false,
                streak,
                last_completed: None,
                last_feedback: None,
                last_feedback_at: None,
                created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .collect()
    }

    fn unlocked(habits: &[UserHabit]) -> Vec<&'static str> {
        evaluate(habits)
            .into_iter()
            .filter(|s| s.unlocked)
            .map(|s| s.id)
            .collect()
    }

    #[test]
    fn nothing_unlocked_without_habits() {
        assert!(unlocked(&[]).is_empty());
        assert_eq!(evaluate(&[]).len(), ACHIEVEMENTS.len());
    }

    #[test]
    fn streak_thresholds_unlock_in_steps() {
        assert_eq!(unlocked(&with_streaks(&[1])), vec!["first-step"]);
        assert_eq!(
            unlocked(&with_streaks(&[0, 30])),
            vec!["first-step", "week-warrior", "monthly-master"]
        );
    }

    #[test]
    fn progress_is_capped() {
        let status = evaluate(&with_streaks(&[12]));
        let week = status.iter().find(|s| s.id == "week-warrior").unwrap();
        assert_eq!(week.progress, 7);
        let month = status.iter().find(|s| s.id == "monthly-master").unwrap();
        assert_eq!(month.progress, 12);
        assert!(!month.unlocked);
    }

    #[test]
    fn collection_size_and_multi_streak_rules() {
        let ids = unlocked(&with_streaks(&[7, 8, 9, 0, 0]));
        assert!(ids.contains(&"habit-builder"));
        assert!(ids.contains(&"well-rounded"));
    }
}
