use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Reward used when the caller does not pick a point value.
pub const DEFAULT_POINTS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub aura_score: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_visit_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: u64,
    pub name: String,
    pub points: u32,
    pub completed: bool,
}

/// The persisted blob: one stats record plus habits in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppData {
    pub stats: Stats,
    pub habits: Vec<Habit>,
}

impl AppData {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::with_capacity(self.habits.len());
        for habit in &self.habits {
            if !seen.insert(habit.id) {
                return Err(format!("duplicate habit id {}", habit.id));
            }
            if habit.name.trim().is_empty() {
                return Err(format!("habit {} has an empty name", habit.id));
            }
        }
        Ok(())
    }

    /// `None` once the largest id is `u64::MAX`.
    pub fn next_habit_id(&self) -> Option<u64> {
        match self.habits.iter().map(|habit| habit.id).max() {
            Some(max) => max.checked_add(1),
            None => Some(1),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    pub name: String,
    pub points: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewHabitForm {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub habit: Habit,
    pub stats: Stats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_format_uses_camel_case_and_iso_dates() {
        let data = AppData {
            stats: Stats {
                aura_score: 10,
                current_streak: 2,
                longest_streak: 4,
                last_visit_date: NaiveDate::from_ymd_opt(2026, 3, 9),
            },
            habits: vec![Habit {
                id: 1,
                name: "Read".to_string(),
                points: 5,
                completed: true,
            }],
        };

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "stats": {
                    "auraScore": 10,
                    "currentStreak": 2,
                    "longestStreak": 4,
                    "lastVisitDate": "2026-03-09"
                },
                "habits": [
                    { "id": 1, "name": "Read", "points": 5, "completed": true }
                ]
            })
        );
    }

    #[test]
    fn null_last_visit_parses_as_absent() {
        let raw = r#"{"stats":{"auraScore":0,"currentStreak":0,"longestStreak":0,"lastVisitDate":null},"habits":[]}"#;
        let data: AppData = serde_json::from_str(raw).unwrap();
        assert_eq!(data, AppData::default());
    }

    #[test]
    fn negative_points_do_not_parse() {
        let raw = r#"{"stats":{"auraScore":0,"currentStreak":0,"longestStreak":0,"lastVisitDate":null},
            "habits":[{"id":1,"name":"Run","points":-3,"completed":false}]}"#;
        assert!(serde_json::from_str::<AppData>(raw).is_err());
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let habit = Habit {
            id: 7,
            name: "Stretch".to_string(),
            points: 5,
            completed: false,
        };
        let data = AppData {
            stats: Stats::default(),
            habits: vec![habit.clone(), habit],
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn next_id_follows_largest_existing() {
        let mut data = AppData::default();
        assert_eq!(data.next_habit_id(), Some(1));
        data.habits.push(Habit {
            id: 41,
            name: "Walk".to_string(),
            points: 5,
            completed: false,
        });
        assert_eq!(data.next_habit_id(), Some(42));
    }

    #[test]
    fn next_id_is_none_at_the_top_of_the_range() {
        let data = AppData {
            stats: Stats::default(),
            habits: vec![Habit {
                id: u64::MAX,
                name: "Walk".to_string(),
                points: 5,
                completed: false,
            }],
        };
        assert_eq!(data.next_habit_id(), None);
    }
}
