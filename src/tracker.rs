//! In-memory habit state and the rules that mutate it.
//!
//! Every mutation is followed by a best-effort save through the [`Store`]; a
//! failed save is logged and the in-memory state stays authoritative.

use crate::errors::{StorageError, TrackerError};
use crate::models::{AppData, Habit, Stats};
use crate::storage::Store;
use chrono::{Local, NaiveDate};
use tracing::{error, info, warn};

/// What a rollover did, for logging by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    FirstVisit,
    SameDay,
    NextDay,
    Gap { days: i64 },
    ClockWentBack { days: i64 },
}

pub struct Tracker {
    data: AppData,
    store: Box<dyn Store>,
}

impl Tracker {
    /// Adopts the stored state, or starts from the default and saves it.
    ///
    /// A store that cannot be read at all is left untouched until the first
    /// mutation; only an empty or unusable blob is replaced right away.
    pub fn initialize(store: impl Store + 'static) -> Self {
        let store: Box<dyn Store> = Box::new(store);
        let (loaded, replace) = match store.load() {
            Ok(loaded) => (loaded, true),
            Err(err @ (StorageError::Malformed(_) | StorageError::Invalid(_))) => {
                error!("discarding stored state: {err}");
                (None, true)
            }
            Err(err) => {
                error!("failed to load stored state, starting empty: {err}");
                (None, false)
            }
        };

        match loaded {
            Some(data) => {
                info!(habits = data.habits.len(), "loaded stored state");
                Self { data, store }
            }
            None => {
                let tracker = Self {
                    data: AppData::default(),
                    store,
                };
                if replace {
                    tracker.persist();
                }
                tracker
            }
        }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn stats(&self) -> &Stats {
        &self.data.stats
    }

    pub fn habits(&self) -> &[Habit] {
        &self.data.habits
    }

    pub fn habit(&self, id: u64) -> Option<&Habit> {
        self.data.habits.iter().find(|habit| habit.id == id)
    }

    pub fn add_habit(&mut self, name: &str, points: u32) -> Result<Habit, TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyName);
        }

        let id = self.data.next_habit_id().ok_or(TrackerError::IdsExhausted)?;
        let habit = Habit {
            id,
            name: name.to_string(),
            points,
            completed: false,
        };
        self.data.habits.push(habit.clone());
        self.persist();
        Ok(habit)
    }

    /// Flips completion and moves the score. Unknown ids are ignored.
    ///
    /// Un-completing floors the score at zero, so a round trip that hit the
    /// floor does not restore the earlier score.
    pub fn toggle_habit(&mut self, id: u64) -> Option<Habit> {
        let habit = self.data.habits.iter_mut().find(|habit| habit.id == id)?;
        habit.completed = !habit.completed;

        let points = u64::from(habit.points);
        let stats = &mut self.data.stats;
        if habit.completed {
            stats.aura_score = stats.aura_score.saturating_add(points);
        } else {
            stats.aura_score = stats.aura_score.saturating_sub(points);
        }

        let updated = habit.clone();
        self.persist();
        Some(updated)
    }

    pub fn rollover_if_new_day(&mut self) -> Rollover {
        self.rollover_at(Local::now().date_naive())
    }

    pub fn rollover_at(&mut self, today: NaiveDate) -> Rollover {
        let stats = &mut self.data.stats;
        let Some(last_visit) = stats.last_visit_date else {
            stats.last_visit_date = Some(today);
            self.persist();
            return Rollover::FirstVisit;
        };

        let days = (today - last_visit).num_days();
        let outcome = match days {
            1 => {
                stats.current_streak = stats.current_streak.saturating_add(1);
                Rollover::NextDay
            }
            days if days > 1 => {
                stats.current_streak = 0;
                Rollover::Gap { days }
            }
            0 => Rollover::SameDay,
            days => Rollover::ClockWentBack { days },
        };
        stats.longest_streak = stats.longest_streak.max(stats.current_streak);

        if days >= 1 {
            for habit in &mut self.data.habits {
                habit.completed = false;
            }
        }

        self.data.stats.last_visit_date = Some(today);
        self.persist();

        match outcome {
            Rollover::SameDay => {}
            Rollover::ClockWentBack { days } => {
                warn!(%last_visit, %today, days, "clock moved backward since last visit");
            }
            _ => info!(
                ?outcome,
                current_streak = self.data.stats.current_streak,
                longest_streak = self.data.stats.longest_streak,
                "new day"
            ),
        }
        outcome
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.data) {
            error!("failed to persist state: {err}");
        }
    }
}
