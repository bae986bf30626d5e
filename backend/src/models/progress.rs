use chrono::{DateTime, Utc};

use crate::models::day::{day_name, DAY_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    #[error("day_number must be between 1 and 8, got {0}")]
    InvalidDay(i64),

    #[error("Day {0} is locked until the previous day is completed")]
    DayLocked(u8),
}

/// A validated 1-based day index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayNumber(u8);

impl DayNumber {
    pub fn get(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        usize::from(self.0) - 1
    }
}

impl TryFrom<i64> for DayNumber {
    type Error = ProgressError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (1..=DAY_COUNT as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ProgressError::InvalidDay(value))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Locked,
    Unlocked,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Days unlock one at a time as the previous one is completed.
    Sequential,
    /// Terminal: every day completed, gating lifted for good.
    Replay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayEntry {
    pub day_number: u8,
    pub is_unlocked: bool,
    pub is_completed: bool,
    pub completion_time: Option<DateTime<Utc>>,
}

impl DayEntry {
    fn initial(day_number: u8) -> Self {
        Self {
            day_number,
            is_unlocked: day_number == 1,
            is_completed: false,
            completion_time: None,
        }
    }

    pub fn day_name(&self) -> &'static str {
        day_name(self.day_number)
    }

    pub fn status(&self) -> DayStatus {
        match (self.is_completed, self.is_unlocked) {
            (true, _) => DayStatus::Completed,
            (false, true) => DayStatus::Unlocked,
            (false, false) => DayStatus::Locked,
        }
    }
}

/// Per-user progress through the week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressState {
    pub user_id: String,
    pub days: [DayEntry; DAY_COUNT],
    pub phase: Phase,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProgressState {
    pub fn new(user_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            days: std::array::from_fn(|i| DayEntry::initial(i as u8 + 1)),
            phase: Phase::Sequential,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn reset(&mut self, now: DateTime<Utc>) {
        let user_id = std::mem::take(&mut self.user_id);
        *self = Self::new(user_id, now);
    }

    pub fn replay_mode(&self) -> bool {
        self.phase == Phase::Replay
    }

    pub fn all_completed(&self) -> bool {
        self.phase == Phase::Replay
    }

    pub fn day(&self, day: DayNumber) -> &DayEntry {
        &self.days[day.index()]
    }

    pub fn completed_count(&self) -> usize {
        self.days.iter().filter(|d| d.is_completed).count()
    }

    /// Marks `day` completed, unlocking the next one. Completing the last
    /// outstanding day moves the state into [`Phase::Replay`].
    ///
    /// Re-completing a finished day is a successful no-op. On error the
    /// state is untouched.
    pub fn complete_day(&mut self, day: DayNumber, now: DateTime<Utc>) -> Result<(), ProgressError> {
        let entry = &self.days[day.index()];
        if entry.is_completed {
            return Ok(());
        }
        if !entry.is_unlocked {
            return Err(ProgressError::DayLocked(day.get()));
        }

        let entry = &mut self.days[day.index()];
        entry.is_completed = true;
        entry.completion_time = Some(now);

        if let Some(next) = self.days.get_mut(day.index() + 1) {
            next.is_unlocked = true;
        }

        if self.days.iter().all(|d| d.is_completed) {
            self.enter_replay();
        }

        self.updated_at = now;
        Ok(())
    }

    fn enter_replay(&mut self) {
        for entry in &mut self.days {
            entry.is_unlocked = true;
        }
        self.phase = Phase::Replay;
    }
}
