//! Read-only view of a [`ProgressState`] for drawing the board, reward list and
//! history. Nothing here mutates state.

use crate::engine::tracker::{GOAL, Outcome, ProgressState, is_reward_day};

pub const BOARD_COLUMNS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellMark {
    Current,
    GoalAchieved,
    RewardAchieved,
    Achieved,
    Failed,
    Reward,
    Goal,
    Empty,
}

impl CellMark {
    pub fn symbol(self) -> &'static str {
        match self {
            CellMark::Current => "⭐",
            CellMark::GoalAchieved => "👑",
            CellMark::RewardAchieved => "🎁",
            CellMark::Achieved => "✅",
            CellMark::Failed => "❌",
            CellMark::Reward => "🌼",
            CellMark::Goal => "🌟",
            CellMark::Empty => "⚪",
        }
    }
}

/// Days of the board laid out row by row, `BOARD_COLUMNS` per row.
pub fn board_rows() -> Vec<Vec<u32>> {
    (1..=GOAL)
        .collect::<Vec<_>>()
        .chunks(BOARD_COLUMNS as usize)
        .map(|row| row.to_vec())
        .collect()
}

impl ProgressState {
    pub fn is_finished(&self) -> bool {
        self.current_day > GOAL
    }

    pub fn can_record(&self) -> bool {
        !self.is_finished()
    }

    pub fn remaining_days(&self) -> u32 {
        GOAL.saturating_sub(self.current_day)
    }

    pub fn achieved_count(&self) -> usize {
        self.history
            .values()
            .filter(|o| **o == Outcome::Achieved)
            .count()
    }

    pub fn progress_ratio(&self) -> f64 {
        self.achieved_count() as f64 / GOAL as f64
    }

    pub fn can_claim(&self, day: u32) -> bool {
        self.rewards
            .get(day)
            .is_some_and(|r| r.has_name() && (day <= self.current_day || r.checked))
    }

    pub fn cell_mark(&self, day: u32) -> CellMark {
        let achieved = self.history.get(&day) == Some(&Outcome::Achieved);
        let is_goal = day == GOAL;
        let is_reward = is_reward_day(day);

        if day == self.current_day {
            CellMark::Current
        } else if is_goal && achieved {
            CellMark::GoalAchieved
        } else if is_reward && achieved {
            CellMark::RewardAchieved
        } else if achieved {
            CellMark::Achieved
        } else if self.history.get(&day) == Some(&Outcome::Failed) {
            CellMark::Failed
        } else if is_reward {
            CellMark::Reward
        } else if is_goal {
            CellMark::Goal
        } else {
            CellMark::Empty
        }
    }

    /// Recorded days, newest first.
    pub fn history_desc(&self) -> Vec<(u32, Outcome)> {
        self.history.iter().rev().map(|(d, o)| (*d, *o)).collect()
    }
}
