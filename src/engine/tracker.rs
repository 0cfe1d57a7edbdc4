use std::collections::BTreeMap;

/// Last cell of the board. `current_day == GOAL + 1` means the challenge is over.
pub const GOAL: u32 = 25;
pub const START_DAY: u32 = 1;
pub const REWARD_DAYS: [u32; 5] = [3, 7, 14, 21, 25];
pub const STREAK_MILESTONE: u32 = 3;
pub const DEFAULT_THEME: &str = "読書を25日継続する！";

pub fn is_reward_day(day: u32) -> bool {
    REWARD_DAYS.contains(&day)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Achieved,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reward {
    pub name: String,
    pub checked: bool,
}

impl Reward {
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// One reward slot per entry of `REWARD_DAYS`, in the same order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rewards {
    slots: [Reward; REWARD_DAYS.len()],
}

impl Rewards {
    fn slot_index(day: u32) -> Option<usize> {
        REWARD_DAYS.iter().position(|&d| d == day)
    }

    pub fn get(&self, day: u32) -> Option<&Reward> {
        Self::slot_index(day).map(|i| &self.slots[i])
    }

    pub fn get_mut(&mut self, day: u32) -> Option<&mut Reward> {
        Self::slot_index(day).map(|i| &mut self.slots[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Reward)> {
        REWARD_DAYS.iter().copied().zip(self.slots.iter())
    }

    pub fn checked_count(&self) -> usize {
        self.slots.iter().filter(|r| r.checked).count()
    }
}

/// What a recorded success means for the player, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuccessKind {
    GoalReached,
    RewardUnlocked,
    StreakMilestone { streak: u32 },
    Normal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuccessEvent {
    pub day: u32,
    pub kind: SuccessKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardToggle {
    Claimed,
    Released,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    #[default]
    ClearRewardNames,
    KeepRewardNames,
}

impl ResetPolicy {
    pub fn from_keep_names(keep: bool) -> Self {
        if keep {
            ResetPolicy::KeepRewardNames
        } else {
            ResetPolicy::ClearRewardNames
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressState {
    pub current_day: u32,
    pub history: BTreeMap<u32, Outcome>,
    pub consecutive_success: u32,
    pub theme: String,
    pub rewards: Rewards,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::with_theme(DEFAULT_THEME)
    }
}

impl ProgressState {
    pub fn with_theme(theme: impl Into<String>) -> Self {
        Self {
            current_day: START_DAY,
            history: BTreeMap::new(),
            consecutive_success: 0,
            theme: theme.into(),
            rewards: Rewards::default(),
        }
    }

    /// Mark the current cell as achieved and move one cell forward.
    /// Returns `None` once the board is finished.
    pub fn record_success(&mut self) -> Option<SuccessEvent> {
        if self.current_day > GOAL {
            return None;
        }

        let day = self.current_day;
        self.history.insert(day, Outcome::Achieved);
        self.consecutive_success = self.consecutive_success.saturating_add(1);

        let kind = if day == GOAL {
            SuccessKind::GoalReached
        } else if is_reward_day(day) {
            SuccessKind::RewardUnlocked
        } else if self.consecutive_success > 0
            && self.consecutive_success % STREAK_MILESTONE == 0
        {
            SuccessKind::StreakMilestone {
                streak: self.consecutive_success,
            }
        } else {
            SuccessKind::Normal
        };

        self.current_day += 1;
        Some(SuccessEvent { day, kind })
    }

    /// Mark the current cell as failed. The cursor stays on the same cell.
    pub fn record_failure(&mut self) -> bool {
        if self.current_day > GOAL {
            return false;
        }
        self.history.insert(self.current_day, Outcome::Failed);
        self.consecutive_success = 0;
        true
    }

    pub fn toggle_reward(&mut self, day: u32) -> Option<RewardToggle> {
        let current_day = self.current_day;
        let reward = self.rewards.get_mut(day)?;
        if !reward.has_name() || !(day <= current_day || reward.checked) {
            return None;
        }

        reward.checked = !reward.checked;
        Some(if reward.checked {
            RewardToggle::Claimed
        } else {
            RewardToggle::Released
        })
    }

    /// Start over from cell 1. The theme always survives a reset.
    pub fn reset(&mut self, policy: ResetPolicy) {
        self.current_day = START_DAY;
        self.history.clear();
        self.consecutive_success = 0;
        for day in REWARD_DAYS {
            if let Some(reward) = self.rewards.get_mut(day) {
                reward.checked = false;
                if policy == ResetPolicy::ClearRewardNames {
                    reward.name.clear();
                }
            }
        }
    }

    pub fn set_theme(&mut self, theme: &str) {
        self.theme = theme.trim().to_string();
    }

    pub fn set_reward_name(&mut self, day: u32, name: &str) -> bool {
        match self.rewards.get_mut(day) {
            Some(reward) => {
                reward.name = name.trim().to_string();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_rewards() -> ProgressState {
        let mut state = ProgressState::default();
        for day in REWARD_DAYS {
            state.set_reward_name(day, &format!("treat {day}"));
        }
        state
    }

    #[test]
    fn six_successes_hit_rewards_and_streak() {
        let mut state = ProgressState::default();
        let kinds: Vec<SuccessKind> = (0..6)
            .map(|_| state.record_success().unwrap().kind)
            .collect();

        assert_eq!(state.current_day, 7);
        assert_eq!(state.consecutive_success, 6);
        assert_eq!(kinds[2], SuccessKind::RewardUnlocked);
        assert_eq!(kinds[5], SuccessKind::StreakMilestone { streak: 6 });
        assert_eq!(kinds[0], SuccessKind::Normal);

        let seventh = state.record_success().unwrap();
        assert_eq!(seventh.day, 7);
        assert_eq!(seventh.kind, SuccessKind::RewardUnlocked);
    }

    #[test]
    fn failure_keeps_cell_and_breaks_streak() {
        let mut state = ProgressState::default();
        state.record_success();
        assert!(state.record_failure());
        state.record_success();

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[&1], Outcome::Achieved);
        // Day 2 was retried and achieved after the failure.
        assert_eq!(state.history[&2], Outcome::Achieved);
        assert_eq!(state.current_day, 3);
        assert_eq!(state.consecutive_success, 1);
    }

    #[test]
    fn failure_lands_on_next_cell() {
        let mut state = ProgressState::default();
        state.record_success();
        state.record_failure();
        assert_eq!(state.history.get(&2), Some(&Outcome::Failed));
        assert_eq!(state.current_day, 2);
        assert_eq!(state.consecutive_success, 0);
    }

    #[test]
    fn streak_milestone_on_plain_cells() {
        let mut state = ProgressState::default();
        // Days 1-2 achieved, fail on 3, then succeed 3,4,5.
        state.record_success();
        state.record_success();
        state.record_failure();
        assert_eq!(state.record_success().unwrap().kind, SuccessKind::RewardUnlocked);
        state.record_success();
        let fifth = state.record_success().unwrap();
        assert_eq!(fifth.day, 5);
        assert_eq!(fifth.kind, SuccessKind::StreakMilestone { streak: 3 });
    }

    #[test]
    fn goal_beats_reward_and_streak() {
        let mut state = ProgressState::default();
        for _ in 0..24 {
            state.record_success();
        }
        assert_eq!(state.current_day, GOAL);
        assert_eq!(state.consecutive_success, 24);

        let last = state.record_success().unwrap();
        assert_eq!(last.day, GOAL);
        assert_eq!(last.kind, SuccessKind::GoalReached);
        assert_eq!(state.current_day, GOAL + 1);
    }

    #[test]
    fn recording_after_goal_is_noop() {
        let mut state = ProgressState::default();
        for _ in 0..25 {
            state.record_success();
        }
        let before = state.clone();
        assert!(state.record_success().is_none());
        assert!(!state.record_failure());
        assert_eq!(state, before);
    }

    #[test]
    fn current_day_counts_successes() {
        let mut state = ProgressState::default();
        let pattern = [true, false, true, true, false, false, true];
        let mut successes = 0;
        for &ok in &pattern {
            if ok {
                state.record_success();
                successes += 1;
            } else {
                state.record_failure();
            }
        }
        assert_eq!(state.current_day, 1 + successes);
        assert_eq!(state.consecutive_success, 1);
    }

    #[test]
    fn toggle_reward_requires_reach_and_name() {
        let mut state = ProgressState::default();
        assert_eq!(state.toggle_reward(3), None, "unnamed reward");

        state.set_reward_name(3, "cake");
        assert_eq!(state.toggle_reward(3), None, "cell not reached yet");

        state.record_success();
        state.record_success();
        assert_eq!(state.current_day, 3);
        assert_eq!(state.toggle_reward(3), Some(RewardToggle::Claimed));
        assert!(state.rewards.get(3).unwrap().checked);
        assert_eq!(state.toggle_reward(3), Some(RewardToggle::Released));
    }

    #[test]
    fn toggle_reward_rejects_non_reward_days() {
        let mut state = named_rewards();
        for _ in 0..10 {
            state.record_success();
        }
        assert_eq!(state.toggle_reward(4), None);
        assert!(!state.set_reward_name(4, "nope"));
    }

    #[test]
    fn whitespace_name_is_not_claimable() {
        let mut state = ProgressState::default();
        state.set_reward_name(3, "   ");
        state.current_day = 5;
        assert_eq!(state.toggle_reward(3), None);
    }

    #[test]
    fn checked_reward_stays_toggleable_after_regression() {
        let mut state = named_rewards();
        state.current_day = 8;
        assert_eq!(state.toggle_reward(7), Some(RewardToggle::Claimed));

        state.current_day = 2;
        assert_eq!(state.toggle_reward(7), Some(RewardToggle::Released));
        assert_eq!(state.toggle_reward(7), None);
    }

    #[test]
    fn reset_clears_progress_but_keeps_theme() {
        let mut state = named_rewards();
        state.set_theme("  run every morning ");
        for _ in 0..4 {
            state.record_success();
        }
        state.toggle_reward(3);

        state.reset(ResetPolicy::ClearRewardNames);
        assert_eq!(state.current_day, START_DAY);
        assert!(state.history.is_empty());
        assert_eq!(state.consecutive_success, 0);
        assert_eq!(state.theme, "run every morning");
        assert!(state.rewards.iter().all(|(_, r)| r.name.is_empty() && !r.checked));
    }

    #[test]
    fn streak_saturates_instead_of_overflowing() {
        let mut state = ProgressState {
            consecutive_success: u32::MAX,
            ..ProgressState::default()
        };
        assert!(state.record_success().is_some());
        assert_eq!(state.consecutive_success, u32::MAX);
        assert_eq!(state.current_day, 2);
    }

    #[test]
    fn reset_can_keep_reward_names() {
        let mut state = named_rewards();
        state.current_day = 4;
        state.toggle_reward(3);

        state.reset(ResetPolicy::KeepRewardNames);
        assert_eq!(state.rewards.checked_count(), 0);
        assert_eq!(state.rewards.get(21).unwrap().name, "treat 21");
    }
}
