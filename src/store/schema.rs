use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::tracker::{
    DEFAULT_THEME, GOAL, Outcome, ProgressState, REWARD_DAYS, Reward, Rewards, START_DAY,
};

pub const ACHIEVED_TAG: &str = "達成";
pub const FAILED_TAG: &str = "未達成";

pub fn outcome_tag(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Achieved => ACHIEVED_TAG,
        Outcome::Failed => FAILED_TAG,
    }
}

pub fn parse_outcome(tag: &str) -> Option<Outcome> {
    match tag {
        ACHIEVED_TAG => Some(Outcome::Achieved),
        FAILED_TAG => Some(Outcome::Failed),
        _ => None,
    }
}

/// On-disk shape of the progress file. Day numbers are JSON object keys, so
/// they travel as strings and are coerced back in [`SaveData::into_state`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default = "default_current_day")]
    pub current_day: i64,
    #[serde(default)]
    pub history: BTreeMap<String, String>,
    #[serde(default)]
    pub rewards: BTreeMap<String, RewardData>,
    #[serde(default)]
    pub consecutive_success: u32,
    #[serde(default = "default_theme")]
    pub theme: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RewardData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub checked: bool,
}

fn default_current_day() -> i64 {
    START_DAY as i64
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl SaveData {
    pub fn from_state(state: &ProgressState) -> Self {
        let history = state
            .history
            .iter()
            .map(|(day, outcome)| (day.to_string(), outcome_tag(*outcome).to_string()))
            .collect();
        let rewards = state
            .rewards
            .iter()
            .map(|(day, reward)| {
                (
                    day.to_string(),
                    RewardData {
                        name: reward.name.clone(),
                        checked: reward.checked,
                    },
                )
            })
            .collect();

        Self {
            current_day: state.current_day as i64,
            history,
            rewards,
            consecutive_success: state.consecutive_success,
            theme: state.theme.clone(),
        }
    }

    /// Best-effort conversion: unusable history entries are dropped and reward
    /// days missing from the file get empty defaults.
    pub fn into_state(self) -> ProgressState {
        let mut history = BTreeMap::new();
        for (key, tag) in &self.history {
            let day = match key.trim().parse::<u32>() {
                Ok(day) if (1..=GOAL).contains(&day) => day,
                _ => {
                    log::debug!("dropping history entry with key {key:?}");
                    continue;
                }
            };
            match parse_outcome(tag) {
                Some(outcome) => {
                    history.insert(day, outcome);
                }
                None => log::debug!("dropping history entry {key} with tag {tag:?}"),
            }
        }

        let mut rewards = Rewards::default();
        for day in REWARD_DAYS {
            if let (Some(saved), Some(slot)) =
                (self.rewards.get(&day.to_string()), rewards.get_mut(day))
            {
                *slot = Reward {
                    name: saved.name.clone(),
                    checked: saved.checked,
                };
            }
        }

        let current_day = self.current_day.clamp(START_DAY as i64, GOAL as i64 + 1) as u32;
        // A streak never exceeds the cells behind the cursor.
        let max_streak = current_day - START_DAY;
        if self.consecutive_success > max_streak {
            log::debug!(
                "clamping streak {} to {max_streak}",
                self.consecutive_success
            );
        }

        ProgressState {
            current_day,
            history,
            consecutive_success: self.consecutive_success.min(max_streak),
            theme: self.theme,
            rewards,
        }
    }
}
