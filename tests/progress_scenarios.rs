use std::fs;

use sugoroku::engine::tracker::{
    GOAL, Outcome, ProgressState, REWARD_DAYS, ResetPolicy, RewardToggle, SuccessKind,
};
use sugoroku::store::StoreError;
use sugoroku::store::json_store::JsonStore;
use tempfile::TempDir;

fn make_test_store() -> (TempDir, JsonStore) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

/// Deterministic success/failure sequences, a little longer than the board.
fn patterns() -> impl Iterator<Item = Vec<bool>> {
    (0u32..512).map(|bits| {
        (0..GOAL + 3)
            .map(|i| (bits >> (i % 9)) & 1 == 1 || i % 4 == 0)
            .collect()
    })
}

#[test]
fn current_day_and_streak_follow_any_sequence() {
    for pattern in patterns() {
        let mut state = ProgressState::default();
        let mut counted_successes = 0;
        let mut trailing_run = 0;

        for &success in &pattern {
            let could_record = state.current_day <= GOAL;
            if success {
                let event = state.record_success();
                assert_eq!(event.is_some(), could_record);
                if could_record {
                    counted_successes += 1;
                    trailing_run += 1;
                }
            } else {
                assert_eq!(state.record_failure(), could_record);
                if could_record {
                    trailing_run = 0;
                }
            }

            assert_eq!(state.current_day, (1 + counted_successes).min(GOAL + 1));
            assert_eq!(state.consecutive_success, trailing_run);
            assert!(state.history.keys().all(|d| (1..=GOAL).contains(d)));
        }
    }
}

#[test]
fn streak_milestones_land_on_multiples_of_three() {
    let mut state = ProgressState::default();
    // Break the streak on day 2 so the milestones fall on plain cells.
    state.record_success();
    state.record_failure();

    let mut milestones = Vec::new();
    while let Some(event) = state.record_success() {
        if let SuccessKind::StreakMilestone { streak } = event.kind {
            assert!(!REWARD_DAYS.contains(&event.day));
            assert_ne!(event.day, GOAL);
            milestones.push(streak);
        }
    }
    assert!(!milestones.is_empty());
    assert!(milestones.iter().all(|s| s % 3 == 0));
}

#[test]
fn goal_reached_exactly_once() {
    let mut state = ProgressState::default();
    let kinds: Vec<SuccessKind> = std::iter::from_fn(|| state.record_success())
        .map(|e| e.kind)
        .collect();
    assert_eq!(kinds.len(), GOAL as usize);
    assert_eq!(kinds.last(), Some(&SuccessKind::GoalReached));
    assert_eq!(
        kinds
            .iter()
            .filter(|k| **k == SuccessKind::GoalReached)
            .count(),
        1
    );
    assert_eq!(
        kinds
            .iter()
            .filter(|k| **k == SuccessKind::RewardUnlocked)
            .count(),
        REWARD_DAYS.len() - 1
    );
}

#[test]
fn success_failure_success_scenario() {
    let mut state = ProgressState::default();
    state.record_success();
    state.record_failure();
    state.record_success();

    assert_eq!(state.current_day, 3);
    assert_eq!(state.consecutive_success, 1);
    assert_eq!(state.history.get(&1), Some(&Outcome::Achieved));
    assert_eq!(state.history.get(&2), Some(&Outcome::Achieved));
    assert_eq!(state.history.len(), 2);
}

#[test]
fn future_unchecked_reward_cannot_be_claimed() {
    let mut state = ProgressState::default();
    for day in REWARD_DAYS {
        state.set_reward_name(day, "prize");
    }
    state.current_day = 10;
    for day in REWARD_DAYS {
        let expected = (day <= 10).then_some(RewardToggle::Claimed);
        assert_eq!(state.toggle_reward(day), expected, "day {day}");
    }
}

#[test]
fn reachable_states_round_trip_through_store() {
    let (_dir, store) = make_test_store();
    for pattern in patterns().step_by(37) {
        let mut state = ProgressState::with_theme("毎朝ストレッチ");
        state.set_reward_name(3, "コーヒー");
        state.set_reward_name(25, "温泉旅行");
        for &success in &pattern {
            if success {
                state.record_success();
            } else {
                state.record_failure();
            }
            state.toggle_reward(3);
        }

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));
    }
}

#[test]
fn reset_then_reload() {
    let (_dir, store) = make_test_store();
    let mut state = ProgressState::with_theme("journal");
    state.set_reward_name(7, "book");
    for _ in 0..8 {
        state.record_success();
    }
    state.toggle_reward(7);
    state.reset(ResetPolicy::KeepRewardNames);
    store.save(&state).unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.current_day, 1);
    assert_eq!(loaded.theme, "journal");
    assert_eq!(loaded.rewards.get(7).unwrap().name, "book");
    assert!(!loaded.rewards.get(7).unwrap().checked);
}

#[test]
fn hand_written_file_is_coerced() {
    let (_dir, store) = make_test_store();
    fs::write(
        store.path(),
        r#"{
    "current_day": 5,
    "history": {"1": "達成", "2": "達成", "3": "未達成", "3.5": "達成", "four": "達成"},
    "rewards": {"3": {"name": "ケーキ", "checked": true}},
    "consecutive_success": 0,
    "theme": "読書"
}"#,
    )
    .unwrap();

    let state = store.load().unwrap().unwrap();
    assert_eq!(state.history.len(), 3);
    assert_eq!(state.history[&3], Outcome::Failed);
    assert!(state.rewards.get(3).unwrap().checked);
    assert_eq!(state.rewards.iter().count(), REWARD_DAYS.len());
    assert!(
        REWARD_DAYS[1..]
            .iter()
            .all(|d| state.rewards.get(*d).unwrap().name.is_empty())
    );
}

#[test]
fn wrong_shape_is_corrupt() {
    let (_dir, store) = make_test_store();
    fs::write(store.path(), r#"{"current_day": "three"}"#).unwrap();
    assert!(matches!(store.load(), Err(StoreError::CorruptData(_))));

    fs::write(store.path(), r#""just a string""#).unwrap();
    assert!(matches!(store.load(), Err(StoreError::CorruptData(_))));
}
