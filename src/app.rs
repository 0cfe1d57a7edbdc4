use std::path::{Path, PathBuf};

use rust_i18n::t;

use crate::config::Config;
use crate::engine::tracker::{ProgressState, REWARD_DAYS, RewardToggle, SuccessKind};
use crate::store::StoreError;
use crate::store::json_store::JsonStore;
use crate::ui::line_input::{LineInput, TextField};
use crate::ui::theme::Theme;

/// Ticks (100ms each in the terminal loop) a notice stays on screen.
const NOTICE_TICKS: u16 = 40;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Board,
    EditText(TextField),
    ConfirmReset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Celebrate,
    Warning,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    ticks_left: u16,
}

pub struct App {
    pub screen: AppScreen,
    pub state: ProgressState,
    /// Effective settings for this run, command-line overrides included.
    pub config: Config,
    /// Where a cycled color theme is remembered. `None` keeps it for this run only.
    pub config_file: Option<PathBuf>,
    pub theme: &'static Theme,
    /// `None` runs the board in memory only.
    pub store: Option<JsonStore>,
    pub notice: Option<Notice>,
    pub reward_selected: usize,
    pub input: Option<LineInput>,
    pub last_save_error: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, store: Option<JsonStore>) -> Self {
        let loaded_theme = Theme::load(&config.ui_theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let state = ProgressState::with_theme(config.default_theme_text.clone());

        let mut app = Self {
            screen: AppScreen::Board,
            state,
            config,
            config_file: Some(Config::config_path()),
            theme,
            store,
            notice: None,
            reward_selected: 0,
            input: None,
            last_save_error: None,
            should_quit: false,
        };
        app.load_state();
        app
    }

    fn load_state(&mut self) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        match store.load() {
            Ok(Some(state)) => {
                log::info!("loaded progress from {}", store.path().display());
                self.state = state;
            }
            Ok(None) => log::info!("no saved progress at {}", store.path().display()),
            Err(StoreError::CorruptData(e)) => {
                log::warn!("{}: {e}; starting over", store.path().display());
                self.set_notice(NoticeLevel::Warning, t!("notice.corrupt").to_string());
            }
            Err(e) => {
                log::error!("{}: {e}", store.path().display());
                let text = t!("notice.load_failed", error = e.to_string()).to_string();
                self.set_notice(NoticeLevel::Error, text);
            }
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.store.is_some()
    }

    pub fn data_path(&self) -> Option<&Path> {
        self.store.as_ref().map(|s| s.path())
    }

    pub fn set_notice(&mut self, level: NoticeLevel, text: String) {
        self.notice = Some(Notice {
            level,
            text,
            ticks_left: NOTICE_TICKS,
        });
    }

    pub fn tick(&mut self) {
        if let Some(notice) = self.notice.as_mut() {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }
    }

    /// Write the current state if this board is persisted. A failed write is
    /// reported but the in-memory state stays as it is.
    fn persist(&mut self) {
        let Some(store) = self.store.as_ref() else {
            return;
        };
        match store.save(&self.state) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                log::error!("saving {} failed: {e}", store.path().display());
                let msg = e.to_string();
                let text = t!("notice.save_failed", error = msg.as_str()).to_string();
                self.set_notice(NoticeLevel::Error, text);
                self.last_save_error = Some(msg);
            }
        }
    }

    pub fn record_success(&mut self) {
        let Some(event) = self.state.record_success() else {
            self.set_notice(NoticeLevel::Info, t!("notice.finished").to_string());
            return;
        };
        log::info!("day {} achieved: {:?}", event.day, event.kind);

        let (level, text) = match event.kind {
            SuccessKind::GoalReached => (NoticeLevel::Celebrate, t!("notice.goal_reached")),
            SuccessKind::RewardUnlocked => {
                (NoticeLevel::Celebrate, t!("notice.reward_unlocked"))
            }
            SuccessKind::StreakMilestone { streak } => {
                (NoticeLevel::Celebrate, t!("notice.streak", streak = streak))
            }
            SuccessKind::Normal => (NoticeLevel::Info, t!("notice.normal")),
        };
        self.set_notice(level, text.to_string());
        self.persist();
    }

    pub fn record_failure(&mut self) {
        if !self.state.record_failure() {
            self.set_notice(NoticeLevel::Info, t!("notice.finished").to_string());
            return;
        }
        log::info!("day {} missed", self.state.current_day);
        self.set_notice(NoticeLevel::Info, t!("notice.failure").to_string());
        self.persist();
    }

    pub fn toggle_reward(&mut self, day: u32) {
        let name = self
            .state
            .rewards
            .get(day)
            .map(|r| r.name.clone())
            .unwrap_or_default();

        match self.state.toggle_reward(day) {
            Some(RewardToggle::Claimed) => {
                let text = t!("notice.reward_claimed", name = name.as_str()).to_string();
                self.set_notice(NoticeLevel::Celebrate, text);
                self.persist();
            }
            Some(RewardToggle::Released) => {
                let text = t!("notice.reward_released", name = name.as_str()).to_string();
                self.set_notice(NoticeLevel::Info, text);
                self.persist();
            }
            None => {
                self.set_notice(
                    NoticeLevel::Warning,
                    t!("notice.reward_unavailable").to_string(),
                );
            }
        }
    }

    /// Toggle the reward in the n-th reward slot (0-based).
    pub fn toggle_reward_slot(&mut self, slot: usize) {
        if let Some(&day) = REWARD_DAYS.get(slot) {
            self.reward_selected = slot;
            self.toggle_reward(day);
        }
    }

    pub fn toggle_selected_reward(&mut self) {
        self.toggle_reward_slot(self.reward_selected);
    }

    pub fn select_next_reward(&mut self) {
        self.reward_selected = (self.reward_selected + 1) % REWARD_DAYS.len();
    }

    pub fn select_prev_reward(&mut self) {
        self.reward_selected = if self.reward_selected == 0 {
            REWARD_DAYS.len() - 1
        } else {
            self.reward_selected - 1
        };
    }

    pub fn selected_reward_day(&self) -> u32 {
        REWARD_DAYS[self.reward_selected.min(REWARD_DAYS.len() - 1)]
    }

    pub fn reset(&mut self) {
        self.state.reset(self.config.reset_policy());
        log::info!("challenge reset");
        self.screen = AppScreen::Board;
        self.set_notice(NoticeLevel::Info, t!("notice.reset").to_string());
        self.persist();
    }

    pub fn set_theme(&mut self, text: &str) {
        self.state.set_theme(text);
        self.set_notice(NoticeLevel::Info, t!("notice.theme_updated").to_string());
        self.persist();
    }

    pub fn set_reward_name(&mut self, day: u32, name: &str) -> bool {
        if !self.state.set_reward_name(day, name) {
            return false;
        }
        let text = t!("notice.reward_name_updated", day = day).to_string();
        self.set_notice(NoticeLevel::Info, text);
        self.persist();
        true
    }

    pub fn go_to_board(&mut self) {
        self.screen = AppScreen::Board;
        self.input = None;
    }

    pub fn confirm_reset(&mut self) {
        self.screen = AppScreen::ConfirmReset;
    }

    pub fn start_edit_theme(&mut self) {
        self.input = Some(LineInput::new(&self.state.theme));
        self.screen = AppScreen::EditText(TextField::Theme);
    }

    pub fn start_edit_reward(&mut self) {
        let day = self.selected_reward_day();
        let current = self
            .state
            .rewards
            .get(day)
            .map(|r| r.name.as_str())
            .unwrap_or_default();
        self.input = Some(LineInput::new(current));
        self.screen = AppScreen::EditText(TextField::RewardName(day));
    }

    pub fn submit_edit(&mut self) {
        let (AppScreen::EditText(field), Some(input)) = (self.screen, self.input.take()) else {
            self.go_to_board();
            return;
        };
        match field {
            TextField::Theme => self.set_theme(input.value()),
            TextField::RewardName(day) => {
                self.set_reward_name(day, input.value());
            }
        }
        self.go_to_board();
    }

    pub fn cycle_ui_theme(&mut self) {
        let themes = Theme::available_themes();
        let next = match themes.iter().position(|t| *t == self.config.ui_theme) {
            Some(idx) => themes.get((idx + 1) % themes.len()),
            None => themes.first(),
        };
        let Some(name) = next.cloned() else {
            return;
        };
        if let Some(new_theme) = Theme::load(&name) {
            self.theme = Box::leak(Box::new(new_theme));
            self.config.ui_theme = name.clone();
            self.set_notice(
                NoticeLevel::Info,
                t!("notice.ui_theme", name = name.as_str()).to_string(),
            );
            if let Some(path) = self.config_file.as_deref()
                && let Err(e) = Config::save_ui_theme(path, &name)
            {
                log::warn!("saving config failed: {e}");
                let text = t!("notice.config_save_failed", error = e.to_string()).to_string();
                self.set_notice(NoticeLevel::Warning, text);
            }
        }
    }

    /// Status lines shown under the header and printed by the CLI.
    pub fn status_lines(&self) -> Vec<String> {
        if self.state.is_finished() {
            return vec![t!("status.finished").to_string()];
        }
        vec![
            t!(
                "status.current",
                day = self.state.current_day,
                remaining = self.state.remaining_days()
            )
            .to_string(),
            t!("status.streak", streak = self.state.consecutive_success).to_string(),
        ]
    }
}
