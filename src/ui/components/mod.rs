pub mod board;
pub mod history_sidebar;
pub mod progress_bar;
pub mod reward_list;
