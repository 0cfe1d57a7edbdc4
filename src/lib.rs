// Library target holds the board engine, persistence and terminal UI pieces.
// The binary in main.rs wires them to the terminal and the CLI subcommands;
// integration tests in tests/ drive the engine and store through this crate.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod engine;
pub mod event;
pub mod logging;
pub mod store;
pub mod ui;
