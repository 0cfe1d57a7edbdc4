use anyhow::{Result, bail};
use clap::Subcommand;
use rust_i18n::t;

use sugoroku::app::App;
use sugoroku::engine::board::board_rows;
use sugoroku::engine::tracker::{GOAL, REWARD_DAYS};

#[derive(Subcommand)]
pub enum Command {
    /// Show the board, streak and rewards
    Status,
    /// Record the current day as achieved
    Done,
    /// Record the current day as missed
    Miss,
    /// Claim (or unclaim) the reward of a reward day
    Claim { day: u32 },
    /// Set the reward for a reward day
    Reward { day: u32, name: String },
    /// Set the challenge theme
    Theme { text: String },
    /// Start over from cell 1 (the theme is kept)
    Reset {
        #[arg(long, help = "Confirm the reset")]
        yes: bool,
    },
}

pub fn run(app: &mut App, command: Command) -> Result<()> {
    match command {
        Command::Status => {}
        Command::Done => app.record_success(),
        Command::Miss => app.record_failure(),
        Command::Claim { day } => app.toggle_reward(day),
        Command::Reward { day, name } => {
            if !app.set_reward_name(day, &name) {
                bail!("day {day} is not a reward day (reward days: {REWARD_DAYS:?})");
            }
        }
        Command::Theme { text } => app.set_theme(&text),
        Command::Reset { yes } => {
            if !yes {
                bail!("{}", t!("cli.reset_needs_yes"));
            }
            app.reset();
        }
    }

    if let Some(err) = &app.last_save_error {
        bail!("{}", t!("notice.save_failed", error = err.as_str()));
    }
    if let Some(notice) = &app.notice {
        println!("{}", notice.text);
    }
    print_status(app);
    Ok(())
}

fn print_status(app: &App) {
    println!("{}: {}", t!("ui.theme_label"), app.state.theme);
    for line in app.status_lines() {
        println!("{line}");
    }
    println!();

    for row in board_rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|&day| format!("{}{day:>3}", app.state.cell_mark(day).symbol()))
            .collect();
        println!("  {}", cells.join("  "));
    }
    println!(
        "\n  {}: {} ({:.0}%)",
        t!("ui.progress_label"),
        t!(
            "ui.progress_caption",
            achieved = app.state.achieved_count(),
            goal = GOAL
        ),
        app.state.progress_ratio() * 100.0
    );
    println!();

    for (day, reward) in app.state.rewards.iter() {
        let check = if reward.checked { "[x]" } else { "[ ]" };
        let name = if reward.has_name() {
            reward.name.clone()
        } else {
            t!("ui.reward_placeholder").to_string()
        };
        println!("  {check} {}: {name}", t!("ui.reward_day", day = day));
    }

    match app.data_path() {
        Some(path) => println!("\n{}", t!("ui.save_note", path = path.display().to_string())),
        None => println!("\n{}", t!("ui.no_save_note")),
    }
}
