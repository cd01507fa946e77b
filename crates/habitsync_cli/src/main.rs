//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `habitsync_core` linkage without any UI runtime.
//! - Optionally open a store file and print its dashboard summary.

use habitsync_core::{
    ChallengeFilter, ChallengeService, HabitService, LocalStore, SqliteKvBackend, StoreOptions,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("habitsync_core ping={}", habitsync_core::ping());
    println!("habitsync_core version={}", habitsync_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match print_summary(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("habitsync_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(path: &str) -> Result<(), Box<dyn Error>> {
    let store: LocalStore<SqliteKvBackend> = LocalStore::open(path, StoreOptions::default())?;
    {
        let stats = HabitService::new(&store).dashboard_stats()?;
        let challenges = ChallengeService::new(&store).list(ChallengeFilter::All)?;

        println!("habits active={}", stats.active_habits);
        println!("habits current_streak={}", stats.current_streak);
        println!("habits completion_rate={}%", stats.completion_rate_percent);
        println!("challenges total={}", challenges.len());
    }
    store.close()?;
    Ok(())
}
