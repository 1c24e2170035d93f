use clap::Args;

use super::{confirm, CommandResult};
use liftlog_core::Session;

/// Delete all workouts, exercises and sets
#[derive(Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(long, short)]
    pub force: bool,
}

impl ClearCommand {
    pub fn run(&self, session: &mut Session) -> CommandResult {
        let count = session.store().workouts().len();
        if count == 0 {
            println!("Nothing to clear");
            return Ok(());
        }

        if !self.force
            && !confirm(&format!(
                "Delete all {} workout(s)? This action cannot be undone.",
                count
            ))?
        {
            println!("Clear cancelled.");
            return Ok(());
        }

        session.store_mut().clear_all();
        println!("All workout data has been cleared.");
        Ok(())
    }
}
