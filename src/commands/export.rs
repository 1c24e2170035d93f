use clap::Args;
use std::fs;
use std::path::PathBuf;

use super::CommandResult;
use liftlog_core::Session;

/// Export all workouts as a JSON backup document
#[derive(Args)]
pub struct ExportCommand {
    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl ExportCommand {
    pub fn run(&self, session: &Session) -> CommandResult {
        let document = session.export().ok_or("Failed to export data")?;

        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                fs::write(path, document)?;
                println!(
                    "Exported {} workout(s) to {}",
                    session.store().workouts().len(),
                    path.display()
                );
            }
            None => println!("{}", document),
        }
        Ok(())
    }
}
