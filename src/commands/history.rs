use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use super::{CommandResult, OutputFormat};
use crate::config::Config;
use liftlog_core::{history_order, Session, Summary};

/// Past workouts, newest first, with totals
#[derive(Args)]
pub struct HistoryCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Only show the most recent N workouts
    #[arg(long, short)]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct HistoryEntry<'a> {
    id: &'a str,
    name: &'a str,
    date: Option<DateTime<Utc>>,
    exercises: usize,
    sets: usize,
    volume: f64,
}

#[derive(Serialize)]
struct HistoryReport<'a> {
    summary: Summary,
    workouts: Vec<HistoryEntry<'a>>,
}

impl HistoryCommand {
    pub fn run(&self, session: &Session, config: &Config) -> CommandResult {
        let workouts = session.store().workouts();
        let summary = Summary::of(workouts);
        let ordered = history_order(workouts);
        let limit = self.limit.unwrap_or(ordered.len());

        let entries: Vec<HistoryEntry<'_>> = ordered
            .into_iter()
            .take(limit)
            .map(|w| HistoryEntry {
                id: w.id.as_str(),
                name: &w.name,
                date: w.date,
                exercises: w.exercises.len(),
                sets: w.set_count(),
                volume: w.total_volume(),
            })
            .collect();

        match self.format {
            OutputFormat::Json => {
                let report = HistoryReport {
                    summary,
                    workouts: entries,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                if entries.is_empty() {
                    println!("No workouts logged yet");
                    return Ok(());
                }

                println!(
                    "{:<10}  {:<24}  {:>9}  {:>5}  VOLUME ({})",
                    "DATE", "NAME", "EXERCISES", "SETS", config.weight_unit.value
                );
                println!("{}", "-".repeat(72));
                for entry in &entries {
                    let date = entry
                        .date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{:<10}  {:<24}  {:>9}  {:>5}  {}",
                        date, entry.name, entry.exercises, entry.sets, entry.volume
                    );
                }
                println!("\n{}", summary);
            }
        }
        Ok(())
    }
}
