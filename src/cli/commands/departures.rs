//! Departures command implementation
//!
//! Lists the learners leaving on a given day, the way staff prepare the
//! pre-filled cases of a departure batch.

use super::search::print_record;
use super::{load_or_report, report, resolver_for};
use clap::Args;

/// Arguments for the departures command
#[derive(Args, Debug)]
pub struct DeparturesArgs {
    /// Departure date (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(short, long)]
    pub date: String,

    /// Restrict to one institution
    #[arg(short, long)]
    pub institution: Option<String>,
}

impl DeparturesArgs {
    /// Execute the departures command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_or_report(config_path) else {
            return Ok(2);
        };

        let resolver = match resolver_for(&config) {
            Ok(r) => r,
            Err(e) => return Ok(report(&e)),
        };

        let records = match resolver
            .find_departures(&self.date, self.institution.as_deref())
            .await
        {
            Ok(records) => records,
            Err(e) => return Ok(report(&e)),
        };

        if records.is_empty() {
            println!("🔍 No departure on {}", self.date);
            return Ok(3);
        }

        println!("✈️  {} departure(s) on {}", records.len(), self.date);
        for record in &records {
            println!();
            print_record(record);
        }
        Ok(0)
    }
}
