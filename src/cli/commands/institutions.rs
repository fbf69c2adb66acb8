//! Institutions command implementation

use super::{load_or_report, report, resolver_for};
use crate::core::resolver::SearchSession;
use clap::Args;

/// Arguments for the institutions command
#[derive(Args, Debug)]
pub struct InstitutionsArgs {
    /// Only institutions where this last name appears
    #[arg(short, long)]
    pub name: Option<String>,
}

impl InstitutionsArgs {
    /// Execute the institutions command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_or_report(config_path) else {
            return Ok(2);
        };

        let resolver = match resolver_for(&config) {
            Ok(r) => r,
            Err(e) => return Ok(report(&e)),
        };

        let institutions = match self.name.as_deref() {
            Some(name) => {
                let mut session = SearchSession::new();
                session
                    .institutions_for(&resolver, name)
                    .await
                    .map(<[String]>::to_vec)
            }
            None => resolver.list_institutions(None).await,
        };

        match institutions {
            Ok(list) if list.is_empty() => {
                println!("🔍 No institution found");
                Ok(3)
            }
            Ok(list) => {
                println!("🏫 {} institution(s):", list.len());
                for institution in &list {
                    println!("  {institution}");
                }
                Ok(0)
            }
            Err(e) => Ok(report(&e)),
        }
    }
}
