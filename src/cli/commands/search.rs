//! Search command implementation
//!
//! Resolves a learner's record, lets the user pick among several candidates
//! with `--select`, and creates the pre-filled case with `--link`.

use super::{load_or_report, report, resolver_for};
use crate::core::prefill::PrefillLinkBuilder;
use crate::core::resolver::{CaseSummary, ResolutionOutcome, SearchSession};
use crate::domain::{display_date, CanonicalRecord, CaseNumber, PrefillError, SearchKey};
use chrono::Local;
use clap::Args;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Learner last name (letters, spaces, '-' and ''' only)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Institution, required unless a case number is given
    #[arg(short, long)]
    pub institution: Option<String>,

    /// Case number; alone, looks the case up without a name
    #[arg(long)]
    pub case_number: Option<String>,

    /// Record id or case number of the candidate to keep when several match
    #[arg(long)]
    pub select: Option<String>,

    /// Create the pre-filled case and print its URL
    #[arg(long)]
    pub link: bool,

    /// Also print the URL with a readable anchor
    #[arg(long, requires = "link")]
    pub short: bool,
}

impl SearchArgs {
    /// Execute the search command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_or_report(config_path) else {
            return Ok(2);
        };

        let resolver = match resolver_for(&config) {
            Ok(r) => r,
            Err(e) => return Ok(report(&e)),
        };

        let mut session = SearchSession::new();
        let outcome = match self.run_search(&resolver, &mut session).await {
            Ok(outcome) => outcome,
            Err(e) => return Ok(report(&e)),
        };

        let record = match outcome {
            ResolutionOutcome::NotFound(reason) => {
                println!("🔍 {reason}");
                return Ok(3);
            }
            ResolutionOutcome::Single(record) => *record,
            ResolutionOutcome::Ambiguous(candidates) => match self.select.as_deref() {
                Some(selector) => match session.choose(&resolver, selector) {
                    Ok(record) => record,
                    Err(e) => return Ok(report(&e)),
                },
                None => {
                    print_candidates(&candidates);
                    println!();
                    println!("Re-run with --select <ID> to pick one.");
                    return Ok(0);
                }
            },
        };

        print_record(&record);

        if !self.link {
            return Ok(0);
        }

        let builder = match PrefillLinkBuilder::new(config.provider.clone()) {
            Ok(b) => b,
            Err(e) => return Ok(report(&e)),
        };

        let today = Local::now().date_naive();
        match builder.build_link(&record, self.short, today).await {
            Ok(link) => {
                println!();
                println!("✅ Pre-filled case created");
                println!("{}", link.url);
                if let Some(short) = link.short_url {
                    println!("{short}");
                }
                Ok(0)
            }
            Err(e) => Ok(report(&e)),
        }
    }

    async fn run_search(
        &self,
        resolver: &crate::core::resolver::RecordResolver,
        session: &mut SearchSession,
    ) -> Result<ResolutionOutcome, PrefillError> {
        match (self.name.as_deref(), self.case_number.as_deref()) {
            (Some(name), case_number) => {
                let key = SearchKey::new(name, self.institution.as_deref(), case_number)?;
                session.search(resolver, key).await
            }
            (None, Some(case_number)) => {
                let case_number = CaseNumber::new(case_number).map_err(PrefillError::Validation)?;
                let outcome = resolver.find_by_case_number(&case_number).await?;
                if let ResolutionOutcome::Ambiguous(ref candidates) = outcome {
                    session.remember(candidates.clone());
                }
                Ok(outcome)
            }
            (None, None) => Err(PrefillError::Validation(
                "Give a last name or a case number".to_string(),
            )),
        }
    }
}

fn print_candidates(candidates: &[CaseSummary]) {
    println!("Found {} matching records:", candidates.len());
    println!();
    println!(
        "{:<10} {:<12} {:<20} {:<20} {:<30} {:<12}",
        "ID", "Case", "Last name", "First name", "Institution", "Submitted"
    );
    println!("{}", "-".repeat(108));
    for c in candidates {
        println!(
            "{:<10} {:<12} {:<20} {:<20} {:<30} {:<12}",
            c.id.as_ref().map(|i| i.to_string()).unwrap_or_default(),
            c.case_number
                .as_ref()
                .map(|n| n.to_string())
                .unwrap_or_default(),
            c.last_name,
            c.first_name,
            c.institution,
            display_date(c.submitted_date.as_ref()),
        );
    }
}

/// Prints the record summary screen
pub(crate) fn print_record(record: &CanonicalRecord) {
    let or_unset = |s: &str| {
        if s.trim().is_empty() {
            "Non renseigné".to_string()
        } else {
            s.to_string()
        }
    };

    println!("📄 Mobility record");
    if let Some(case_number) = &record.source.case_number {
        println!("  Case number:     {case_number}");
    }
    println!(
        "  Salutation:      {}",
        record
            .salutation
            .map(|s| s.provider_value().to_string())
            .unwrap_or_else(|| "Non renseigné".to_string())
    );
    println!("  Last name:       {}", or_unset(&record.last_name));
    println!("  First name:      {}", or_unset(&record.first_name));
    println!("  Birth date:      {}", display_date(record.birth_date.as_ref()));
    println!("  Institution:     {}", or_unset(&record.institution));
    println!("  Status:          {}", record.participant_status_label);
    println!("  Mobility:        {}", record.mobility_program_label);
    println!("  Type:            {}", record.mobility_type_label);
    println!(
        "  Hybrid:          {}",
        if record.is_hybrid { "Oui" } else { "Non" }
    );
    println!("  Host country:    {}", or_unset(&record.host_country));
    println!(
        "  Departure:       {}",
        display_date(record.departure_date.as_ref())
    );
    println!("  Return:          {}", display_date(record.return_date.as_ref()));

    let missing = record.missing_required_fields();
    if !missing.is_empty() {
        println!("  ⚠️  Missing: {}", missing.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_short_requires_link() {
        let result = Cli::try_parse_from([
            "dossier-prefill",
            "search",
            "--case-number",
            "123",
            "--short",
        ]);
        assert!(result.is_err());
    }
}
