//! Cosmetic short links
//!
//! The provider URL is opaque. A readable anchor is appended so that links
//! pasted into mails or spreadsheets can be told apart; browsers never send
//! the fragment, so the target page is unaffected.

use crate::domain::CanonicalRecord;
use chrono::NaiveDate;
use url::Url;

/// Appends `#first-last-YYYYMMDD` to `url`
///
/// The date is the departure date, or `today` when it is absent or did not
/// parse. A URL that already carries a fragment, or that cannot be parsed, is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use dossier_prefill::core::mapping::{ColumnMap, FieldMapper, MappingPolicy};
/// use dossier_prefill::core::prefill::short_link;
/// use dossier_prefill::domain::RawRecord;
///
/// let mapper = FieldMapper::new(ColumnMap::relational(), MappingPolicy::link());
/// let record = mapper.map_to_canonical(
///     &RawRecord::new().with("nom", "DUPONT").with("prenom", "Jean"),
/// );
/// let today = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
///
/// assert_eq!(
///     short_link("https://ds.example/dossiers/1/brouillon?prefill_token=abc", &record, today),
///     "https://ds.example/dossiers/1/brouillon?prefill_token=abc#jean-dupont-20250210"
/// );
/// ```
pub fn short_link(url: &str, record: &CanonicalRecord, today: NaiveDate) -> String {
    let mut parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "Provider URL could not be parsed, no short link");
            return url.to_string();
        }
    };
    if parsed.fragment().is_some() {
        return url.to_string();
    }

    let date = record
        .departure_date
        .as_ref()
        .and_then(|d| d.as_date())
        .unwrap_or(today);

    let anchor = [
        slug(&record.first_name),
        slug(&record.last_name),
        date.format("%Y%m%d").to_string(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join("-");

    parsed.set_fragment(Some(&anchor));
    parsed.to_string()
}

/// Lower-cases and replaces every non-alphanumeric run with one `-`
fn slug(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    for c in value.trim().chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapping::{ColumnMap, FieldMapper, MappingPolicy};
    use crate::domain::RawRecord;

    fn record(departure: Option<&str>) -> CanonicalRecord {
        let mut raw = RawRecord::new()
            .with("nom", "LE GALL")
            .with("prenom", "Anne-Sophie");
        if let Some(d) = departure {
            raw.insert("date_depart", d);
        }
        FieldMapper::new(ColumnMap::relational(), MappingPolicy::link()).map_to_canonical(&raw)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()
    }

    #[test]
    fn test_uses_departure_date() {
        let link = short_link("https://ds.example/d/1", &record(Some("01/03/2025")), today());
        assert_eq!(link, "https://ds.example/d/1#anne-sophie-le-gall-20250301");
    }

    #[test]
    fn test_absent_or_unparsed_departure_uses_today() {
        for departure in [None, Some("bientôt")] {
            let link = short_link("https://ds.example/d/1", &record(departure), today());
            assert!(link.ends_with("#anne-sophie-le-gall-20250210"), "{link}");
        }
    }

    #[test]
    fn test_base_url_is_preserved() {
        let base = "https://ds.example/commencer/erasmip?prefill_token=x%2By";
        let link = short_link(base, &record(None), today());
        assert!(link.starts_with(base));
    }

    #[test]
    fn test_existing_fragment_or_bad_url_unchanged() {
        assert_eq!(
            short_link("https://ds.example/d/1#top", &record(None), today()),
            "https://ds.example/d/1#top"
        );
        assert_eq!(short_link("not a url", &record(None), today()), "not a url");
    }

    #[test]
    fn test_slug() {
        assert_eq!(slug("Élodie"), "élodie");
        assert_eq!(slug(" O'Neil  Jr "), "o-neil-jr");
        assert_eq!(slug(""), "");
    }
}
