//! PostgreSQL record store
//!
//! Implements the `RecordStore` trait over the mobility table. Every filter
//! value is bound as a parameter and compared against the column cast to
//! text, so numeric and date columns match their textual rendering.

use super::client::PostgreSQLClient;
use crate::adapters::store::{RecordStore, StoreFilter};
use crate::core::mapping::{ColumnMap, SourceField};
use crate::domain::{RawRecord, RawValue, Result, StoreError};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::error::Error;
use std::time::Instant;
use tokio_postgres::types::{FromSql, ToSql, Type};
use tokio_postgres::Row;

/// PostgreSQL store
pub struct PostgreSQLStore {
    client: PostgreSQLClient,
    columns: ColumnMap,
}

impl PostgreSQLStore {
    pub fn new(client: PostgreSQLClient, columns: ColumnMap) -> Self {
        Self { client, columns }
    }

    async fn run(&self, sql: &str, values: &[&str]) -> Result<Vec<Row>> {
        let params: Vec<&(dyn ToSql + Sync)> =
            values.iter().map(|v| v as &(dyn ToSql + Sync)).collect();
        tracing::trace!(sql = %sql, "Running store query");
        self.client.query(sql, &params).await
    }
}

#[async_trait]
impl RecordStore for PostgreSQLStore {
    fn backend_name(&self) -> &'static str {
        "postgresql"
    }

    fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn query(&self, filter: &StoreFilter) -> Result<Vec<RawRecord>> {
        let started = Instant::now();
        let (sql, values) = select_rows_sql(self.client.table(), &self.columns, filter);

        let rows = self.run(&sql, &values).await?;
        let records = rows.iter().map(row_to_record).collect::<Result<Vec<_>>>()?;

        crate::log_store_query!(self.backend_name(), filter.len(), records.len(), started.elapsed());
        Ok(records)
    }

    async fn list_distinct_institutions(&self, filter: &StoreFilter) -> Result<Vec<String>> {
        let started = Instant::now();
        let (sql, values) = distinct_institutions_sql(self.client.table(), &self.columns, filter);

        let rows = self.run(&sql, &values).await?;
        let institutions = rows
            .iter()
            .map(|row| {
                row.try_get::<_, String>(0)
                    .map_err(|e| StoreError::InvalidResponse(e.to_string()).into())
            })
            .collect::<Result<Vec<_>>>()?;

        crate::log_store_query!(
            self.backend_name(),
            filter.len(),
            institutions.len(),
            started.elapsed()
        );
        Ok(institutions)
    }
}

/// Quotes an identifier, doubling embedded quotes
///
/// `schema.table` is quoted part by part.
fn quote_ident(ident: &str) -> String {
    ident
        .split('.')
        .map(|part| format!("\"{}\"", part.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(".")
}

fn where_clause<'a>(
    columns: &'a ColumnMap,
    filter: &'a StoreFilter,
    first_param: usize,
) -> (Vec<String>, Vec<&'a str>) {
    let mut clauses = Vec::new();
    let mut values = Vec::new();
    for (i, (column, value)) in filter.columns(columns).enumerate() {
        clauses.push(format!("{}::text = ${}", quote_ident(column), first_param + i));
        values.push(value);
    }
    (clauses, values)
}

fn select_rows_sql<'a>(
    table: &str,
    columns: &'a ColumnMap,
    filter: &'a StoreFilter,
) -> (String, Vec<&'a str>) {
    let (clauses, values) = where_clause(columns, filter, 1);
    let mut sql = format!("SELECT * FROM {}", quote_ident(table));
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    (sql, values)
}

fn distinct_institutions_sql<'a>(
    table: &str,
    columns: &'a ColumnMap,
    filter: &'a StoreFilter,
) -> (String, Vec<&'a str>) {
    let institution = quote_ident(columns.column(SourceField::Institution));
    let (mut clauses, values) = where_clause(columns, filter, 1);
    clauses.insert(0, format!("{institution} IS NOT NULL"));
    clauses.insert(1, format!("{institution}::text <> ''"));
    let sql = format!(
        "SELECT DISTINCT {institution}::text FROM {} WHERE {} ORDER BY 1",
        quote_ident(table),
        clauses.join(" AND ")
    );
    (sql, values)
}

/// Converts one row to a raw record keyed by column name
fn row_to_record(row: &Row) -> Result<RawRecord> {
    let mut record = RawRecord::new();
    for (idx, column) in row.columns().iter().enumerate() {
        let value = column_value(row, idx, column.type_()).map_err(|e| {
            StoreError::InvalidResponse(format!("Column '{}': {}", column.name(), e))
        })?;
        record.insert(column.name(), value);
    }
    Ok(record)
}

fn column_value(
    row: &Row,
    idx: usize,
    ty: &Type,
) -> std::result::Result<RawValue, tokio_postgres::Error> {
    let value = match *ty {
        Type::BOOL => row.try_get::<_, Option<bool>>(idx)?.map(RawValue::Bool),
        Type::INT2 => row.try_get::<_, Option<i16>>(idx)?.map(|v| RawValue::Int(v.into())),
        Type::INT4 => row.try_get::<_, Option<i32>>(idx)?.map(|v| RawValue::Int(v.into())),
        Type::INT8 => row.try_get::<_, Option<i64>>(idx)?.map(RawValue::Int),
        Type::FLOAT4 => row.try_get::<_, Option<f32>>(idx)?.map(|v| RawValue::Float(v.into())),
        Type::FLOAT8 => row.try_get::<_, Option<f64>>(idx)?.map(RawValue::Float),
        Type::DATE => row
            .try_get::<_, Option<NaiveDate>>(idx)?
            .map(|d| RawValue::Text(d.format("%Y-%m-%d").to_string())),
        Type::TIMESTAMP => row
            .try_get::<_, Option<NaiveDateTime>>(idx)?
            .map(|d| RawValue::Text(d.format("%Y-%m-%dT%H:%M:%S").to_string())),
        Type::TIMESTAMPTZ => row
            .try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map(|d| RawValue::Text(d.to_rfc3339())),
        Type::NUMERIC => row
            .try_get::<_, Option<NumericText>>(idx)?
            .map(|n| RawValue::Text(n.0)),
        // TEXT, VARCHAR, BPCHAR, NAME and anything else decodable as text
        _ => match row.try_get::<_, Option<String>>(idx) {
            Ok(value) => value.map(RawValue::Text),
            Err(e) => {
                tracing::debug!(error = %e, column_type = %ty, "Unsupported column type, reading as null");
                None
            }
        },
    };
    Ok(value.unwrap_or(RawValue::Null))
}

/// NUMERIC value rendered as its decimal text
///
/// The binary form is a sign, a base-10000 `weight`, a display scale and a
/// list of base-10000 digits.
#[derive(Debug, PartialEq)]
struct NumericText(String);

const NUMERIC_NEGATIVE: u16 = 0x4000;
const NUMERIC_NAN: u16 = 0xC000;

impl<'a> FromSql<'a> for NumericText {
    fn from_sql(_: &Type, raw: &'a [u8]) -> std::result::Result<Self, Box<dyn Error + Sync + Send>> {
        let word = |i: usize| -> std::result::Result<u16, Box<dyn Error + Sync + Send>> {
            raw.get(i * 2..i * 2 + 2)
                .map(|b| u16::from_be_bytes([b[0], b[1]]))
                .ok_or_else(|| "truncated numeric value".into())
        };

        let ndigits = usize::from(word(0)?);
        let weight = i64::from(word(1)? as i16);
        let sign = word(2)?;
        let dscale = usize::from(word(3)?);
        let digits = (0..ndigits)
            .map(|i| word(4 + i))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if sign == NUMERIC_NAN {
            return Ok(Self("NaN".to_string()));
        }

        let digit = |i: i64| -> u16 {
            usize::try_from(i)
                .ok()
                .and_then(|i| digits.get(i).copied())
                .unwrap_or(0)
        };

        let mut text = String::new();
        if sign == NUMERIC_NEGATIVE && digits.iter().any(|d| *d != 0) {
            text.push('-');
        }

        if weight < 0 {
            text.push('0');
        } else {
            text.push_str(&digit(0).to_string());
            for i in 1..=weight {
                text.push_str(&format!("{:04}", digit(i)));
            }
        }

        if dscale > 0 {
            let groups = (dscale + 3) / 4;
            let fraction: String = (0..groups as i64)
                .map(|g| format!("{:04}", digit(weight + 1 + g)))
                .collect();
            text.push('.');
            text.push_str(&fraction[..dscale]);
        }

        Ok(Self(text))
    }

    fn accepts(ty: &Type) -> bool {
        *ty == Type::NUMERIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("ENSFEA_ERASMIP"), "\"ENSFEA_ERASMIP\"");
        assert_eq!(quote_ident("public.mobility"), "\"public\".\"mobility\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_select_without_filter_reads_all_rows() {
        let columns = ColumnMap::relational();
        let filter = StoreFilter::new();
        let (sql, values) = select_rows_sql("ENSFEA_ERASMIP", &columns, &filter);
        assert_eq!(sql, "SELECT * FROM \"ENSFEA_ERASMIP\"");
        assert!(values.is_empty());
    }

    #[test]
    fn test_select_binds_every_condition() {
        let columns = ColumnMap::relational();
        let filter = StoreFilter::new()
            .with(SourceField::LastName, "DUPONT")
            .with(SourceField::CaseNumber, "123");
        let (sql, values) = select_rows_sql("ENSFEA_ERASMIP", &columns, &filter);
        assert_eq!(
            sql,
            "SELECT * FROM \"ENSFEA_ERASMIP\" WHERE \"nom\"::text = $1 AND \"dossier_number\"::text = $2"
        );
        assert_eq!(values, vec!["DUPONT", "123"]);
    }

    #[test]
    fn test_distinct_institutions_sql() {
        let columns = ColumnMap::relational();
        let filter = StoreFilter::new().with(SourceField::LastName, "DUPONT");
        let (sql, values) = distinct_institutions_sql("ENSFEA_ERASMIP", &columns, &filter);
        assert_eq!(
            sql,
            "SELECT DISTINCT \"etablissement\"::text FROM \"ENSFEA_ERASMIP\" \
             WHERE \"etablissement\" IS NOT NULL AND \"etablissement\"::text <> '' \
             AND \"nom\"::text = $1 ORDER BY 1"
        );
        assert_eq!(values, vec!["DUPONT"]);
    }

    fn numeric(weight: i16, sign: u16, dscale: u16, digits: &[u16]) -> Vec<u8> {
        let mut raw = Vec::new();
        for word in [digits.len() as u16, weight as u16, sign, dscale] {
            raw.extend_from_slice(&word.to_be_bytes());
        }
        for d in digits {
            raw.extend_from_slice(&d.to_be_bytes());
        }
        raw
    }

    fn decode(raw: &[u8]) -> String {
        NumericText::from_sql(&Type::NUMERIC, raw).unwrap().0
    }

    #[test]
    fn test_numeric_case_number_reads_as_text() {
        assert_eq!(decode(&numeric(0, 0, 0, &[1002])), "1002");
        assert_eq!(decode(&numeric(1, 0, 0, &[1, 2345])), "12345");
        assert_eq!(decode(&numeric(1, 0, 0, &[12])), "120000");
        assert_eq!(decode(&numeric(0, 0, 0, &[])), "0");
    }

    #[test]
    fn test_numeric_with_scale_and_sign() {
        assert_eq!(decode(&numeric(1, 0, 2, &[1, 2345, 6700])), "12345.67");
        assert_eq!(decode(&numeric(-1, NUMERIC_NEGATIVE, 2, &[500])), "-0.05");
        assert_eq!(decode(&numeric(-2, 0, 6, &[1200])), "0.000012");
        assert_eq!(decode(&numeric(0, NUMERIC_NAN, 0, &[])), "NaN");
    }

    #[test]
    fn test_numeric_rejects_truncated_input() {
        let mut raw = numeric(0, 0, 0, &[1002]);
        raw.truncate(9);
        assert!(NumericText::from_sql(&Type::NUMERIC, &raw).is_err());
        assert!(NumericText::accepts(&Type::NUMERIC));
        assert!(!NumericText::accepts(&Type::TEXT));
    }
}
