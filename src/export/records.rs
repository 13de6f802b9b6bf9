//! Typed export records.
//!
//! Each record type pairs a static struct with the column list that
//! produces it. Rows are decoded by column name, so the struct's fields and
//! its `COLUMNS` must name the same columns.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::FromRow;

use super::types::Column;

/// A row type that can be exported.
pub trait ExportRecord:
    for<'r> FromRow<'r, AnyRow> + Serialize + DeserializeOwned + Send + Unpin
{
    /// Columns selected for this record, in output order.
    const COLUMNS: &'static [Column];
}

/// One census geography (state / county / town / tract) for a given year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct GeographyRecord {
    pub year: i64,
    pub state: Option<String>,
    pub county: Option<String>,
    pub geoid: Option<String>,
    pub statecountyid: Option<String>,
    pub msa: Option<String>,
    pub msa_number: Option<String>,
    pub st: Option<String>,
    pub town: Option<String>,
    pub tract_number: Option<String>,
}

impl ExportRecord for GeographyRecord {
    const COLUMNS: &'static [Column] = &[
        Column::integer("year"),
        Column::text("state"),
        Column::text("county"),
        Column::text("geoid"),
        Column::text("statecountyid"),
        Column::text("msa"),
        Column::text("msa_number"),
        Column::text("st"),
        Column::text("town"),
        Column::text("tract_number"),
    ];
}

/// One lender as listed in a lender directory table for a given year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LenderRecord {
    pub year: i64,
    pub lender: Option<String>,
    pub lender_id: Option<String>,
    pub regulator: Option<String>,
    pub lender_state: Option<String>,
}

impl ExportRecord for LenderRecord {
    const COLUMNS: &'static [Column] = &[
        Column::integer("year"),
        Column::text("lender"),
        Column::text("lender_id"),
        Column::text("regulator"),
        Column::text("lender_state"),
    ];
}
