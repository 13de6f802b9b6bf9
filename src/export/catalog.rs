//! The named exports consumed by the front-end.

use clap::ValueEnum;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error_handling::ExportError;

use super::exporter::TabularExporter;
use super::records::{ExportRecord, GeographyRecord, LenderRecord};
use super::types::{ExportRequest, ExportSummary};

/// A named export: a table, the record it is read into, and its output file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter, EnumString, ValueEnum)]
#[strum(serialize_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ExportTarget {
    /// HMDA lender directory
    HmdaList,
    /// CRA disclosure lender directory
    CraList,
    /// Branch lender directory
    BranchList,
    /// Census geographies down to tract level
    Geographies,
}

impl ExportTarget {
    /// Source table.
    pub fn table(self) -> &'static str {
        match self {
            ExportTarget::HmdaList => "hmda_us",
            ExportTarget::CraList => "cra_disc",
            ExportTarget::BranchList => "branch_us",
            ExportTarget::Geographies => "census_us",
        }
    }

    /// Output file name.
    pub fn file_name(self) -> &'static str {
        match self {
            ExportTarget::HmdaList => "hmda_list.json",
            ExportTarget::CraList => "cra_list.json",
            ExportTarget::BranchList => "branch_list.json",
            ExportTarget::Geographies => "geographies.json",
        }
    }

    /// Ordering of the exported rows.
    pub fn order_by(self) -> &'static [&'static str] {
        match self {
            ExportTarget::HmdaList | ExportTarget::CraList | ExportTarget::BranchList => {
                &["lender"]
            }
            ExportTarget::Geographies => &["state", "county", "town"],
        }
    }

    /// The export request for this target.
    pub fn request(self) -> ExportRequest {
        let columns = match self {
            ExportTarget::Geographies => GeographyRecord::COLUMNS,
            _ => LenderRecord::COLUMNS,
        };
        ExportRequest::new(self.table(), columns, self.order_by(), self.file_name())
    }

    /// Runs this export for the table's most recent year.
    pub async fn run(
        self,
        exporter: &TabularExporter<'_>,
        fallback_year: i64,
    ) -> Result<ExportSummary, ExportError> {
        match self {
            ExportTarget::Geographies => {
                export_summary::<GeographyRecord>(self, exporter, fallback_year).await
            }
            _ => export_summary::<LenderRecord>(self, exporter, fallback_year).await,
        }
    }
}

async fn export_summary<R: ExportRecord>(
    target: ExportTarget,
    exporter: &TabularExporter<'_>,
    fallback_year: i64,
) -> Result<ExportSummary, ExportError> {
    let request = target.request();
    let document = exporter.export_latest::<R>(&request, fallback_year).await?;
    Ok(ExportSummary {
        target: target.to_string(),
        table: document.table,
        most_recent_year: document.most_recent_year,
        record_count: document.record_count,
        path: exporter.output_dir().join(&request.file_name),
    })
}
