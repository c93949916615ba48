mod analysis;
mod config;
mod error;
mod io;
mod report;
mod repository;
mod types;
mod utils;

use std::path::Path;

pub use analysis::{
    group_by_spender, monthly_top_spenders, spender_totals_by_month, top_spenders,
    AnalysisService, SpenderTotalsByMonth, SpendsBySpender,
};
pub use config::{ReportOptions, DEFAULT_MONTHS, DEFAULT_TOP_SPENDERS};
pub use error::{AnalysisError, LedgerError, ParseMonthKeyError, ReportError};
pub use io::{parse_ledger, CsvLedgerRepository, TopSpenderRowEntity};
pub use report::MonthlyTopSpendersReport;
pub use repository::{InMemoryLedgerRepository, LedgerRepository};
pub use types::{
    GoldPayment, GramWeight, MonthKey, MonthlySpend, Spender, GOLD_CURRENCY_CODE, GOLD_SPEND,
};

/// Reads the CSV ledger at `csv_path` and renders its top spenders report as CSV.
pub fn process_ledger<P: AsRef<Path>>(
    csv_path: P,
    options: &ReportOptions,
) -> Result<String, AnalysisError> {
    let service = AnalysisService::new(CsvLedgerRepository::new(csv_path));
    let report = service.top_spenders(options)?;

    let result = report.to_csv_string()?;
    Ok(result)
}
