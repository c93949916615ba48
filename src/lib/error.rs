use std::{io, string::FromUtf8Error};

use thiserror::Error;

use crate::types::MonthKey;

/// Failures reading payments out of a ledger.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("failed to find the following fields in the CSV: {0:?}")]
    MissingHeaders(Vec<String>),
    #[error("failed to parse row on line {line}, expected {expected} fields but found {found}")]
    RowShape {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("failed to parse amount: {0}")]
    InvalidAmount(String),
    #[error("failed to parse rate: {0}")]
    InvalidRate(String),
    #[error("failed to parse date: {0}")]
    InvalidDate(String),
    #[error("gram weight out of range for amount {amount} at rate {rate}")]
    WeightOutOfRange { amount: String, rate: String },
    #[error("could not read ledger")]
    Io(#[from] io::Error),
    #[error("could not read ledger csv")]
    Csv(#[from] csv::Error),
}

/// Failures assembling or rendering a report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("month already in report: {0}")]
    DuplicateMonth(MonthKey),
    #[error("could not write report csv")]
    Csv(#[from] csv::Error),
    #[error("could not write report")]
    Io(#[from] io::Error),
    #[error("report is not valid utf-8")]
    Utf8(#[from] FromUtf8Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid month, expected `Mon YYYY`: {0:?}")]
pub struct ParseMonthKeyError(pub String);

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("failed to get payments from repository")]
    Ledger(#[from] LedgerError),
    #[error("failed to assemble top spenders report")]
    Report(#[from] ReportError),
}
