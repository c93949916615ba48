use std::{
    collections::HashMap,
    fs::File,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use ::serde::{Serialize, Serializer};
use chrono::NaiveDateTime;
use csv::StringRecord;
use log::debug;

use crate::{
    error::{LedgerError, ReportError},
    repository::LedgerRepository,
    types::{GoldPayment, GramWeight, MonthKey, MonthlySpend, Spender},
};

const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Columns the ledger must carry, in the order they are reported when missing.
const REQUIRED_HEADERS: [&str; 9] = [
    "first_name",
    "last_name",
    "email",
    "amount",
    "rate",
    "date",
    "description",
    "to_currency",
    "from_currency",
];

/// Strips anything that is not an ASCII letter, digit or underscore, so stray BOMs and
/// spaces in a header still match.
fn normalise_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Position of each named column in the ledger.
struct ColumnIndex {
    columns: HashMap<String, usize>,
    field_count: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self, LedgerError> {
        let columns: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| (normalise_header(header), idx))
            .collect();

        let missing: Vec<String> = REQUIRED_HEADERS
            .iter()
            .filter(|required| !columns.contains_key(**required))
            .map(|required| required.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LedgerError::MissingHeaders(missing));
        }

        Ok(Self {
            columns,
            field_count: headers.len(),
        })
    }

    fn field<'r>(&self, row: &'r StringRecord, name: &str) -> &'r str {
        // Required columns are checked on construction and row length on parse, so a
        // lookup can only miss for an unknown name
        self.columns
            .get(name)
            .and_then(|idx| row.get(*idx))
            .unwrap_or_default()
    }

    /// Parses a row, returning `None` for rows that are not gold card spends.
    fn parse_row(&self, row: &StringRecord) -> Result<Option<GoldPayment>, LedgerError> {
        if row.len() != self.field_count {
            return Err(LedgerError::RowShape {
                line: row.position().map(|p| p.line()).unwrap_or_default(),
                expected: self.field_count,
                found: row.len(),
            });
        }

        let raw_amount = self.field(row, "amount");
        let amount = raw_amount
            .parse::<f64>()
            .ok()
            .filter(|a| a.is_finite())
            .ok_or_else(|| LedgerError::InvalidAmount(raw_amount.to_string()))?;

        let raw_rate = self.field(row, "rate");
        let rate = raw_rate
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite() && *r != 0.0)
            .ok_or_else(|| LedgerError::InvalidRate(raw_rate.to_string()))?;

        let raw_date = self.field(row, "date");
        let date = NaiveDateTime::parse_from_str(raw_date, DATE_FORMAT)
            .map_err(|_| LedgerError::InvalidDate(raw_date.to_string()))?;

        let payment = GoldPayment::new(
            Spender::new(
                self.field(row, "first_name"),
                self.field(row, "last_name"),
                self.field(row, "email"),
            ),
            self.field(row, "description"),
            amount,
            rate,
            self.field(row, "to_currency"),
            self.field(row, "from_currency"),
            date,
        );
        if !payment.gram_weight.value().is_finite() {
            return Err(LedgerError::WeightOutOfRange {
                amount: raw_amount.to_string(),
                rate: raw_rate.to_string(),
            });
        }

        Ok(Some(payment).filter(GoldPayment::is_gold_spend))
    }
}

/// Reads every gold card spend out of a CSV ledger.
///
/// Header names are matched case-insensitively in any order; extra columns are
/// ignored. Any malformed row fails the whole read, there is no point in a partial
/// ledger.
pub fn parse_ledger<R: Read>(source: R) -> Result<Vec<GoldPayment>, LedgerError> {
    let mut reader = csv::ReaderBuilder::new()
        // only headers: fields are compared exactly as written
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(source);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut payments: Vec<GoldPayment> = Vec::new();
    let mut row_count = 0;
    for row in reader.records() {
        row_count += 1;
        if let Some(payment) = columns.parse_row(&row?)? {
            payments.push(payment);
        }
    }

    debug!(
        "parsed {} gold payments from {} ledger rows",
        payments.len(),
        row_count
    );
    Ok(payments)
}

/// A CSV file on disk used as a ledger. The file is opened afresh on every fetch.
pub struct CsvLedgerRepository {
    path: PathBuf,
}

impl CsvLedgerRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LedgerRepository for CsvLedgerRepository {
    fn fetch_all(&self) -> Result<Vec<GoldPayment>, LedgerError> {
        debug!("reading ledger from {}", self.path.display());
        let file = File::open(&self.path)?;
        parse_ledger(file)
    }
}

fn fixed_width<S: Serializer>(x: &GramWeight, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&x.to_string())
}

/// One line of the top spenders report.
#[derive(Debug, Serialize, PartialEq)]
pub struct TopSpenderRowEntity {
    month: String,
    first_name: String,
    last_name: String,
    #[serde(serialize_with = "fixed_width")]
    total: GramWeight,
    // Always empty, it gives every line its trailing delimiter
    terminator: &'static str,
}

impl TopSpenderRowEntity {
    pub fn from_monthly_spend(month: &MonthKey, spend: &MonthlySpend) -> Self {
        Self {
            month: month.to_string(),
            first_name: spend.spender.first_name.clone(),
            last_name: spend.spender.last_name.clone(),
            total: spend.total_weight,
            terminator: "",
        }
    }
}

pub fn output_csv<W, I>(sink: W, rows: I) -> Result<(), ReportError>
where
    W: Write,
    I: IntoIterator<Item = TopSpenderRowEntity>,
{
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);

    for row in rows {
        wtr.serialize(row)?
    }

    wtr.flush()?;
    Ok(())
}
