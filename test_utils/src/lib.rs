use serde::Serialize;

#[derive(Serialize)]
struct LedgerRow {
    first_name: &'static str,
    last_name: &'static str,
    email: &'static str,
    description: &'static str,
    merchant_code: &'static str,
    amount: &'static str,
    from_currency: &'static str,
    to_currency: &'static str,
    rate: &'static str,
    date: &'static str,
}

impl LedgerRow {
    fn new(r: [&'static str; 10]) -> Self {
        Self {
            first_name: r[0],
            last_name: r[1],
            email: r[2],
            description: r[3],
            merchant_code: r[4],
            amount: r[5],
            from_currency: r[6],
            to_currency: r[7],
            rate: r[8],
            date: r[9],
        }
    }
}

const LEDGER_HEADERS: [&str; 10] = [
    "first_name",
    "last_name",
    "email",
    "description",
    "merchant_code",
    "amount",
    "from_currency",
    "to_currency",
    "rate",
    "date",
];

/// Builds a ledger with a header row. Each row is, in order: first_name, last_name,
/// email, description, merchant_code, amount, from_currency, to_currency, rate, date.
// Only used during testing so no need to return result
pub fn create_ledger_csv(rows: Vec<[&'static str; 10]>) -> String {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);
    // written by hand so an empty ledger still has its header
    wtr.write_record(LEDGER_HEADERS).unwrap();
    for r in rows {
        wtr.serialize(LedgerRow::new(r)).unwrap();
    }
    wtr.flush().unwrap();
    String::from_utf8(wtr.into_inner().unwrap()).unwrap()
}

/// Builds the expected report: month, first name, last name, total, each line closed by
/// a trailing delimiter.
pub fn create_report_csv(rows: Vec<[&'static str; 4]>) -> String {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);
    for r in rows {
        wtr.write_record([r[0], r[1], r[2], r[3], ""]).unwrap();
    }
    wtr.flush().unwrap();
    String::from_utf8(wtr.into_inner().unwrap()).unwrap()
}
