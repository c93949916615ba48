use gold_sales_lib::{
    process_ledger, AnalysisError, AnalysisService, CsvLedgerRepository, LedgerError,
    LedgerRepository, ReportOptions,
};
use test_utils::create_report_csv;

extern crate test_utils;

#[test]
fn sample_ledger_default_options() {
    let sut = process_ledger(
        "tests/resources/sample_transactions.csv",
        &ReportOptions::default(),
    )
    .unwrap();
    let expected = create_report_csv(vec![
        ["Mar 2020", "Dorian", "Gray", "4.00"],
        ["Mar 2020", "Fred", "Colon", "4.00"],
        ["Mar 2020", "Alayna", "Sparks", "0.25"],
        ["Feb 2020", "Esme", "Weatherwax", "25.00"],
        ["Feb 2020", "Alayna", "Sparks", "2.00"],
        ["Jan 2020", "Dorian", "Gray", "20.00"],
        ["Jan 2020", "Alayna", "Sparks", "15.00"],
        ["Jan 2020", "Esme", "Weatherwax", "3.00"],
    ]);
    assert_eq!(sut, expected)
}

#[test]
fn sample_ledger_top_spender_of_latest_months() {
    let sut = process_ledger(
        "tests/resources/sample_transactions.csv",
        &ReportOptions::new(1, 2),
    )
    .unwrap();
    let expected = create_report_csv(vec![
        ["Mar 2020", "Dorian", "Gray", "4.00"],
        ["Feb 2020", "Esme", "Weatherwax", "25.00"],
    ]);
    assert_eq!(sut, expected)
}

#[test]
fn non_gold_spends_are_left_out() {
    let payments = CsvLedgerRepository::new("tests/resources/sample_transactions.csv")
        .fetch_all()
        .unwrap();
    assert_eq!(payments.len(), 12);
    assert!(payments
        .iter()
        .all(|p| p.description == "CARD SPEND" && p.to_currency == "GGM"));
}

#[test]
fn top_one_spender_in_a_month() {
    let sut = process_ledger(
        "tests/resources/one_month_two_spenders.csv",
        &ReportOptions::new(1, 6),
    )
    .unwrap();
    let expected = create_report_csv(vec![["Mar 2020", "Alayna", "Sparks", "60.00"]]);
    assert_eq!(sut, expected)
}

#[test]
fn top_two_spenders_in_a_month() {
    let sut = process_ledger(
        "tests/resources/one_month_two_spenders.csv",
        &ReportOptions::new(2, 6),
    )
    .unwrap();
    let expected = create_report_csv(vec![
        ["Mar 2020", "Alayna", "Sparks", "60.00"],
        ["Mar 2020", "Dorian", "Gray", "0.30"],
    ]);
    assert_eq!(sut, expected)
}

#[test]
fn more_spenders_than_exist_are_not_padded() {
    let sut = process_ledger(
        "tests/resources/one_month_two_spenders.csv",
        &ReportOptions::new(10, 6),
    )
    .unwrap();
    assert_eq!(sut.lines().count(), 2);
}

#[test]
fn only_most_recent_months_are_reported() {
    let sut = process_ledger("tests/resources/many_months.csv", &ReportOptions::default()).unwrap();
    let expected = create_report_csv(vec![
        ["Feb 2020", "Alayna", "Sparks", "8.00"],
        ["Jan 2020", "Alayna", "Sparks", "7.00"],
        ["Dec 2019", "Alayna", "Sparks", "6.00"],
        ["Nov 2019", "Alayna", "Sparks", "5.00"],
        ["Oct 2019", "Alayna", "Sparks", "4.00"],
        ["Sep 2019", "Alayna", "Sparks", "3.00"],
    ]);
    assert_eq!(sut, expected)
}

#[test]
fn header_order_and_case_do_not_matter() {
    let sut = process_ledger(
        "tests/resources/shuffled_headers.csv",
        &ReportOptions::default(),
    )
    .unwrap();
    let expected = create_report_csv(vec![["Mar 2020", "Alayna", "Sparks", "65.83"]]);
    assert_eq!(sut, expected)
}

#[test]
fn missing_headers_fail_the_report() {
    let sut = process_ledger(
        "tests/resources/missing_headers.csv",
        &ReportOptions::default(),
    );
    match sut {
        Err(AnalysisError::Ledger(LedgerError::MissingHeaders(missing))) => {
            assert_eq!(missing, vec!["first_name", "last_name", "to_currency"])
        }
        other => panic!("expected missing headers, got {:?}", other),
    }
}

#[test]
fn bad_date_fails_the_whole_report() {
    let sut = process_ledger("tests/resources/bad_date.csv", &ReportOptions::default());
    assert!(matches!(
        sut,
        Err(AnalysisError::Ledger(LedgerError::InvalidDate(value))) if value == "2020-03-23T13:28"
    ));
}

#[test]
fn short_row_fails_the_whole_report() {
    let sut = process_ledger("tests/resources/short_row.csv", &ReportOptions::default());
    assert!(matches!(
        sut,
        Err(AnalysisError::Ledger(LedgerError::RowShape {
            expected: 10,
            found: 9,
            ..
        }))
    ));
}

#[test]
fn missing_ledger_is_an_io_error() {
    let sut = process_ledger("tests/resources/no_such_ledger.csv", &ReportOptions::default());
    assert!(matches!(sut, Err(AnalysisError::Ledger(LedgerError::Io(_)))));
}

#[test]
fn csv_ledger_can_be_fetched_twice() {
    let service = AnalysisService::new(CsvLedgerRepository::new(
        "tests/resources/one_month_two_spenders.csv",
    ));
    let first = service.top_spenders(&ReportOptions::default()).unwrap();
    let second = service.top_spenders(&ReportOptions::default()).unwrap();
    assert_eq!(
        first.to_csv_string().unwrap(),
        second.to_csv_string().unwrap()
    );
}
