use std::{error::Error, fs::File, path::PathBuf, process};

use clap::Parser;
use gold_sales_lib::{
    AnalysisService, CsvLedgerRepository, ReportOptions, DEFAULT_MONTHS, DEFAULT_TOP_SPENDERS,
};
use log::{error, info};

/// Ranks the heaviest gold buyers of each month in a transaction ledger.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of top spenders per month
    #[arg(long, alias = "numTopSpenders", env = "NUM_TOP_SPENDERS", default_value_t = DEFAULT_TOP_SPENDERS)]
    num_top_spenders: usize,

    /// Number of months
    #[arg(long, alias = "numMonths", env = "NUM_MONTHS", default_value_t = DEFAULT_MONTHS)]
    num_months: usize,

    /// CSV file to read from
    #[arg(long, alias = "inputFilename", env = "INPUT_FILENAME", default_value = "sample-transactions.csv")]
    input_filename: PathBuf,

    /// Output filename
    #[arg(long, alias = "outputFilename", env = "OUTPUT_FILENAME", default_value = "output.csv")]
    output_filename: PathBuf,
}

/// Joins an error's message with the messages of every error that caused it.
fn error_chain(e: &dyn Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let options = ReportOptions::new(cli.num_top_spenders, cli.num_months);
    let service = AnalysisService::new(CsvLedgerRepository::new(&cli.input_filename));

    // report is built in full before the output file is touched
    let report = service.top_spenders(&options)?;

    let output = File::create(&cli.output_filename)?;
    report.write_csv(output)?;

    info!(
        "wrote top {} spenders for {} months to {}",
        options.top_spenders,
        options.months,
        cli.output_filename.display()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            error!(
                "failed to produce top spenders report: {}",
                error_chain(e.as_ref())
            );
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use gold_sales_lib::{AnalysisError, LedgerError};

    use super::error_chain;

    #[test]
    fn error_chain_includes_every_cause() {
        let e = AnalysisError::from(LedgerError::MissingHeaders(vec!["email".to_string()]));
        assert_eq!(
            error_chain(&e),
            "failed to get payments from repository: \
             failed to find the following fields in the CSV: [\"email\"]"
        );
    }

    #[test]
    fn error_without_cause_is_its_own_message() {
        let e = LedgerError::InvalidDate("yesterday".to_string());
        assert_eq!(error_chain(&e), "failed to parse date: yesterday");
    }
}
