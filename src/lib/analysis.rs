use std::cmp::Ordering;

use im::{HashMap, Vector};
use log::debug;

use crate::{
    config::ReportOptions,
    error::AnalysisError,
    report::MonthlyTopSpendersReport,
    repository::LedgerRepository,
    types::{GoldPayment, GramWeight, MonthKey, MonthlySpend, Spender},
    utils::{InsertIfAbsent, OrDefault, PushImmut},
};

/// Every payment made by each spender.
pub type SpendsBySpender = HashMap<Spender, Vector<GoldPayment>>;

/// Per month, the total each spender bought in that month. A spender with no payments
/// in a month has no entry for it.
#[derive(Default, Clone, Debug)]
pub struct SpenderTotalsByMonth(HashMap<MonthKey, HashMap<Spender, MonthlySpend>>);

impl SpenderTotalsByMonth {
    /// Records a spender's total for a month. Totals are combined before they get here,
    /// so a second total for the same spender and month is ignored rather than added.
    pub fn insert(&self, month: MonthKey, spend: MonthlySpend) -> Self {
        let spenders = self.0.get_or_default(&month);
        let spender = spend.spender.clone();
        let updated = spenders.insert_if_absent(spender.clone(), spend);
        if updated.len() == spenders.len() {
            debug!("ignoring repeated total for {} in {}", spender, month);
            return self.clone();
        }
        Self(self.0.update(month, updated))
    }

    pub fn get(&self, month: &MonthKey, spender: &Spender) -> Option<&MonthlySpend> {
        self.0.get(month).and_then(|spenders| spenders.get(spender))
    }

    pub fn months(&self) -> Vec<MonthKey> {
        self.0.keys().copied().collect()
    }

    pub fn spenders_in(&self, month: &MonthKey) -> Vector<MonthlySpend> {
        match self.0.get(month) {
            Some(spenders) => spenders.values().cloned().collect(),
            None => Vector::new(),
        }
    }

    /// Number of months holding at least one spender's total.
    pub fn month_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn group_by_spender<I>(payments: I) -> SpendsBySpender
where
    I: IntoIterator<Item = GoldPayment>,
{
    payments
        .into_iter()
        .fold(SpendsBySpender::default(), |acc, payment| {
            let spender = payment.spender.clone();
            let spends = acc.get_or_default(&spender).push(payment);
            acc.update(spender, spends)
        })
}

fn monthly_weights(spends: &Vector<GoldPayment>) -> HashMap<MonthKey, GramWeight> {
    spends.iter().fold(HashMap::default(), |acc, spend| {
        let month = MonthKey::from_datetime(&spend.date);
        let total = acc.get_or_default(&month) + spend.gram_weight;
        acc.update(month, total)
    })
}

/// Sums each spender's payments per month.
pub fn spender_totals_by_month(spends_by_spender: &SpendsBySpender) -> SpenderTotalsByMonth {
    spends_by_spender
        .iter()
        .fold(SpenderTotalsByMonth::default(), |totals, (spender, spends)| {
            monthly_weights(spends)
                .into_iter()
                .fold(totals, |totals, (month, total)| {
                    totals.insert(month, MonthlySpend::new(spender.clone(), total))
                })
        })
}

// Heaviest first; equal totals fall back to the spender's email so the order never
// depends on map iteration
fn by_total_descending(a: &MonthlySpend, b: &MonthlySpend) -> Ordering {
    b.total_weight
        .value()
        .total_cmp(&a.total_weight.value())
        .then_with(|| a.spender.email.cmp(&b.spender.email))
        .then_with(|| a.spender.cmp(&b.spender))
}

/// The `count` heaviest spenders, heaviest first. Fewer spenders than `count` returns
/// them all.
pub fn top_spenders<I>(spenders: I, count: usize) -> Vector<MonthlySpend>
where
    I: IntoIterator<Item = MonthlySpend>,
{
    let mut ranked: Vec<MonthlySpend> = spenders.into_iter().collect();
    ranked.sort_by(by_total_descending);
    ranked.truncate(count);
    ranked.into_iter().collect()
}

/// Ranks every month of `totals` into a report.
pub fn monthly_top_spenders(
    totals: &SpenderTotalsByMonth,
    options: &ReportOptions,
) -> Result<MonthlyTopSpendersReport, AnalysisError> {
    let mut months = totals.months();
    months.sort();

    months.into_iter().try_fold(
        MonthlyTopSpendersReport::new(options.months),
        |report, month| -> Result<_, AnalysisError> {
            let ranked = top_spenders(totals.spenders_in(&month), options.top_spenders);
            Ok(report.add_month(month, ranked)?)
        },
    )
}

/// Runs the business analyses over a ledger.
pub struct AnalysisService<R: LedgerRepository> {
    repository: R,
}

impl<R: LedgerRepository> AnalysisService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The top spenders of each month, for the most recent months.
    pub fn top_spenders(
        &self,
        options: &ReportOptions,
    ) -> Result<MonthlyTopSpendersReport, AnalysisError> {
        let payments = self.repository.fetch_all()?;
        let payment_count = payments.len();

        let totals = spender_totals_by_month(&group_by_spender(payments));
        debug!(
            "aggregated {} payments into {} months",
            payment_count,
            totals.month_count()
        );

        monthly_top_spenders(&totals, options)
    }
}
