use std::io::Write;

use im::{HashMap, Vector};

use crate::{
    error::ReportError,
    io::{output_csv, TopSpenderRowEntity},
    types::{MonthKey, MonthlySpend},
};

/// The top spenders of each month, most recent month first.
///
/// Every month added is kept, but only the most recent `num_months` are rendered. A
/// report is never changed in place: adding a month returns a new report.
#[derive(Debug, Clone)]
pub struct MonthlyTopSpendersReport {
    monthly_spenders: HashMap<MonthKey, Vector<MonthlySpend>>,
    num_months: usize,
}

impl MonthlyTopSpendersReport {
    pub fn new(num_months: usize) -> Self {
        Self {
            monthly_spenders: HashMap::default(),
            num_months,
        }
    }

    /// Adds a month's ranked spenders. Each month can only be added once.
    pub fn add_month(
        &self,
        month: MonthKey,
        spenders: Vector<MonthlySpend>,
    ) -> Result<Self, ReportError> {
        if self.monthly_spenders.contains_key(&month) {
            return Err(ReportError::DuplicateMonth(month));
        }
        Ok(Self {
            monthly_spenders: self.monthly_spenders.update(month, spenders),
            ..self.clone()
        })
    }

    /// Every month in the report, most recent first.
    pub fn months(&self) -> Vec<MonthKey> {
        let mut months: Vec<MonthKey> = self.monthly_spenders.keys().copied().collect();
        months.sort_by(|a, b| b.cmp(a));
        months
    }

    pub fn spenders(&self, month: &MonthKey) -> Option<&Vector<MonthlySpend>> {
        self.monthly_spenders.get(month)
    }

    /// The rendered lines: one per ranked spender, for the most recent months only.
    pub fn rows(&self) -> impl Iterator<Item = TopSpenderRowEntity> + '_ {
        self.months()
            .into_iter()
            .take(self.num_months)
            .flat_map(move |month| {
                self.monthly_spenders
                    .get(&month)
                    .into_iter()
                    .flat_map(move |spenders| {
                        spenders
                            .iter()
                            .map(move |spend| TopSpenderRowEntity::from_monthly_spend(&month, spend))
                    })
            })
    }

    pub fn write_csv<W: Write>(&self, sink: W) -> Result<(), ReportError> {
        output_csv(sink, self.rows())
    }

    pub fn to_csv_string(&self) -> Result<String, ReportError> {
        let mut buf = vec![];
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
