pub const DEFAULT_TOP_SPENDERS: usize = 3;
pub const DEFAULT_MONTHS: usize = 6;

/// How much of the top spenders analysis ends up in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Spenders listed per month.
    pub top_spenders: usize,
    /// Most recent months rendered.
    pub months: usize,
}

impl ReportOptions {
    pub fn new(top_spenders: usize, months: usize) -> Self {
        Self {
            top_spenders,
            months,
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_SPENDERS, DEFAULT_MONTHS)
    }
}
