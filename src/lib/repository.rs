use crate::{error::LedgerError, types::GoldPayment};

/// Access to the gold payments recorded in a ledger.
pub trait LedgerRepository {
    /// Fetches every qualifying payment. Either the complete set is returned or nothing
    /// is.
    fn fetch_all(&self) -> Result<Vec<GoldPayment>, LedgerError>;
}

/// A ledger held in memory, for callers that already have their payments to hand.
#[derive(Default, Clone)]
pub struct InMemoryLedgerRepository {
    payments: Vec<GoldPayment>,
}

impl InMemoryLedgerRepository {
    pub fn new(payments: Vec<GoldPayment>) -> Self {
        Self { payments }
    }
}

impl LedgerRepository for InMemoryLedgerRepository {
    fn fetch_all(&self) -> Result<Vec<GoldPayment>, LedgerError> {
        Ok(self.payments.clone())
    }
}
