use std::{fmt, ops::Add, str::FromStr};

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::ParseMonthKeyError;

/// Description marking a ledger row as a card spend.
pub const GOLD_SPEND: &str = "CARD SPEND";

/// Currency code for grams of gold.
pub const GOLD_CURRENCY_CODE: &str = "GGM";

// Canonical rendering of a MonthKey, e.g. "Mar 2020"
const MONTH_KEY_FORMAT: &str = "%b %Y";

/// The person a gold payment relates to. The email is the natural key, but every field
/// takes part in equality and hashing.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Spender {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Spender {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
        }
    }
}

impl fmt::Display for Spender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

/// Grams of gold. Carried unrounded; only the `Display` impl rounds, to two decimal
/// places.
#[derive(Default, Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct GramWeight(f64);

impl GramWeight {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Add for GramWeight {
    type Output = GramWeight;

    fn add(self, rhs: Self) -> Self::Output {
        GramWeight(self.value() + rhs.value())
    }
}

impl fmt::Display for GramWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // exact halves round to the even digit
        write!(f, "{:.2}", self.0)
    }
}

/// A qualifying gold purchase parsed from the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct GoldPayment {
    pub spender: Spender,
    pub description: String,
    pub amount: f64,
    pub rate: f64,
    pub to_currency: String,
    pub from_currency: String,
    pub date: NaiveDateTime,
    pub gram_weight: GramWeight,
}

impl GoldPayment {
    /// Builds a payment, deriving the gram weight as `amount / rate`.
    pub fn new(
        spender: Spender,
        description: &str,
        amount: f64,
        rate: f64,
        to_currency: &str,
        from_currency: &str,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            spender,
            description: description.to_string(),
            amount,
            rate,
            to_currency: to_currency.to_string(),
            from_currency: from_currency.to_string(),
            date,
            gram_weight: GramWeight::new(amount / rate),
        }
    }

    pub fn is_gold_spend(&self) -> bool {
        self.description == GOLD_SPEND && self.to_currency == GOLD_CURRENCY_CODE
    }
}

/// Calendar month used to group and order spends. Rendered as `Mon YYYY`.
///
/// Ordering is chronological: by year, then by month.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn from_datetime(date: &NaiveDateTime) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first_day) => write!(f, "{}", first_day.format(MONTH_KEY_FORMAT)),
            None => Err(fmt::Error),
        }
    }
}

impl FromStr for MonthKey {
    type Err = ParseMonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono will not parse a date without a day, so pin it to the first
        NaiveDate::parse_from_str(&format!("01 {}", s.trim()), "%d %b %Y")
            .map(|d| Self {
                year: d.year(),
                month: d.month(),
            })
            .map_err(|_| ParseMonthKeyError(s.to_string()))
    }
}

/// A spender's total gram weight for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySpend {
    pub spender: Spender,
    pub total_weight: GramWeight,
}

impl MonthlySpend {
    pub fn new(spender: Spender, total_weight: GramWeight) -> Self {
        Self {
            spender,
            total_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDateTime;

    use super::{GoldPayment, GramWeight, MonthKey, Spender};

    fn datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%d/%m/%Y %H:%M").unwrap()
    }

    #[test]
    fn month_key_ignores_day_and_time() {
        let early = MonthKey::from_datetime(&datetime("01/03/2020 00:00"));
        let late = MonthKey::from_datetime(&datetime("31/03/2020 23:59"));
        assert_eq!(early, late);
        assert_eq!(early.to_string(), "Mar 2020");
    }

    #[test]
    fn month_key_differs_across_years() {
        let this_year = MonthKey::from_datetime(&datetime("22/03/2020 13:28"));
        let next_year = MonthKey::from_datetime(&datetime("22/03/2021 13:28"));
        assert_ne!(this_year, next_year);
        assert!(next_year > this_year);
    }

    #[test]
    fn month_key_parses_its_own_rendering() {
        let key = MonthKey::from_datetime(&datetime("05/12/2019 09:00"));
        assert_eq!(key.to_string(), "Dec 2019");
        assert_eq!("Dec 2019".parse::<MonthKey>().unwrap(), key);
    }

    #[test]
    fn unparsable_month_key_is_an_error() {
        assert!("Smarch 2020".parse::<MonthKey>().is_err());
        assert!("2020".parse::<MonthKey>().is_err());
        assert!("".parse::<MonthKey>().is_err());
    }

    #[test]
    fn month_key_orders_chronologically() {
        let mut keys = vec![
            MonthKey::new(2020, 2).unwrap(),
            MonthKey::new(2019, 12).unwrap(),
            MonthKey::new(2020, 1).unwrap(),
        ];
        keys.sort();
        let rendered: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(rendered, vec!["Dec 2019", "Jan 2020", "Feb 2020"]);
    }

    #[test]
    fn month_key_rejects_invalid_month() {
        assert!(MonthKey::new(2020, 13).is_none());
        assert!(MonthKey::new(2020, 0).is_none());
    }

    #[test]
    fn gram_weight_renders_two_decimals() {
        assert_eq!(GramWeight::new(60.0).to_string(), "60.00");
        assert_eq!(GramWeight::new(0.1 + 0.2).to_string(), "0.30");
        assert_eq!(GramWeight::new(55.83457).to_string(), "55.83");
        assert_eq!(GramWeight::new(0.125).to_string(), "0.12");
        assert_eq!(GramWeight::new(0.375).to_string(), "0.38");
        assert_eq!(GramWeight::new(2.5).to_string(), "2.50");
    }

    #[test]
    fn gram_weight_is_amount_over_rate() {
        let payment = GoldPayment::new(
            Spender::new("Alayna", "Sparks", "alayna.sparks@mailinator.com"),
            "CARD SPEND",
            2629.16,
            47.0892,
            "GGM",
            "GBP",
            datetime("22/03/2020 13:28"),
        );
        assert_eq!(payment.gram_weight.value(), 2629.16 / 47.0892);
        assert!(payment.is_gold_spend());
    }

    #[test]
    fn only_card_spends_into_gold_qualify() {
        let spender = Spender::new("Alayna", "Sparks", "alayna.sparks@mailinator.com");
        let date = datetime("22/03/2020 13:28");
        let wrong_description =
            GoldPayment::new(spender.clone(), "CARD SSPEND", 1.0, 1.0, "GGM", "GBP", date);
        let wrong_currency =
            GoldPayment::new(spender, "CARD SPEND", 1.0, 1.0, "GBP", "GGM", date);
        assert!(!wrong_description.is_gold_spend());
        assert!(!wrong_currency.is_gold_spend());
    }

    #[test]
    fn spender_displays_as_email() {
        let spender = Spender::new("Alayna", "Sparks", "alayna.sparks@mailinator.com");
        assert_eq!(spender.to_string(), "alayna.sparks@mailinator.com");
    }
}
