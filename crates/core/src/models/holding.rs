use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Date formats accepted at the ingestion boundary, tried in order.
/// The first format that parses wins.
pub const ACCEPTED_DATE_FORMATS: [&str; 3] = ["%d-%m-%Y", "%d/%m/%Y", "%Y-%m-%d"];

/// Category assigned to a holding when the user leaves the field blank.
pub const DEFAULT_CATEGORY: &str = "General";

/// A single purchase lot: one buy of one instrument.
///
/// **Important**: all monetary fields are in the base currency (USD) at
/// storage time. Conversion to the display currency happens only when a
/// snapshot is produced. Holdings are never mutated after creation; the
/// store replaces them wholesale on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol, uppercased (e.g., "AAPL", "MSFT")
    pub symbol: String,

    /// Price paid per unit, in USD. Positive values expected but not
    /// enforced at this layer.
    pub purchase_price: f64,

    /// Transaction fees for this lot, in USD
    pub fees: f64,

    /// Number of units bought
    pub units: f64,

    /// Date of purchase (no time component, daily granularity)
    pub purchase_date: NaiveDate,

    /// Free-text grouping label (defaults to "General")
    pub category: String,
}

impl Holding {
    pub fn new(
        symbol: impl Into<String>,
        purchase_price: f64,
        fees: f64,
        units: f64,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            purchase_price,
            fees,
            units,
            purchase_date,
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Create a holding with an explicit category.
    pub fn with_category(
        symbol: impl Into<String>,
        purchase_price: f64,
        fees: f64,
        units: f64,
        purchase_date: NaiveDate,
        category: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            purchase_price,
            fees,
            units,
            purchase_date,
            category: category.into(),
        }
    }

    /// Total amount paid for this lot including fees:
    /// `purchase_price * units - fees`.
    #[must_use]
    pub fn cost_basis(&self) -> f64 {
        self.purchase_price * self.units - self.fees
    }
}

/// Raw, unvalidated holding fields as they arrive from the add-holding
/// form or from an imported row. `validate()` is the only way to turn
/// this into a [`Holding`], so nothing malformed reaches the store.
#[derive(Debug, Clone, Default)]
pub struct HoldingInput {
    pub symbol: String,
    pub purchase_price: String,
    pub fees: String,
    pub units: String,
    pub purchase_date: String,
    /// Optional; blank or missing becomes "General".
    pub category: Option<String>,
}

impl HoldingInput {
    /// Validate every field and build a [`Holding`].
    ///
    /// All field errors are accumulated into a single `ValidationError`
    /// so the user can fix the whole form in one pass, rather than being
    /// told about one problem at a time.
    ///
    /// Rules:
    /// - Symbol must be non-empty and alphanumeric (uppercased on accept)
    /// - Purchase price, fees and units must parse as finite numbers
    /// - Date must match one of [`ACCEPTED_DATE_FORMATS`] and must not be
    ///   in the future (one day of tolerance for timezone differences)
    pub fn validate(&self) -> Result<Holding, CoreError> {
        let mut problems: Vec<String> = Vec::new();

        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            problems.push("Symbol is empty".to_string());
        } else if !symbol.chars().all(char::is_alphanumeric) {
            problems.push(format!(
                "Symbol '{symbol}' is not properly formatted (letters and digits only)"
            ));
        }

        let purchase_price = Self::check_number("Purchase Price", &self.purchase_price, &mut problems);
        let fees = Self::check_number("Fees", &self.fees, &mut problems);
        let units = Self::check_number("Units", &self.units, &mut problems);

        let purchase_date = Self::check_date("Date Purchased", &self.purchase_date, &mut problems);

        if !problems.is_empty() {
            return Err(CoreError::ValidationError(problems.join("; ")));
        }

        // All three numbers and the date parsed if we got here.
        let (purchase_price, fees, units, purchase_date) =
            match (purchase_price, fees, units, purchase_date) {
                (Some(p), Some(f), Some(u), Some(d)) => (p, f, u, d),
                _ => {
                    return Err(CoreError::ValidationError(
                        "Holding fields could not be parsed".to_string(),
                    ))
                }
            };

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();

        Ok(Holding {
            symbol: symbol.to_uppercase(),
            purchase_price,
            fees,
            units,
            purchase_date,
            category,
        })
    }

    fn check_number(field: &str, value: &str, problems: &mut Vec<String>) -> Option<f64> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            problems.push(format!("{field} is empty"));
            return None;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(n),
            _ => {
                problems.push(format!(
                    "{field} '{trimmed}' is not properly formatted (expected a number)"
                ));
                None
            }
        }
    }

    fn check_date(field: &str, value: &str, problems: &mut Vec<String>) -> Option<NaiveDate> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            problems.push(format!("{field} is empty"));
            return None;
        }
        let Some(date) = parse_flexible_date(trimmed) else {
            problems.push(format!(
                "{field} '{trimmed}' is not properly formatted (expected DD-MM-YYYY, DD/MM/YYYY or YYYY-MM-DD)"
            ));
            return None;
        };
        // Allow +1 day tolerance for timezone differences
        let today = Utc::now().date_naive();
        if let Some(tomorrow) = today.succ_opt() {
            if date > tomorrow {
                problems.push(format!("{field} {date} is in the future"));
                return None;
            }
        }
        Some(date)
    }
}

/// Parse a date string against [`ACCEPTED_DATE_FORMATS`] in order.
#[must_use]
pub fn parse_flexible_date(value: &str) -> Option<NaiveDate> {
    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}
