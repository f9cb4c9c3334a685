/// The storage currency. Every monetary field on a [`super::holding::Holding`]
/// is denominated in it; other currencies exist only at display time.
pub const BASE_CURRENCY: &str = "USD";

/// Display currencies offered by the currency selector.
pub const SUPPORTED_CURRENCIES: [&str; 8] =
    ["USD", "EUR", "GBP", "JPY", "AUD", "CAD", "CHF", "CNY"];

/// The conventional symbol for a currency code, falling back to the
/// code itself for anything unmapped.
#[must_use]
pub fn currency_symbol(code: &str) -> &str {
    match code.to_ascii_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "AUD" => "A$",
        "CAD" => "C$",
        "CHF" => "Fr",
        "CNY" => "CN¥",
        _ => code,
    }
}

/// Format an amount for display: currency symbol followed by the value
/// with two decimals (e.g., `format_amount(2250.0, "USD")` → "$2250.00").
#[must_use]
pub fn format_amount(amount: f64, code: &str) -> String {
    format!("{}{amount:.2}", currency_symbol(code))
}
