use serde::Serialize;

use crate::core::CURRENCY_CODES;

/// Display label for monetary amounts. Never used in arithmetic.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CurrencyTag {
    pub code: &'static str,
    pub symbol: &'static str,
}

impl CurrencyTag {
    pub const USD: CurrencyTag = CurrencyTag {
        code: "USD",
        symbol: "$",
    };

    pub fn lookup(code: &str) -> Option<CurrencyTag> {
        let code = CURRENCY_CODES
            .iter()
            .copied()
            .find(|c| c.eq_ignore_ascii_case(code.trim()))?;
        Some(CurrencyTag {
            code,
            symbol: symbol_for(code),
        })
    }
}

impl Default for CurrencyTag {
    fn default() -> Self {
        CurrencyTag::USD
    }
}

fn symbol_for(code: &str) -> &'static str {
    match code {
        "EUR" => "€",
        "GBP" => "£",
        "INR" => "₹",
        "JPY" => "¥",
        "AUD" => "A$",
        "CAD" => "C$",
        _ => "$",
    }
}

/// `1234567.891` -> `"1,234,567.89"`.
pub fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped}.{cents}")
}

pub fn format_money(value: f64, currency: CurrencyTag) -> String {
    let sign = if value < 0.0 && group_thousands(value) != "0.00" {
        "-"
    } else {
        ""
    };
    format!("{sign}{}{}", currency.symbol, group_thousands(value))
}

pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn format_native(value: f64, symbol: &str) -> String {
    format!("{value:.8} {symbol}")
}
