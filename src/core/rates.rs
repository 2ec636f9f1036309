//! Conversion-rate lookup.
//!
//! Keys are `"BASE/QUOTE"` pairs such as `"ETH/USD"` or `"USD/EUR"`. Formula
//! code only sees the [`RateLookup`] trait, so a live feed can replace the
//! static table without touching any formula.

pub trait RateLookup {
    /// Units of QUOTE per one unit of BASE, if known.
    fn lookup_rate(&self, key: &str) -> Option<f64>;
}

/// Compiled-in placeholder rates. These are not market prices; every
/// result computed from them is labelled as an estimate.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticRates;

impl StaticRates {
    pub const SOURCE: &'static str = "static placeholder rates, not live market data";

    const TABLE: &'static [(&'static str, f64)] = &[
        ("ETH/USD", 3_000.0),
        ("BTC/USD", 60_000.0),
        ("SOL/USD", 150.0),
        ("MATIC/USD", 0.70),
        ("BNB/USD", 550.0),
        ("USD/USD", 1.0),
        ("USD/EUR", 0.92),
        ("USD/GBP", 0.79),
        ("USD/INR", 83.0),
        ("USD/JPY", 150.0),
        ("USD/AUD", 1.52),
        ("USD/CAD", 1.36),
    ];
}

impl RateLookup for StaticRates {
    fn lookup_rate(&self, key: &str) -> Option<f64> {
        Self::TABLE
            .iter()
            .find(|(pair, _)| pair.eq_ignore_ascii_case(key))
            .map(|(_, rate)| *rate)
    }
}

pub fn pair_key(base: &str, quote: &str) -> String {
    format!("{base}/{quote}")
}
