//! Maps engine results onto chart series and currency-labelled strings.

mod currency;

pub use currency::{CurrencyTag, format_money, format_native, format_percent, group_thousands};

use serde::Serialize;

use crate::core::{CalculationResult, RoiResult};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    Money,
    Percent,
    NativeToken,
    Count,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: ValueKind,
    pub value: f64,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: &'static str,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub currency: CurrencyTag,
    pub summary: Vec<SummaryEntry>,
    pub series: Vec<ChartSeries>,
    pub estimate_note: Option<String>,
}

struct Builder {
    currency: CurrencyTag,
    summary: Vec<SummaryEntry>,
    series: Vec<ChartSeries>,
}

impl Builder {
    fn new(currency: CurrencyTag) -> Self {
        Self {
            currency,
            summary: Vec::new(),
            series: Vec::new(),
        }
    }

    fn money(&mut self, key: &'static str, label: &'static str, value: f64) -> &mut Self {
        let display = format_money(value, self.currency);
        self.push(key, label, ValueKind::Money, value, display)
    }

    fn percent(&mut self, key: &'static str, label: &'static str, value: f64) -> &mut Self {
        self.push(key, label, ValueKind::Percent, value, format_percent(value))
    }

    fn count(&mut self, key: &'static str, label: &'static str, value: u32) -> &mut Self {
        self.push(key, label, ValueKind::Count, value as f64, value.to_string())
    }

    fn push(
        &mut self,
        key: &'static str,
        label: &'static str,
        kind: ValueKind,
        value: f64,
        display: String,
    ) -> &mut Self {
        self.summary.push(SummaryEntry {
            key,
            label,
            kind,
            value,
            display,
        });
        self
    }

    fn categories(&mut self, name: &'static str, points: &[(&str, f64)]) -> &mut Self {
        self.series.push(ChartSeries {
            name,
            points: points
                .iter()
                .map(|(label, value)| ChartPoint {
                    label: (*label).to_string(),
                    value: *value,
                })
                .collect(),
        });
        self
    }

    fn yearly<T>(
        &mut self,
        name: &'static str,
        rows: &[T],
        pick: impl Fn(&T) -> (u32, f64),
    ) -> &mut Self {
        self.series.push(ChartSeries {
            name,
            points: rows
                .iter()
                .map(|row| {
                    let (year, value) = pick(row);
                    ChartPoint {
                        label: format!("Year {year}"),
                        value,
                    }
                })
                .collect(),
        });
        self
    }
}

/// Builds the display view of a result. The currency only labels amounts.
pub fn present(result: &CalculationResult, currency: CurrencyTag) -> Presentation {
    let mut b = Builder::new(currency);
    let mut estimate_note = None;

    match result {
        CalculationResult::CompoundInterest(r) => {
            b.money("principal", "Principal", r.principal)
                .money("futureValue", "Future value", r.future_value)
                .money("totalInterest", "Total interest", r.total_interest)
                .yearly("Value", &r.annual_breakdown, |row| (row.year, row.value))
                .yearly("Interest earned", &r.annual_breakdown, |row| {
                    (row.year, row.interest_earned)
                });
        }
        CalculationResult::CryptoRoi(r) | CalculationResult::IcoIdoRoi(r) => {
            present_roi(&mut b, r);
        }
        CalculationResult::RetirementCorpus(r) => {
            b.count("yearsToRetirement", "Years to retirement", r.years_to_retirement)
                .count("yearsInRetirement", "Years in retirement", r.years_in_retirement)
                .money("annualExpense", "Annual expense", r.annual_expense)
                .percent("realReturnRate", "Real return rate", r.real_return_rate)
                .money("requiredCorpus", "Required corpus", r.required_corpus)
                .money(
                    "totalNominalExpenses",
                    "Total nominal expenses",
                    r.total_nominal_expenses,
                )
                .categories(
                    "Corpus vs expenses",
                    &[
                        ("Required corpus", r.required_corpus),
                        ("Total nominal expenses", r.total_nominal_expenses),
                    ],
                );
        }
        CalculationResult::SipVsLumpsum(r) => {
            b.money("totalInvestment", "Total investment", r.total_investment)
                .money("monthlyInstallment", "Monthly installment", r.monthly_installment)
                .count("installments", "Installments", r.installments)
                .money("sipFutureValue", "SIP future value", r.sip_future_value)
                .money("lumpsumFutureValue", "Lumpsum future value", r.lumpsum_future_value)
                .money("difference", "Lumpsum minus SIP", r.difference)
                .categories(
                    "Future value",
                    &[
                        ("SIP", r.sip_future_value),
                        ("Lumpsum", r.lumpsum_future_value),
                    ],
                );
        }
        CalculationResult::MarketTiming(r) => {
            b.money("principal", "Principal", r.principal)
                .money("finalInvestedValue", "Stayed invested", r.final_invested_value)
                .money("finalMissedValue", "Missed best days", r.final_missed_value)
                .money(
                    "totalOpportunityCost",
                    "Opportunity cost",
                    r.total_opportunity_cost,
                )
                .yearly("Stayed invested", &r.annual_breakdown, |row| {
                    (row.year, row.invested_value)
                })
                .yearly("Missed best days", &r.annual_breakdown, |row| {
                    (row.year, row.missed_value)
                })
                .yearly("Opportunity cost", &r.annual_breakdown, |row| {
                    (row.year, row.opportunity_cost)
                });
        }
        CalculationResult::BlockchainFee(r) => {
            b.push(
                "feeInNativeToken",
                "Fee",
                ValueKind::NativeToken,
                r.fee_in_native_token,
                format_native(r.fee_in_native_token, r.native_symbol),
            );
            if let Some(usd) = r.fee_in_usd {
                b.push(
                    "feeInUsd",
                    "Fee (USD)",
                    ValueKind::Money,
                    usd,
                    format_money(usd, CurrencyTag::USD),
                );
            }
            if let Some(fee) = r.fee_in_display_currency {
                let tag = CurrencyTag::lookup(r.display_currency).unwrap_or(currency);
                b.push(
                    "feeInDisplayCurrency",
                    "Fee (display currency)",
                    ValueKind::Money,
                    fee,
                    format_money(fee, tag),
                );
            }
            estimate_note = Some(format!(
                "Fee conversion uses {} and is an estimate.",
                r.rate_source
            ));
        }
        CalculationResult::DividendYield(r) => {
            b.money(
                "annualDividendPerShare",
                "Annual dividend per share",
                r.annual_dividend_per_share,
            )
            .money("currentMarketPrice", "Market price", r.current_market_price)
            .percent("dividendYield", "Dividend yield", r.dividend_yield);
        }
        CalculationResult::CryptoTax(r) => {
            b.money("totalGains", "Total gains", r.total_gains)
                .percent("taxRate", "Tax rate", r.tax_rate)
                .money("estimatedTax", "Estimated tax", r.estimated_tax)
                .money("netGainsAfterTax", "Net gains after tax", r.net_gains_after_tax)
                .categories(
                    "Gains split",
                    &[("Tax", r.estimated_tax), ("Net gains", r.net_gains_after_tax)],
                );
        }
    }

    if estimate_note.is_none() && currency != CurrencyTag::USD {
        estimate_note = Some(format!(
            "Amounts are labelled in {} without exchange-rate conversion.",
            currency.code
        ));
    }

    Presentation {
        currency,
        summary: b.summary,
        series: b.series,
        estimate_note,
    }
}

fn present_roi(b: &mut Builder, r: &RoiResult) {
    b.money("initialInvestment", "Initial investment", r.initial_investment)
        .money("currentValue", "Current value", r.current_value)
        .money("profitLoss", "Profit / loss", r.profit_loss)
        .percent("roiPercentage", "ROI", r.roi_percentage)
        .categories(
            "Investment vs value",
            &[
                ("Initial investment", r.initial_investment),
                ("Current value", r.current_value),
            ],
        );
}
