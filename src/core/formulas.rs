//! One pure function per calculator.
//!
//! Inputs are assumed to have passed validation. Degenerate-but-valid
//! inputs select an alternate branch and are flagged on the result; nothing
//! here returns an error.

use super::rates::{RateLookup, StaticRates, pair_key};
use super::rounding::{percent, round2, round8};
use super::series;
use super::types::{
    BlockchainFeeInput, BlockchainFeeResult, CompoundInterestInput, CompoundInterestResult,
    CompoundInterestYear, CryptoTaxInput, CryptoTaxResult, DegenerateBranch, DividendYieldInput,
    DividendYieldResult, MarketTimingInput, MarketTimingResult, MarketTimingYear,
    RetirementInput, RetirementResult, RoiInput, RoiResult, SipVsLumpsumInput,
    SipVsLumpsumResult, Strategy,
};

pub fn compound_interest(input: &CompoundInterestInput) -> CompoundInterestResult {
    let n = input.frequency.periods_per_year() as f64;
    let r = input.rate.fraction();
    // Compounding year by year equals P·(1+r/n)^(n·t).
    let yearly_growth = (1.0 + r / n).powf(n);

    let (annual_breakdown, future_value) =
        series::chained(input.years, input.principal, |year, prior| {
            let value = prior * yearly_growth;
            let row = CompoundInterestYear {
                year,
                value: round2(value),
                interest_earned: round2(value - prior),
            };
            (row, value)
        });

    CompoundInterestResult {
        principal: round2(input.principal),
        future_value: round2(future_value),
        total_interest: round2(future_value - input.principal),
        annual_breakdown,
    }
}

/// ROI shared by the crypto and ICO/IDO calculators.
pub fn simple_roi(input: &RoiInput) -> RoiResult {
    let profit_loss = input.current_value - input.initial_investment;
    let (roi_percentage, degenerate) = if input.initial_investment == 0.0 {
        (0.0, Some(DegenerateBranch::ZeroInitialInvestment))
    } else {
        (percent(profit_loss / input.initial_investment), None)
    };

    RoiResult {
        initial_investment: round2(input.initial_investment),
        current_value: round2(input.current_value),
        profit_loss: round2(profit_loss),
        roi_percentage,
        degenerate,
    }
}

pub fn dividend_yield(input: &DividendYieldInput) -> DividendYieldResult {
    DividendYieldResult {
        annual_dividend_per_share: round2(input.annual_dividend_per_share),
        current_market_price: round2(input.current_market_price),
        dividend_yield: percent(input.annual_dividend_per_share / input.current_market_price),
    }
}

pub fn crypto_tax(input: &CryptoTaxInput) -> CryptoTaxResult {
    let tax = input.total_gains * input.tax_rate.fraction();
    CryptoTaxResult {
        total_gains: round2(input.total_gains),
        tax_rate: round2(input.tax_rate.percent()),
        estimated_tax: round2(tax),
        net_gains_after_tax: round2(input.total_gains - tax),
    }
}

/// Invests the same total either up front (compounded annually) or as
/// `12 * years` equal monthly installments paid at the start of each month.
pub fn sip_vs_lumpsum(input: &SipVsLumpsumInput) -> SipVsLumpsumResult {
    let p = input.total_investment;
    let r = input.expected_return.fraction();
    let installments = input.years * 12;
    let n = installments as f64;
    let i = r / 12.0;
    let installment = p / n;

    let lumpsum = p * (1.0 + r).powi(input.years as i32);
    let (sip, degenerate) = if i == 0.0 {
        (p, Some(DegenerateBranch::ZeroMonthlyRate))
    } else {
        let growth = (1.0 + i).powf(n);
        (installment * ((growth - 1.0) / i) * (1.0 + i), None)
    };

    let difference = lumpsum - sip;
    let better_strategy = match round2(difference) {
        d if d > 0.0 => Strategy::Lumpsum,
        d if d < 0.0 => Strategy::Sip,
        _ => Strategy::Equal,
    };

    SipVsLumpsumResult {
        total_investment: round2(p),
        monthly_installment: round2(installment),
        installments,
        sip_future_value: round2(sip),
        lumpsum_future_value: round2(lumpsum),
        difference: round2(difference),
        better_strategy,
        degenerate,
    }
}

/// Present value of the post-retirement expense stream at the real return.
pub fn retirement_corpus(input: &RetirementInput) -> RetirementResult {
    let annual_expense = input.monthly_expenses_at_retirement * 12.0;
    let years = input.years_in_retirement as f64;
    let real_return =
        (input.post_retirement_return.percent() - input.inflation.percent()) / 100.0;

    let (corpus, degenerate) = if real_return <= 0.0 {
        (
            annual_expense * years,
            Some(DegenerateBranch::NonPositiveRealReturn),
        )
    } else {
        (
            annual_expense * (1.0 - (1.0 + real_return).powf(-years)) / real_return,
            None,
        )
    };

    RetirementResult {
        years_to_retirement: input.retirement_age.saturating_sub(input.current_age),
        years_in_retirement: input.years_in_retirement,
        annual_expense: round2(annual_expense),
        real_return_rate: percent(real_return),
        required_corpus: round2(corpus),
        total_nominal_expenses: round2(input.monthly_expenses_at_retirement * 12.0 * years),
        degenerate,
    }
}

pub fn market_timing(input: &MarketTimingInput) -> MarketTimingResult {
    let market = input.average_market_return.fraction();
    let missed = input.return_if_best_days_missed.fraction();
    let p = input.principal;

    let annual_breakdown = series::independent(input.years, |year| {
        let invested_value = p * (1.0 + market).powi(year as i32);
        let missed_value = p * (1.0 + missed).powi(year as i32);
        MarketTimingYear {
            year,
            invested_value: round2(invested_value),
            missed_value: round2(missed_value),
            opportunity_cost: round2(invested_value - missed_value),
        }
    });

    let (final_invested_value, final_missed_value, total_opportunity_cost) = annual_breakdown
        .last()
        .map(|row| (row.invested_value, row.missed_value, row.opportunity_cost))
        .unwrap_or((round2(p), round2(p), 0.0));

    MarketTimingResult {
        principal: round2(p),
        final_invested_value,
        final_missed_value,
        total_opportunity_cost,
        annual_breakdown,
    }
}

pub fn blockchain_fee(input: &BlockchainFeeInput, rates: &dyn RateLookup) -> BlockchainFeeResult {
    let network = input.network;
    let fee_native = input.gas_units * input.gas_price / network.unit_divisor();
    let fee_usd = rates
        .lookup_rate(&pair_key(network.native_symbol(), "USD"))
        .map(|rate| fee_native * rate);
    let fee_display = fee_usd.and_then(|usd| {
        rates
            .lookup_rate(&pair_key("USD", input.display_currency))
            .map(|rate| usd * rate)
    });

    BlockchainFeeResult {
        network,
        native_symbol: network.native_symbol(),
        price_unit: network.price_unit(),
        fee_in_native_token: round8(fee_native),
        fee_in_usd: fee_usd.map(round2),
        display_currency: input.display_currency,
        fee_in_display_currency: fee_display.map(round2),
        is_estimate: true,
        rate_source: StaticRates::SOURCE,
    }
}
