//! Calculator catalog: field tables, typed input construction and dispatch.

use serde::Serialize;
use tracing::debug;

use super::formulas;
use super::rates::RateLookup;
use super::types::{
    BlockchainFeeInput, BlockchainNetwork, CalculationResult, CalculatorInput,
    CompoundInterestInput, CompoundingFrequency, CryptoTaxInput, DividendYieldInput,
    MarketTimingInput, Rate, RetirementInput, RoiInput, SipVsLumpsumInput,
};
use super::validation::{
    CrossFieldRule, FieldKind, FieldSpec, RawInput, Schema, ValidatedInput,
    ValidationError, ValidationErrors, validate,
};

/// Currency codes accepted wherever a display currency is requested.
pub const CURRENCY_CODES: &[&str] = &["USD", "EUR", "GBP", "INR", "JPY", "AUD", "CAD"];

const YEARS_50: FieldKind = FieldKind::Integer { min: 1, max: 50 };

const COMPOUND_INTEREST: Schema = Schema {
    fields: &[
        FieldSpec::required("principal", FieldKind::positive()),
        FieldSpec::required("rate", FieldKind::percent_up_to(100.0)),
        FieldSpec::required("time", FieldKind::Integer { min: 1, max: 100 }),
        FieldSpec::required("frequency", FieldKind::OneOf(&CompoundingFrequency::PERIODS)),
    ],
    cross_field: &[],
};

const ROI: Schema = Schema {
    fields: &[
        FieldSpec::required("initialInvestment", FieldKind::positive()),
        FieldSpec::required("currentValue", FieldKind::non_negative()),
    ],
    cross_field: &[],
};

const RETIREMENT: Schema = Schema {
    fields: &[
        FieldSpec::required("currentAge", FieldKind::Integer { min: 18, max: 99 }),
        FieldSpec::required("retirementAge", FieldKind::Integer { min: 19, max: 100 }),
        FieldSpec::required("monthlyExpensesAtRetirement", FieldKind::positive()),
        FieldSpec::required("lifeExpectancyPostRetirement", YEARS_50),
        FieldSpec::required("inflationRate", FieldKind::percent_up_to(20.0)),
        FieldSpec::required("postRetirementReturn", FieldKind::percent_up_to(20.0)),
    ],
    cross_field: &[CrossFieldRule::GreaterThan {
        field: "retirementAge",
        other: "currentAge",
    }],
};

const SIP_VS_LUMPSUM: Schema = Schema {
    fields: &[
        FieldSpec::required("totalInvestment", FieldKind::positive()),
        FieldSpec::required("expectedReturn", FieldKind::percent_up_to(100.0)),
        FieldSpec::required("years", YEARS_50),
    ],
    cross_field: &[],
};

const MARKET_TIMING: Schema = Schema {
    fields: &[
        FieldSpec::required("principal", FieldKind::positive()),
        FieldSpec::required("averageMarketReturn", FieldKind::percent_up_to(100.0)),
        FieldSpec::required("returnIfBestDaysMissed", FieldKind::percent_up_to(100.0)),
        FieldSpec::required("years", YEARS_50),
    ],
    cross_field: &[],
};

const BLOCKCHAIN_FEE: Schema = Schema {
    fields: &[
        FieldSpec::required("network", FieldKind::Choice(&BlockchainNetwork::SLUGS)),
        FieldSpec::required("gasUnits", FieldKind::positive()),
        FieldSpec::required("gasPrice", FieldKind::at_least(1e-9)),
        FieldSpec::optional("displayCurrency", CURRENCY_CODES, "USD"),
    ],
    cross_field: &[],
};

const DIVIDEND_YIELD: Schema = Schema {
    fields: &[
        FieldSpec::required("annualDividendPerShare", FieldKind::non_negative()),
        FieldSpec::required("currentMarketPrice", FieldKind::positive()),
    ],
    cross_field: &[],
};

const CRYPTO_TAX: Schema = Schema {
    fields: &[
        FieldSpec::required("totalGains", FieldKind::non_negative()),
        FieldSpec::required("taxRate", FieldKind::percent_up_to(100.0)),
    ],
    cross_field: &[],
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    CompoundInterest,
    CryptoRoi,
    IcoIdoRoi,
    RetirementCorpus,
    SipVsLumpsum,
    MarketTiming,
    BlockchainFee,
    DividendYield,
    CryptoTax,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 9] = [
        CalculatorKind::CompoundInterest,
        CalculatorKind::CryptoRoi,
        CalculatorKind::IcoIdoRoi,
        CalculatorKind::RetirementCorpus,
        CalculatorKind::SipVsLumpsum,
        CalculatorKind::MarketTiming,
        CalculatorKind::BlockchainFee,
        CalculatorKind::DividendYield,
        CalculatorKind::CryptoTax,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            CalculatorKind::CompoundInterest => "compound-interest",
            CalculatorKind::CryptoRoi => "crypto-roi",
            CalculatorKind::IcoIdoRoi => "ico-ido-roi",
            CalculatorKind::RetirementCorpus => "retirement-corpus",
            CalculatorKind::SipVsLumpsum => "sip-vs-lumpsum",
            CalculatorKind::MarketTiming => "market-timing",
            CalculatorKind::BlockchainFee => "blockchain-fee",
            CalculatorKind::DividendYield => "dividend-yield",
            CalculatorKind::CryptoTax => "crypto-tax",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn title(self) -> &'static str {
        match self {
            CalculatorKind::CompoundInterest => "Compound Interest",
            CalculatorKind::CryptoRoi => "Crypto ROI",
            CalculatorKind::IcoIdoRoi => "ICO/IDO ROI",
            CalculatorKind::RetirementCorpus => "Retirement Corpus",
            CalculatorKind::SipVsLumpsum => "SIP vs Lumpsum",
            CalculatorKind::MarketTiming => "Market Timing Cost",
            CalculatorKind::BlockchainFee => "Blockchain Fee Estimate",
            CalculatorKind::DividendYield => "Dividend Yield",
            CalculatorKind::CryptoTax => "Crypto Tax",
        }
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            CalculatorKind::CompoundInterest => &COMPOUND_INTEREST,
            CalculatorKind::CryptoRoi | CalculatorKind::IcoIdoRoi => &ROI,
            CalculatorKind::RetirementCorpus => &RETIREMENT,
            CalculatorKind::SipVsLumpsum => &SIP_VS_LUMPSUM,
            CalculatorKind::MarketTiming => &MARKET_TIMING,
            CalculatorKind::BlockchainFee => &BLOCKCHAIN_FEE,
            CalculatorKind::DividendYield => &DIVIDEND_YIELD,
            CalculatorKind::CryptoTax => &CRYPTO_TAX,
        }
    }
}

impl CalculatorInput {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculatorInput::CompoundInterest(_) => CalculatorKind::CompoundInterest,
            CalculatorInput::CryptoRoi(_) => CalculatorKind::CryptoRoi,
            CalculatorInput::IcoIdoRoi(_) => CalculatorKind::IcoIdoRoi,
            CalculatorInput::RetirementCorpus(_) => CalculatorKind::RetirementCorpus,
            CalculatorInput::SipVsLumpsum(_) => CalculatorKind::SipVsLumpsum,
            CalculatorInput::MarketTiming(_) => CalculatorKind::MarketTiming,
            CalculatorInput::BlockchainFee(_) => CalculatorKind::BlockchainFee,
            CalculatorInput::DividendYield(_) => CalculatorKind::DividendYield,
            CalculatorInput::CryptoTax(_) => CalculatorKind::CryptoTax,
        }
    }
}

/// Validates raw field values against the calculator's table and builds
/// its typed input.
pub fn parse(kind: CalculatorKind, raw: &RawInput) -> Result<CalculatorInput, ValidationErrors> {
    let v = validate(raw, kind.schema())?;
    Ok(build_input(kind, &v)?)
}

fn build_input(kind: CalculatorKind, v: &ValidatedInput) -> Result<CalculatorInput, ValidationError> {
    let input = match kind {
        CalculatorKind::CompoundInterest => {
            let periods = v.integer("frequency")?;
            let frequency = CompoundingFrequency::from_periods(periods).ok_or_else(|| {
                ValidationError::new("frequency", "must be one of 1, 2, 4, 12")
            })?;
            CalculatorInput::CompoundInterest(CompoundInterestInput {
                principal: v.number("principal")?,
                rate: Rate::from_percent(v.number("rate")?),
                years: v.integer("time")?,
                frequency,
            })
        }
        CalculatorKind::CryptoRoi => CalculatorInput::CryptoRoi(roi_input(v)?),
        CalculatorKind::IcoIdoRoi => CalculatorInput::IcoIdoRoi(roi_input(v)?),
        CalculatorKind::RetirementCorpus => CalculatorInput::RetirementCorpus(RetirementInput {
            current_age: v.integer("currentAge")?,
            retirement_age: v.integer("retirementAge")?,
            monthly_expenses_at_retirement: v.number("monthlyExpensesAtRetirement")?,
            years_in_retirement: v.integer("lifeExpectancyPostRetirement")?,
            inflation: Rate::from_percent(v.number("inflationRate")?),
            post_retirement_return: Rate::from_percent(v.number("postRetirementReturn")?),
        }),
        CalculatorKind::SipVsLumpsum => CalculatorInput::SipVsLumpsum(SipVsLumpsumInput {
            total_investment: v.number("totalInvestment")?,
            expected_return: Rate::from_percent(v.number("expectedReturn")?),
            years: v.integer("years")?,
        }),
        CalculatorKind::MarketTiming => CalculatorInput::MarketTiming(MarketTimingInput {
            principal: v.number("principal")?,
            average_market_return: Rate::from_percent(v.number("averageMarketReturn")?),
            return_if_best_days_missed: Rate::from_percent(v.number("returnIfBestDaysMissed")?),
            years: v.integer("years")?,
        }),
        CalculatorKind::BlockchainFee => {
            let slug = v.choice("network")?;
            let network = BlockchainNetwork::from_slug(slug)
                .ok_or_else(|| ValidationError::new("network", "is not a supported network"))?;
            CalculatorInput::BlockchainFee(BlockchainFeeInput {
                network,
                gas_units: v.number("gasUnits")?,
                gas_price: v.number("gasPrice")?,
                display_currency: v.choice("displayCurrency")?,
            })
        }
        CalculatorKind::DividendYield => CalculatorInput::DividendYield(DividendYieldInput {
            annual_dividend_per_share: v.number("annualDividendPerShare")?,
            current_market_price: v.number("currentMarketPrice")?,
        }),
        CalculatorKind::CryptoTax => CalculatorInput::CryptoTax(CryptoTaxInput {
            total_gains: v.number("totalGains")?,
            tax_rate: Rate::from_percent(v.number("taxRate")?),
        }),
    };
    Ok(input)
}

fn roi_input(v: &ValidatedInput) -> Result<RoiInput, ValidationError> {
    Ok(RoiInput {
        initial_investment: v.number("initialInvestment")?,
        current_value: v.number("currentValue")?,
    })
}

pub fn compute(input: &CalculatorInput, rates: &dyn RateLookup) -> CalculationResult {
    debug!(calculator = input.kind().slug(), "computing");
    match input {
        CalculatorInput::CompoundInterest(i) => {
            CalculationResult::CompoundInterest(formulas::compound_interest(i))
        }
        CalculatorInput::CryptoRoi(i) => CalculationResult::CryptoRoi(formulas::simple_roi(i)),
        CalculatorInput::IcoIdoRoi(i) => CalculationResult::IcoIdoRoi(formulas::simple_roi(i)),
        CalculatorInput::RetirementCorpus(i) => {
            CalculationResult::RetirementCorpus(formulas::retirement_corpus(i))
        }
        CalculatorInput::SipVsLumpsum(i) => {
            CalculationResult::SipVsLumpsum(formulas::sip_vs_lumpsum(i))
        }
        CalculatorInput::MarketTiming(i) => {
            CalculationResult::MarketTiming(formulas::market_timing(i))
        }
        CalculatorInput::BlockchainFee(i) => {
            CalculationResult::BlockchainFee(formulas::blockchain_fee(i, rates))
        }
        CalculatorInput::DividendYield(i) => {
            CalculationResult::DividendYield(formulas::dividend_yield(i))
        }
        CalculatorInput::CryptoTax(i) => CalculationResult::CryptoTax(formulas::crypto_tax(i)),
    }
}

/// Validation followed by computation.
pub fn evaluate(
    kind: CalculatorKind,
    raw: &RawInput,
    rates: &dyn RateLookup,
) -> Result<CalculationResult, ValidationErrors> {
    let input = parse(kind, raw)?;
    Ok(compute(&input, rates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::StaticRates;
    use crate::core::types::DegenerateBranch;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawInput {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test input must be an object"),
        }
    }

    /// Calculator, a valid input, the field under test, a value that must be
    /// accepted and one just past the bound that must not be.
    type BoundaryCase = (
        CalculatorKind,
        serde_json::Value,
        &'static str,
        serde_json::Value,
        serde_json::Value,
    );

    fn boundary_cases() -> Vec<BoundaryCase> {
        use CalculatorKind::*;
        let compound = json!({ "principal": 1000, "rate": 5, "time": 10, "frequency": 12 });
        let roi = json!({ "initialInvestment": 1000, "currentValue": 1500 });
        let dividend = json!({ "annualDividendPerShare": 5, "currentMarketPrice": 100 });
        let tax = json!({ "totalGains": 5000, "taxRate": 20 });
        let sip = json!({ "totalInvestment": 60000, "expectedReturn": 12, "years": 5 });
        let retirement = json!({
            "currentAge": 30,
            "retirementAge": 60,
            "monthlyExpensesAtRetirement": 5000,
            "lifeExpectancyPostRetirement": 25,
            "inflationRate": 6,
            "postRetirementReturn": 7,
        });
        let mut late_retirement = retirement.clone();
        late_retirement["retirementAge"] = json!(100);
        let timing = json!({
            "principal": 10000,
            "averageMarketReturn": 10,
            "returnIfBestDaysMissed": 6,
            "years": 20,
        });
        let fee = json!({ "network": "ethereum", "gasUnits": 21000, "gasPrice": 20 });

        vec![
            (CompoundInterest, compound.clone(), "principal", json!(0.01), json!(0)),
            (CompoundInterest, compound.clone(), "rate", json!(100), json!(100.01)),
            (CompoundInterest, compound.clone(), "rate", json!(0), json!(-0.01)),
            (CompoundInterest, compound.clone(), "time", json!(100), json!(101)),
            (CompoundInterest, compound.clone(), "time", json!(1), json!(0)),
            (CompoundInterest, compound, "frequency", json!(4), json!(3)),
            (CryptoRoi, roi.clone(), "initialInvestment", json!(0.01), json!(0)),
            (IcoIdoRoi, roi, "currentValue", json!(0), json!(-0.01)),
            (DividendYield, dividend.clone(), "annualDividendPerShare", json!(0), json!(-0.01)),
            (DividendYield, dividend, "currentMarketPrice", json!(0.01), json!(0)),
            (CryptoTax, tax.clone(), "totalGains", json!(0), json!(-0.01)),
            (CryptoTax, tax, "taxRate", json!(100), json!(100.01)),
            (SipVsLumpsum, sip.clone(), "totalInvestment", json!(0.01), json!(0)),
            (SipVsLumpsum, sip.clone(), "expectedReturn", json!(100), json!(100.01)),
            (SipVsLumpsum, sip.clone(), "years", json!(50), json!(51)),
            (SipVsLumpsum, sip, "years", json!(1), json!(0)),
            (RetirementCorpus, retirement.clone(), "currentAge", json!(18), json!(17)),
            (RetirementCorpus, late_retirement.clone(), "currentAge", json!(99), json!(100)),
            (RetirementCorpus, late_retirement, "retirementAge", json!(100), json!(101)),
            (RetirementCorpus, {
                let mut young = retirement.clone();
                young["currentAge"] = json!(18);
                young
            }, "retirementAge", json!(19), json!(18)),
            (RetirementCorpus, retirement.clone(), "monthlyExpensesAtRetirement", json!(0.01), json!(0)),
            (RetirementCorpus, retirement.clone(), "lifeExpectancyPostRetirement", json!(50), json!(51)),
            (RetirementCorpus, retirement.clone(), "lifeExpectancyPostRetirement", json!(1), json!(0)),
            (RetirementCorpus, retirement.clone(), "inflationRate", json!(20), json!(20.01)),
            (RetirementCorpus, retirement, "postRetirementReturn", json!(20), json!(20.01)),
            (MarketTiming, timing.clone(), "principal", json!(0.01), json!(0)),
            (MarketTiming, timing.clone(), "averageMarketReturn", json!(100), json!(100.01)),
            (MarketTiming, timing.clone(), "returnIfBestDaysMissed", json!(100), json!(100.01)),
            (MarketTiming, timing, "years", json!(50), json!(51)),
            (BlockchainFee, fee.clone(), "network", json!("bsc"), json!("dogecoin")),
            (BlockchainFee, fee.clone(), "gasUnits", json!(0.01), json!(0)),
            (BlockchainFee, fee.clone(), "gasPrice", json!(1e-9), json!(9e-10)),
            (BlockchainFee, fee, "displayCurrency", json!("INR"), json!("XYZ")),
        ]
    }

    #[test]
    fn every_field_accepts_its_bound_and_rejects_just_past_it() {
        for (kind, base, field, accepted, rejected) in boundary_cases() {
            let mut input = raw(base);
            input.insert(field.into(), accepted.clone());
            if let Err(err) = parse(kind, &input) {
                panic!("{} {field}={accepted} should pass: {err}", kind.slug());
            }

            input.insert(field.into(), rejected.clone());
            let err = match parse(kind, &input) {
                Ok(_) => panic!("{} {field}={rejected} should fail", kind.slug()),
                Err(err) => err,
            };
            assert_eq!(err.errors().len(), 1, "{} {field}={rejected}: {err}", kind.slug());
            assert!(
                err.for_field(field).is_some(),
                "{} {field}={rejected} reported on the wrong field: {err}",
                kind.slug()
            );
        }
    }

    #[test]
    fn slugs_round_trip_for_every_calculator() {
        for kind in CalculatorKind::ALL {
            assert_eq!(CalculatorKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(CalculatorKind::from_slug("mortgage"), None);
    }

    #[test]
    fn compound_interest_from_raw_strings() {
        let input = raw(json!({
            "principal": "10000",
            "rate": "7",
            "time": "10",
            "frequency": "12",
        }));
        let result = evaluate(CalculatorKind::CompoundInterest, &input, &StaticRates)
            .expect("valid input");
        let CalculationResult::CompoundInterest(result) = result else {
            panic!("wrong result variant");
        };
        assert_eq!(result.future_value, 20_096.61);
        assert_eq!(result.total_interest, 10_096.61);
    }

    #[test]
    fn compound_interest_allows_a_hundred_years_but_not_more() {
        let mut input = raw(json!({ "principal": 1, "rate": 1, "time": 100, "frequency": 1 }));
        assert!(parse(CalculatorKind::CompoundInterest, &input).is_ok());
        input.insert("time".into(), json!(101));
        let err = parse(CalculatorKind::CompoundInterest, &input).expect_err("101 years");
        assert!(err.for_field("time").is_some());
    }

    #[test]
    fn retirement_corpus_scenario() {
        let input = raw(json!({
            "currentAge": 30,
            "retirementAge": 60,
            "monthlyExpensesAtRetirement": 5000,
            "lifeExpectancyPostRetirement": 25,
            "inflationRate": 6,
            "postRetirementReturn": 7,
        }));
        let CalculationResult::RetirementCorpus(result) =
            evaluate(CalculatorKind::RetirementCorpus, &input, &StaticRates).expect("valid")
        else {
            panic!("wrong result variant");
        };
        assert_eq!(result.real_return_rate, 1.0);
        assert_eq!(result.total_nominal_expenses, 1_500_000.0);
        assert_eq!(result.required_corpus, 1_321_389.34);
        assert_eq!(result.degenerate, None);
    }

    #[test]
    fn retirement_rejects_inflation_above_twenty_and_age_order() {
        let input = raw(json!({
            "currentAge": 60,
            "retirementAge": 55,
            "monthlyExpensesAtRetirement": 5000,
            "lifeExpectancyPostRetirement": 25,
            "inflationRate": 21,
            "postRetirementReturn": 7,
        }));
        let err = parse(CalculatorKind::RetirementCorpus, &input).expect_err("invalid");
        // Cross-field rules wait until every field is individually valid.
        assert_eq!(err.errors().len(), 1);
        assert_eq!(err.errors()[0].field, "inflationRate");

        let mut fixed = input.clone();
        fixed.insert("inflationRate".into(), json!(6));
        let err = parse(CalculatorKind::RetirementCorpus, &fixed).expect_err("age order");
        assert_eq!(err.errors()[0].field, "retirementAge");
    }

    #[test]
    fn roi_calculators_share_schema_but_keep_their_kind() {
        let input = raw(json!({ "initialInvestment": 1000, "currentValue": 1500 }));
        let crypto = evaluate(CalculatorKind::CryptoRoi, &input, &StaticRates).expect("valid");
        let ico = evaluate(CalculatorKind::IcoIdoRoi, &input, &StaticRates).expect("valid");
        assert!(matches!(crypto, CalculationResult::CryptoRoi(ref r) if r.roi_percentage == 50.0));
        assert!(matches!(ico, CalculationResult::IcoIdoRoi(ref r) if r.profit_loss == 500.0));
    }

    #[test]
    fn roi_rejects_zero_initial_investment_at_the_boundary() {
        let input = raw(json!({ "initialInvestment": 0, "currentValue": 10 }));
        let err = parse(CalculatorKind::CryptoRoi, &input).expect_err("zero investment");
        assert_eq!(err.errors()[0].field, "initialInvestment");
    }

    #[test]
    fn sip_zero_return_is_flagged() {
        let input = raw(json!({ "totalInvestment": 60000, "expectedReturn": 0, "years": 5 }));
        let CalculationResult::SipVsLumpsum(result) =
            evaluate(CalculatorKind::SipVsLumpsum, &input, &StaticRates).expect("valid")
        else {
            panic!("wrong result variant");
        };
        assert_eq!(result.degenerate, Some(DegenerateBranch::ZeroMonthlyRate));
        assert_eq!(result.sip_future_value, 60_000.0);
    }

    #[test]
    fn blockchain_fee_defaults_display_currency_to_usd() {
        let input = raw(json!({ "network": "Ethereum", "gasUnits": 21000, "gasPrice": 20 }));
        let CalculationResult::BlockchainFee(result) =
            evaluate(CalculatorKind::BlockchainFee, &input, &StaticRates).expect("valid")
        else {
            panic!("wrong result variant");
        };
        assert_eq!(result.display_currency, "USD");
        assert_eq!(result.fee_in_display_currency, result.fee_in_usd);
        assert!(result.is_estimate);
    }

    #[test]
    fn blockchain_fee_rejects_unknown_network_and_zero_price() {
        let input = raw(json!({ "network": "dogecoin", "gasUnits": 1, "gasPrice": 0 }));
        let err = parse(CalculatorKind::BlockchainFee, &input).expect_err("invalid");
        assert!(err.for_field("network").is_some());
        assert!(err.for_field("gasPrice").is_some());
    }

    #[test]
    fn dividend_and_tax_scenarios() {
        let dividend = raw(json!({ "annualDividendPerShare": 5, "currentMarketPrice": 100 }));
        let tax = raw(json!({ "totalGains": 5000, "taxRate": 20 }));
        assert!(matches!(
            evaluate(CalculatorKind::DividendYield, &dividend, &StaticRates),
            Ok(CalculationResult::DividendYield(ref r)) if r.dividend_yield == 5.0
        ));
        assert!(matches!(
            evaluate(CalculatorKind::CryptoTax, &tax, &StaticRates),
            Ok(CalculationResult::CryptoTax(ref r)) if r.estimated_tax == 1000.0 && r.net_gains_after_tax == 4000.0
        ));
    }

    #[test]
    fn dividend_yield_rejects_zero_price() {
        let input = raw(json!({ "annualDividendPerShare": 5, "currentMarketPrice": 0 }));
        assert!(parse(CalculatorKind::DividendYield, &input).is_err());
    }

    #[test]
    fn market_timing_result_has_one_row_per_year() {
        let input = raw(json!({
            "principal": 10000,
            "averageMarketReturn": 10,
            "returnIfBestDaysMissed": 6,
            "years": 20,
        }));
        let CalculationResult::MarketTiming(result) =
            evaluate(CalculatorKind::MarketTiming, &input, &StaticRates).expect("valid")
        else {
            panic!("wrong result variant");
        };
        assert_eq!(result.annual_breakdown.len(), 20);
        assert_eq!(result.annual_breakdown[19].year, 20);
    }
}
