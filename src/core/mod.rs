pub mod catalog;
pub mod formulas;
pub mod rates;
pub mod rounding;
pub mod series;
mod types;
pub mod validation;

pub use catalog::{CURRENCY_CODES, CalculatorKind, compute, evaluate, parse};
pub use rates::{RateLookup, StaticRates};
pub use types::{
    BlockchainFeeInput, BlockchainFeeResult, BlockchainNetwork, CalculationResult,
    CalculatorInput, CompoundInterestInput, CompoundInterestResult, CompoundInterestYear,
    CompoundingFrequency, CryptoTaxInput, CryptoTaxResult, DegenerateBranch, DividendYieldInput,
    DividendYieldResult, MarketTimingInput, MarketTimingResult, MarketTimingYear, Rate,
    RetirementInput, RetirementResult, RoiInput, RoiResult, SipVsLumpsumInput,
    SipVsLumpsumResult, Strategy,
};
pub use validation::{RawInput, ValidationError, ValidationErrors};
