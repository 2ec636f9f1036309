use serde::Serialize;

/// A percentage input such as `7.0` for 7%.
///
/// `fraction()` is the only place a percentage becomes a fractional rate.
/// Formulas take `Rate` and call `fraction()`; they never divide by 100
/// themselves.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Rate(f64);

impl Rate {
    pub const ZERO: Rate = Rate(0.0);

    pub fn from_percent(percent: f64) -> Self {
        Rate(percent)
    }

    pub fn percent(self) -> f64 {
        self.0
    }

    pub fn fraction(self) -> f64 {
        self.0 / 100.0
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundingFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    pub const PERIODS: [u32; 4] = [1, 2, 4, 12];

    pub fn from_periods(periods: u32) -> Option<Self> {
        match periods {
            1 => Some(Self::Annually),
            2 => Some(Self::SemiAnnually),
            4 => Some(Self::Quarterly),
            12 => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn periods_per_year(self) -> u32 {
        match self {
            Self::Annually => 1,
            Self::SemiAnnually => 2,
            Self::Quarterly => 4,
            Self::Monthly => 12,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockchainNetwork {
    Ethereum,
    Bitcoin,
    Solana,
    Polygon,
    #[serde(rename = "bsc")]
    BinanceSmartChain,
}

impl BlockchainNetwork {
    pub const SLUGS: [&'static str; 5] = ["ethereum", "bitcoin", "solana", "polygon", "bsc"];

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "ethereum" => Some(Self::Ethereum),
            "bitcoin" => Some(Self::Bitcoin),
            "solana" => Some(Self::Solana),
            "polygon" => Some(Self::Polygon),
            "bsc" => Some(Self::BinanceSmartChain),
            _ => None,
        }
    }

    pub fn native_symbol(self) -> &'static str {
        match self {
            Self::Ethereum => "ETH",
            Self::Bitcoin => "BTC",
            Self::Solana => "SOL",
            Self::Polygon => "MATIC",
            Self::BinanceSmartChain => "BNB",
        }
    }

    /// Name of the unit `gasPrice` is quoted in.
    pub fn price_unit(self) -> &'static str {
        match self {
            Self::Ethereum | Self::Polygon | Self::BinanceSmartChain => "gwei",
            Self::Bitcoin => "sat/vB",
            Self::Solana => "lamports",
        }
    }

    /// Number of price units per whole native token.
    pub fn unit_divisor(self) -> f64 {
        match self {
            Self::Bitcoin => 1e8,
            Self::Ethereum | Self::Polygon | Self::BinanceSmartChain | Self::Solana => 1e9,
        }
    }
}

/// Marks a result that was produced by a calculator's alternate branch
/// rather than its main formula. Not an error.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DegenerateBranch {
    ZeroInitialInvestment,
    NonPositiveRealReturn,
    ZeroMonthlyRate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundInterestInput {
    pub principal: f64,
    pub rate: Rate,
    pub years: u32,
    pub frequency: CompoundingFrequency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoiInput {
    pub initial_investment: f64,
    pub current_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DividendYieldInput {
    pub annual_dividend_per_share: f64,
    pub current_market_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CryptoTaxInput {
    pub total_gains: f64,
    pub tax_rate: Rate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SipVsLumpsumInput {
    pub total_investment: f64,
    pub expected_return: Rate,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetirementInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_expenses_at_retirement: f64,
    pub years_in_retirement: u32,
    pub inflation: Rate,
    pub post_retirement_return: Rate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarketTimingInput {
    pub principal: f64,
    pub average_market_return: Rate,
    pub return_if_best_days_missed: Rate,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockchainFeeInput {
    pub network: BlockchainNetwork,
    pub gas_units: f64,
    pub gas_price: f64,
    pub display_currency: &'static str,
}

/// Validated input for one calculator invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorInput {
    CompoundInterest(CompoundInterestInput),
    CryptoRoi(RoiInput),
    IcoIdoRoi(RoiInput),
    RetirementCorpus(RetirementInput),
    SipVsLumpsum(SipVsLumpsumInput),
    MarketTiming(MarketTimingInput),
    BlockchainFee(BlockchainFeeInput),
    DividendYield(DividendYieldInput),
    CryptoTax(CryptoTaxInput),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestYear {
    pub year: u32,
    pub value: f64,
    pub interest_earned: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestResult {
    pub principal: f64,
    pub future_value: f64,
    pub total_interest: f64,
    pub annual_breakdown: Vec<CompoundInterestYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub initial_investment: f64,
    pub current_value: f64,
    pub profit_loss: f64,
    pub roi_percentage: f64,
    pub degenerate: Option<DegenerateBranch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DividendYieldResult {
    pub annual_dividend_per_share: f64,
    pub current_market_price: f64,
    pub dividend_yield: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoTaxResult {
    pub total_gains: f64,
    pub tax_rate: f64,
    pub estimated_tax: f64,
    pub net_gains_after_tax: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    Sip,
    Lumpsum,
    Equal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipVsLumpsumResult {
    pub total_investment: f64,
    pub monthly_installment: f64,
    pub installments: u32,
    pub sip_future_value: f64,
    pub lumpsum_future_value: f64,
    pub difference: f64,
    pub better_strategy: Strategy,
    pub degenerate: Option<DegenerateBranch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub years_to_retirement: u32,
    pub years_in_retirement: u32,
    pub annual_expense: f64,
    pub real_return_rate: f64,
    pub required_corpus: f64,
    pub total_nominal_expenses: f64,
    pub degenerate: Option<DegenerateBranch>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTimingYear {
    pub year: u32,
    pub invested_value: f64,
    pub missed_value: f64,
    pub opportunity_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTimingResult {
    pub principal: f64,
    pub final_invested_value: f64,
    pub final_missed_value: f64,
    pub total_opportunity_cost: f64,
    pub annual_breakdown: Vec<MarketTimingYear>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainFeeResult {
    pub network: BlockchainNetwork,
    pub native_symbol: &'static str,
    pub price_unit: &'static str,
    pub fee_in_native_token: f64,
    pub fee_in_usd: Option<f64>,
    pub display_currency: &'static str,
    pub fee_in_display_currency: Option<f64>,
    pub is_estimate: bool,
    pub rate_source: &'static str,
}

/// Output of one calculator invocation, already rounded for emission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalculationResult {
    CompoundInterest(CompoundInterestResult),
    CryptoRoi(RoiResult),
    IcoIdoRoi(RoiResult),
    RetirementCorpus(RetirementResult),
    SipVsLumpsum(SipVsLumpsumResult),
    MarketTiming(MarketTimingResult),
    BlockchainFee(BlockchainFeeResult),
    DividendYield(DividendYieldResult),
    CryptoTax(CryptoTaxResult),
}
