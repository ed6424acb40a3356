use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Composite calculators
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_flip_returns(input_json: String) -> NapiResult<String> {
    let input: deal_engine_core::flip::FlipInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        deal_engine_core::flip::calculate_flip_returns(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_brrrr(input_json: String) -> NapiResult<String> {
    let input: deal_engine_core::brrrr::BrrrrInputs =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal_engine_core::brrrr::calculate_brrrr(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Estimators
// ---------------------------------------------------------------------------

#[napi]
pub fn estimate_arv(input_json: String) -> NapiResult<String> {
    let input: deal_engine_core::arv::ArvInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal_engine_core::arv::estimate_arv(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct RehabBindingInput {
    square_footage: rust_decimal::Decimal,
    level: deal_engine_core::types::RenovationLevel,
}

#[napi]
pub fn estimate_rehab_costs(input_json: String) -> NapiResult<String> {
    let input: RehabBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal_engine_core::rehab::estimate_rehab_costs(input.square_footage, input.level);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct MortgageBindingInput {
    principal: rust_decimal::Decimal,
    annual_rate: deal_engine_core::types::Percent,
    term_years: rust_decimal::Decimal,
    loan_type: deal_engine_core::types::LoanType,
    #[serde(default)]
    rehab_amount: rust_decimal::Decimal,
}

#[napi]
pub fn monthly_mortgage_payment(input_json: String) -> NapiResult<String> {
    let input: MortgageBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let payment = deal_engine_core::amortization::monthly_mortgage_payment(
        input.principal,
        input.annual_rate,
        input.term_years,
        input.loan_type,
        input.rehab_amount,
    );
    serde_json::to_string(&payment).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Financing defaults
// ---------------------------------------------------------------------------

#[napi]
pub fn simple_financing_defaults(strategy: String) -> NapiResult<String> {
    let strategy: deal_engine_core::types::Strategy =
        strategy.parse().map_err(to_napi_error)?;
    let output = deal_engine_core::financing::simple_financing_defaults(strategy);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct RateBandBindingInput {
    strategy: deal_engine_core::types::Strategy,
    property_type: deal_engine_core::types::PropertyType,
    #[serde(default = "default_units")]
    units: u32,
}

fn default_units() -> u32 {
    1
}

#[napi]
pub fn strategy_interest_rate(input_json: String) -> NapiResult<String> {
    let input: RateBandBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal_engine_core::financing::strategy_interest_rate(
        input.strategy,
        input.property_type,
        input.units,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct ClosingCostsBindingInput {
    purchase_price: rust_decimal::Decimal,
    lender_points_percent: deal_engine_core::types::Percent,
    other_costs_percent: deal_engine_core::types::Percent,
}

#[napi]
pub fn closing_costs(input_json: String) -> NapiResult<String> {
    let input: ClosingCostsBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deal_engine_core::financing::closing_costs(
        input.purchase_price,
        input.lender_points_percent,
        input.other_costs_percent,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Input normalization
// ---------------------------------------------------------------------------

#[napi]
pub fn parse_price(input: String) -> NapiResult<String> {
    let value = deal_engine_core::normalize::parse_price(Some(&input));
    Ok(value.to_string())
}

#[napi]
pub fn parse_percentage(input: String) -> NapiResult<String> {
    let value = deal_engine_core::normalize::parse_percent(Some(&input));
    Ok(value.value().to_string())
}
