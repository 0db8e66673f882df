use crate::errors::CalcResult;
use crate::models::coverage::coverage_probability;
use crate::models::range::{compute_range, RangeResult, SD_MULTIPLES};
use crate::models::VolatilityMode;

/// Label used in the result row when the user leaves the name blank.
pub const DEFAULT_STOCK_LABEL: &str = "Stock";

// ── Field lookup table (keyed by mode, no view state) ──

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct FieldSpec {
    pub mode: VolatilityMode,
    pub option_label: &'static str,
    pub label: &'static str,
    pub help: &'static str,
    /// Input granularity. UX only, never affects the calculation.
    pub step: f64,
}

static FIELD_SPECS: [FieldSpec; 2] = [
    FieldSpec {
        mode: VolatilityMode::DecimalIv,
        option_label: "IV (as decimal)",
        label: "Implied Volatility (IV)",
        help: "Enter the implied volatility as a decimal (e.g., 0.20 for 20%).",
        step: 0.01,
    },
    FieldSpec {
        mode: VolatilityMode::VixIndex,
        option_label: "VIX (as index value)",
        label: "VIX Value",
        help: "Enter the VIX index value (e.g., 20).",
        step: 0.1,
    },
];

pub fn field_spec(mode: VolatilityMode) -> &'static FieldSpec {
    match mode {
        VolatilityMode::DecimalIv => &FIELD_SPECS[0],
        VolatilityMode::VixIndex => &FIELD_SPECS[1],
    }
}

// ── Form descriptor ──

#[derive(Debug, Clone, serde::Serialize)]
pub struct NumberField {
    pub label: &'static str,
    pub help: &'static str,
    pub min: f64,
    pub step: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SdGuide {
    pub multiple: u8,
    pub label: String,
    pub coverage_pct: f64,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FormDescriptor {
    pub title: &'static str,
    pub description: &'static str,
    pub sd_guide: Vec<SdGuide>,
    pub stock_name_help: &'static str,
    pub price_field: NumberField,
    pub mode_prompt: &'static str,
    pub mode_help: &'static str,
    pub default_mode: VolatilityMode,
    pub volatility_modes: [FieldSpec; 2],
    pub info_note: &'static str,
}

pub fn ordinal_label(multiple: u8) -> String {
    let suffix = match multiple {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{multiple}{suffix} SD")
}

pub fn form_descriptor() -> FormDescriptor {
    let sd_guide = SD_MULTIPLES
        .iter()
        .map(|&k| SdGuide {
            multiple: k,
            label: ordinal_label(k),
            coverage_pct: (coverage_probability(f64::from(k)) * 1000.0).round() / 10.0,
        })
        .collect();

    FormDescriptor {
        title: "Stock Range Calculator",
        description: "Estimate the next day's price range for stocks using implied volatility.",
        sd_guide,
        stock_name_help: "Enter the stock ticker or name (e.g., ABC).",
        price_field: NumberField {
            label: "Previous Day's Stock Price",
            help: "Enter the closing price of the stock from the previous day.",
            min: 0.0,
            step: 0.01,
        },
        mode_prompt: "Select Volatility Input Type",
        mode_help: "Choose whether to enter implied volatility as a decimal (e.g., 0.20) or VIX as an index value (e.g., 20).",
        default_mode: VolatilityMode::DecimalIv,
        volatility_modes: FIELD_SPECS,
        info_note: "Individual stock VIX values for Indian stocks are published by Sensibull (https://sensibull.com).",
    }
}

// ── Request-scoped form state ──

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    pub stock_name: Option<String>,
    pub price: f64,
    pub volatility_mode: VolatilityMode,
    pub volatility: f64,
}

impl CalculateRequest {
    pub fn display_name(&self) -> &str {
        display_name(self.stock_name.as_deref())
    }
}

pub fn display_name(raw: Option<&str>) -> &str {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_STOCK_LABEL,
    }
}

// ── Result table row ──

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RangeRow {
    pub stock_name: String,
    pub sd1_lower: f64,
    pub sd1_upper: f64,
    pub sd2_lower: f64,
    pub sd2_upper: f64,
    pub sd3_lower: f64,
    pub sd3_upper: f64,
    pub std_dev_move: f64,
    pub decimal_iv: f64,
    pub volatility_note: String,
}

impl RangeRow {
    pub fn new(stock_name: &str, result: &RangeResult) -> Self {
        let [b1, b2, b3] = result.bands;
        Self {
            stock_name: stock_name.to_string(),
            sd1_lower: b1.lower,
            sd1_upper: b1.upper,
            sd2_lower: b2.lower,
            sd2_upper: b2.upper,
            sd3_lower: b3.lower,
            sd3_upper: b3.upper,
            std_dev_move: result.std_dev_move,
            decimal_iv: result.decimal_iv,
            volatility_note: format!(
                "Calculation used volatility value of {} (as decimal)",
                result.decimal_iv_display()
            ),
        }
    }
}

// ── Sample calculations ──

#[derive(Debug, Clone, serde::Serialize)]
pub struct SampleCalculation {
    pub title: &'static str,
    pub inputs: String,
    pub conversion: Option<String>,
    pub row: RangeRow,
}

const SAMPLE_NAME: &str = "ABC";
const SAMPLE_PRICE: f64 = 100.0;

/// The two worked examples, run through the real calculator.
pub fn sample_calculations() -> CalcResult<Vec<SampleCalculation>> {
    let iv = compute_range(SAMPLE_PRICE, 0.20, VolatilityMode::DecimalIv)?;
    let vix = compute_range(SAMPLE_PRICE, 20.0, VolatilityMode::VixIndex)?;

    Ok(vec![
        SampleCalculation {
            title: "Using IV (decimal)",
            inputs: format!("Stock Price = ${SAMPLE_PRICE}, IV = 0.20 (as decimal)"),
            conversion: None,
            row: RangeRow::new(SAMPLE_NAME, &iv),
        },
        SampleCalculation {
            title: "Using VIX (index)",
            inputs: format!("Stock Price = ${SAMPLE_PRICE}, VIX = 20 (as index value)"),
            conversion: Some(format!("VIX 20 -> {:.2} (divide by 100)", vix.decimal_iv)),
            row: RangeRow::new(SAMPLE_NAME, &vix),
        },
    ])
}
