use crate::errors::{CalcError, CalcResult, InvalidReason};
use crate::models::coverage::coverage_probability;
use crate::models::VolatilityMode;

/// Standard trading days per year used for annualization. Fixed policy.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Projection horizon in trading days. Fixed policy.
pub const HOLDING_PERIOD_DAYS: f64 = 1.0;

/// Standard-deviation multiples reported for every calculation.
pub const SD_MULTIPLES: [u8; 3] = [1, 2, 3];

/// One ±k standard deviation band around the price, bounds rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SdBand {
    pub multiple: u8,
    pub lower: f64,
    pub upper: f64,
    /// Normal probability mass inside the band (≈0.68 / 0.95 / 0.997)
    pub coverage: f64,
}

/// Result of a one-day range calculation. Created per call, never shared.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RangeResult {
    pub price: f64,
    /// Decimal IV actually used, full precision
    pub decimal_iv: f64,
    /// One-day expected absolute move for one standard deviation
    pub std_dev_move: f64,
    pub bands: [SdBand; 3],
}

impl RangeResult {
    pub fn band(&self, multiple: u8) -> Option<&SdBand> {
        self.bands.iter().find(|b| b.multiple == multiple)
    }

    /// Echoed volatility for display. Formatting only, the stored value is untouched.
    pub fn decimal_iv_display(&self) -> String {
        format!("{:.4}", self.decimal_iv)
    }
}

/// sqrt(holding period / trading year)
#[inline]
fn daily_factor() -> f64 {
    (HOLDING_PERIOD_DAYS / TRADING_DAYS_PER_YEAR).sqrt()
}

/// One-day standard-deviation price move.
///
/// sd_move = price * iv * sqrt(1 / 252)
#[inline]
pub fn std_dev_move(price: f64, decimal_iv: f64) -> f64 {
    price * decimal_iv * daily_factor()
}

/// Round to 2 decimal places, half away from zero.
/// Applied to `x * 100`, which carries its own binary rounding, so the last
/// cent can differ from exact decimal rounding.
#[inline]
pub fn round_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Compute the ±1, ±2, ±3 SD one-day price range.
///
/// Refuses non-positive (and NaN or infinite) price or volatility with
/// `CalcError::InvalidInput`; price is checked first. Pure function.
pub fn compute_range(price: f64, volatility_raw: f64, mode: VolatilityMode) -> CalcResult<RangeResult> {
    if !(price > 0.0) || !price.is_finite() {
        return Err(CalcError::invalid(InvalidReason::NonPositivePrice));
    }
    if !(volatility_raw > 0.0) || !volatility_raw.is_finite() {
        return Err(CalcError::invalid(InvalidReason::NonPositiveVolatility));
    }

    let decimal_iv = mode.normalize(volatility_raw);
    let sd_move = std_dev_move(price, decimal_iv);

    tracing::debug!(price, volatility_raw, %mode, decimal_iv, sd_move, "normalized volatility");

    if !sd_move.is_finite() {
        return Err(CalcError::Model(format!(
            "standard deviation move is not finite (price={price}, decimal_iv={decimal_iv})"
        )));
    }

    let bands = SD_MULTIPLES.map(|k| {
        let offset = f64::from(k) * sd_move;
        SdBand {
            multiple: k,
            lower: round_cents(price - offset),
            upper: round_cents(price + offset),
            coverage: coverage_probability(f64::from(k)),
        }
    });

    if bands.iter().any(|b| !b.lower.is_finite() || !b.upper.is_finite()) {
        return Err(CalcError::Model(format!(
            "range bounds are not finite (price={price}, decimal_iv={decimal_iv})"
        )));
    }

    Ok(RangeResult {
        price,
        decimal_iv,
        std_dev_move: sd_move,
        bands,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        let r = compute_range(100.0, 0.20, VolatilityMode::DecimalIv).unwrap();
        assert!((r.std_dev_move - 1.2599).abs() < 1e-4, "sd_move={}", r.std_dev_move);

        let b1 = r.band(1).unwrap();
        let b2 = r.band(2).unwrap();
        let b3 = r.band(3).unwrap();
        assert_eq!((b1.lower, b1.upper), (98.74, 101.26));
        assert_eq!((b2.lower, b2.upper), (97.48, 102.52));
        assert_eq!((b3.lower, b3.upper), (96.22, 103.78));
        assert_eq!(r.decimal_iv_display(), "0.2000");
    }

    #[test]
    fn test_mode_equivalence() {
        let iv = compute_range(100.0, 0.20, VolatilityMode::DecimalIv).unwrap();
        let vix = compute_range(100.0, 20.0, VolatilityMode::VixIndex).unwrap();
        assert_eq!(iv, vix);
    }

    #[test]
    fn test_rejects_non_positive_price() {
        for price in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = compute_range(price, 0.2, VolatilityMode::DecimalIv).unwrap_err();
            assert!(
                matches!(err, CalcError::InvalidInput { reason: InvalidReason::NonPositivePrice }),
                "price={price} gave {err}"
            );
        }
    }

    #[test]
    fn test_rejects_non_positive_volatility() {
        for vol in [0.0, -0.2, f64::NAN] {
            let err = compute_range(100.0, vol, VolatilityMode::DecimalIv).unwrap_err();
            assert!(matches!(
                err,
                CalcError::InvalidInput { reason: InvalidReason::NonPositiveVolatility }
            ));
        }
        let err = compute_range(100.0, 0.0, VolatilityMode::VixIndex).unwrap_err();
        assert_eq!(err.to_string(), "invalid input: non-positive volatility");
    }

    #[test]
    fn test_price_checked_before_volatility() {
        let err = compute_range(0.0, 0.0, VolatilityMode::DecimalIv).unwrap_err();
        assert!(matches!(
            err,
            CalcError::InvalidInput { reason: InvalidReason::NonPositivePrice }
        ));
    }

    #[test]
    fn test_overflow_is_model_error() {
        let err = compute_range(1e308, 1e10, VolatilityMode::DecimalIv).unwrap_err();
        assert!(matches!(err, CalcError::Model(_)), "got {err}");
    }

    #[test]
    fn test_bound_overflow_is_model_error() {
        // sd_move stays finite here; only the cent rounding of the bounds overflows
        assert!(std_dev_move(1e307, 0.2).is_finite());
        let err = compute_range(1e307, 0.2, VolatilityMode::DecimalIv).unwrap_err();
        assert!(matches!(err, CalcError::Model(_)), "got {err}");
        assert!(err.to_string().contains("range bounds are not finite"), "got {err}");
    }

    #[test]
    fn test_bands_widen_monotonically() {
        let cases = [
            (0.05, 0.01, VolatilityMode::DecimalIv),
            (12.34, 0.45, VolatilityMode::DecimalIv),
            (100.0, 20.0, VolatilityMode::VixIndex),
            (2450.75, 13.7, VolatilityMode::VixIndex),
            (98765.4, 1.8, VolatilityMode::DecimalIv),
        ];
        for (price, vol, mode) in cases {
            let r = compute_range(price, vol, mode).unwrap();
            let [b1, b2, b3] = r.bands;
            assert!(b3.lower <= b2.lower && b2.lower <= b1.lower, "{price} {vol} {mode}");
            assert!(b1.lower <= price && price <= b1.upper, "{price} {vol} {mode}");
            assert!(b1.upper <= b2.upper && b2.upper <= b3.upper, "{price} {vol} {mode}");
        }
    }

    #[test]
    fn test_sub_cent_price_brackets_rounded_price() {
        // Bounds are cent-rounded, so a sub-cent price can sit outside a band
        // narrower than half a cent. The bands still bracket the rounded price.
        let price = 100.004;
        let r = compute_range(price, 0.0001, VolatilityMode::DecimalIv).unwrap();
        let [b1, b2, b3] = r.bands;
        assert_eq!((b1.lower, b1.upper), (100.0, 100.0));
        assert!(b1.upper < price);

        let rounded = round_cents(price);
        assert!(b3.lower <= b2.lower && b2.lower <= b1.lower);
        assert!(b1.lower <= rounded && rounded <= b1.upper);
        assert!(b1.upper <= b2.upper && b2.upper <= b3.upper);
    }

    #[test]
    fn test_bands_symmetric_up_to_rounding() {
        let r = compute_range(431.17, 0.27, VolatilityMode::DecimalIv).unwrap();
        for b in r.bands {
            let below = r.price - b.lower;
            let above = b.upper - r.price;
            assert!((below - above).abs() <= 0.01 + 1e-9, "k={} below={below} above={above}", b.multiple);
        }
    }

    #[test]
    fn test_scale_invariance() {
        let iv = 0.3;
        let base = std_dev_move(150.0, iv);
        let doubled = std_dev_move(300.0, iv);
        assert_eq!(doubled, 2.0 * base);
        for k in SD_MULTIPLES {
            let k = f64::from(k);
            assert_eq!(k * doubled, 2.0 * (k * base));
        }
    }

    #[test]
    fn test_decimal_iv_keeps_full_precision() {
        let r = compute_range(50.0, 17.123456, VolatilityMode::VixIndex).unwrap();
        assert_eq!(r.decimal_iv, 17.123456 / 100.0);
        assert_eq!(r.decimal_iv_display(), "0.1712");
    }

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(round_cents(0.125), 0.13);
        assert_eq!(round_cents(-0.125), -0.13);
        assert_eq!(round_cents(101.259881), 101.26);
    }

    #[test]
    fn test_band_coverage_attached() {
        let r = compute_range(100.0, 0.2, VolatilityMode::DecimalIv).unwrap();
        assert!((r.bands[0].coverage - 0.6827).abs() < 1e-4);
        assert!(r.band(4).is_none());
    }
}
