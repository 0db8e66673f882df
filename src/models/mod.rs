pub mod coverage;
pub mod range;

/// How the user expressed volatility on the form.
/// Both modes normalize to the same decimal IV before any arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityMode {
    /// Implied volatility as a decimal (0.20 = 20%).
    DecimalIv,
    /// VIX-style index value, a whole-number percentage (20 = 20%).
    VixIndex,
}

impl VolatilityMode {
    pub const ALL: [VolatilityMode; 2] = [VolatilityMode::DecimalIv, VolatilityMode::VixIndex];

    /// Convert a raw volatility figure into decimal IV.
    #[inline]
    pub fn normalize(self, raw: f64) -> f64 {
        match self {
            Self::DecimalIv => raw,
            Self::VixIndex => raw / 100.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DecimalIv => "decimal_iv",
            Self::VixIndex => "vix_index",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl std::fmt::Display for VolatilityMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
