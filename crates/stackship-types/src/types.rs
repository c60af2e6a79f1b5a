//! Carrier records shared by every layer

use serde::{Deserialize, Serialize};

/// Divisor used when a carrier does not configure one (cm³ per kg)
pub const DEFAULT_VOLUMETRIC_DIVISOR: u32 = 5000;

/// How a carrier picks the billable weight of a cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CalculationType {
    /// Physical weight only
    Actual,
    /// Volumetric weight only
    Volumetric,
    /// Whichever of actual and volumetric is larger
    #[default]
    Higher,
}

impl CalculationType {
    /// Parse a stored value. Anything unrecognised falls back to `Higher`.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "actual" => CalculationType::Actual,
            "volumetric" => CalculationType::Volumetric,
            _ => CalculationType::Higher,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationType::Actual => "actual",
            CalculationType::Volumetric => "volumetric",
            CalculationType::Higher => "higher",
        }
    }

    /// Get display label
    pub fn label(&self) -> &'static str {
        match self {
            CalculationType::Actual => "Actual weight",
            CalculationType::Volumetric => "Volumetric weight",
            CalculationType::Higher => "Higher of actual/volumetric",
        }
    }
}

impl From<String> for CalculationType {
    fn from(s: String) -> Self {
        CalculationType::from_str_lossy(&s)
    }
}

impl From<CalculationType> for String {
    fn from(t: CalculationType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for CalculationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Maximum parcel dimensions in cm. A value of 0 means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DimensionLimits {
    #[serde(default)]
    pub length_max: f64,
    #[serde(default)]
    pub width_max: f64,
    #[serde(default)]
    pub height_max: f64,
    /// length + 2 x width + 2 x height
    #[serde(default)]
    pub girth_max: f64,
}

impl DimensionLimits {
    pub fn is_unlimited(&self) -> bool {
        self.length_max <= 0.0
            && self.width_max <= 0.0
            && self.height_max <= 0.0
            && self.girth_max <= 0.0
    }
}

/// A weight range (kg, inclusive on both ends) mapped to a fixed price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBracket {
    pub weight_min: f64,
    pub weight_max: f64,
    pub price: f64,
}

impl RateBracket {
    pub fn new(weight_min: f64, weight_max: f64, price: f64) -> Self {
        Self {
            weight_min,
            weight_max,
            price,
        }
    }

    /// Whether `weight` falls inside this bracket
    pub fn contains(&self, weight: f64) -> bool {
        weight >= self.weight_min && weight <= self.weight_max
    }
}

/// A shipping provider with its own rate table and dimension rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    /// Unique identifier (e.g., "carrier_1")
    pub id: String,
    /// Name shown at checkout
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub calculation_type: CalculationType,
    #[serde(default = "default_divisor")]
    pub volumetric_divisor: u32,
    #[serde(default)]
    pub dimension_limits: DimensionLimits,
    /// Weight brackets, expected non-overlapping and sorted by `weight_min`
    #[serde(default)]
    pub rates: Vec<RateBracket>,
}

fn default_divisor() -> u32 {
    DEFAULT_VOLUMETRIC_DIVISOR
}

impl Carrier {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            enabled: true,
            calculation_type: CalculationType::default(),
            volumetric_divisor: DEFAULT_VOLUMETRIC_DIVISOR,
            dimension_limits: DimensionLimits::default(),
            rates: Vec::new(),
        }
    }

    pub fn with_rates(mut self, rates: Vec<RateBracket>) -> Self {
        self.rates = rates;
        self
    }

    pub fn with_calculation_type(mut self, calculation_type: CalculationType) -> Self {
        self.calculation_type = calculation_type;
        self
    }

    pub fn with_divisor(mut self, divisor: u32) -> Self {
        self.volumetric_divisor = divisor;
        self
    }

    pub fn with_limits(mut self, limits: DimensionLimits) -> Self {
        self.dimension_limits = limits;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Rates sorted ascending by `weight_min`; ties keep their stored order
    pub fn sorted_rates(&self) -> Vec<RateBracket> {
        let mut rates = self.rates.clone();
        rates.sort_by(|a, b| a.weight_min.total_cmp(&b.weight_min));
        rates
    }

    /// Rate brackets that overlap the one before them, after sorting
    pub fn overlapping_rates(&self) -> Vec<(RateBracket, RateBracket)> {
        self.sorted_rates()
            .windows(2)
            .filter(|pair| pair[1].weight_min < pair[0].weight_max)
            .map(|pair| (pair[0], pair[1]))
            .collect()
    }
}
