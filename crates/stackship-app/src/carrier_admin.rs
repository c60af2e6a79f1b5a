//! Carrier administration - validating admin input before it reaches the store
//!
//! Admin forms arrive loosely typed: any field may be missing and numbers may
//! be sent as strings. This module normalises them into `Carrier` records.

use serde::Deserialize;
use serde_json::Value;
use stackship_domain::repository::CarrierStore;
use stackship_types::{
    CalculationType, Carrier, DimensionLimits, Error, RateBracket, Result,
    DEFAULT_VOLUMETRIC_DIVISOR,
};
use tracing::{info, warn};

use crate::constants::default_carriers;

/// Raw carrier data as submitted by the admin surface
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CarrierForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Checkbox semantics: present and truthy means enabled
    #[serde(default)]
    pub enabled: Option<Value>,
    #[serde(default)]
    pub calculation_type: Option<String>,
    #[serde(default)]
    pub volumetric_divisor: Option<Value>,
    #[serde(default)]
    pub dimension_limits: Option<DimensionLimitsForm>,
    #[serde(default)]
    pub rates: Option<Vec<RateForm>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DimensionLimitsForm {
    #[serde(default)]
    pub length_max: Option<Value>,
    #[serde(default)]
    pub width_max: Option<Value>,
    #[serde(default)]
    pub height_max: Option<Value>,
    #[serde(default)]
    pub girth_max: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateForm {
    #[serde(default)]
    pub weight_min: Option<Value>,
    #[serde(default)]
    pub weight_max: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
}

impl CarrierForm {
    /// Start a form from an existing record, for edits
    pub fn from_carrier(carrier: &Carrier) -> Self {
        let num = |v: f64| Some(Value::from(v));
        Self {
            id: Some(carrier.id.clone()),
            name: Some(carrier.name.clone()),
            description: Some(carrier.description.clone()),
            enabled: carrier.enabled.then_some(Value::Bool(true)),
            calculation_type: Some(carrier.calculation_type.as_str().to_string()),
            volumetric_divisor: Some(Value::from(carrier.volumetric_divisor)),
            dimension_limits: Some(DimensionLimitsForm {
                length_max: num(carrier.dimension_limits.length_max),
                width_max: num(carrier.dimension_limits.width_max),
                height_max: num(carrier.dimension_limits.height_max),
                girth_max: num(carrier.dimension_limits.girth_max),
            }),
            rates: Some(
                carrier
                    .rates
                    .iter()
                    .map(|r| RateForm {
                        weight_min: num(r.weight_min),
                        weight_max: num(r.weight_max),
                        price: num(r.price),
                    })
                    .collect(),
            ),
        }
    }

    /// Normalise into a carrier record
    ///
    /// Fails only when the name is missing or blank.
    pub fn into_carrier(self) -> Result<Carrier> {
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| Error::Validation("carrier name is required".to_string()))?
            .to_string();

        let id = self
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(generate_carrier_id);

        let dimension_limits = self
            .dimension_limits
            .map(|limits| DimensionLimits {
                length_max: coerce_f64(limits.length_max.as_ref()),
                width_max: coerce_f64(limits.width_max.as_ref()),
                height_max: coerce_f64(limits.height_max.as_ref()),
                girth_max: coerce_f64(limits.girth_max.as_ref()),
            })
            .unwrap_or_default();

        let rates = self
            .rates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|rate| match (rate.weight_min, rate.weight_max, rate.price) {
                (Some(min), Some(max), Some(price)) => Some(RateBracket::new(
                    coerce_f64(Some(&min)),
                    coerce_f64(Some(&max)),
                    coerce_f64(Some(&price)),
                )),
                _ => {
                    warn!(carrier = %id, "dropping incomplete rate row");
                    None
                }
            })
            .collect();

        Ok(Carrier {
            id,
            name,
            description: self.description.unwrap_or_default().trim().to_string(),
            enabled: self.enabled.as_ref().map(is_truthy).unwrap_or(false),
            calculation_type: self
                .calculation_type
                .as_deref()
                .map(CalculationType::from_str_lossy)
                .unwrap_or_default(),
            volumetric_divisor: coerce_divisor(self.volumetric_divisor.as_ref()),
            dimension_limits,
            rates,
        })
    }
}

fn generate_carrier_id() -> String {
    format!("carrier_{}", uuid::Uuid::new_v4().simple())
}

/// Numeric coercion: numbers pass through, numeric strings parse, anything else is 0
fn coerce_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    }
}

/// Absolute integer value; missing or zero falls back to the default divisor
fn coerce_divisor(value: Option<&Value>) -> u32 {
    let divisor = coerce_f64(value).trunc().abs();
    if divisor < 1.0 {
        DEFAULT_VOLUMETRIC_DIVISOR
    } else {
        divisor.min(f64::from(u32::MAX)) as u32
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(s) => !matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "" | "0" | "no" | "false" | "off"
        ),
        Value::Null => false,
        _ => true,
    }
}

/// Validate and persist a carrier. Returns the record as stored.
pub fn save_carrier<S: CarrierStore + ?Sized>(store: &mut S, form: CarrierForm) -> Result<Carrier> {
    let carrier = form.into_carrier()?;

    for (previous, next) in carrier.overlapping_rates() {
        warn!(
            carrier = %carrier.id,
            previous_max = previous.weight_max,
            next_min = next.weight_min,
            "rate brackets overlap"
        );
    }

    store.save(&carrier)?;
    info!(carrier = %carrier.id, name = %carrier.name, rates = carrier.rates.len(), "carrier saved");
    Ok(carrier)
}

/// Delete a carrier that must exist
pub fn delete_carrier<S: CarrierStore + ?Sized>(store: &mut S, id: &str) -> Result<()> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::Validation("carrier id is required".to_string()));
    }
    if store.get(id)?.is_none() {
        return Err(Error::CarrierNotFound(id.to_string()));
    }
    store.delete(id)?;
    info!(carrier = id, "carrier deleted");
    Ok(())
}

/// Install the default carriers when the store has none
pub fn seed_default_carriers<S: CarrierStore + ?Sized>(store: &mut S) -> Result<bool> {
    if !store.list()?.is_empty() {
        return Ok(false);
    }
    for carrier in default_carriers() {
        store.save(&carrier)?;
    }
    info!("installed default carriers");
    Ok(true)
}
