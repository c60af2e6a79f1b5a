//! Cart line items as seen by the rate calculator

use serde::{Deserialize, Serialize};

/// One cart line: a product and how many of it are shipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// cm
    #[serde(default)]
    pub length: Option<f64>,
    /// cm
    #[serde(default)]
    pub width: Option<f64>,
    /// cm
    #[serde(default)]
    pub height: Option<f64>,
    /// kg per unit
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub is_stackable: bool,
    /// Height added by each unit stacked on the first one (cm)
    #[serde(default)]
    pub additional_height_per_unit: f64,
}

fn default_quantity() -> u32 {
    1
}

impl CartItem {
    pub fn new(length: f64, width: f64, height: f64, weight: f64, quantity: u32) -> Self {
        Self {
            product_id: None,
            name: None,
            length: Some(length),
            width: Some(width),
            height: Some(height),
            weight: Some(weight),
            quantity,
            is_stackable: false,
            additional_height_per_unit: 0.0,
        }
    }

    pub fn stackable(mut self, additional_height_per_unit: f64) -> Self {
        self.is_stackable = true;
        self.additional_height_per_unit = additional_height_per_unit;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Length, width and height when all three are present and non-zero
    pub fn dimensions(&self) -> Option<(f64, f64, f64)> {
        let present = |v: Option<f64>| v.filter(|x| *x != 0.0);
        Some((
            present(self.length)?,
            present(self.width)?,
            present(self.height)?,
        ))
    }

    /// Height of the whole line once packed
    ///
    /// Stackable units nest, so each extra unit only adds
    /// `additional_height_per_unit`. Anything else is piled at full height.
    pub fn effective_height(&self) -> Option<f64> {
        let (_, _, height) = self.dimensions()?;
        let quantity = f64::from(self.quantity);
        if self.is_stackable {
            let extra_units = quantity - 1.0;
            Some(height + self.additional_height_per_unit * extra_units)
        } else {
            Some(height * quantity)
        }
    }

    /// Label for reports
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.product_id.clone())
            .unwrap_or_else(|| "(unnamed)".to_string())
    }
}

/// Cart totals in kg
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartWeight {
    pub actual: f64,
    pub volumetric: f64,
}

/// The items of one checkout rate-calculation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub destination: Option<String>,
}

impl Package {
    pub fn new(items: Vec<CartItem>) -> Self {
        Self {
            items,
            destination: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stackable_effective_height() {
        let item = CartItem::new(20.0, 20.0, 10.0, 1.0, 3).stackable(2.0);
        assert!((item.effective_height().unwrap() - 14.0).abs() < 0.001);
    }

    #[test]
    fn test_non_stackable_effective_height() {
        let item = CartItem::new(20.0, 20.0, 10.0, 1.0, 3);
        assert!((item.effective_height().unwrap() - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_single_stackable_unit_keeps_base_height() {
        let item = CartItem::new(20.0, 20.0, 10.0, 1.0, 1).stackable(5.0);
        assert!((item.effective_height().unwrap() - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_dimension_has_no_dimensions() {
        let item = CartItem::new(20.0, 0.0, 10.0, 1.0, 1);
        assert!(item.dimensions().is_none());
        assert!(item.effective_height().is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let item: CartItem = serde_json::from_str(r#"{"length": 10, "width": 5}"#).unwrap();
        assert_eq!(item.quantity, 1);
        assert!(!item.is_stackable);
        assert!(item.height.is_none());
        assert!(item.weight.is_none());
    }
}
