//! Per-carrier pricing of a cart

use serde::{Deserialize, Serialize};
use stackship_types::Carrier;
use tracing::debug;

use super::dimension_checker::{check_item_limits, DimensionViolation};
use super::rate_lookup::lookup_rate;
use super::weight_calculator::{billable_weight, compute_cart_weight};
use crate::model::{CartItem, CartWeight, Quote};

/// Result of pricing a cart against one carrier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuoteOutcome {
    Priced(Quote),
    Disabled {
        carrier_id: String,
    },
    ExceedsLimits {
        carrier_id: String,
        violations: Vec<DimensionViolation>,
    },
    NoRate {
        carrier_id: String,
        cart_weight: CartWeight,
        billable_weight: f64,
    },
}

impl QuoteOutcome {
    pub fn carrier_id(&self) -> &str {
        match self {
            QuoteOutcome::Priced(q) => &q.carrier_id,
            QuoteOutcome::Disabled { carrier_id }
            | QuoteOutcome::ExceedsLimits { carrier_id, .. }
            | QuoteOutcome::NoRate { carrier_id, .. } => carrier_id,
        }
    }

    pub fn into_quote(self) -> Option<Quote> {
        match self {
            QuoteOutcome::Priced(q) => Some(q),
            _ => None,
        }
    }

    /// Why the carrier is unavailable, `None` when priced
    pub fn reason(&self) -> Option<String> {
        match self {
            QuoteOutcome::Priced(_) => None,
            QuoteOutcome::Disabled { .. } => Some("carrier is disabled".to_string()),
            QuoteOutcome::ExceedsLimits { violations, .. } => Some(
                violations
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            QuoteOutcome::NoRate {
                billable_weight, ..
            } => Some(format!("no rate bracket covers {:.2} kg", billable_weight)),
        }
    }
}

/// Run the full pipeline for one carrier: availability, dimension limits,
/// weights, and bracket lookup.
pub fn evaluate_carrier(carrier: &Carrier, items: &[CartItem]) -> QuoteOutcome {
    if !carrier.enabled {
        return QuoteOutcome::Disabled {
            carrier_id: carrier.id.clone(),
        };
    }

    let violations: Vec<_> = items
        .iter()
        .flat_map(|item| check_item_limits(item, &carrier.dimension_limits))
        .collect();
    if !violations.is_empty() {
        debug!(carrier = %carrier.id, count = violations.len(), "cart exceeds dimension limits");
        return QuoteOutcome::ExceedsLimits {
            carrier_id: carrier.id.clone(),
            violations,
        };
    }

    let cart_weight = compute_cart_weight(items, Some(f64::from(carrier.volumetric_divisor)));
    let billable = billable_weight(&cart_weight, carrier.calculation_type);
    debug!(
        carrier = %carrier.id,
        actual = cart_weight.actual,
        volumetric = cart_weight.volumetric,
        billable,
        "computed cart weight"
    );

    match lookup_rate(carrier, billable) {
        Some(cost) => QuoteOutcome::Priced(Quote {
            carrier_id: carrier.id.clone(),
            carrier_name: carrier.name.clone(),
            cart_weight,
            billable_weight: billable,
            cost,
        }),
        None => QuoteOutcome::NoRate {
            carrier_id: carrier.id.clone(),
            cart_weight,
            billable_weight: billable,
        },
    }
}

/// Price a cart for one carrier, `None` when the carrier cannot ship it
pub fn quote_carrier(carrier: &Carrier, items: &[CartItem]) -> Option<Quote> {
    evaluate_carrier(carrier, items).into_quote()
}

/// Plain-text summary of a quoting run
pub fn generate_quote_report(outcomes: &[QuoteOutcome]) -> String {
    let priced: Vec<&Quote> = outcomes
        .iter()
        .filter_map(|o| match o {
            QuoteOutcome::Priced(q) => Some(q),
            _ => None,
        })
        .collect();

    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("                 Shipping Quote                   \n");
    report.push_str("==================================================\n\n");
    report.push_str(&format!("  Carriers checked:   {}\n", outcomes.len()));
    report.push_str(&format!("  Carriers available: {}\n", priced.len()));
    if let Some(cheapest) = priced.iter().min_by(|a, b| a.cost.total_cmp(&b.cost)) {
        report.push_str(&format!(
            "  Cheapest:           {} ({:.2})\n",
            cheapest.carrier_name, cheapest.cost
        ));
    }
    report.push('\n');

    if !priced.is_empty() {
        report.push_str(&format!(
            "{:<20} {:>10} {:>10} {:>10} {:>10}\n",
            "Carrier", "Actual", "Volumetric", "Billable", "Cost"
        ));
        report.push_str("-".repeat(64).as_str());
        report.push('\n');
        for quote in &priced {
            report.push_str(&format!(
                "{:<20} {:>8.2}kg {:>8.2}kg {:>8.2}kg {:>10.2}\n",
                truncate_str(&quote.carrier_name, 19),
                quote.cart_weight.actual,
                quote.cart_weight.volumetric,
                quote.billable_weight,
                quote.cost
            ));
        }
        report.push('\n');
    }

    let unavailable: Vec<_> = outcomes.iter().filter(|o| o.reason().is_some()).collect();
    if !unavailable.is_empty() {
        report.push_str("Unavailable:\n");
        for outcome in unavailable {
            report.push_str(&format!(
                "  {:<18} {}\n",
                truncate_str(outcome.carrier_id(), 17),
                outcome.reason().unwrap_or_default()
            ));
        }
        report.push('\n');
    }

    report.push_str("==================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackship_types::{CalculationType, DimensionLimits, RateBracket};

    fn standard_carrier() -> Carrier {
        Carrier::new("carrier_1", "Standard Carrier")
            .with_limits(DimensionLimits {
                length_max: 150.0,
                width_max: 100.0,
                height_max: 100.0,
                girth_max: 300.0,
            })
            .with_rates(vec![
                RateBracket::new(0.0, 5.0, 10.0),
                RateBracket::new(5.0, 10.0, 15.0),
                RateBracket::new(10.0, 20.0, 20.0),
            ])
    }

    #[test]
    fn test_quote_uses_higher_weight() {
        // actual 3 x 2.5 = 7.5, volumetric 1.12
        let items = vec![CartItem::new(20.0, 20.0, 10.0, 2.5, 3).stackable(2.0)];
        let quote = quote_carrier(&standard_carrier(), &items).unwrap();
        assert!((quote.billable_weight - 7.5).abs() < 0.001);
        assert!((quote.cost - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_volumetric_policy_prices_bulk() {
        // 60 x 50 x 40 / 5000 = 24 kg volumetric, over every bracket
        let items = vec![CartItem::new(60.0, 50.0, 40.0, 1.0, 1)];
        let carrier = standard_carrier().with_calculation_type(CalculationType::Volumetric);
        let outcome = evaluate_carrier(&carrier, &items);
        assert!(matches!(outcome, QuoteOutcome::NoRate { .. }));

        let carrier = carrier.with_divisor(8000);
        // 15 kg at divisor 8000
        let quote = quote_carrier(&carrier, &items).unwrap();
        assert!((quote.cost - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_disabled_carrier_has_no_quote() {
        let items = vec![CartItem::new(20.0, 20.0, 10.0, 1.0, 1)];
        let outcome = evaluate_carrier(&standard_carrier().disabled(), &items);
        assert_eq!(
            outcome,
            QuoteOutcome::Disabled {
                carrier_id: "carrier_1".to_string()
            }
        );
    }

    #[test]
    fn test_oversized_item_has_no_quote() {
        let items = vec![CartItem::new(200.0, 20.0, 10.0, 1.0, 1).with_name("Ladder")];
        let outcome = evaluate_carrier(&standard_carrier(), &items);
        match &outcome {
            QuoteOutcome::ExceedsLimits { violations, .. } => {
                assert_eq!(violations[0].item, "Ladder");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert!(outcome.reason().unwrap().contains("length"));
    }

    #[test]
    fn test_no_rates_has_no_quote() {
        let carrier = Carrier::new("bare", "Bare");
        let items = vec![CartItem::new(20.0, 20.0, 10.0, 1.0, 1)];
        assert!(quote_carrier(&carrier, &items).is_none());
    }

    #[test]
    fn test_generate_report() {
        let items = vec![CartItem::new(20.0, 20.0, 10.0, 2.5, 3).stackable(2.0)];
        let outcomes = vec![
            evaluate_carrier(&standard_carrier(), &items),
            evaluate_carrier(&Carrier::new("bare", "Bare"), &items),
        ];
        let report = generate_quote_report(&outcomes);
        assert!(report.contains("Shipping Quote"));
        assert!(report.contains("Standard Carrier"));
        assert!(report.contains("Carriers available: 1"));
        assert!(report.contains("no rate bracket covers 7.50 kg"));
    }
}
