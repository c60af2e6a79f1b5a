//! Weight-bracket price lookup

use stackship_types::Carrier;
use tracing::debug;

/// Price of the first bracket (sorted by `weight_min`) containing `weight`
///
/// Weights below the lowest bracket, above the highest one, or in a gap
/// between brackets have no rate. Nothing is extrapolated.
pub fn lookup_rate(carrier: &Carrier, weight: f64) -> Option<f64> {
    let rates = carrier.sorted_rates();

    if let Some(bracket) = rates.iter().find(|r| r.contains(weight)) {
        return Some(bracket.price);
    }

    match rates.last() {
        Some(last) if weight > last.weight_max => {
            debug!(carrier = %carrier.id, weight, max = last.weight_max, "weight above highest bracket");
        }
        Some(_) => debug!(carrier = %carrier.id, weight, "weight outside every bracket"),
        None => debug!(carrier = %carrier.id, "carrier has no rates"),
    }
    None
}
