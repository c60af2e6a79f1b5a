//! Carrier dimension limits

use serde::{Deserialize, Serialize};
use stackship_types::DimensionLimits;

use crate::model::CartItem;

/// One measurement of an item that is over a carrier limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionViolation {
    pub item: String,
    /// "length", "width", "height" or "girth"
    pub dimension: String,
    pub value: f64,
    pub limit: f64,
}

impl std::fmt::Display for DimensionViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} {:.1} cm exceeds {:.1} cm",
            self.item, self.dimension, self.value, self.limit
        )
    }
}

/// Every limit the packed item breaks
///
/// The height checked is the packed (stacked) height of the whole line and
/// girth is length + 2 x width + 2 x height. Zero limits are unlimited.
/// Items without usable dimensions cannot be measured and pass.
pub fn check_item_limits(item: &CartItem, limits: &DimensionLimits) -> Vec<DimensionViolation> {
    let (Some((length, width, _)), Some(height)) = (item.dimensions(), item.effective_height())
    else {
        return Vec::new();
    };
    let girth = length + 2.0 * width + 2.0 * height;

    [
        ("length", length, limits.length_max),
        ("width", width, limits.width_max),
        ("height", height, limits.height_max),
        ("girth", girth, limits.girth_max),
    ]
    .into_iter()
    .filter(|(_, value, limit)| *limit > 0.0 && value > limit)
    .map(|(dimension, value, limit)| DimensionViolation {
        item: item.display_name(),
        dimension: dimension.to_string(),
        value,
        limit,
    })
    .collect()
}

pub fn item_fits_limits(item: &CartItem, limits: &DimensionLimits) -> bool {
    check_item_limits(item, limits).is_empty()
}
