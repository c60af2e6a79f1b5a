//! Cart file loaders (JSON or CSV)

use std::path::Path;

use serde::Deserialize;
use stackship_domain::model::CartItem;
use stackship_types::{Error, Result};
use tracing::{debug, warn};

/// JSON carts are either a bare list of items or an object with `items`
#[derive(Deserialize)]
#[serde(untagged)]
enum CartFile {
    Items(Vec<CartItem>),
    Package { items: Vec<CartItem> },
}

/// One CSV row
///
/// Expected header:
/// name, length, width, height, weight, quantity, stackable, additional_height
#[derive(Debug, Deserialize)]
struct CartRow {
    name: Option<String>,
    length: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    weight: Option<f64>,
    quantity: Option<u32>,
    stackable: Option<String>,
    additional_height: Option<f64>,
}

/// Load cart items from a `.json` or `.csv` file
pub fn load_cart(path: &Path) -> Result<Vec<CartItem>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let items = match extension.as_deref() {
        Some("json") => load_cart_from_json(&std::fs::read_to_string(path)?)?,
        Some("csv") => load_cart_from_csv(std::fs::File::open(path)?)?,
        _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
    };
    debug!(path = %path.display(), count = items.len(), "loaded cart");
    Ok(items)
}

pub fn load_cart_from_json(content: &str) -> Result<Vec<CartItem>> {
    let items = match serde_json::from_str::<CartFile>(content)? {
        CartFile::Items(items) | CartFile::Package { items } => items,
    };
    Ok(items
        .into_iter()
        .filter(|item| {
            if item.quantity == 0 {
                warn!(item = %item.display_name(), "skipping cart line with zero quantity");
            }
            item.quantity > 0
        })
        .collect())
}

pub fn load_cart_from_csv<R: std::io::Read>(reader: R) -> Result<Vec<CartItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut items = Vec::new();
    for row in reader.deserialize::<CartRow>() {
        let row = row?;
        let quantity = row.quantity.unwrap_or(1);
        if quantity == 0 {
            warn!(item = row.name.as_deref().unwrap_or(""), "skipping cart line with zero quantity");
            continue;
        }
        items.push(CartItem {
            product_id: None,
            name: row.name.filter(|n| !n.is_empty()),
            length: row.length,
            width: row.width,
            height: row.height,
            weight: row.weight,
            quantity,
            is_stackable: row.stackable.as_deref().map(parse_flag).unwrap_or(false),
            additional_height_per_unit: row.additional_height.unwrap_or(0.0),
        });
    }
    Ok(items)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}
