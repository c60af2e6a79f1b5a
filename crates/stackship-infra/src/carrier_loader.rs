//! Carrier list import from JSON or TOML files

use std::fs;
use std::path::Path;

use serde::Deserialize;
use stackship_types::{Carrier, Error, Result};

/// Container for parsing `[[carriers]]` TOML files
#[derive(Debug, Deserialize)]
struct CarrierFile {
    #[serde(default)]
    carriers: Vec<Carrier>,
}

/// Load carriers from a `.json` (array) or `.toml` (`[[carriers]]`) file
pub fn load_carriers(path: &Path) -> Result<Vec<Carrier>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_carriers_from_json(&content),
        Some("toml") => load_carriers_from_toml(&content),
        _ => Err(Error::UnsupportedFormat(path.display().to_string())),
    }
}

pub fn load_carriers_from_json(content: &str) -> Result<Vec<Carrier>> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_carriers_from_toml(content: &str) -> Result<Vec<Carrier>> {
    let file: CarrierFile = toml::from_str(content)?;
    Ok(file.carriers)
}
