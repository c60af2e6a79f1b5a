use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::str::contains;
use tempfile::{tempdir, TempDir};

fn cli(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("stackable-shipping");
    cmd.env("STACKABLE_SHIPPING_CONFIG_DIR", temp.path().join("config"))
        .env("RUST_LOG", "error")
        .arg("--store-dir")
        .arg(temp.path().join("store"));
    cmd
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn stacked_cart(dir: &Path) -> PathBuf {
    // actual 3 x 1.0 = 3 kg, volumetric 20 x 20 x 14 / 5000 = 1.12 kg
    write_file(
        dir,
        "cart.json",
        r#"[{"name": "Bowl", "length": 20, "width": 20, "height": 10, "weight": 1.0,
             "quantity": 3, "is_stackable": true, "additional_height_per_unit": 2}]"#,
    )
}

fn init_store(temp: &TempDir) {
    cli(temp)
        .args(["carriers", "init"])
        .assert()
        .success()
        .stdout(contains("Installed default carriers"));
}

#[test]
fn init_seeds_once() {
    let temp = tempdir().expect("create temp dir");
    init_store(&temp);
    cli(&temp)
        .args(["carriers", "init"])
        .assert()
        .success()
        .stdout(contains("already configured"));
}

#[test]
fn lists_seeded_carrier() {
    let temp = tempdir().expect("create temp dir");
    init_store(&temp);
    cli(&temp)
        .args(["carriers", "list"])
        .assert()
        .success()
        .stdout(contains("Carriers (1):"))
        .stdout(contains("carrier_1"))
        .stdout(contains("Standard Carrier"))
        .stdout(contains("higher"));
}

#[test]
fn empty_store_lists_nothing() {
    let temp = tempdir().expect("create temp dir");
    cli(&temp)
        .args(["carriers", "list"])
        .assert()
        .success()
        .stdout(contains("No carriers configured"));
}

#[test]
fn saves_and_shows_carrier_as_json() {
    let temp = tempdir().expect("create temp dir");
    let form = write_file(
        temp.path(),
        "express.json",
        r#"{"id": "express", "name": "Express", "enabled": "yes",
            "calculation_type": "actual", "volumetric_divisor": "4000",
            "rates": [{"weight_min": "0", "weight_max": "2", "price": "7.5"},
                      {"weight_min": 2, "weight_max": 10}]}"#,
    );

    cli(&temp)
        .args(["carriers", "save"])
        .arg(&form)
        .assert()
        .success()
        .stdout(contains("Carrier created: Express (express)"));

    let output = cli(&temp)
        .args(["--format", "json", "carriers", "show", "express"])
        .output()
        .expect("run show");
    assert!(output.status.success());
    let carrier: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(carrier["calculation_type"], "actual");
    assert_eq!(carrier["volumetric_divisor"], 4000);
    assert_eq!(carrier["enabled"], true);
    assert_eq!(carrier["rates"].as_array().map(|r| r.len()), Some(1));

    cli(&temp)
        .args(["carriers", "save"])
        .arg(&form)
        .assert()
        .success()
        .stdout(contains("Carrier updated"));
}

#[test]
fn save_without_name_fails() {
    let temp = tempdir().expect("create temp dir");
    let form = write_file(temp.path(), "bad.json", r#"{"id": "nameless"}"#);
    cli(&temp)
        .args(["carriers", "save"])
        .arg(&form)
        .assert()
        .failure()
        .stderr(contains("carrier name is required"));
}

#[test]
fn delete_unknown_carrier_fails() {
    let temp = tempdir().expect("create temp dir");
    init_store(&temp);
    cli(&temp)
        .args(["carriers", "delete", "ghost"])
        .assert()
        .failure()
        .stderr(contains("Carrier not found: ghost"));

    cli(&temp)
        .args(["carriers", "delete", "carrier_1"])
        .assert()
        .success()
        .stdout(contains("Carrier deleted: carrier_1"));
}

#[test]
fn imports_toml_carriers() {
    let temp = tempdir().expect("create temp dir");
    let file = write_file(
        temp.path(),
        "carriers.toml",
        r#"
[[carriers]]
id = "freight"
name = "Freight"
enabled = true

[[carriers.rates]]
weight_min = 0.0
weight_max = 100.0
price = 40.0

[[carriers]]
id = "dormant"
name = "Dormant"
enabled = false
"#,
    );

    cli(&temp)
        .args(["carriers", "import"])
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("Imported 2 carriers"));

    cli(&temp)
        .args(["carriers", "list", "--enabled"])
        .assert()
        .success()
        .stdout(contains("Carriers (1):"))
        .stdout(contains("freight"));
}

#[test]
fn weight_reports_stacked_volume() {
    let temp = tempdir().expect("create temp dir");
    let cart = stacked_cart(temp.path());
    cli(&temp)
        .arg("weight")
        .arg(&cart)
        .assert()
        .success()
        .stdout(contains("Actual:          3.00 kg"))
        .stdout(contains("Volumetric:      1.12 kg"));
}

#[test]
fn weight_from_csv_cart() {
    let temp = tempdir().expect("create temp dir");
    let cart = write_file(
        temp.path(),
        "cart.csv",
        "name,length,width,height,weight,quantity,stackable,additional_height\n\
         Bowl,20,20,10,1.0,3,yes,2\n\
         Card,,,,0.1,5,no,\n",
    );
    cli(&temp)
        .args(["--format", "json", "weight"])
        .arg(&cart)
        .assert()
        .success()
        .stdout(contains("\"items\": 2"));
}

#[test]
fn quotes_all_enabled_carriers() {
    let temp = tempdir().expect("create temp dir");
    init_store(&temp);
    let cart = stacked_cart(temp.path());
    cli(&temp)
        .arg("quote")
        .arg(&cart)
        .assert()
        .success()
        .stdout(contains("Standard Shipping (tax: taxable)"))
        .stdout(contains("Shipping Quote"))
        .stdout(contains("Carriers available: 1"))
        .stdout(contains("Standard Carrier"));
}

#[test]
fn quote_single_carrier_json() {
    let temp = tempdir().expect("create temp dir");
    init_store(&temp);
    let cart = stacked_cart(temp.path());
    let output = cli(&temp)
        .args(["--format", "json", "quote", "--carrier", "carrier_1"])
        .arg(&cart)
        .output()
        .expect("run quote");
    assert!(output.status.success());
    let quote: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(quote["status"], "priced");
    assert_eq!(quote["cost"], 10.0);
    assert_eq!(quote["billable_weight"], 3.0);
}

#[test]
fn quote_over_highest_bracket_is_unavailable() {
    let temp = tempdir().expect("create temp dir");
    init_store(&temp);
    let cart = write_file(
        temp.path(),
        "heavy.json",
        r#"[{"name": "Anvil", "length": 30, "width": 20, "height": 20, "weight": 35}]"#,
    );
    cli(&temp)
        .args(["quote", "--carrier", "carrier_1"])
        .arg(&cart)
        .assert()
        .success()
        .stdout(contains("unavailable (no rate bracket covers 35.00 kg)"));
}

#[test]
fn quote_unknown_carrier_is_unavailable() {
    let temp = tempdir().expect("create temp dir");
    let cart = stacked_cart(temp.path());
    cli(&temp)
        .args(["quote", "--carrier", "ghost"])
        .arg(&cart)
        .assert()
        .success()
        .stdout(contains("Carrier 'ghost': unavailable (carrier not found)"));
}

#[test]
fn config_persists_output_format() {
    let temp = tempdir().expect("create temp dir");
    cli(&temp)
        .args(["config", "--set-output", "json"])
        .assert()
        .success()
        .stdout(contains("Configuration updated"));
    cli(&temp)
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(contains("Output format:   json"));
}

#[test]
fn configured_title_and_tax_status_head_the_quote() {
    let temp = tempdir().expect("create temp dir");
    init_store(&temp);
    cli(&temp)
        .args(["config", "--set-title", "Bulky goods", "--set-tax-status", "none"])
        .assert()
        .success()
        .stdout(contains("Configuration updated"));

    let cart = stacked_cart(temp.path());
    cli(&temp)
        .arg("quote")
        .arg(&cart)
        .assert()
        .success()
        .stdout(contains("Bulky goods (tax: none)"));
}

#[test]
fn weight_rejects_zero_divisor() {
    let temp = tempdir().expect("create temp dir");
    let cart = stacked_cart(temp.path());
    cli(&temp)
        .args(["weight", "--divisor", "0"])
        .arg(&cart)
        .assert()
        .failure()
        .stderr(contains("divisor must be positive"));
}

#[test]
fn weight_reports_custom_divisor() {
    let temp = tempdir().expect("create temp dir");
    let cart = stacked_cart(temp.path());
    // 20 x 20 x 14 / 4000 = 1.40
    cli(&temp)
        .args(["weight", "--divisor", "4000"])
        .arg(&cart)
        .assert()
        .success()
        .stdout(contains("divisor 4000"))
        .stdout(contains("Volumetric:      1.40 kg"));
}

#[test]
fn save_with_padded_id_reports_update() {
    let temp = tempdir().expect("create temp dir");
    let plain = write_file(temp.path(), "plain.json", r#"{"id": "express", "name": "Express"}"#);
    let padded = write_file(
        temp.path(),
        "padded.json",
        r#"{"id": "  express ", "name": "Express Plus"}"#,
    );

    cli(&temp)
        .args(["carriers", "save"])
        .arg(&plain)
        .assert()
        .success()
        .stdout(contains("Carrier created: Express (express)"));
    cli(&temp)
        .args(["carriers", "save"])
        .arg(&padded)
        .assert()
        .success()
        .stdout(contains("Carrier updated: Express Plus (express)"));
    cli(&temp)
        .args(["carriers", "list"])
        .assert()
        .success()
        .stdout(contains("Carriers (1):"));
}
