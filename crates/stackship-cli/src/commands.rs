//! Command handlers

use crate::cli::{CarrierCommands, Cli, Commands, OutputFormat, TaxStatus};
use crate::output::{
    print_cart_weight, print_carrier_detail, print_carrier_table, print_quote_outcome,
};
use stackship_app::carrier_admin::{delete_carrier, save_carrier, seed_default_carriers, CarrierForm};
use stackship_app::config::Config;
use stackship_app::repository::open_carrier_store;
use stackship_app::shipping_method::StackableShippingMethod;
use stackship_domain::repository::CarrierStore;
use stackship_domain::service::{compute_cart_weight, generate_quote_report};
use stackship_infra::cart_loader::load_cart;
use stackship_infra::carrier_loader::load_carriers;
use stackship_types::{Error, Result};
use std::path::PathBuf;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref store_dir) = cli.store_dir {
        config.store_dir = Some(store_dir.clone());
    }
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Carriers { action } => match action {
            CarrierCommands::List { enabled } => cmd_carriers_list(&config, enabled, output_format),
            CarrierCommands::Show { id } => cmd_carriers_show(&config, &id, output_format),
            CarrierCommands::Save { file } => cmd_carriers_save(&config, file),
            CarrierCommands::Import { file, dry_run } => cmd_carriers_import(&config, file, dry_run),
            CarrierCommands::Delete { id } => cmd_carriers_delete(&config, &id),
            CarrierCommands::Init => cmd_carriers_init(&config),
        },

        Commands::Weight { cart, divisor } => {
            let divisor = divisor.unwrap_or(config.default_divisor);
            cmd_weight(cart, divisor, output_format)
        }

        Commands::Quote { cart, carrier } => cmd_quote(&config, cart, carrier, output_format),

        Commands::Config {
            show,
            set_store_dir,
            set_output,
            set_divisor,
            set_title,
            set_tax_status,
            reset,
        } => cmd_config(ConfigUpdate {
            show,
            set_store_dir,
            set_output,
            set_divisor,
            set_title,
            set_tax_status,
            reset,
        }),
    }
}

fn cmd_carriers_list(config: &Config, enabled_only: bool, output_format: OutputFormat) -> Result<()> {
    let store = open_carrier_store(config)?;
    let carriers = if enabled_only {
        store.list_enabled()?
    } else {
        store.list()?
    };

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&carriers)?),
        OutputFormat::Table => print_carrier_table(&carriers),
    }
    Ok(())
}

fn cmd_carriers_show(config: &Config, id: &str, output_format: OutputFormat) -> Result<()> {
    let store = open_carrier_store(config)?;
    let carrier = store
        .get(id)?
        .ok_or_else(|| Error::CarrierNotFound(id.to_string()))?;

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&carrier)?),
        OutputFormat::Table => print_carrier_detail(&carrier),
    }
    Ok(())
}

fn cmd_carriers_save(config: &Config, file: PathBuf) -> Result<()> {
    if !file.exists() {
        return Err(Error::FileNotFound(file.display().to_string()));
    }
    let content = std::fs::read_to_string(&file)?;
    let form: CarrierForm = serde_json::from_str(&content)?;

    let mut store = open_carrier_store(config)?;
    let existed = match form.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => store.get(id)?.is_some(),
        _ => false,
    };
    let carrier = save_carrier(&mut store, form)?;

    println!(
        "Carrier {}: {} ({})",
        if existed { "updated" } else { "created" },
        carrier.name,
        carrier.id
    );
    Ok(())
}

fn cmd_carriers_import(config: &Config, file: PathBuf, dry_run: bool) -> Result<()> {
    let carriers = load_carriers(&file)?;
    println!("Loaded {} carriers from {}", carriers.len(), file.display());

    // Validate everything before the first write
    let normalized: Vec<_> = carriers
        .iter()
        .map(|c| CarrierForm::from_carrier(c).into_carrier())
        .collect::<Result<_>>()?;

    if dry_run {
        for carrier in &normalized {
            println!("  {} ({}) - {} rates", carrier.name, carrier.id, carrier.rates.len());
        }
        println!("Dry run: nothing saved");
        return Ok(());
    }

    let mut store = open_carrier_store(config)?;
    for carrier in &normalized {
        save_carrier(&mut store, CarrierForm::from_carrier(carrier))?;
        println!("  Saved {} ({})", carrier.name, carrier.id);
    }
    println!("Imported {} carriers", normalized.len());
    Ok(())
}

fn cmd_carriers_delete(config: &Config, id: &str) -> Result<()> {
    let mut store = open_carrier_store(config)?;
    delete_carrier(&mut store, id)?;
    println!("Carrier deleted: {}", id);
    Ok(())
}

fn cmd_carriers_init(config: &Config) -> Result<()> {
    let mut store = open_carrier_store(config)?;
    if seed_default_carriers(&mut store)? {
        println!("Installed default carriers in {}", store.path().display());
    } else {
        println!("Carriers already configured; nothing to do");
    }
    Ok(())
}

fn cmd_weight(cart: PathBuf, divisor: u32, output_format: OutputFormat) -> Result<()> {
    if divisor == 0 {
        return Err(Error::Validation("divisor must be positive".to_string()));
    }
    let items = load_cart(&cart)?;
    let divisor = f64::from(divisor);
    let total = compute_cart_weight(&items, Some(divisor));

    match output_format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "divisor": divisor,
                "actual": total.actual,
                "volumetric": total.volumetric,
                "items": items.len(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Table => print_cart_weight(&items, &total, divisor),
    }
    Ok(())
}

fn cmd_quote(
    config: &Config,
    cart: PathBuf,
    carrier: Option<String>,
    output_format: OutputFormat,
) -> Result<()> {
    let items = load_cart(&cart)?;
    if items.is_empty() {
        println!("Cart is empty; no shipping rates");
        return Ok(());
    }

    let method = StackableShippingMethod::new(open_carrier_store(config)?)
        .with_title(config.method_title.clone())
        .with_tax_status(config.tax_status);

    match carrier {
        Some(carrier_id) => {
            let outcome = method.quote_carrier(&carrier_id, &items)?;
            match output_format {
                OutputFormat::Json => {
                    let json = match &outcome {
                        Some(outcome) => serde_json::to_value(outcome)?,
                        None => serde_json::json!({
                            "status": "not_found",
                            "carrier_id": carrier_id,
                        }),
                    };
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
                OutputFormat::Table => print_quote_outcome(&carrier_id, outcome.as_ref()),
            }
        }
        None => {
            let outcomes = method.quote_all(&items)?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
                OutputFormat::Table => {
                    println!("{} (tax: {})", method.title(), method.tax_status());
                    println!("{}", generate_quote_report(&outcomes));
                }
            }
        }
    }
    Ok(())
}

/// Flags of the `config` command
struct ConfigUpdate {
    show: bool,
    set_store_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_divisor: Option<u32>,
    set_title: Option<String>,
    set_tax_status: Option<TaxStatus>,
    reset: bool,
}

fn cmd_config(update: ConfigUpdate) -> Result<()> {
    let ConfigUpdate {
        show,
        set_store_dir,
        set_output,
        set_divisor,
        set_title,
        set_tax_status,
        reset,
    } = update;

    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(store_dir) = set_store_dir {
        config.store_dir = Some(store_dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(divisor) = set_divisor {
        if divisor == 0 {
            return Err(Error::Validation("divisor must be positive".to_string()));
        }
        config.default_divisor = divisor;
        modified = true;
    }

    if let Some(title) = set_title {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("method title must not be empty".to_string()));
        }
        config.method_title = title.to_string();
        modified = true;
    }

    if let Some(tax_status) = set_tax_status {
        config.tax_status = tax_status;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
