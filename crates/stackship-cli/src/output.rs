//! Output formatting module

use stackship_domain::model::{CartItem, CartWeight};
use stackship_domain::service::{compute_item_volumetric_weight, QuoteOutcome};
use stackship_types::Carrier;

pub fn print_carrier_table(carriers: &[Carrier]) {
    if carriers.is_empty() {
        println!("No carriers configured. Run 'stackable-shipping carriers init' to add the default.");
        return;
    }

    println!("Carriers ({}):", carriers.len());
    println!(
        "{:<16} {:<24} {:<8} {:<11} {:>8} {:>6}",
        "ID", "Name", "Enabled", "Weight", "Divisor", "Rates"
    );
    println!("{}", "-".repeat(78));
    for carrier in carriers {
        println!(
            "{:<16} {:<24} {:<8} {:<11} {:>8} {:>6}",
            carrier.id,
            carrier.name,
            if carrier.enabled { "yes" } else { "no" },
            carrier.calculation_type,
            carrier.volumetric_divisor,
            carrier.rates.len()
        );
    }
}

pub fn print_carrier_detail(carrier: &Carrier) {
    println!("\nCarrier");
    println!("=======");
    println!("ID:              {}", carrier.id);
    println!("Name:            {}", carrier.name);
    if !carrier.description.is_empty() {
        println!("Description:     {}", carrier.description);
    }
    println!("Enabled:         {}", if carrier.enabled { "yes" } else { "no" });
    println!("Billable weight: {}", carrier.calculation_type.label());
    println!("Divisor:         {}", carrier.volumetric_divisor);

    let limits = &carrier.dimension_limits;
    println!("\n--- Dimension Limits (cm) ---");
    println!("Length:          {}", limit_label(limits.length_max));
    println!("Width:           {}", limit_label(limits.width_max));
    println!("Height:          {}", limit_label(limits.height_max));
    println!("Girth:           {}", limit_label(limits.girth_max));

    println!("\n--- Rates ---");
    if carrier.rates.is_empty() {
        println!("(none)");
    } else {
        println!("{:>10} {:>10} {:>10}", "From kg", "To kg", "Price");
        for rate in carrier.sorted_rates() {
            println!(
                "{:>10.2} {:>10.2} {:>10.2}",
                rate.weight_min, rate.weight_max, rate.price
            );
        }
    }
    for (previous, next) in carrier.overlapping_rates() {
        println!(
            "Warning: bracket starting at {:.2} overlaps bracket ending at {:.2}",
            next.weight_min, previous.weight_max
        );
    }
}

fn limit_label(limit: f64) -> String {
    if limit > 0.0 {
        format!("{:.1}", limit)
    } else {
        "unlimited".to_string()
    }
}

pub fn print_cart_weight(items: &[CartItem], total: &CartWeight, divisor: f64) {
    println!("\nCart Weight (divisor {})", divisor);
    println!("{:<20} {:>4} {:>10} {:>12} {:>12}", "Item", "Qty", "Stackable", "Actual kg", "Vol. kg");
    println!("{}", "-".repeat(62));
    for item in items {
        let actual = item
            .weight
            .map(|w| format!("{:.2}", w * f64::from(item.quantity)))
            .unwrap_or_else(|| "-".to_string());
        let volumetric = compute_item_volumetric_weight(item, Some(divisor))
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<20} {:>4} {:>10} {:>12} {:>12}",
            item.display_name(),
            item.quantity,
            if item.is_stackable { "yes" } else { "no" },
            actual,
            volumetric
        );
    }
    println!("{}", "-".repeat(62));
    println!("Actual:          {:.2} kg", total.actual);
    println!("Volumetric:      {:.2} kg", total.volumetric);
}

pub fn print_quote_outcome(carrier_id: &str, outcome: Option<&QuoteOutcome>) {
    match outcome {
        None => println!("Carrier '{}': unavailable (carrier not found)", carrier_id),
        Some(QuoteOutcome::Priced(quote)) => {
            println!("\nQuote");
            println!("=====");
            println!("Carrier:         {} ({})", quote.carrier_name, quote.carrier_id);
            println!("Actual:          {:.2} kg", quote.cart_weight.actual);
            println!("Volumetric:      {:.2} kg", quote.cart_weight.volumetric);
            println!("Billable:        {:.2} kg", quote.billable_weight);
            println!("Cost:            {:.2}", quote.cost);
        }
        Some(other) => println!(
            "Carrier '{}': unavailable ({})",
            carrier_id,
            other.reason().unwrap_or_default()
        ),
    }
}
