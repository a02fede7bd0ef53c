//! Rendering a derivation for the terminal.

use anyhow::Result;
use sbe_core::{Actor, Derivation, Severity};

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with a per-item slot table
    Summary,
    /// Derivation and derived item fields as JSON
    Json,
}

pub fn print_report(actor: &Actor, derivation: &Derivation, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Summary => print_summary(actor, derivation),
        OutputFormat::Json => {
            let items: Vec<_> = actor
                .items
                .iter()
                .map(|item| {
                    serde_json::json!({
                        "id": item.id,
                        "name": item.name,
                        "slots": item.slots,
                        "totalSlots": item.total_slots,
                    })
                })
                .collect();
            let report = serde_json::json!({
                "actor": actor.name,
                "derivation": derivation,
                "items": items,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn print_summary(actor: &Actor, derivation: &Derivation) {
    println!("{} ({:?})", actor.name, actor.kind);

    match &derivation.inventory {
        Some(state) => println!("  Inventory: {state}"),
        None => println!("  Inventory: not tracked"),
    }
    if let Some(speed) = derivation.movement {
        println!("  Movement:  {speed}");
    }
    let changed = if derivation.modifier_changed {
        " (changed)"
    } else {
        ""
    };
    println!("  Modifier:  {:+}{changed}", derivation.modifier);

    println!();
    println!("  {:<24} {:>6} {:>6}", "Item", "Slots", "Total");
    for item in &actor.items {
        let slots = item.slots.map_or("-".to_string(), |s| s.to_string());
        let total = item.total_slots.map_or("-".to_string(), |s| s.to_string());
        let marker = if item.equipped { "*" } else { " " };
        let indent = if item.is_contained() { "  " } else { "" };
        println!(
            "{marker} {:<24} {slots:>6} {total:>6}",
            format!("{indent}{}", item.name)
        );
    }

    for notice in &derivation.notices {
        let label = match notice.severity() {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        eprintln!("{label}: {notice}");
    }
}
