//! Terminal output of run summaries.

use crate::error::Result;
use crate::generate::{Summary, Variant};
use colored::Colorize;

const MIB: f64 = 1024.0 * 1024.0;

fn mib(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / MIB)
}

/// Summary as `(label, value)` pairs, in print order.
pub fn summary_lines(summary: &Summary) -> Vec<(&'static str, String)> {
    let mut lines = vec![("File", summary.file.display().to_string())];

    let size = match summary.target_bytes {
        Some(target) => format!("{} (target {})", mib(summary.bytes), mib(target)),
        None => mib(summary.bytes),
    };
    lines.push(("Size", size));
    lines.push(("Address objects", summary.address_objects.to_string()));

    let members = match (summary.src_members, summary.dst_members) {
        (Some(src), Some(dst)) => format!(" (src {src}, dst {dst})"),
        _ => String::new(),
    };
    let (rules_label, dg_label) = match summary.variant {
        Variant::Named => ("Security rules", "DG rules"),
        Variant::Massive => ("Shared rules", "DG rules"),
        Variant::Template => ("Shared pre-rule rules", "DG pre-rule rules"),
    };
    lines.push((rules_label, format!("{}{members}", summary.rules)));
    if let Some(dg_rules) = summary.dg_rules {
        lines.push((dg_label, format!("{dg_rules}{members}")));
    }

    lines.push(("Time", format!("{:.2}s", summary.elapsed_secs)));
    lines
}

/// Print the summary to stdout, as text or JSON.
pub fn print_summary(summary: &Summary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("{}", "Done.".green().bold());
    for (label, value) in summary_lines(summary) {
        println!("{}: {value}", label.bold());
    }
    Ok(())
}
