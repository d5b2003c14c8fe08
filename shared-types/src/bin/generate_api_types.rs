use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for the extension popup
    let mut types = Vec::new();

    // Resolver types
    types.push(clean_type(PatternClass::export_to_string()?));
    types.push(clean_type(Candidate::export_to_string()?));

    // Page types
    types.push(clean_type(TextSource::export_to_string()?));
    types.push(clean_type(PageText::export_to_string()?));
    types.push(clean_type(PageExtraction::export_to_string()?));

    // Calendar event types
    types.push(clean_type(ReminderMethod::export_to_string()?));
    types.push(clean_type(ReminderOverride::export_to_string()?));
    types.push(clean_type(EventReminders::export_to_string()?));
    types.push(clean_type(EventDate::export_to_string()?));
    types.push(clean_type(CalendarEvent::export_to_string()?));

    let output_dir = Path::new("../extension/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

/// Strips ts-rs headers and per-file imports; every type lands in one module.
fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let result = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n", result.trim())
}
