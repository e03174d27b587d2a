//! Export and import-summary command handlers

use super::draft::{open_store, resolve_draft_path};
use nu_board::config::Config;
use nu_board::core::payload::{ImportResponse, SavePayload, SubjectShape};
use nu_board::{error, info};
use std::fs;
use std::path::Path;

/// Write the save payload for a draft to a file, or stdout
///
/// # Errors
/// Returns a user-facing message if the draft cannot be loaded or the payload written
pub fn run(
    draft_arg: &Path,
    shape: SubjectShape,
    output: Option<&Path>,
    config: &Config,
) -> Result<(), String> {
    let path = resolve_draft_path(draft_arg, config);
    let store = open_store(&path, config)?;
    let json = SavePayload::from_draft(store.draft(), shape)
        .to_json()
        .map_err(|e| format!("✗ Failed to serialize payload: {e}"))?;

    match output {
        Some(out) => {
            fs::write(out, json).map_err(|e| {
                error!("Failed to write payload {}: {e}", out.display());
                format!("✗ Failed to write {}: {e}", out.display())
            })?;
            info!("Payload ({shape}) written to {}", out.display());
            println!("✓ Payload exported: {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Print the summary of a bulk-import response body
///
/// # Errors
/// Returns a user-facing message if the file cannot be read or parsed
pub fn run_import_summary(input_file: &Path) -> Result<(), String> {
    let body = fs::read_to_string(input_file)
        .map_err(|e| format!("✗ Failed to read {}: {e}", input_file.display()))?;
    let response = ImportResponse::from_json(&body)
        .map_err(|e| format!("✗ Failed to parse {}: {e}", input_file.display()))?;
    println!("{}", response.summary());
    if response.success {
        Ok(())
    } else {
        Err(String::new())
    }
}
