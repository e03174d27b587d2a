//! Search command handler

use super::draft::{load_catalog, open_store, resolve_draft_path};
use nu_board::config::Config;
use nu_board::core::selection::{exclude_placed, search_request, SubjectSearch};
use nu_board::info;
use std::path::Path;

/// Search the catalog, leaving out subjects already placed in the draft
///
/// # Errors
/// Returns a user-facing message if the draft or catalog cannot be loaded
pub fn run(
    draft_arg: &Path,
    query: &str,
    department: Option<String>,
    config: &Config,
) -> Result<(), String> {
    let path = resolve_draft_path(draft_arg, config);
    let store = open_store(&path, config)?;
    let catalog = load_catalog(config)?;

    let mut request = search_request(query, store.draft());
    request.department_id = department;
    // The request already excludes placed ids; filter again for collaborators that ignore it
    let results = exclude_placed(catalog.search(&request), store.draft());
    info!("Search '{}' returned {} subject(s)", request.query, results.len());

    if results.is_empty() {
        println!("No matching subjects.");
        return Ok(());
    }
    for subject in &results {
        println!("{:<12} {} ({:.1} cr)", subject.id, subject.name, subject.credits);
    }
    Ok(())
}
