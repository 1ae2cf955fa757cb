// Non-interactive contract proof runner (no TUI).
//
// Drives the whole wizard flow through the state machine with a seeded file
// source and a manually-ticked simulator, checking every contract along the
// way. Writes a deterministic transcript under `Migration_Wizard_Log/`.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::catalog::{self, FileSource, MockFileSource};
use crate::migration::MigrationSimulator;
use crate::models::selection::{SelectionError, SelectionState, WizardStep};
use crate::pagination::{self, FILES_PER_PAGE};

/// Transcript artifact name, resolved under the log folder by the caller.
pub const TRANSCRIPT_FILE: &str = "flow_contract_smoke_transcript.log";

/// Run the full wizard contract and write the transcript to `transcript_path`.
pub async fn flow_contract_smoke(transcript_path: &Path) -> Result<()> {
    let mut transcript = String::new();
    let mut push = |line: String| {
        transcript.push_str(&line);
        transcript.push('\n');
    };

    push("FLOW_CONTRACT_SMOKE begin".to_string());

    // 1) Catalogs are fixed.
    let objects = catalog::source_objects();
    let orgs = catalog::destination_orgs();
    push(format!(
        "catalogs objects={} destinations={}",
        objects.len(),
        orgs.len()
    ));
    if objects.len() != 8 || orgs.len() != 4 {
        bail!("catalog shape changed: {} objects, {} orgs", objects.len(), orgs.len());
    }

    // 2) Select an object; the previous selection (none) clears and the step advances.
    let mut state = SelectionState::new();
    state
        .select_object("Account")
        .context("select_object(Account) must succeed from the initial step")?;
    push(format!(
        "select_object api_name=Account step={:?}",
        state.current_step()
    ));

    // 3) Fetch the related files (seeded: deterministic shape, zero delay).
    let source = MockFileSource::instant(Some(47));
    let batch = source.fetch("Account").await?;
    push(format!("fetch batch_len={}", batch.len()));
    if batch.len() != catalog::RELATED_FILE_COUNT {
        bail!("expected {} records, got {}", catalog::RELATED_FILE_COUNT, batch.len());
    }

    // 4) Pagination contract: 47 records on page size 25 is 2 pages.
    let total = pagination::total_pages(batch.len(), FILES_PER_PAGE);
    push(format!("pagination total_pages={total}"));
    if total != 2 {
        bail!("expected 2 pages, got {total}");
    }
    state.set_page(99, total);
    if state.current_page() != 2 {
        bail!("set_page must clamp to the last page");
    }
    state.set_page(1, total);

    // 5) Cross-page selection persists.
    let page1_ids: Vec<&str> = pagination::page_slice(&batch, 1, FILES_PER_PAGE)
        .iter()
        .map(|f| f.id.as_str())
        .collect();
    state.set_page_selected(&page1_ids, true);
    state.set_page(2, total);
    if state.selected_file_count() != FILES_PER_PAGE {
        bail!("page-1 selection must survive navigating to page 2");
    }
    state.set_page_selected(&page1_ids, false);
    push("page_selection toggled on and off, other pages untouched".to_string());

    // 6) Confirming nothing is rejected; confirming two ids advances.
    match state.confirm_file_selection(Vec::new(), &batch) {
        Err(SelectionError::EmptySelection) => {
            push("confirm_empty rejected as expected".to_string())
        }
        other => bail!("empty confirm must be rejected, got {other:?}"),
    }
    state.confirm_file_selection(
        vec!["file_1".to_string(), "file_3".to_string()],
        &batch,
    )?;
    push(format!(
        "confirm_file_selection count={} step={:?}",
        state.selected_file_count(),
        state.current_step()
    ));

    // 7) Maintenance org rejected; active sandbox accepted.
    match state.start_migration("sandbox-org-3") {
        Err(SelectionError::DestinationUnavailable { id, status }) => {
            push(format!("start_rejected id={id} status={status}"))
        }
        other => bail!("maintenance org must be rejected, got {other:?}"),
    }
    let prod = catalog::find_destination("prod-org-1")
        .context("prod-org-1 must exist in the destination catalog")?;
    if !SelectionState::destination_warning(&prod) {
        bail!("production org must surface the warning condition");
    }
    push("production_warning surfaced for prod-org-1".to_string());

    state.start_migration("sandbox-org-1")?;
    push(format!(
        "start_migration destination=sandbox-org-1 step={:?}",
        state.current_step()
    ));
    if state.current_step() != WizardStep::Complete {
        bail!("start_migration must land in the Complete step");
    }

    // 8) Ten ticks of the simulator drive progress to exactly 100 and hold it.
    let mut simulator = MigrationSimulator::default();
    for _ in 0..10 {
        state.record_progress(simulator.tick());
    }
    push(format!("progress after 10 ticks = {}", state.migration_progress()));
    if state.migration_progress() != 100 {
        bail!("progress must be exactly 100 after 10 ticks");
    }
    state.record_progress(simulator.tick());
    if state.migration_progress() != 100 {
        bail!("progress must stay at 100 once complete");
    }

    push("FLOW_CONTRACT_SMOKE end".to_string());

    if let Some(parent) = transcript_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(transcript_path, transcript).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_smoke_passes_and_writes_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TRANSCRIPT_FILE);

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(flow_contract_smoke(&path)).unwrap();

        let transcript = std::fs::read_to_string(&path).unwrap();
        assert!(transcript.starts_with("FLOW_CONTRACT_SMOKE begin"));
        assert!(transcript.contains("fetch batch_len=47"));
        assert!(transcript.contains("start_rejected id=sandbox-org-3 status=maintenance"));
        assert!(transcript.contains("progress after 10 ticks = 100"));
        assert!(transcript.trim_end().ends_with("FLOW_CONTRACT_SMOKE end"));
    }
}
