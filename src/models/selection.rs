// Wizard selection state machine.
//
// All wizard-level mutation goes through the named transition methods below so the
// flow is deterministic and unit-testable without any rendering layer. Steps only
// move forward: ObjectSelection -> FileSelection -> MigrationTarget -> Complete.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::catalog;
use crate::models::records::{DestinationTarget, FileRecord};
use crate::pagination;

/// One discrete stage of the linear wizard flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ObjectSelection,
    FileSelection,
    MigrationTarget,
    Complete,
}

impl WizardStep {
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::ObjectSelection => "Select Object",
            WizardStep::FileSelection => "Choose Files",
            WizardStep::MigrationTarget => "Migration Target",
            WizardStep::Complete => "Complete",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            WizardStep::ObjectSelection => 0,
            WizardStep::FileSelection => 1,
            WizardStep::MigrationTarget => 2,
            WizardStep::Complete => 3,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("`{operation}` is not valid while in the {step:?} step")]
    WrongStep {
        operation: &'static str,
        step: WizardStep,
    },
    #[error("unknown source object `{0}`")]
    UnknownObject(String),
    #[error("no files selected")]
    EmptySelection,
    #[error("unknown destination org `{0}`")]
    UnknownDestination(String),
    #[error("destination org `{id}` is under {status}")]
    DestinationUnavailable { id: String, status: String },
}

/// The root mutable aggregate for one wizard session.
///
/// `selected_file_ids` is an ordered set: membership checks are what correctness
/// needs, and the ordering keeps display and transcripts stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    current_step: WizardStep,
    selected_object_api_name: Option<String>,
    selected_file_ids: BTreeSet<String>,
    selected_destination_id: Option<String>,
    current_page: usize,
    migration_progress: u8,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            current_step: WizardStep::ObjectSelection,
            selected_object_api_name: None,
            selected_file_ids: BTreeSet::new(),
            selected_destination_id: None,
            current_page: 1,
            migration_progress: 0,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn selected_object_api_name(&self) -> Option<&str> {
        self.selected_object_api_name.as_deref()
    }

    pub fn selected_file_ids(&self) -> &BTreeSet<String> {
        &self.selected_file_ids
    }

    pub fn selected_file_count(&self) -> usize {
        self.selected_file_ids.len()
    }

    pub fn selected_destination_id(&self) -> Option<&str> {
        self.selected_destination_id.as_deref()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn migration_progress(&self) -> u8 {
        self.migration_progress
    }

    fn require_step(
        &self,
        operation: &'static str,
        expected: WizardStep,
    ) -> Result<(), SelectionError> {
        let step = self.current_step();
        if step != expected {
            return Err(SelectionError::WrongStep { operation, step });
        }
        Ok(())
    }

    /// Choose the source object and advance to file selection.
    ///
    /// Any previous file selection belongs to a different batch and is cleared,
    /// and the page resets to 1.
    pub fn select_object(&mut self, api_name: &str) -> Result<(), SelectionError> {
        self.require_step("select_object", WizardStep::ObjectSelection)?;
        if catalog::find_object(api_name).is_none() {
            return Err(SelectionError::UnknownObject(api_name.to_string()));
        }

        self.selected_object_api_name = Some(api_name.to_string());
        self.selected_file_ids.clear();
        self.current_page = 1;
        self.current_step = WizardStep::FileSelection;
        Ok(())
    }

    /// Confirm the file selection and advance to the migration-target step.
    ///
    /// Ids not present in `batch` are stale catalog references; they are dropped
    /// rather than surfaced as an error. An empty surviving selection is rejected
    /// and the state is left untouched.
    pub fn confirm_file_selection<I>(
        &mut self,
        ids: I,
        batch: &[FileRecord],
    ) -> Result<(), SelectionError>
    where
        I: IntoIterator<Item = String>,
    {
        self.require_step("confirm_file_selection", WizardStep::FileSelection)?;

        let confirmed: BTreeSet<String> = ids
            .into_iter()
            .filter(|id| batch.iter().any(|f| &f.id == id))
            .collect();
        if confirmed.is_empty() {
            return Err(SelectionError::EmptySelection);
        }

        self.selected_file_ids = confirmed;
        self.current_step = WizardStep::MigrationTarget;
        Ok(())
    }

    /// Start the migration into `destination_id` and enter the terminal step.
    pub fn start_migration(&mut self, destination_id: &str) -> Result<(), SelectionError> {
        self.require_step("start_migration", WizardStep::MigrationTarget)?;

        let Some(org) = catalog::find_destination(destination_id) else {
            return Err(SelectionError::UnknownDestination(destination_id.to_string()));
        };
        if !org.is_selectable() {
            return Err(SelectionError::DestinationUnavailable {
                id: org.id.clone(),
                status: org.status.as_str().to_string(),
            });
        }

        self.selected_destination_id = Some(org.id);
        self.migration_progress = 0;
        self.current_step = WizardStep::Complete;
        Ok(())
    }

    /// Toggle one file id in or out of the selection (file-selection step only;
    /// elsewhere this is a no-op since the controls are not shown).
    pub fn toggle_file(&mut self, id: &str) {
        if self.current_step() != WizardStep::FileSelection {
            return;
        }
        if !self.selected_file_ids.remove(id) {
            self.selected_file_ids.insert(id.to_string());
        }
    }

    pub fn is_file_selected(&self, id: &str) -> bool {
        self.selected_file_ids.contains(id)
    }

    /// "Select all on this page": add or remove exactly `visible_ids`.
    /// Selections on other pages are preserved independently.
    pub fn set_page_selected(&mut self, visible_ids: &[&str], checked: bool) {
        if self.current_step() != WizardStep::FileSelection {
            return;
        }
        for id in visible_ids {
            if checked {
                self.selected_file_ids.insert((*id).to_string());
            } else {
                self.selected_file_ids.remove(*id);
            }
        }
    }

    /// Whether every visible id is currently selected (drives the page checkbox).
    pub fn page_fully_selected(&self, visible_ids: &[&str]) -> bool {
        !visible_ids.is_empty()
            && visible_ids.iter().all(|id| self.selected_file_ids.contains(*id))
    }

    /// Clamp-move to the requested page. Never errors.
    pub fn set_page(&mut self, requested: usize, total_pages: usize) {
        self.current_page = pagination::clamp_page(requested, total_pages);
    }

    /// Drop selected ids that no longer exist in the current batch.
    /// Stale references are a non-fatal self-healing condition.
    pub fn retain_known_files(&mut self, batch: &[FileRecord]) {
        self.selected_file_ids
            .retain(|id| batch.iter().any(|f| &f.id == id));
    }

    /// The Production advisory condition for the presentation layer: true when
    /// `destination_id` names an active Production org.
    pub fn destination_warning(destination: &DestinationTarget) -> bool {
        destination.org_type == crate::models::records::OrgType::Production
    }

    /// Record one simulator tick. Saturates at exactly 100 and stays there.
    pub fn record_progress(&mut self, progress: u8) {
        if self.current_step() != WizardStep::Complete {
            return;
        }
        let capped = progress.min(100);
        if capped > self.migration_progress {
            self.migration_progress = capped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, FileSource, MockFileSource};

    fn batch_for(object: &str) -> Vec<FileRecord> {
        let source = MockFileSource::instant(Some(7));
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(source.fetch(object)).unwrap()
    }

    // -------------------------------------------------------------------------
    // A) Step transitions
    // -------------------------------------------------------------------------

    #[test]
    fn select_object_advances_and_clears_previous_selection() {
        for object in catalog::source_objects() {
            let mut state = SelectionState::new();
            assert_eq!(state.current_step(), WizardStep::ObjectSelection);

            state.select_object(&object.api_name).unwrap();
            assert_eq!(state.current_step(), WizardStep::FileSelection);
            assert_eq!(
                state.selected_object_api_name(),
                Some(object.api_name.as_str())
            );
            assert_eq!(state.selected_file_count(), 0, "selection must start empty");
            assert_eq!(state.current_page(), 1, "page must reset");
        }
    }

    #[test]
    fn select_object_rejects_unknown_api_name() {
        let mut state = SelectionState::new();
        let err = state.select_object("NotAnObject__x").unwrap_err();
        assert_eq!(err, SelectionError::UnknownObject("NotAnObject__x".into()));
        assert_eq!(
            state.current_step(),
            WizardStep::ObjectSelection,
            "rejected transition must not change state"
        );
    }

    #[test]
    fn select_object_rejected_outside_object_step() {
        let mut state = SelectionState::new();
        state.select_object("Account").unwrap();

        let err = state.select_object("Contact").unwrap_err();
        assert!(
            matches!(err, SelectionError::WrongStep { .. }),
            "forward-only flow: got {err:?}"
        );
        assert_eq!(state.selected_object_api_name(), Some("Account"));
    }

    #[test]
    fn confirm_with_empty_selection_is_rejected() {
        let mut state = SelectionState::new();
        state.select_object("Account").unwrap();
        let batch = batch_for("Account");

        let err = state
            .confirm_file_selection(Vec::new(), &batch)
            .unwrap_err();
        assert_eq!(err, SelectionError::EmptySelection);
        assert_eq!(state.current_step(), WizardStep::FileSelection);
    }

    #[test]
    fn confirm_stores_ids_and_advances() {
        let mut state = SelectionState::new();
        state.select_object("Account").unwrap();
        let batch = batch_for("Account");

        state
            .confirm_file_selection(
                vec!["file_1".to_string(), "file_3".to_string()],
                &batch,
            )
            .unwrap();
        assert_eq!(state.current_step(), WizardStep::MigrationTarget);
        assert!(state.is_file_selected("file_1"));
        assert!(state.is_file_selected("file_3"));
        assert_eq!(state.selected_file_count(), 2);
    }

    #[test]
    fn confirm_drops_stale_ids_instead_of_failing() {
        let mut state = SelectionState::new();
        state.select_object("Account").unwrap();
        let batch = batch_for("Account");

        // "file_999" is not in a 47-record batch; it must self-heal away.
        state
            .confirm_file_selection(
                vec!["file_2".to_string(), "file_999".to_string()],
                &batch,
            )
            .unwrap();
        assert_eq!(state.selected_file_count(), 1);
        assert!(!state.is_file_selected("file_999"));
    }

    #[test]
    fn confirm_with_only_stale_ids_is_rejected() {
        let mut state = SelectionState::new();
        state.select_object("Account").unwrap();
        let batch = batch_for("Account");

        let err = state
            .confirm_file_selection(vec!["file_999".to_string()], &batch)
            .unwrap_err();
        assert_eq!(err, SelectionError::EmptySelection);
        assert_eq!(state.current_step(), WizardStep::FileSelection);
    }

    #[test]
    fn start_migration_rejects_maintenance_org() {
        let mut state = SelectionState::new();
        state.select_object("Account").unwrap();
        let batch = batch_for("Account");
        state
            .confirm_file_selection(vec!["file_1".to_string()], &batch)
            .unwrap();

        // sandbox-org-3 is the QA sandbox under maintenance.
        let err = state.start_migration("sandbox-org-3").unwrap_err();
        assert!(
            matches!(err, SelectionError::DestinationUnavailable { .. }),
            "got {err:?}"
        );
        assert_eq!(state.current_step(), WizardStep::MigrationTarget);
        assert_eq!(state.selected_destination_id(), None);
    }

    #[test]
    fn start_migration_rejects_unknown_org() {
        let mut state = SelectionState::new();
        state.select_object("Account").unwrap();
        let batch = batch_for("Account");
        state
            .confirm_file_selection(vec!["file_1".to_string()], &batch)
            .unwrap();

        let err = state.start_migration("no-such-org").unwrap_err();
        assert_eq!(err, SelectionError::UnknownDestination("no-such-org".into()));
    }

    #[test]
    fn start_migration_into_active_sandbox_completes_the_flow() {
        let mut state = SelectionState::new();
        state.select_object("Account").unwrap();
        let batch = batch_for("Account");
        assert_eq!(batch.len(), 47);

        state
            .confirm_file_selection(
                vec!["file_1".to_string(), "file_3".to_string()],
                &batch,
            )
            .unwrap();
        state.start_migration("sandbox-org-1").unwrap();

        assert_eq!(state.current_step(), WizardStep::Complete);
        assert_eq!(state.selected_destination_id(), Some("sandbox-org-1"));
        assert_eq!(state.migration_progress(), 0);
    }

    #[test]
    fn production_org_surfaces_the_warning_condition() {
        let prod = catalog::find_destination("prod-org-1").unwrap();
        assert!(
            SelectionState::destination_warning(&prod),
            "prod-org-1 is Production and must warn"
        );
        let sandbox = catalog::find_destination("sandbox-org-1").unwrap();
        assert!(!SelectionState::destination_warning(&sandbox));
    }

    // -------------------------------------------------------------------------
    // B) Selection bookkeeping
    // -------------------------------------------------------------------------

    #[test]
    fn page_selections_survive_page_navigation() {
        let mut state = SelectionState::new();
        state.select_object("Contact").unwrap();
        let batch = batch_for("Contact");

        let page1 = crate::pagination::page_slice(&batch, 1, 25);
        let page1_ids: Vec<&str> = page1.iter().map(|f| f.id.as_str()).collect();
        state.set_page_selected(&page1_ids, true);
        assert_eq!(state.selected_file_count(), 25);

        state.set_page(2, 2);
        let page2 = crate::pagination::page_slice(&batch, 2, 25);
        let page2_ids: Vec<&str> = page2.iter().map(|f| f.id.as_str()).collect();
        state.set_page_selected(&page2_ids, true);
        assert_eq!(
            state.selected_file_count(),
            47,
            "selection is the union across pages"
        );

        // Unchecking page 2 must leave page 1 intact.
        state.set_page_selected(&page2_ids, false);
        assert_eq!(state.selected_file_count(), 25);
        for id in &page1_ids {
            assert!(state.is_file_selected(id), "page-1 id {id} must survive");
        }
    }

    #[test]
    fn toggle_file_flips_membership() {
        let mut state = SelectionState::new();
        state.select_object("Case").unwrap();

        state.toggle_file("file_5");
        assert!(state.is_file_selected("file_5"));
        state.toggle_file("file_5");
        assert!(!state.is_file_selected("file_5"));
    }

    #[test]
    fn page_fully_selected_tracks_visible_ids_only() {
        let mut state = SelectionState::new();
        state.select_object("Lead").unwrap();

        let visible = ["file_1", "file_2"];
        assert!(!state.page_fully_selected(&visible));
        state.set_page_selected(&visible, true);
        assert!(state.page_fully_selected(&visible));
        state.toggle_file("file_2");
        assert!(!state.page_fully_selected(&visible));
        assert!(!state.page_fully_selected(&[]), "empty page is never 'all selected'");
    }

    #[test]
    fn retain_known_files_drops_stale_references() {
        let mut state = SelectionState::new();
        state.select_object("Task").unwrap();
        let batch = batch_for("Task");

        state.toggle_file("file_1");
        state.toggle_file("file_999");
        state.retain_known_files(&batch);
        assert!(state.is_file_selected("file_1"));
        assert!(!state.is_file_selected("file_999"));
    }

    #[test]
    fn set_page_clamps_into_valid_range() {
        let mut state = SelectionState::new();
        state.select_object("Event").unwrap();

        state.set_page(99, 2);
        assert_eq!(state.current_page(), 2);
        state.set_page(0, 2);
        assert_eq!(state.current_page(), 1);
        state.set_page(2, 2);
        assert_eq!(state.current_page(), 2);
    }

    // -------------------------------------------------------------------------
    // C) Progress bookkeeping
    // -------------------------------------------------------------------------

    #[test]
    fn record_progress_is_monotone_and_capped() {
        let mut state = SelectionState::new();
        state.select_object("Account").unwrap();
        let batch = batch_for("Account");
        state
            .confirm_file_selection(vec!["file_1".to_string()], &batch)
            .unwrap();
        state.start_migration("sandbox-org-2").unwrap();

        state.record_progress(30);
        assert_eq!(state.migration_progress(), 30);
        state.record_progress(20);
        assert_eq!(state.migration_progress(), 30, "progress never goes backwards");
        state.record_progress(120);
        assert_eq!(state.migration_progress(), 100, "progress is capped at 100");
    }

    #[test]
    fn record_progress_ignored_before_complete() {
        let mut state = SelectionState::new();
        state.record_progress(50);
        assert_eq!(state.migration_progress(), 0);
    }
}
