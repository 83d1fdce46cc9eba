//! Step gating, the async uniqueness probe and submission hand-off
//!
//! `Next` and `Submit` are split into a request phase and an apply phase
//! so the UI task can hold the backend await between them. A request that
//! hands out a check or job latches the wizard busy; further requests
//! return `Busy` until the matching apply runs, which is what keeps a
//! double-pressed key from issuing duplicate backend calls.

use crate::backend::{BackendError, RecordStore};

use super::field::FieldId;
use super::form::WizardForm;
use super::rules;
use super::schema::{ApplicationType, WizardKind};
use super::submit::{self, SubmissionJob};
use super::value::FieldValue;

const ESTABLISHMENTS: &str = "establishments";

/// Outcome of asking to leave the current step
#[derive(Debug)]
pub enum NextRequest {
    /// A check or submission is already in flight
    Busy,
    /// Validation failed; errors are attached to the form
    Rejected,
    /// Moved to the next step
    Advanced,
    /// Local validation passed; run this probe and feed the result to
    /// [`Wizard::apply_check`]
    Check(UniquenessCheck),
}

/// Outcome of applying a finished uniqueness probe
#[derive(Debug)]
pub enum NextOutcome {
    Advanced,
    /// Conflict errors are attached; the step did not change
    Conflicts,
    /// The probe itself failed; the form is untouched and retry is allowed
    Backend(BackendError),
    /// The form was reset while the probe was in flight; nothing applied
    Stale,
}

/// Outcome of asking to submit from the terminal step
#[derive(Debug)]
pub enum SubmitRequest {
    Busy,
    /// Submission is only offered on the final step
    NotLastStep,
    /// Full re-validation failed; the wizard jumped to the earliest
    /// step with an error
    Invalid,
    Job(SubmissionJob),
}

/// Whether closing needs a discard confirmation first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelRequest {
    Close,
    Confirm,
}

#[derive(Debug, Clone, Copy)]
struct Probe {
    field: FieldId,
    column: &'static str,
}

const UNIQUE_PROBES: [Probe; 2] = [
    Probe {
        field: FieldId::BusinessName,
        column: "name",
    },
    Probe {
        field: FieldId::DtiCertificateNo,
        column: "dti_number",
    },
];

/// A pending uniqueness lookup, detached from the wizard so the caller
/// can await it without holding the wizard borrowed
#[derive(Debug)]
pub struct UniquenessCheck {
    generation: u64,
    values: Vec<(Probe, String)>,
}

/// What the probe found, tagged with the generation it was built against
#[derive(Debug)]
pub struct UniquenessReport {
    generation: u64,
    conflicts: Vec<FieldId>,
}

impl UniquenessCheck {
    /// Query every probed column. Conflicts for all probed fields are
    /// collected in one pass so the user sees them together.
    pub async fn run(self, records: &dyn RecordStore) -> Result<UniquenessReport, BackendError> {
        let mut conflicts = Vec::new();
        for (probe, value) in &self.values {
            if records.exists(ESTABLISHMENTS, probe.column, value).await? {
                conflicts.push(probe.field);
            }
        }
        Ok(UniquenessReport {
            generation: self.generation,
            conflicts,
        })
    }
}

fn conflict_message(field: FieldId) -> &'static str {
    match field {
        FieldId::DtiCertificateNo => "This DTI Certificate Number is already registered",
        _ => "This business name is already registered",
    }
}

/// One open wizard: the form plus step/field navigation and the busy
/// latch around the two async boundaries
#[derive(Debug)]
pub struct Wizard {
    pub form: WizardForm,
    active: usize,
    busy: bool,
}

impl Wizard {
    pub fn registration() -> Self {
        Self {
            form: WizardForm::new(WizardKind::Registration),
            active: 0,
            busy: false,
        }
    }

    /// Registration pre-filled from an unregistered listing. Seeded
    /// values stay exempt from uniqueness conflicts until edited.
    pub fn registration_seeded(business_name: &str, dti_number: &str) -> Self {
        let mut wizard = Self::registration();
        wizard
            .form
            .seed(FieldId::BusinessName, FieldValue::text(business_name));
        wizard
            .form
            .seed(FieldId::DtiCertificateNo, FieldValue::text(dti_number));
        wizard
    }

    pub fn application(ty: ApplicationType, establishment_id: String) -> Self {
        let mut form = WizardForm::new(WizardKind::Application(ty));
        form.set_establishment(establishment_id);
        Self {
            form,
            active: 0,
            busy: false,
        }
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn title(&self) -> &'static str {
        self.form.kind().title()
    }

    /// Currently highlighted field, clamped to the visible set
    pub fn active_field(&self) -> Option<FieldId> {
        let fields = self.form.visible_fields();
        if fields.is_empty() {
            return None;
        }
        let index = self.active.min(fields.len() - 1);
        fields.get(index).copied()
    }

    pub fn next_field(&mut self) {
        let count = self.form.visible_fields().len();
        if count > 0 {
            self.active = (self.active.min(count - 1) + 1) % count;
        }
    }

    pub fn prev_field(&mut self) {
        let count = self.form.visible_fields().len();
        if count > 0 {
            let current = self.active.min(count - 1);
            self.active = if current == 0 { count - 1 } else { current - 1 };
        }
    }

    /// Validate the current step and either advance, reject, or hand out
    /// the uniqueness probe the step requires
    pub fn request_next(&mut self) -> NextRequest {
        if self.busy {
            return NextRequest::Busy;
        }
        let Some(step) = self.form.kind().step(self.form.step()) else {
            return NextRequest::Rejected;
        };
        for field in step.fields {
            self.form.clear_error(*field);
        }
        let failures = rules::validate_fields(step.fields, &self.form);
        if !failures.is_empty() {
            for (field, message) in failures {
                self.form.set_error(field, message);
            }
            return NextRequest::Rejected;
        }
        if step.checks_uniqueness {
            let values: Vec<(Probe, String)> = UNIQUE_PROBES
                .iter()
                .filter(|p| !self.form.is_seeded_value(p.field))
                .map(|p| (*p, self.form.text(p.field).trim().to_string()))
                .collect();
            if !values.is_empty() {
                self.busy = true;
                return NextRequest::Check(UniquenessCheck {
                    generation: self.form.generation(),
                    values,
                });
            }
        }
        self.advance();
        NextRequest::Advanced
    }

    /// Feed a finished probe back in. Conflicts pin errors on their
    /// fields and keep the step; a failed probe keeps the form intact so
    /// the user can retry.
    pub fn apply_check(
        &mut self,
        result: Result<UniquenessReport, BackendError>,
    ) -> NextOutcome {
        if !self.busy {
            return NextOutcome::Stale;
        }
        self.busy = false;
        match result {
            Ok(report) => {
                if report.generation != self.form.generation() {
                    return NextOutcome::Stale;
                }
                if report.conflicts.is_empty() {
                    self.advance();
                    return NextOutcome::Advanced;
                }
                for field in report.conflicts {
                    self.form.set_error(field, conflict_message(field).to_string());
                }
                NextOutcome::Conflicts
            }
            Err(err) => NextOutcome::Backend(err),
        }
    }

    fn advance(&mut self) {
        self.form.set_step(self.form.step() + 1);
        self.active = 0;
    }

    /// Go back one step. Never validates, never mutates values, never
    /// clears errors.
    pub fn back(&mut self) {
        if self.busy {
            return;
        }
        let step = self.form.step();
        if step > 1 {
            self.form.set_step(step - 1);
            self.active = 0;
        }
    }

    /// Whether closing now should prompt for discard confirmation
    pub fn request_cancel(&self) -> CancelRequest {
        if self.form.dirty() && !self.form.on_last_step() {
            CancelRequest::Confirm
        } else {
            CancelRequest::Close
        }
    }

    /// User confirmed the discard prompt
    pub fn confirm_discard(&mut self) {
        self.form.reset();
        self.busy = false;
        self.active = 0;
    }

    /// Re-validate everything and hand out the assembled submission.
    /// On failure the wizard jumps to the earliest step with an error.
    pub fn request_submit(&mut self) -> SubmitRequest {
        if self.busy {
            return SubmitRequest::Busy;
        }
        if !self.form.on_last_step() {
            return SubmitRequest::NotLastStep;
        }
        let all_fields: Vec<FieldId> = self
            .form
            .kind()
            .steps()
            .iter()
            .flat_map(|s| s.fields)
            .copied()
            .collect();
        for field in &all_fields {
            self.form.clear_error(*field);
        }
        let failures = rules::validate_fields(&all_fields, &self.form);
        if !failures.is_empty() {
            let earliest = failures
                .iter()
                .filter_map(|(field, _)| self.step_owning(*field))
                .min();
            for (field, message) in failures {
                self.form.set_error(field, message);
            }
            if let Some(step) = earliest {
                self.form.set_step(step);
                self.active = 0;
            }
            return SubmitRequest::Invalid;
        }
        self.busy = true;
        SubmitRequest::Job(submit::assemble(&self.form))
    }

    /// Close out a submission attempt. A success resets the form; a
    /// stale job (the form was reset while the call was in flight) is
    /// ignored entirely.
    pub fn finish_submit(&mut self, job: &SubmissionJob, succeeded: bool) {
        self.busy = false;
        if job.generation != self.form.generation() {
            return;
        }
        if succeeded {
            self.form.reset();
            self.active = 0;
        }
    }

    fn step_owning(&self, field: FieldId) -> Option<usize> {
        self.form
            .kind()
            .steps()
            .iter()
            .position(|s| s.fields.contains(&field))
            .map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockFileStore, MockRecordStore, MockSessionProvider};
    use crate::state::wizard::value::FileHandle;

    fn fill_valid_step_one(wizard: &mut Wizard) {
        let form = &mut wizard.form;
        form.set_value(FieldId::BusinessName, FieldValue::text("Acme Trading"));
        form.set_value(FieldId::DtiCertificateNo, FieldValue::text("1234567"));
        form.set_value(FieldId::BusinessType, FieldValue::text("Commercial"));
        form.set_value(
            FieldId::OccupancyType,
            FieldValue::text("Business Occupancy"),
        );
        form.attach_file(
            FieldId::DtiCertificateFile,
            FileHandle::new("/tmp/dti.pdf", 1024),
        );
    }

    fn fill_valid_step_two(wizard: &mut Wizard) {
        let form = &mut wizard.form;
        form.set_value(FieldId::Street, FieldValue::text("123 MacArthur Hwy"));
        form.set_value(FieldId::Barangay, FieldValue::text("Karuhatan"));
    }

    fn fill_valid_step_three(wizard: &mut Wizard) {
        let form = &mut wizard.form;
        form.set_value(FieldId::OwnerFirstName, FieldValue::text("Juan"));
        form.set_value(FieldId::OwnerLastName, FieldValue::text("Dela Cruz"));
        form.set_value(FieldId::OwnerEmail, FieldValue::text("juan@example.com"));
        form.set_value(FieldId::OwnerMobile, FieldValue::text("09123456789"));
        form.toggle_flag(FieldId::SameAsOwner);
    }

    fn no_conflict_records() -> MockRecordStore {
        let mut records = MockRecordStore::new();
        records.expect_exists().returning(|_, _, _| Ok(false));
        records
    }

    mod step_gating {
        use super::*;

        #[test]
        fn test_empty_required_fields_block_the_step() {
            let mut wizard = Wizard::registration();
            assert!(matches!(wizard.request_next(), NextRequest::Rejected));
            assert_eq!(wizard.form.step(), 1);
            assert!(wizard.form.error(FieldId::BusinessName).is_some());
            assert!(wizard.form.error(FieldId::DtiCertificateFile).is_some());
            // Fields of later steps are untouched
            assert!(wizard.form.error(FieldId::Street).is_none());
        }

        #[test]
        fn test_fixing_errors_clears_them_on_the_next_attempt() {
            let mut wizard = Wizard::registration();
            assert!(matches!(wizard.request_next(), NextRequest::Rejected));
            fill_valid_step_one(&mut wizard);
            // Leaving step 1 now hands out the uniqueness probe
            assert!(matches!(wizard.request_next(), NextRequest::Check(_)));
            assert!(wizard.form.error(FieldId::BusinessName).is_none());
        }

        #[test]
        fn test_back_never_mutates_values_or_errors() {
            let mut wizard = Wizard::registration_seeded("Acme Trading", "1234567");
            fill_valid_step_one(&mut wizard);
            assert!(matches!(wizard.request_next(), NextRequest::Advanced));

            wizard.form.set_error(FieldId::Street, "kept".to_string());
            wizard.form.set_value(FieldId::Street, FieldValue::text("Elm"));
            wizard.back();

            assert_eq!(wizard.form.step(), 1);
            assert_eq!(wizard.form.text(FieldId::Street), "Elm");
            assert_eq!(wizard.form.error(FieldId::Street), Some("kept"));
        }

        #[test]
        fn test_back_stops_at_the_first_step() {
            let mut wizard = Wizard::registration();
            wizard.back();
            assert_eq!(wizard.form.step(), 1);
        }

        #[test]
        fn test_application_step_one_requires_type_fields() {
            let mut wizard =
                Wizard::application(ApplicationType::Fsec, "est-1".to_string());
            fill_valid_step_three(&mut wizard);
            assert!(matches!(wizard.request_next(), NextRequest::Rejected));
            assert_eq!(
                wizard.form.error(FieldId::ContractorName),
                Some("Contractor name is required")
            );

            wizard
                .form
                .set_value(FieldId::ContractorName, FieldValue::text("BuildSafe"));
            assert!(matches!(wizard.request_next(), NextRequest::Advanced));
            assert_eq!(wizard.form.step(), 2);
        }
    }

    mod uniqueness {
        use super::*;

        #[tokio::test]
        async fn test_clean_probe_advances() {
            let mut wizard = Wizard::registration();
            fill_valid_step_one(&mut wizard);
            let check = match wizard.request_next() {
                NextRequest::Check(check) => check,
                other => panic!("expected check, got {other:?}"),
            };
            assert!(wizard.busy());

            let mut records = MockRecordStore::new();
            records
                .expect_exists()
                .withf(|c, col, v| c == "establishments" && col == "name" && v == "Acme Trading")
                .times(1)
                .returning(|_, _, _| Ok(false));
            records
                .expect_exists()
                .withf(|c, col, v| c == "establishments" && col == "dti_number" && v == "1234567")
                .times(1)
                .returning(|_, _, _| Ok(false));

            let result = check.run(&records).await;
            assert!(matches!(wizard.apply_check(result), NextOutcome::Advanced));
            assert_eq!(wizard.form.step(), 2);
            assert!(!wizard.busy());
        }

        #[tokio::test]
        async fn test_name_conflict_pins_error_and_keeps_step() {
            let mut wizard = Wizard::registration();
            fill_valid_step_one(&mut wizard);
            wizard
                .form
                .set_value(FieldId::BusinessName, FieldValue::text("Acme"));
            let check = match wizard.request_next() {
                NextRequest::Check(check) => check,
                other => panic!("expected check, got {other:?}"),
            };

            let mut records = MockRecordStore::new();
            records
                .expect_exists()
                .withf(|_, col, v| col == "name" && v == "Acme")
                .times(1)
                .returning(|_, _, _| Ok(true));
            records
                .expect_exists()
                .withf(|_, col, _| col == "dti_number")
                .times(1)
                .returning(|_, _, _| Ok(false));

            let result = check.run(&records).await;
            assert!(matches!(wizard.apply_check(result), NextOutcome::Conflicts));
            assert_eq!(wizard.form.step(), 1);
            assert_eq!(
                wizard.form.error(FieldId::BusinessName),
                Some("This business name is already registered")
            );
            assert!(wizard.form.error(FieldId::DtiCertificateNo).is_none());
        }

        #[test]
        fn test_seeded_values_skip_the_probe_entirely() {
            let mut wizard = Wizard::registration_seeded("Acme Trading", "1234567");
            fill_valid_step_one(&mut wizard);
            // Seeds still hold their original values, so no probe is needed
            assert!(matches!(wizard.request_next(), NextRequest::Advanced));
            assert_eq!(wizard.form.step(), 2);
        }

        #[test]
        fn test_edited_seed_is_probed_again() {
            let mut wizard = Wizard::registration_seeded("Acme Trading", "1234567");
            fill_valid_step_one(&mut wizard);
            wizard.form.input_char(FieldId::BusinessName, '2');
            match wizard.request_next() {
                NextRequest::Check(check) => {
                    // Only the edited field is probed
                    assert_eq!(check.values.len(), 1);
                    assert_eq!(check.values[0].0.field, FieldId::BusinessName);
                }
                other => panic!("expected check, got {other:?}"),
            }
        }

        #[test]
        fn test_double_next_hands_out_exactly_one_check() {
            let mut wizard = Wizard::registration();
            fill_valid_step_one(&mut wizard);
            assert!(matches!(wizard.request_next(), NextRequest::Check(_)));
            assert!(matches!(wizard.request_next(), NextRequest::Busy));
            assert!(matches!(wizard.request_next(), NextRequest::Busy));
        }

        #[tokio::test]
        async fn test_probe_failure_keeps_the_form_and_allows_retry() {
            let mut wizard = Wizard::registration();
            fill_valid_step_one(&mut wizard);
            let check = match wizard.request_next() {
                NextRequest::Check(check) => check,
                other => panic!("expected check, got {other:?}"),
            };

            let mut records = MockRecordStore::new();
            records.expect_exists().returning(|_, _, _| {
                Err(BackendError::Api {
                    status: 503,
                    message: "down".to_string(),
                })
            });

            let result = check.run(&records).await;
            assert!(matches!(wizard.apply_check(result), NextOutcome::Backend(_)));
            assert_eq!(wizard.form.step(), 1);
            assert!(!wizard.busy());
            // The retry hands out a fresh check
            assert!(matches!(wizard.request_next(), NextRequest::Check(_)));
        }

        #[tokio::test]
        async fn test_stale_probe_after_reset_is_discarded() {
            let mut wizard = Wizard::registration();
            fill_valid_step_one(&mut wizard);
            let check = match wizard.request_next() {
                NextRequest::Check(check) => check,
                other => panic!("expected check, got {other:?}"),
            };
            wizard.confirm_discard();

            let records = no_conflict_records();
            let result = check.run(&records).await;
            assert!(matches!(wizard.apply_check(result), NextOutcome::Stale));
            assert_eq!(wizard.form.step(), 1);
            assert!(wizard.form.errors().is_empty());
        }
    }

    mod cancelling {
        use super::*;

        #[test]
        fn test_clean_form_closes_without_prompt() {
            let wizard = Wizard::registration();
            assert_eq!(wizard.request_cancel(), CancelRequest::Close);
        }

        #[test]
        fn test_dirty_form_prompts_for_discard() {
            let mut wizard = Wizard::registration();
            wizard.form.input_char(FieldId::BusinessName, 'A');
            assert_eq!(wizard.request_cancel(), CancelRequest::Confirm);
        }

        #[test]
        fn test_terminal_step_closes_without_prompt() {
            let mut wizard = Wizard::registration();
            wizard.form.input_char(FieldId::BusinessName, 'A');
            wizard.form.set_step(4);
            assert_eq!(wizard.request_cancel(), CancelRequest::Close);
        }

        #[test]
        fn test_confirm_discard_resets_everything() {
            let mut wizard = Wizard::registration_seeded("Acme Trading", "1234567");
            fill_valid_step_one(&mut wizard);
            assert!(matches!(wizard.request_next(), NextRequest::Advanced));
            wizard.confirm_discard();

            assert_eq!(wizard.form.step(), 1);
            assert!(!wizard.form.dirty());
            assert_eq!(wizard.form.text(FieldId::BusinessName), "Acme Trading");
            assert_eq!(wizard.form.text(FieldId::BusinessType), "");
        }
    }

    mod submitting {
        use super::*;

        fn wizard_on_terminal_step() -> Wizard {
            let mut wizard = Wizard::registration_seeded("Acme Trading", "1234567");
            fill_valid_step_one(&mut wizard);
            assert!(matches!(wizard.request_next(), NextRequest::Advanced));
            fill_valid_step_two(&mut wizard);
            assert!(matches!(wizard.request_next(), NextRequest::Advanced));
            fill_valid_step_three(&mut wizard);
            assert!(matches!(wizard.request_next(), NextRequest::Advanced));
            wizard.form.toggle_flag(FieldId::Certify);
            wizard
        }

        #[test]
        fn test_submit_only_from_the_last_step() {
            let mut wizard = Wizard::registration();
            assert!(matches!(wizard.request_submit(), SubmitRequest::NotLastStep));
        }

        #[test]
        fn test_full_revalidation_jumps_to_the_earliest_broken_step() {
            let mut wizard = wizard_on_terminal_step();
            wizard
                .form
                .set_value(FieldId::Street, FieldValue::text(""));
            assert!(matches!(wizard.request_submit(), SubmitRequest::Invalid));
            assert_eq!(wizard.form.step(), 2);
            assert!(wizard.form.error(FieldId::Street).is_some());
        }

        #[tokio::test]
        async fn test_happy_path_submits_once_and_resets() {
            let mut wizard = wizard_on_terminal_step();
            let job = match wizard.request_submit() {
                SubmitRequest::Job(job) => job,
                other => panic!("expected job, got {other:?}"),
            };
            assert!(matches!(wizard.request_submit(), SubmitRequest::Busy));

            let mut records = MockRecordStore::new();
            records
                .expect_create()
                .times(1)
                .returning(|_, record| {
                    Ok(record["id"].as_str().unwrap_or_default().to_string())
                });
            let mut files = MockFileStore::new();
            files
                .expect_upload()
                .times(1)
                .returning(|_, _, _, _| Ok("stored/path".to_string()));
            let mut session = MockSessionProvider::new();
            session
                .expect_current_user()
                .returning(|| Some("user-1".to_string()));

            let outcome = job.run(&records, &files, &session).await.unwrap();
            wizard.finish_submit(&job, true);

            assert_eq!(outcome.record_id(), job.record_id);
            assert!(!wizard.busy());
            assert_eq!(wizard.form.step(), 1);
            assert!(!wizard.form.dirty());
            assert_eq!(wizard.form.text(FieldId::Street), "");
            // Seeds survive the reset
            assert_eq!(wizard.form.text(FieldId::BusinessName), "Acme Trading");
        }

        #[test]
        fn test_failed_submission_keeps_the_form_for_retry() {
            let mut wizard = wizard_on_terminal_step();
            let job = match wizard.request_submit() {
                SubmitRequest::Job(job) => job,
                other => panic!("expected job, got {other:?}"),
            };
            wizard.finish_submit(&job, false);

            assert!(!wizard.busy());
            assert!(wizard.form.on_last_step());
            assert_eq!(wizard.form.text(FieldId::Street), "123 MacArthur Hwy");
            // The retry hands out a fresh job
            assert!(matches!(wizard.request_submit(), SubmitRequest::Job(_)));
        }

        #[test]
        fn test_stale_job_after_reset_is_ignored() {
            let mut wizard = wizard_on_terminal_step();
            let job = match wizard.request_submit() {
                SubmitRequest::Job(job) => job,
                other => panic!("expected job, got {other:?}"),
            };
            wizard.confirm_discard();
            let generation = wizard.form.generation();

            wizard.finish_submit(&job, true);
            assert_eq!(wizard.form.generation(), generation);
            assert!(!wizard.busy());
        }
    }

    mod field_navigation {
        use super::*;

        #[test]
        fn test_field_cycling_wraps() {
            let mut wizard = Wizard::registration();
            let count = wizard.form.visible_fields().len();
            assert_eq!(wizard.active_field(), Some(FieldId::BusinessName));
            for _ in 0..count {
                wizard.next_field();
            }
            assert_eq!(wizard.active_field(), Some(FieldId::BusinessName));
            wizard.prev_field();
            assert_eq!(wizard.active_field(), Some(FieldId::DtiCertificateFile));
        }

        #[test]
        fn test_active_field_clamps_when_visibility_shrinks() {
            let mut wizard = Wizard::registration();
            wizard.form.set_step(3);
            // Walk onto a representative field, then hide them all
            for _ in 0..10 {
                wizard.next_field();
            }
            wizard.form.toggle_flag(FieldId::SameAsOwner);
            assert!(wizard.active_field().is_some());
        }
    }
}
