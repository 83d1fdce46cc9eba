//! Mutable form record shared by every wizard step

use std::collections::BTreeMap;

use super::field::{FieldId, FieldKind};
use super::mirror::{self, MirrorLink};
use super::schema::{self, ApplicationSubtype, WizardKind};
use super::value::{FieldValue, FileHandle, FileValue};

static EMPTY_VALUE: FieldValue = FieldValue::Text(String::new());
static NO_FILE: FileValue = FileValue::None;

/// All wizard data: field values, per-field errors, step position,
/// dirty tracking and the owner/representative mirror link.
#[derive(Debug, Clone)]
pub struct WizardForm {
    kind: WizardKind,
    values: BTreeMap<FieldId, FieldValue>,
    errors: BTreeMap<FieldId, String>,
    seeds: BTreeMap<FieldId, FieldValue>,
    mirror: MirrorLink,
    step: usize,
    dirty: bool,
    generation: u64,
    establishment_id: Option<String>,
}

impl WizardForm {
    pub fn new(kind: WizardKind) -> Self {
        let values = kind
            .steps()
            .iter()
            .flat_map(|s| s.fields)
            .map(|f| (*f, f.default_value()))
            .collect();
        Self {
            kind,
            values,
            errors: BTreeMap::new(),
            seeds: BTreeMap::new(),
            mirror: MirrorLink::default(),
            step: 1,
            dirty: false,
            generation: 0,
            establishment_id: None,
        }
    }

    pub fn kind(&self) -> WizardKind {
        self.kind
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn step_count(&self) -> usize {
        self.kind.step_count()
    }

    pub fn on_last_step(&self) -> bool {
        self.step == self.step_count()
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mirror(&self) -> MirrorLink {
        self.mirror
    }

    pub fn establishment_id(&self) -> Option<&str> {
        self.establishment_id.as_deref()
    }

    pub fn set_establishment(&mut self, id: String) {
        self.establishment_id = Some(id);
    }

    fn owns(&self, field: FieldId) -> bool {
        self.values.contains_key(&field)
    }

    pub fn value(&self, field: FieldId) -> &FieldValue {
        self.values.get(&field).unwrap_or(&EMPTY_VALUE)
    }

    pub fn text(&self, field: FieldId) -> &str {
        self.value(field).as_text()
    }

    pub fn flag(&self, field: FieldId) -> bool {
        self.value(field).as_flag()
    }

    pub fn file(&self, field: FieldId) -> &FileValue {
        self.value(field).as_file().unwrap_or(&NO_FILE)
    }

    /// Subtype chosen on business-permit applications
    pub fn subtype(&self) -> ApplicationSubtype {
        ApplicationSubtype::from_label(self.text(FieldId::Subtype))
    }

    /// Write a field value. Toggling the same-as-owner flag drives the
    /// mirror link; owner-field writes propagate to their counterparts
    /// in the same call, so validation never sees stale data.
    pub fn set_value(&mut self, field: FieldId, value: FieldValue) {
        if !self.owns(field) {
            return;
        }
        if field == FieldId::SameAsOwner {
            let on = value.as_flag();
            if self.flag(FieldId::SameAsOwner) != on {
                self.dirty = true;
            }
            self.values.insert(field, FieldValue::Flag(on));
            if on {
                self.mirror.attach(&mut self.values);
            } else {
                self.mirror.detach();
            }
            return;
        }
        if self.value(field) != &value {
            self.dirty = true;
        }
        self.values.insert(field, value);
        self.mirror.propagate(field, &mut self.values);
    }

    /// Type a character into a text or numeric field
    pub fn input_char(&mut self, field: FieldId, c: char) {
        let accepted = match field.kind() {
            FieldKind::Text => !c.is_control(),
            FieldKind::Numeric => c.is_ascii_digit() || c == '.' || c == '-',
            _ => false,
        };
        if !accepted {
            return;
        }
        let mut value = self.value(field).clone();
        value.push_char(c);
        self.set_value(field, value);
    }

    /// Delete the last character of a text or numeric field
    pub fn backspace(&mut self, field: FieldId) {
        if !matches!(field.kind(), FieldKind::Text | FieldKind::Numeric) {
            return;
        }
        let mut value = self.value(field).clone();
        value.pop_char();
        self.set_value(field, value);
    }

    /// Step a select field through its catalog
    pub fn cycle_select(&mut self, field: FieldId, forward: bool) {
        if let FieldKind::Select(options) = field.kind() {
            let next = crate::state::choices::cycle(options, self.text(field), forward);
            self.set_value(field, FieldValue::text(next));
        }
    }

    pub fn toggle_flag(&mut self, field: FieldId) {
        if field.kind() == FieldKind::Flag {
            let current = self.flag(field);
            self.set_value(field, FieldValue::Flag(!current));
        }
    }

    pub fn attach_file(&mut self, field: FieldId, handle: FileHandle) {
        if field.is_file() {
            self.set_value(field, FieldValue::pending_file(handle));
        }
    }

    pub fn clear_file(&mut self, field: FieldId) {
        if field.is_file() {
            self.set_value(field, FieldValue::File(FileValue::None));
        }
    }

    /// Pre-fill a field before the user starts editing. Seeded values do
    /// not mark the form dirty and are exempt from uniqueness conflicts.
    pub fn seed(&mut self, field: FieldId, value: FieldValue) {
        if !self.owns(field) {
            return;
        }
        self.set_value(field, value.clone());
        self.seeds.insert(field, value);
        self.dirty = false;
    }

    /// True while the field still holds exactly its seeded value
    pub fn is_seeded_value(&self, field: FieldId) -> bool {
        self.seeds
            .get(&field)
            .is_some_and(|seed| seed == self.value(field))
    }

    pub fn error(&self, field: FieldId) -> Option<&str> {
        self.errors.get(&field).map(|s| s.as_str())
    }

    pub fn errors(&self) -> &BTreeMap<FieldId, String> {
        &self.errors
    }

    pub fn set_error(&mut self, field: FieldId, message: String) {
        if self.owns(field) {
            self.errors.insert(field, message);
        }
    }

    pub fn clear_error(&mut self, field: FieldId) {
        self.errors.remove(&field);
    }

    pub(crate) fn set_step(&mut self, step: usize) {
        self.step = step.clamp(1, self.step_count());
    }

    /// Fields shown for the current step. Representative fields hide
    /// while mirrored; the documents step of a business-permit
    /// application swaps its list by subtype.
    pub fn visible_fields(&self) -> Vec<FieldId> {
        let Some(step) = self.kind.step(self.step) else {
            return Vec::new();
        };
        if let WizardKind::Application(ty) = self.kind {
            if step.title == "Required Documents" {
                return schema::visible_documents(ty, self.subtype()).to_vec();
            }
        }
        let hide_rep = self.flag(FieldId::SameAsOwner);
        step.fields
            .iter()
            .copied()
            .filter(|f| !(hide_rep && mirror::is_rep_field(*f)))
            .collect()
    }

    /// Back to defaults plus seeds. Bumps the generation so results of
    /// any in-flight backend call are discarded on arrival.
    pub fn reset(&mut self) {
        self.values = self
            .kind
            .steps()
            .iter()
            .flat_map(|s| s.fields)
            .map(|f| (*f, f.default_value()))
            .collect();
        self.errors.clear();
        self.mirror = MirrorLink::default();
        self.step = 1;
        self.generation += 1;
        let seeds: Vec<(FieldId, FieldValue)> =
            self.seeds.iter().map(|(f, v)| (*f, v.clone())).collect();
        for (field, value) in seeds {
            self.set_value(field, value);
        }
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration_form() -> WizardForm {
        WizardForm::new(WizardKind::Registration)
    }

    mod values {
        use super::*;

        #[test]
        fn test_new_applies_field_defaults() {
            let form = registration_form();
            assert_eq!(form.text(FieldId::City), "Valenzuela");
            assert_eq!(form.text(FieldId::Province), "Metro Manila");
            assert_eq!(form.text(FieldId::Region), "NCR");
            assert_eq!(form.step(), 1);
            assert!(!form.dirty());
        }

        #[test]
        fn test_input_char_marks_dirty() {
            let mut form = registration_form();
            form.input_char(FieldId::BusinessName, 'A');
            assert_eq!(form.text(FieldId::BusinessName), "A");
            assert!(form.dirty());
        }

        #[test]
        fn test_numeric_fields_reject_letters() {
            let mut form = registration_form();
            form.input_char(FieldId::NumStoreys, 'x');
            assert_eq!(form.text(FieldId::NumStoreys), "1");
            form.input_char(FieldId::NumStoreys, '2');
            assert_eq!(form.text(FieldId::NumStoreys), "12");
        }

        #[test]
        fn test_backspace_on_empty_field_stays_clean() {
            let mut form = registration_form();
            form.backspace(FieldId::BusinessName);
            assert!(!form.dirty());
        }

        #[test]
        fn test_set_value_ignores_unowned_fields() {
            let mut form = registration_form();
            form.set_value(FieldId::ContractorName, FieldValue::text("ACME Builders"));
            assert_eq!(form.text(FieldId::ContractorName), "");
            assert!(!form.dirty());
        }

        #[test]
        fn test_cycle_select_walks_catalog() {
            let mut form = registration_form();
            form.cycle_select(FieldId::ActiveStatus, true);
            assert_eq!(form.text(FieldId::ActiveStatus), "Inactive");
            form.cycle_select(FieldId::ActiveStatus, true);
            assert_eq!(form.text(FieldId::ActiveStatus), "Active");
        }
    }

    mod mirroring {
        use super::*;

        #[test]
        fn test_toggle_on_copies_then_tracks_owner_edits() {
            let mut form = registration_form();
            form.set_value(FieldId::OwnerFirstName, FieldValue::text("Juan"));
            form.toggle_flag(FieldId::SameAsOwner);
            assert_eq!(form.text(FieldId::RepFirstName), "Juan");

            form.input_char(FieldId::OwnerFirstName, 'a');
            assert_eq!(form.text(FieldId::RepFirstName), "Juana");
        }

        #[test]
        fn test_toggle_off_retains_last_mirrored_values() {
            let mut form = registration_form();
            form.set_value(FieldId::OwnerEmail, FieldValue::text("juan@example.com"));
            form.toggle_flag(FieldId::SameAsOwner);
            form.toggle_flag(FieldId::SameAsOwner);

            form.set_value(FieldId::OwnerEmail, FieldValue::text("new@example.com"));
            assert_eq!(form.text(FieldId::RepEmail), "juan@example.com");
        }

        #[test]
        fn test_seeded_flag_applies_mirror_before_any_edit() {
            let mut form = registration_form();
            form.seed(FieldId::OwnerLastName, FieldValue::text("Reyes"));
            form.seed(FieldId::SameAsOwner, FieldValue::Flag(true));
            assert_eq!(form.text(FieldId::RepLastName), "Reyes");
            assert!(!form.dirty());

            form.input_char(FieldId::OwnerLastName, '!');
            assert_eq!(form.text(FieldId::RepLastName), "Reyes!");
        }

        #[test]
        fn test_visible_fields_hide_representative_while_mirrored() {
            let mut form = registration_form();
            form.set_step(3);
            assert!(form.visible_fields().contains(&FieldId::RepFirstName));
            form.toggle_flag(FieldId::SameAsOwner);
            assert!(!form.visible_fields().contains(&FieldId::RepFirstName));
        }
    }

    mod seeding_and_reset {
        use super::*;

        #[test]
        fn test_seed_does_not_dirty() {
            let mut form = registration_form();
            form.seed(FieldId::BusinessName, FieldValue::text("Acme Trading"));
            assert_eq!(form.text(FieldId::BusinessName), "Acme Trading");
            assert!(!form.dirty());
            assert!(form.is_seeded_value(FieldId::BusinessName));
        }

        #[test]
        fn test_editing_a_seeded_field_clears_the_exemption() {
            let mut form = registration_form();
            form.seed(FieldId::BusinessName, FieldValue::text("Acme Trading"));
            form.input_char(FieldId::BusinessName, '!');
            assert!(!form.is_seeded_value(FieldId::BusinessName));
            assert!(form.dirty());
        }

        #[test]
        fn test_reset_restores_defaults_and_seeds() {
            let mut form = registration_form();
            form.seed(FieldId::DtiCertificateNo, FieldValue::text("123456"));
            form.input_char(FieldId::BusinessName, 'A');
            form.set_error(FieldId::BusinessName, "bad".to_string());
            form.set_step(3);
            let generation = form.generation();

            form.reset();
            assert_eq!(form.step(), 1);
            assert!(!form.dirty());
            assert!(form.errors().is_empty());
            assert_eq!(form.text(FieldId::BusinessName), "");
            assert_eq!(form.text(FieldId::DtiCertificateNo), "123456");
            assert_eq!(form.text(FieldId::City), "Valenzuela");
            assert_eq!(form.generation(), generation + 1);
        }
    }

    mod documents_step {
        use super::*;
        use crate::state::wizard::schema::ApplicationType;

        #[test]
        fn test_business_documents_follow_subtype() {
            let mut form = WizardForm::new(WizardKind::Application(ApplicationType::FsicBusiness));
            form.set_step(2);
            assert!(form.visible_fields().contains(&FieldId::CertificateOfOccupancy));

            form.set_value(FieldId::Subtype, FieldValue::text("Renewal"));
            assert!(!form.visible_fields().contains(&FieldId::CertificateOfOccupancy));
            assert!(form
                .visible_fields()
                .contains(&FieldId::FireSafetyMaintenanceReport));
        }
    }
}
