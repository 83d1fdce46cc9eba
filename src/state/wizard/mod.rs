//! The multi-step wizard core: registration and certificate application
//!
//! Everything under this module is UI-independent. The ratatui shell
//! drives a [`Wizard`] through its request/apply operations and renders
//! whatever the form reports; the backend is only reached through the
//! traits in `crate::backend`.

mod controller;
mod field;
mod form;
mod mirror;
mod rules;
mod schema;
mod submit;
mod value;

pub use controller::{
    CancelRequest, NextOutcome, NextRequest, SubmitRequest, UniquenessCheck, UniquenessReport,
    Wizard,
};
pub use field::{FieldId, FieldKind};
pub use form::WizardForm;
pub use rules::coerce_number;
pub use schema::{ApplicationSubtype, ApplicationType, WizardKind};
pub use submit::{SubmissionJob, SubmitError, SubmitOutcome};
pub use value::{FieldValue, FileHandle, FileValue};
