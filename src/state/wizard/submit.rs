//! Final payload assembly and the non-atomic create-then-upload submission

use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::backend::{BackendError, FileStore, RecordStore, SessionProvider};

use super::field::FieldId;
use super::form::WizardForm;
use super::rules::coerce_number;
use super::schema::{self, ApplicationType, WizardKind};
use super::value::FileHandle;

/// Result of a completed submission. Upload failures after a successful
/// create downgrade the outcome to a warning, never to a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { id: String },
    CreatedWithWarnings { id: String, warnings: Vec<String> },
}

impl SubmitOutcome {
    pub fn record_id(&self) -> &str {
        match self {
            SubmitOutcome::Created { id } => id,
            SubmitOutcome::CreatedWithWarnings { id, .. } => id,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("you must be signed in to submit")]
    NotAuthenticated,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// A fully assembled submission, detached from the form so the caller can
/// hold it across the backend await.
#[derive(Debug, Clone)]
pub struct SubmissionJob {
    pub generation: u64,
    pub collection: &'static str,
    pub record_id: String,
    pub payload: Value,
    pub attachments: Vec<(FieldId, FileHandle)>,
}

/// Compose the immutable payload and attachment list from the form
pub fn assemble(form: &WizardForm) -> SubmissionJob {
    let record_id = Uuid::new_v4().to_string();
    let payload = match form.kind() {
        WizardKind::Registration => registration_payload(form, &record_id),
        WizardKind::Application(ty) => application_payload(form, &record_id, ty),
    };
    SubmissionJob {
        generation: form.generation(),
        collection: form.kind().collection(),
        record_id,
        payload,
        attachments: pending_attachments(form),
    }
}

/// Files chosen but not yet stored. Documents hidden by the current
/// subtype are skipped even if a stale handle is still present.
fn pending_attachments(form: &WizardForm) -> Vec<(FieldId, FileHandle)> {
    let mut attachments = Vec::new();
    for step in form.kind().steps() {
        for field in step.fields {
            if !field.is_file() {
                continue;
            }
            if let WizardKind::Application(ty) = form.kind() {
                if !schema::visible_documents(ty, form.subtype()).contains(field) {
                    continue;
                }
            }
            if let Some(handle) = form.file(*field).as_pending() {
                attachments.push((*field, handle.clone()));
            }
        }
    }
    attachments
}

fn registration_payload(form: &WizardForm, record_id: &str) -> Value {
    json!({
        "id": record_id,
        "name": form.text(FieldId::BusinessName),
        "dti_number": form.text(FieldId::DtiCertificateNo),
        "status": "pending",
        "form_data": {
            "establishment": {
                "business_name": form.text(FieldId::BusinessName),
                "dti_certificate_no": form.text(FieldId::DtiCertificateNo),
                "business_type": form.text(FieldId::BusinessType),
                "occupancy_type": form.text(FieldId::OccupancyType),
                "num_storeys": coerce_number(form.text(FieldId::NumStoreys)),
                "total_floor_area": coerce_number(form.text(FieldId::TotalFloorArea)),
                "num_occupants": coerce_number(form.text(FieldId::NumOccupants)),
                "active_status": form.text(FieldId::ActiveStatus),
            },
            "address": address_group(form),
            "owner": owner_group(form),
            "representative": representative_group(form),
        },
    })
}

fn application_payload(form: &WizardForm, record_id: &str, ty: ApplicationType) -> Value {
    let subtype = (ty == ApplicationType::FsicBusiness).then(|| form.subtype().key());
    json!({
        "id": record_id,
        "establishment_id": form.establishment_id(),
        "application_type": ty.key(),
        "application_subtype": subtype,
        "status": "pending",
        "form_data": {
            "owner": owner_group(form),
            "representative": representative_group(form),
            "details": application_details(form, ty),
        },
    })
}

fn application_details(form: &WizardForm, ty: ApplicationType) -> Value {
    match ty {
        ApplicationType::Fsec => json!({
            "contractor_name": form.text(FieldId::ContractorName),
        }),
        ApplicationType::FsicOccupancy => json!({
            "fsec_number": form.text(FieldId::FsecNumber),
        }),
        ApplicationType::FsicBusiness => json!({
            "occupancy_permit_number": form.text(FieldId::OccupancyPermitNumber),
        }),
    }
}

fn address_group(form: &WizardForm) -> Value {
    let formatted = format!(
        "{}, {}, {}, {}",
        form.text(FieldId::Street),
        form.text(FieldId::Barangay),
        form.text(FieldId::City),
        form.text(FieldId::Province),
    );
    json!({
        "street_address": form.text(FieldId::Street),
        "barangay": form.text(FieldId::Barangay),
        "city": form.text(FieldId::City),
        "province": form.text(FieldId::Province),
        "region": form.text(FieldId::Region),
        "latitude": coerce_number(form.text(FieldId::Latitude)),
        "longitude": coerce_number(form.text(FieldId::Longitude)),
        "formatted": formatted,
    })
}

fn owner_group(form: &WizardForm) -> Value {
    json!({
        "first_name": form.text(FieldId::OwnerFirstName),
        "last_name": form.text(FieldId::OwnerLastName),
        "middle_name": form.text(FieldId::OwnerMiddleName),
        "suffix": form.text(FieldId::OwnerSuffix),
        "email": form.text(FieldId::OwnerEmail),
        "mobile": form.text(FieldId::OwnerMobile),
        "landline": form.text(FieldId::OwnerLandline),
    })
}

fn representative_group(form: &WizardForm) -> Value {
    json!({
        "same_as_owner": form.flag(FieldId::SameAsOwner),
        "first_name": form.text(FieldId::RepFirstName),
        "last_name": form.text(FieldId::RepLastName),
        "middle_name": form.text(FieldId::RepMiddleName),
        "suffix": form.text(FieldId::RepSuffix),
        "email": form.text(FieldId::RepEmail),
        "mobile": form.text(FieldId::RepMobile),
        "landline": form.text(FieldId::RepLandline),
    })
}

impl SubmissionJob {
    /// Create the record, then upload each attachment best-effort. The
    /// record survives upload failures; those come back as warnings.
    pub async fn run(
        &self,
        records: &dyn RecordStore,
        files: &dyn FileStore,
        session: &dyn SessionProvider,
    ) -> Result<SubmitOutcome, SubmitError> {
        let Some(user_id) = session.current_user().await else {
            return Err(SubmitError::NotAuthenticated);
        };
        let mut record = self.payload.clone();
        if let Some(map) = record.as_object_mut() {
            map.insert("owner_id".to_string(), json!(user_id));
        }
        let id = records.create(self.collection, record).await?;

        let mut warnings = Vec::new();
        for (field, handle) in &self.attachments {
            if let Err(err) = files.upload(&user_id, &id, field.key(), handle).await {
                warn!(field = field.key(), error = %err, "document upload failed");
                warnings.push(format!("{} upload failed", field.label()));
            }
        }
        if warnings.is_empty() {
            Ok(SubmitOutcome::Created { id })
        } else {
            Ok(SubmitOutcome::CreatedWithWarnings { id, warnings })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{MockFileStore, MockRecordStore, MockSessionProvider};
    use crate::state::wizard::value::{FieldValue, FileHandle};

    fn filled_registration_form() -> WizardForm {
        let mut form = WizardForm::new(WizardKind::Registration);
        form.set_value(FieldId::BusinessName, FieldValue::text("Acme Trading"));
        form.set_value(FieldId::DtiCertificateNo, FieldValue::text("1234567"));
        form.set_value(FieldId::BusinessType, FieldValue::text("Commercial"));
        form.set_value(
            FieldId::OccupancyType,
            FieldValue::text("Business Occupancy"),
        );
        form.set_value(FieldId::Street, FieldValue::text("123 MacArthur Hwy"));
        form.set_value(FieldId::Barangay, FieldValue::text("Karuhatan"));
        form.set_value(FieldId::OwnerFirstName, FieldValue::text("Juan"));
        form.set_value(FieldId::OwnerLastName, FieldValue::text("Dela Cruz"));
        form.set_value(FieldId::OwnerEmail, FieldValue::text("juan@example.com"));
        form.set_value(FieldId::OwnerMobile, FieldValue::text("09123456789"));
        form.toggle_flag(FieldId::SameAsOwner);
        form.attach_file(
            FieldId::DtiCertificateFile,
            FileHandle::new("/tmp/dti.pdf", 1024),
        );
        form.toggle_flag(FieldId::Certify);
        form
    }

    fn authed_session(user: &str) -> MockSessionProvider {
        let user = user.to_string();
        let mut session = MockSessionProvider::new();
        session
            .expect_current_user()
            .returning(move || Some(user.clone()));
        session
    }

    mod assembly {
        use super::*;

        #[test]
        fn test_registration_payload_shape() {
            let form = filled_registration_form();
            let job = assemble(&form);

            assert_eq!(job.collection, "establishments");
            assert_eq!(job.payload["id"], job.record_id.as_str());
            assert_eq!(job.payload["name"], "Acme Trading");
            assert_eq!(job.payload["dti_number"], "1234567");
            assert_eq!(job.payload["status"], "pending");
            assert_eq!(
                job.payload["form_data"]["address"]["formatted"],
                "123 MacArthur Hwy, Karuhatan, Valenzuela, Metro Manila"
            );
            assert_eq!(
                job.payload["form_data"]["representative"]["first_name"],
                "Juan"
            );
            assert_eq!(
                job.payload["form_data"]["representative"]["same_as_owner"],
                true
            );
        }

        #[test]
        fn test_numeric_fields_are_coerced() {
            let mut form = filled_registration_form();
            form.set_value(FieldId::TotalFloorArea, FieldValue::text("not a number"));
            let job = assemble(&form);
            assert_eq!(
                job.payload["form_data"]["establishment"]["total_floor_area"],
                0.0
            );
            assert_eq!(job.payload["form_data"]["establishment"]["num_storeys"], 1.0);
        }

        #[test]
        fn test_attachments_include_pending_files_only() {
            let form = filled_registration_form();
            let job = assemble(&form);
            assert_eq!(job.attachments.len(), 1);
            assert_eq!(job.attachments[0].0, FieldId::DtiCertificateFile);

            let mut without = filled_registration_form();
            without.clear_file(FieldId::DtiCertificateFile);
            assert!(assemble(&without).attachments.is_empty());
        }

        #[test]
        fn test_hidden_subtype_documents_are_not_attached() {
            let mut form = WizardForm::new(WizardKind::Application(ApplicationType::FsicBusiness));
            form.attach_file(
                FieldId::CertificateOfOccupancy,
                FileHandle::new("/tmp/occupancy.pdf", 10),
            );
            // Switching to renewal hides the certificate entirely
            form.set_value(FieldId::Subtype, FieldValue::text("Renewal"));
            let job = assemble(&form);
            assert!(job
                .attachments
                .iter()
                .all(|(f, _)| *f != FieldId::CertificateOfOccupancy));
            assert_eq!(job.payload["application_subtype"], "renewal");
        }

        #[test]
        fn test_application_payload_references_establishment() {
            let mut form = WizardForm::new(WizardKind::Application(ApplicationType::Fsec));
            form.set_establishment("est-42".to_string());
            form.set_value(FieldId::ContractorName, FieldValue::text("BuildSafe Inc."));
            let job = assemble(&form);
            assert_eq!(job.collection, "applications");
            assert_eq!(job.payload["establishment_id"], "est-42");
            assert_eq!(job.payload["application_type"], "fsec");
            assert_eq!(job.payload["application_subtype"], Value::Null);
            assert_eq!(
                job.payload["form_data"]["details"]["contractor_name"],
                "BuildSafe Inc."
            );
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_happy_path_creates_then_uploads_once_per_attachment() {
            let form = filled_registration_form();
            let job = assemble(&form);
            let expected_id = job.record_id.clone();

            let mut records = MockRecordStore::new();
            records
                .expect_create()
                .withf(|collection, record| {
                    collection == "establishments" && record["owner_id"] == "user-1"
                })
                .times(1)
                .returning(|_, record| {
                    Ok(record["id"].as_str().unwrap_or_default().to_string())
                });

            let mut files = MockFileStore::new();
            let id_for_upload = expected_id.clone();
            files
                .expect_upload()
                .withf(move |owner, record, field, _| {
                    owner == "user-1" && record == id_for_upload && field == "dti_certificate"
                })
                .times(1)
                .returning(|_, _, _, _| Ok("user-1/path".to_string()));

            let session = authed_session("user-1");
            let outcome = job.run(&records, &files, &session).await.unwrap();
            assert_eq!(
                outcome,
                SubmitOutcome::Created {
                    id: expected_id
                }
            );
        }

        #[tokio::test]
        async fn test_upload_failure_is_a_warning_not_a_failure() {
            let form = filled_registration_form();
            let job = assemble(&form);

            let mut records = MockRecordStore::new();
            records
                .expect_create()
                .times(1)
                .returning(|_, record| {
                    Ok(record["id"].as_str().unwrap_or_default().to_string())
                });

            let mut files = MockFileStore::new();
            files.expect_upload().times(1).returning(|_, _, _, _| {
                Err(BackendError::Api {
                    status: 500,
                    message: "storage unavailable".to_string(),
                })
            });

            let session = authed_session("user-1");
            let outcome = job.run(&records, &files, &session).await.unwrap();
            match outcome {
                SubmitOutcome::CreatedWithWarnings { warnings, .. } => {
                    assert_eq!(warnings, vec!["DTI Certificate upload failed".to_string()]);
                }
                other => panic!("expected warnings, got {other:?}"),
            }
        }

        #[tokio::test]
        async fn test_no_session_refuses_before_creating() {
            let form = filled_registration_form();
            let job = assemble(&form);

            let mut records = MockRecordStore::new();
            records.expect_create().times(0);
            let mut files = MockFileStore::new();
            files.expect_upload().times(0);
            let mut session = MockSessionProvider::new();
            session.expect_current_user().returning(|| None);

            let err = job.run(&records, &files, &session).await.unwrap_err();
            assert!(matches!(err, SubmitError::NotAuthenticated));
        }

        #[tokio::test]
        async fn test_create_failure_uploads_nothing() {
            let form = filled_registration_form();
            let job = assemble(&form);

            let mut records = MockRecordStore::new();
            records.expect_create().times(1).returning(|_, _| {
                Err(BackendError::Api {
                    status: 503,
                    message: "down".to_string(),
                })
            });
            let mut files = MockFileStore::new();
            files.expect_upload().times(0);
            let session = authed_session("user-1");

            let err = job.run(&records, &files, &session).await.unwrap_err();
            assert!(matches!(err, SubmitError::Backend(_)));
        }
    }
}
