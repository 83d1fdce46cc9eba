//! Declarative per-field validation rules

use super::field::FieldId;
use super::form::WizardForm;
use super::schema::{self, WizardKind};
use super::value::FileValue;

pub const MAX_FILE_BYTES: u64 = 20 * 1024 * 1024;

/// Validate one field against the whole form. `None` means valid.
pub fn validate_field(field: FieldId, form: &WizardForm) -> Option<String> {
    match field {
        FieldId::BusinessName => min_len(
            form.text(field),
            2,
            "Business name must be at least 2 characters",
        ),
        FieldId::DtiCertificateNo => {
            let value = form.text(field).trim();
            if value.len() < 6 {
                Some("DTI Certificate Number must be at least 6 digits".to_string())
            } else if value.len() > 9 {
                Some("DTI Certificate Number must not exceed 9 digits".to_string())
            } else {
                None
            }
        }
        FieldId::BusinessType => required(form.text(field), "Please select a business type"),
        FieldId::OccupancyType => required(form.text(field), "Please select an occupancy type"),
        FieldId::ActiveStatus => required(form.text(field), "Please select a status"),
        FieldId::NumStoreys => {
            let n = coerce_number(form.text(field));
            if n < 1.0 || n.fract() != 0.0 {
                Some("Must be at least 1".to_string())
            } else {
                None
            }
        }
        FieldId::TotalFloorArea | FieldId::NumOccupants => {
            if coerce_number(form.text(field)) < 0.0 {
                Some("Must be a positive number".to_string())
            } else {
                None
            }
        }
        FieldId::Street => min_len(
            form.text(field),
            3,
            "Street address must be at least 3 characters",
        ),
        FieldId::Barangay => required(form.text(field), "Please select a barangay"),
        FieldId::City => required(form.text(field), "City is required"),
        FieldId::Province => required(form.text(field), "Province is required"),
        FieldId::Region => required(form.text(field), "Region is required"),
        FieldId::Latitude | FieldId::Longitude => None,
        FieldId::OwnerFirstName => min_len(
            form.text(field),
            2,
            "First name must be at least 2 characters",
        ),
        FieldId::OwnerLastName => min_len(
            form.text(field),
            2,
            "Last name must be at least 2 characters",
        ),
        FieldId::OwnerEmail => email_rule(form.text(field)),
        FieldId::OwnerMobile => mobile_rule(form.text(field)),
        FieldId::OwnerMiddleName
        | FieldId::OwnerSuffix
        | FieldId::OwnerLandline
        | FieldId::SameAsOwner => None,
        FieldId::RepFirstName => rep_rule(form, field, |s| {
            min_len(s, 2, "First name must be at least 2 characters")
        }),
        FieldId::RepLastName => rep_rule(form, field, |s| {
            min_len(s, 2, "Last name must be at least 2 characters")
        }),
        FieldId::RepEmail => rep_rule(form, field, email_rule),
        FieldId::RepMobile => rep_rule(form, field, mobile_rule),
        FieldId::RepMiddleName | FieldId::RepSuffix | FieldId::RepLandline => None,
        FieldId::Certify => {
            if form.flag(field) {
                None
            } else {
                Some("You must certify that the information is correct".to_string())
            }
        }
        FieldId::ContractorName => required(form.text(field), "Contractor name is required"),
        FieldId::FsecNumber => required(form.text(field), "FSEC number is required"),
        FieldId::OccupancyPermitNumber => {
            required(form.text(field), "Occupancy permit number is required")
        }
        FieldId::Subtype => None,
        FieldId::DtiCertificateFile => {
            check_file(field, form.file(field), true, "DTI Certificate")
        }
        _ => document_rule(field, form),
    }
}

/// Validate a field set, keeping failures in field order
pub fn validate_fields(fields: &[FieldId], form: &WizardForm) -> Vec<(FieldId, String)> {
    fields
        .iter()
        .filter_map(|f| validate_field(*f, form).map(|msg| (*f, msg)))
        .collect()
}

/// Coerce free-form numeric input; anything unparseable counts as zero
pub fn coerce_number(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

fn required(value: &str, message: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(message.to_string())
    } else {
        None
    }
}

fn min_len(value: &str, min: usize, message: &str) -> Option<String> {
    if value.trim().len() < min {
        Some(message.to_string())
    } else {
        None
    }
}

/// Representative fields only validate while detached from the owner
fn rep_rule(
    form: &WizardForm,
    field: FieldId,
    check: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    if form.flag(FieldId::SameAsOwner) {
        None
    } else {
        check(form.text(field))
    }
}

fn email_rule(value: &str) -> Option<String> {
    if is_valid_email(value.trim()) {
        None
    } else {
        Some("Please enter a valid email address".to_string())
    }
}

fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

fn mobile_rule(value: &str) -> Option<String> {
    let value = value.trim();
    let ok = value.len() == 11
        && value.starts_with("09")
        && value.chars().all(|c| c.is_ascii_digit());
    if ok {
        None
    } else {
        Some("Mobile number must be in format 09xxxxxxxxx".to_string())
    }
}

/// Application document fields: requiredness follows the per-type matrix,
/// and documents hidden by the current subtype are not validated at all.
fn document_rule(field: FieldId, form: &WizardForm) -> Option<String> {
    let WizardKind::Application(ty) = form.kind() else {
        return None;
    };
    let subtype = form.subtype();
    if !schema::visible_documents(ty, subtype).contains(&field) {
        return None;
    }
    let is_required = schema::required_documents(ty, subtype).contains(&field);
    check_file(field, form.file(field), is_required, field.label())
}

fn check_file(
    field: FieldId,
    file: &FileValue,
    is_required: bool,
    label: &str,
) -> Option<String> {
    match file {
        FileValue::None => {
            if is_required {
                Some(format!("{label} is required"))
            } else {
                None
            }
        }
        FileValue::Pending(handle) => {
            if handle.size > MAX_FILE_BYTES {
                return Some("File must not exceed 20MB".to_string());
            }
            let allowed = schema::allowed_extensions(field);
            let ok = handle
                .extension()
                .is_some_and(|ext| allowed.contains(&ext.as_str()));
            if ok {
                None
            } else if allowed.len() == 1 {
                Some("Only PDF files are accepted".to_string())
            } else {
                Some("Only PDF, JPG, JPEG, and PNG files are accepted".to_string())
            }
        }
        FileValue::Uploaded(_) => None,
    }
}
