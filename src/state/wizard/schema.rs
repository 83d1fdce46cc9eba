//! Step layouts for the registration and application wizards

use super::field::FieldId;

/// Certificate application categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationType {
    #[default]
    Fsec,
    FsicOccupancy,
    FsicBusiness,
}

impl ApplicationType {
    pub fn label(self) -> &'static str {
        match self {
            ApplicationType::Fsec => "FSEC (Fire Safety Evaluation Clearance)",
            ApplicationType::FsicOccupancy => "FSIC for Occupancy Permit",
            ApplicationType::FsicBusiness => "FSIC for Business Permit",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ApplicationType::Fsec => "fsec",
            ApplicationType::FsicOccupancy => "fsic_occupancy",
            ApplicationType::FsicBusiness => "fsic_business",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ApplicationType::Fsec => ApplicationType::FsicOccupancy,
            ApplicationType::FsicOccupancy => ApplicationType::FsicBusiness,
            ApplicationType::FsicBusiness => ApplicationType::Fsec,
        }
    }

    pub fn prev(self) -> Self {
        self.next().next()
    }
}

/// New application or renewal (business permits only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplicationSubtype {
    #[default]
    New,
    Renewal,
}

impl ApplicationSubtype {
    pub fn label(self) -> &'static str {
        match self {
            ApplicationSubtype::New => "New",
            ApplicationSubtype::Renewal => "Renewal",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ApplicationSubtype::New => "new",
            ApplicationSubtype::Renewal => "renewal",
        }
    }

    /// Parse the display label stored in the subtype field
    pub fn from_label(label: &str) -> Self {
        if label == "Renewal" {
            ApplicationSubtype::Renewal
        } else {
            ApplicationSubtype::New
        }
    }
}

/// One wizard step: the fields it owns and whether leaving it
/// requires the backend uniqueness check
#[derive(Debug, Clone, Copy)]
pub struct StepDef {
    pub title: &'static str,
    pub fields: &'static [FieldId],
    pub checks_uniqueness: bool,
}

/// Which wizard is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardKind {
    Registration,
    Application(ApplicationType),
}

const OWNER_REP_FIELDS: [FieldId; 15] = [
    FieldId::OwnerFirstName,
    FieldId::OwnerLastName,
    FieldId::OwnerMiddleName,
    FieldId::OwnerSuffix,
    FieldId::OwnerEmail,
    FieldId::OwnerMobile,
    FieldId::OwnerLandline,
    FieldId::SameAsOwner,
    FieldId::RepFirstName,
    FieldId::RepLastName,
    FieldId::RepMiddleName,
    FieldId::RepSuffix,
    FieldId::RepEmail,
    FieldId::RepMobile,
    FieldId::RepLandline,
];

const REGISTRATION_STEPS: [StepDef; 4] = [
    StepDef {
        title: "Business Information",
        fields: &[
            FieldId::BusinessName,
            FieldId::DtiCertificateNo,
            FieldId::BusinessType,
            FieldId::OccupancyType,
            FieldId::NumStoreys,
            FieldId::TotalFloorArea,
            FieldId::NumOccupants,
            FieldId::ActiveStatus,
            FieldId::DtiCertificateFile,
        ],
        checks_uniqueness: true,
    },
    StepDef {
        title: "Address & Location",
        fields: &[
            FieldId::Street,
            FieldId::Barangay,
            FieldId::City,
            FieldId::Province,
            FieldId::Region,
            FieldId::Latitude,
            FieldId::Longitude,
        ],
        checks_uniqueness: false,
    },
    StepDef {
        title: "Owner & Representative",
        fields: &OWNER_REP_FIELDS,
        checks_uniqueness: false,
    },
    StepDef {
        title: "Review & Certification",
        fields: &[FieldId::Certify],
        checks_uniqueness: false,
    },
];

const FSEC_STEPS: [StepDef; 3] = [
    StepDef {
        title: "Applicant Information",
        fields: &[
            FieldId::OwnerFirstName,
            FieldId::OwnerLastName,
            FieldId::OwnerMiddleName,
            FieldId::OwnerSuffix,
            FieldId::OwnerEmail,
            FieldId::OwnerMobile,
            FieldId::OwnerLandline,
            FieldId::SameAsOwner,
            FieldId::RepFirstName,
            FieldId::RepLastName,
            FieldId::RepMiddleName,
            FieldId::RepSuffix,
            FieldId::RepEmail,
            FieldId::RepMobile,
            FieldId::RepLandline,
            FieldId::ContractorName,
        ],
        checks_uniqueness: false,
    },
    StepDef {
        title: "Required Documents",
        fields: &[
            FieldId::ArchitecturalPlans,
            FieldId::CivilStructuralPlans,
            FieldId::MechanicalPlans,
            FieldId::ElectricalPlans,
            FieldId::PlumbingPlans,
            FieldId::SanitaryPlans,
            FieldId::FireProtectionPlans,
            FieldId::ElectronicsDocuments,
            FieldId::FireSafetyComplianceReport,
            FieldId::CostEstimates,
        ],
        checks_uniqueness: false,
    },
    StepDef {
        title: "Review & Certification",
        fields: &[FieldId::Certify],
        checks_uniqueness: false,
    },
];

const FSIC_OCCUPANCY_STEPS: [StepDef; 3] = [
    StepDef {
        title: "Applicant Information",
        fields: &[
            FieldId::OwnerFirstName,
            FieldId::OwnerLastName,
            FieldId::OwnerMiddleName,
            FieldId::OwnerSuffix,
            FieldId::OwnerEmail,
            FieldId::OwnerMobile,
            FieldId::OwnerLandline,
            FieldId::SameAsOwner,
            FieldId::RepFirstName,
            FieldId::RepLastName,
            FieldId::RepMiddleName,
            FieldId::RepSuffix,
            FieldId::RepEmail,
            FieldId::RepMobile,
            FieldId::RepLandline,
            FieldId::FsecNumber,
        ],
        checks_uniqueness: false,
    },
    StepDef {
        title: "Required Documents",
        fields: &[
            FieldId::OboEndorsement,
            FieldId::CertificateOfCompletion,
            FieldId::AssessmentFeeReceipt,
            FieldId::AsBuiltPlan,
            FieldId::FireSafetyComplianceReport,
            FieldId::FsecCertificate,
        ],
        checks_uniqueness: false,
    },
    StepDef {
        title: "Review & Certification",
        fields: &[FieldId::Certify],
        checks_uniqueness: false,
    },
];

const FSIC_BUSINESS_STEPS: [StepDef; 3] = [
    StepDef {
        title: "Applicant Information",
        fields: &[
            FieldId::OwnerFirstName,
            FieldId::OwnerLastName,
            FieldId::OwnerMiddleName,
            FieldId::OwnerSuffix,
            FieldId::OwnerEmail,
            FieldId::OwnerMobile,
            FieldId::OwnerLandline,
            FieldId::SameAsOwner,
            FieldId::RepFirstName,
            FieldId::RepLastName,
            FieldId::RepMiddleName,
            FieldId::RepSuffix,
            FieldId::RepEmail,
            FieldId::RepMobile,
            FieldId::RepLandline,
            FieldId::OccupancyPermitNumber,
            FieldId::Subtype,
        ],
        checks_uniqueness: false,
    },
    StepDef {
        title: "Required Documents",
        fields: &[
            FieldId::CertificateOfOccupancy,
            FieldId::AffidavitOfUndertaking,
            FieldId::BploAssessmentReceipt,
            FieldId::FireInsurancePolicy,
            FieldId::FireSafetyMaintenanceReport,
            FieldId::FireSafetyClearance,
        ],
        checks_uniqueness: false,
    },
    StepDef {
        title: "Review & Certification",
        fields: &[FieldId::Certify],
        checks_uniqueness: false,
    },
];

impl WizardKind {
    pub fn steps(self) -> &'static [StepDef] {
        match self {
            WizardKind::Registration => &REGISTRATION_STEPS,
            WizardKind::Application(ApplicationType::Fsec) => &FSEC_STEPS,
            WizardKind::Application(ApplicationType::FsicOccupancy) => &FSIC_OCCUPANCY_STEPS,
            WizardKind::Application(ApplicationType::FsicBusiness) => &FSIC_BUSINESS_STEPS,
        }
    }

    pub fn step_count(self) -> usize {
        self.steps().len()
    }

    /// Step definition for a 1-based step index
    pub fn step(self, index: usize) -> Option<&'static StepDef> {
        self.steps().get(index.checked_sub(1)?)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardKind::Registration => "Register Establishment",
            WizardKind::Application(ApplicationType::Fsec) => "FSEC Application",
            WizardKind::Application(ApplicationType::FsicOccupancy) => {
                "FSIC Application (Occupancy)"
            }
            WizardKind::Application(ApplicationType::FsicBusiness) => "FSIC Application (Business)",
        }
    }

    /// Backend collection the submission targets
    pub fn collection(self) -> &'static str {
        match self {
            WizardKind::Registration => "establishments",
            WizardKind::Application(_) => "applications",
        }
    }
}

/// Documents that must be attached before an application can leave the
/// documents step
pub fn required_documents(ty: ApplicationType, subtype: ApplicationSubtype) -> &'static [FieldId] {
    match (ty, subtype) {
        (ApplicationType::Fsec, _) => &[
            FieldId::ArchitecturalPlans,
            FieldId::CivilStructuralPlans,
            FieldId::ElectricalPlans,
            FieldId::FireProtectionPlans,
            FieldId::FireSafetyComplianceReport,
            FieldId::CostEstimates,
        ],
        (ApplicationType::FsicOccupancy, _) => &[
            FieldId::OboEndorsement,
            FieldId::CertificateOfCompletion,
            FieldId::AssessmentFeeReceipt,
            FieldId::AsBuiltPlan,
            FieldId::FireSafetyComplianceReport,
            FieldId::FsecCertificate,
        ],
        (ApplicationType::FsicBusiness, ApplicationSubtype::New) => &[
            FieldId::CertificateOfOccupancy,
            FieldId::AffidavitOfUndertaking,
            FieldId::BploAssessmentReceipt,
        ],
        (ApplicationType::FsicBusiness, ApplicationSubtype::Renewal) => &[
            FieldId::BploAssessmentReceipt,
            FieldId::FireSafetyMaintenanceReport,
        ],
    }
}

/// Documents shown on the documents step. Business permits swap the list
/// by subtype; the other types show every owned document field.
pub fn visible_documents(ty: ApplicationType, subtype: ApplicationSubtype) -> &'static [FieldId] {
    match (ty, subtype) {
        (ApplicationType::FsicBusiness, ApplicationSubtype::New) => &[
            FieldId::CertificateOfOccupancy,
            FieldId::AffidavitOfUndertaking,
            FieldId::BploAssessmentReceipt,
            FieldId::FireInsurancePolicy,
        ],
        (ApplicationType::FsicBusiness, ApplicationSubtype::Renewal) => &[
            FieldId::BploAssessmentReceipt,
            FieldId::FireSafetyMaintenanceReport,
            FieldId::FireInsurancePolicy,
            FieldId::FireSafetyClearance,
        ],
        (ty, _) => match WizardKind::Application(ty).step(2) {
            Some(step) => step.fields,
            None => &[],
        },
    }
}

const IMAGE_OR_PDF: [&str; 4] = ["pdf", "jpg", "jpeg", "png"];
const PDF_ONLY: [&str; 1] = ["pdf"];

/// Accepted file extensions for an upload field
pub fn allowed_extensions(field: FieldId) -> &'static [&'static str] {
    match field {
        FieldId::DtiCertificateFile
        | FieldId::ArchitecturalPlans
        | FieldId::CivilStructuralPlans
        | FieldId::MechanicalPlans
        | FieldId::ElectricalPlans
        | FieldId::PlumbingPlans
        | FieldId::SanitaryPlans
        | FieldId::FireProtectionPlans
        | FieldId::ElectronicsDocuments
        | FieldId::AssessmentFeeReceipt
        | FieldId::BploAssessmentReceipt => &IMAGE_OR_PDF,
        _ => &PDF_ONLY,
    }
}
