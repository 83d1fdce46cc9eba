//! Wizard field identities and per-field metadata

use crate::state::choices;

use super::value::{FieldValue, FileValue};

/// How a field is edited and rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Text storage, digit/dot input only, coerced to a number on use
    Numeric,
    Select(&'static [&'static str]),
    Flag,
    File,
}

/// Every field across the registration and application wizards.
/// Owner and representative fields are shared between the two flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    // Establishment details
    BusinessName,
    DtiCertificateNo,
    BusinessType,
    OccupancyType,
    NumStoreys,
    TotalFloorArea,
    NumOccupants,
    ActiveStatus,
    DtiCertificateFile,
    // Address
    Street,
    Barangay,
    City,
    Province,
    Region,
    Latitude,
    Longitude,
    // Owner and representative
    OwnerFirstName,
    OwnerLastName,
    OwnerMiddleName,
    OwnerSuffix,
    OwnerEmail,
    OwnerMobile,
    OwnerLandline,
    SameAsOwner,
    RepFirstName,
    RepLastName,
    RepMiddleName,
    RepSuffix,
    RepEmail,
    RepMobile,
    RepLandline,
    // Certification
    Certify,
    // Application details
    ContractorName,
    FsecNumber,
    OccupancyPermitNumber,
    Subtype,
    // Application documents
    ArchitecturalPlans,
    CivilStructuralPlans,
    MechanicalPlans,
    ElectricalPlans,
    PlumbingPlans,
    SanitaryPlans,
    FireProtectionPlans,
    ElectronicsDocuments,
    FireSafetyComplianceReport,
    CostEstimates,
    OboEndorsement,
    CertificateOfCompletion,
    AssessmentFeeReceipt,
    AsBuiltPlan,
    FsecCertificate,
    CertificateOfOccupancy,
    AffidavitOfUndertaking,
    BploAssessmentReceipt,
    FireInsurancePolicy,
    FireSafetyMaintenanceReport,
    FireSafetyClearance,
}

impl FieldId {
    /// Display label for rendering
    pub fn label(self) -> &'static str {
        match self {
            FieldId::BusinessName => "Business Name",
            FieldId::DtiCertificateNo => "DTI Certificate No.",
            FieldId::BusinessType => "Business Type",
            FieldId::OccupancyType => "Occupancy Type",
            FieldId::NumStoreys => "Number of Storeys",
            FieldId::TotalFloorArea => "Total Floor Area (sqm)",
            FieldId::NumOccupants => "Number of Occupants",
            FieldId::ActiveStatus => "Active Status",
            FieldId::DtiCertificateFile => "DTI Certificate",
            FieldId::Street => "Street Address",
            FieldId::Barangay => "Barangay",
            FieldId::City => "City",
            FieldId::Province => "Province",
            FieldId::Region => "Region",
            FieldId::Latitude => "Latitude",
            FieldId::Longitude => "Longitude",
            FieldId::OwnerFirstName => "Owner First Name",
            FieldId::OwnerLastName => "Owner Last Name",
            FieldId::OwnerMiddleName => "Owner Middle Name",
            FieldId::OwnerSuffix => "Owner Suffix",
            FieldId::OwnerEmail => "Owner Email",
            FieldId::OwnerMobile => "Owner Mobile No.",
            FieldId::OwnerLandline => "Owner Landline",
            FieldId::SameAsOwner => "Representative same as owner",
            FieldId::RepFirstName => "Representative First Name",
            FieldId::RepLastName => "Representative Last Name",
            FieldId::RepMiddleName => "Representative Middle Name",
            FieldId::RepSuffix => "Representative Suffix",
            FieldId::RepEmail => "Representative Email",
            FieldId::RepMobile => "Representative Mobile No.",
            FieldId::RepLandline => "Representative Landline",
            FieldId::Certify => "Certification of correctness",
            FieldId::ContractorName => "Contractor Name",
            FieldId::FsecNumber => "FSEC Number",
            FieldId::OccupancyPermitNumber => "Occupancy Permit No.",
            FieldId::Subtype => "Application Subtype",
            FieldId::ArchitecturalPlans => "Architectural Plans",
            FieldId::CivilStructuralPlans => "Civil/Structural Plans",
            FieldId::MechanicalPlans => "Mechanical Plans",
            FieldId::ElectricalPlans => "Electrical Plans",
            FieldId::PlumbingPlans => "Plumbing Plans",
            FieldId::SanitaryPlans => "Sanitary Plans",
            FieldId::FireProtectionPlans => "Fire Protection Plans",
            FieldId::ElectronicsDocuments => "Electronics Documents",
            FieldId::FireSafetyComplianceReport => "Fire Safety Compliance Report",
            FieldId::CostEstimates => "Cost Estimates",
            FieldId::OboEndorsement => "OBO Endorsement",
            FieldId::CertificateOfCompletion => "Certificate of Completion",
            FieldId::AssessmentFeeReceipt => "Assessment Fee Receipt",
            FieldId::AsBuiltPlan => "As-Built Plan",
            FieldId::FsecCertificate => "FSEC Certificate",
            FieldId::CertificateOfOccupancy => "Certificate of Occupancy",
            FieldId::AffidavitOfUndertaking => "Affidavit of Undertaking",
            FieldId::BploAssessmentReceipt => "BPLO Assessment Receipt",
            FieldId::FireInsurancePolicy => "Fire Insurance Policy",
            FieldId::FireSafetyMaintenanceReport => "Fire Safety Maintenance Report",
            FieldId::FireSafetyClearance => "Fire Safety Clearance (Hot Works)",
        }
    }

    /// Wire name used in payloads and upload paths
    pub fn key(self) -> &'static str {
        match self {
            FieldId::BusinessName => "business_name",
            FieldId::DtiCertificateNo => "dti_certificate_no",
            FieldId::BusinessType => "business_type",
            FieldId::OccupancyType => "occupancy_type",
            FieldId::NumStoreys => "num_storeys",
            FieldId::TotalFloorArea => "total_floor_area",
            FieldId::NumOccupants => "num_occupants",
            FieldId::ActiveStatus => "active_status",
            FieldId::DtiCertificateFile => "dti_certificate",
            FieldId::Street => "street_address",
            FieldId::Barangay => "barangay",
            FieldId::City => "city",
            FieldId::Province => "province",
            FieldId::Region => "region",
            FieldId::Latitude => "latitude",
            FieldId::Longitude => "longitude",
            FieldId::OwnerFirstName => "owner_first_name",
            FieldId::OwnerLastName => "owner_last_name",
            FieldId::OwnerMiddleName => "owner_middle_name",
            FieldId::OwnerSuffix => "owner_suffix",
            FieldId::OwnerEmail => "owner_email",
            FieldId::OwnerMobile => "owner_mobile",
            FieldId::OwnerLandline => "owner_landline",
            FieldId::SameAsOwner => "same_as_owner",
            FieldId::RepFirstName => "rep_first_name",
            FieldId::RepLastName => "rep_last_name",
            FieldId::RepMiddleName => "rep_middle_name",
            FieldId::RepSuffix => "rep_suffix",
            FieldId::RepEmail => "rep_email",
            FieldId::RepMobile => "rep_mobile",
            FieldId::RepLandline => "rep_landline",
            FieldId::Certify => "certify",
            FieldId::ContractorName => "contractor_name",
            FieldId::FsecNumber => "fsec_number",
            FieldId::OccupancyPermitNumber => "occupancy_permit_number",
            FieldId::Subtype => "application_subtype",
            FieldId::ArchitecturalPlans => "architectural_plans",
            FieldId::CivilStructuralPlans => "civil_structural_plans",
            FieldId::MechanicalPlans => "mechanical_plans",
            FieldId::ElectricalPlans => "electrical_plans",
            FieldId::PlumbingPlans => "plumbing_plans",
            FieldId::SanitaryPlans => "sanitary_plans",
            FieldId::FireProtectionPlans => "fire_protection_plans",
            FieldId::ElectronicsDocuments => "electronics_documents",
            FieldId::FireSafetyComplianceReport => "fire_safety_compliance_report",
            FieldId::CostEstimates => "cost_estimates",
            FieldId::OboEndorsement => "obo_endorsement",
            FieldId::CertificateOfCompletion => "certificate_of_completion",
            FieldId::AssessmentFeeReceipt => "assessment_fee_receipt",
            FieldId::AsBuiltPlan => "as_built_plan",
            FieldId::FsecCertificate => "fsec_certificate",
            FieldId::CertificateOfOccupancy => "certificate_of_occupancy",
            FieldId::AffidavitOfUndertaking => "affidavit_of_undertaking",
            FieldId::BploAssessmentReceipt => "bplo_assessment_receipt",
            FieldId::FireInsurancePolicy => "fire_insurance_policy",
            FieldId::FireSafetyMaintenanceReport => "fire_safety_maintenance_report",
            FieldId::FireSafetyClearance => "fire_safety_clearance",
        }
    }

    /// Editing/rendering kind
    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::BusinessType => FieldKind::Select(&choices::BUILDING_TYPES),
            FieldId::OccupancyType => FieldKind::Select(&choices::OCCUPANCY_TYPES),
            FieldId::ActiveStatus => FieldKind::Select(&choices::ACTIVE_STATUSES),
            FieldId::Barangay => FieldKind::Select(&choices::BARANGAYS),
            FieldId::OwnerSuffix | FieldId::RepSuffix => {
                FieldKind::Select(&choices::NAME_SUFFIXES)
            }
            FieldId::Subtype => FieldKind::Select(&choices::APPLICATION_SUBTYPES),
            FieldId::NumStoreys
            | FieldId::TotalFloorArea
            | FieldId::NumOccupants
            | FieldId::Latitude
            | FieldId::Longitude => FieldKind::Numeric,
            FieldId::SameAsOwner | FieldId::Certify => FieldKind::Flag,
            FieldId::DtiCertificateFile
            | FieldId::ArchitecturalPlans
            | FieldId::CivilStructuralPlans
            | FieldId::MechanicalPlans
            | FieldId::ElectricalPlans
            | FieldId::PlumbingPlans
            | FieldId::SanitaryPlans
            | FieldId::FireProtectionPlans
            | FieldId::ElectronicsDocuments
            | FieldId::FireSafetyComplianceReport
            | FieldId::CostEstimates
            | FieldId::OboEndorsement
            | FieldId::CertificateOfCompletion
            | FieldId::AssessmentFeeReceipt
            | FieldId::AsBuiltPlan
            | FieldId::FsecCertificate
            | FieldId::CertificateOfOccupancy
            | FieldId::AffidavitOfUndertaking
            | FieldId::BploAssessmentReceipt
            | FieldId::FireInsurancePolicy
            | FieldId::FireSafetyMaintenanceReport
            | FieldId::FireSafetyClearance => FieldKind::File,
            _ => FieldKind::Text,
        }
    }

    /// Initial value when a wizard opens
    pub fn default_value(self) -> FieldValue {
        match self {
            FieldId::City => FieldValue::text("Valenzuela"),
            FieldId::Province => FieldValue::text("Metro Manila"),
            FieldId::Region => FieldValue::text("NCR"),
            FieldId::NumStoreys => FieldValue::text("1"),
            FieldId::TotalFloorArea
            | FieldId::NumOccupants
            | FieldId::Latitude
            | FieldId::Longitude => FieldValue::text("0"),
            FieldId::ActiveStatus => FieldValue::text("Active"),
            FieldId::Subtype => FieldValue::text("New"),
            _ => match self.kind() {
                FieldKind::Flag => FieldValue::Flag(false),
                FieldKind::File => FieldValue::File(FileValue::None),
                _ => FieldValue::default(),
            },
        }
    }

    pub fn is_file(self) -> bool {
        self.kind() == FieldKind::File
    }
}
