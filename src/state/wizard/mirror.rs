//! Owner-to-representative field mirroring

use std::collections::BTreeMap;

use super::field::FieldId;
use super::value::FieldValue;

/// Owner fields and the representative fields they shadow
pub const MIRROR_PAIRS: [(FieldId, FieldId); 7] = [
    (FieldId::OwnerFirstName, FieldId::RepFirstName),
    (FieldId::OwnerLastName, FieldId::RepLastName),
    (FieldId::OwnerMiddleName, FieldId::RepMiddleName),
    (FieldId::OwnerSuffix, FieldId::RepSuffix),
    (FieldId::OwnerEmail, FieldId::RepEmail),
    (FieldId::OwnerMobile, FieldId::RepMobile),
    (FieldId::OwnerLandline, FieldId::RepLandline),
];

/// Representative counterpart of an owner field, if it has one
pub fn rep_counterpart(owner: FieldId) -> Option<FieldId> {
    MIRROR_PAIRS
        .iter()
        .find(|(o, _)| *o == owner)
        .map(|(_, rep)| *rep)
}

/// Whether the field is one of the mirrored representative fields
pub fn is_rep_field(field: FieldId) -> bool {
    MIRROR_PAIRS.iter().any(|(_, rep)| *rep == field)
}

/// Whether representative fields currently shadow the owner fields.
///
/// While `Mirrored`, every owner-field write is copied to its counterpart
/// in the same mutation. Detaching keeps the last-mirrored values;
/// re-attaching replays a full copy before per-write mirroring resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorLink {
    #[default]
    Independent,
    Mirrored,
}

impl MirrorLink {
    pub fn is_mirrored(self) -> bool {
        matches!(self, MirrorLink::Mirrored)
    }

    /// Start mirroring: one full owner-to-representative copy, then
    /// per-write propagation. No-op when already attached.
    pub fn attach(&mut self, values: &mut BTreeMap<FieldId, FieldValue>) {
        if self.is_mirrored() {
            return;
        }
        for (owner, rep) in MIRROR_PAIRS {
            let value = values.get(&owner).cloned().unwrap_or_default();
            values.insert(rep, value);
        }
        *self = MirrorLink::Mirrored;
    }

    /// Stop mirroring. Representative fields keep whatever was last copied.
    pub fn detach(&mut self) {
        *self = MirrorLink::Independent;
    }

    /// Copy a single owner write across while attached
    pub fn propagate(self, owner: FieldId, values: &mut BTreeMap<FieldId, FieldValue>) {
        if !self.is_mirrored() {
            return;
        }
        if let Some(rep) = rep_counterpart(owner) {
            let value = values.get(&owner).cloned().unwrap_or_default();
            values.insert(rep, value);
        }
    }
}
