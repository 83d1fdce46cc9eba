//! Select-option catalogs for wizard fields

/// Barangay options for Valenzuela City
pub const BARANGAYS: [&str; 32] = [
    "Arkong Bato",
    "Bagbaguin",
    "Balangkas",
    "Bisig",
    "Canumay East",
    "Canumay West",
    "Coloong",
    "Dalandanan",
    "Gen. T. de Leon",
    "Isla",
    "Karuhatan",
    "Lawang Bato",
    "Lingunan",
    "Mabolo",
    "Malanday",
    "Malinta",
    "Mapulang Lupa",
    "Marulas",
    "Maysan",
    "Palasan",
    "Parada",
    "Pariancillo Villa",
    "Paso de Blas",
    "Pasolo",
    "Poblacion",
    "Pulo",
    "Punturin",
    "Rincon",
    "Tagalag",
    "Ugong",
    "Viente Reales",
    "Wawang Pulo",
];

/// Building types
pub const BUILDING_TYPES: [&str; 8] = [
    "Commercial",
    "Industrial",
    "Residential",
    "Educational",
    "Mixed-use",
    "Institutional",
    "Government",
    "Other",
];

/// Occupancy types
pub const OCCUPANCY_TYPES: [&str; 10] = [
    "Business Occupancy",
    "Educational Occupancy",
    "Day Care",
    "Healthcare Occupancy",
    "Industrial Occupancy",
    "Mercantile Occupancy",
    "Residential Occupancy",
    "Storage Occupancy",
    "Public Assembly",
    "Mixed Occupancy",
];

/// Name suffix options (empty means no suffix)
pub const NAME_SUFFIXES: [&str; 8] = ["", "Jr.", "Sr.", "I", "II", "III", "IV", "V"];

/// Active status options
pub const ACTIVE_STATUSES: [&str; 2] = ["Active", "Inactive"];

/// Application subtype options for business permits
pub const APPLICATION_SUBTYPES: [&str; 2] = ["New", "Renewal"];

/// Step to the next or previous option, wrapping around.
/// An unknown current value selects the first (or last) option.
pub fn cycle(options: &'static [&'static str], current: &str, forward: bool) -> &'static str {
    let len = options.len();
    match options.iter().position(|o| *o == current) {
        Some(i) if forward => options[(i + 1) % len],
        Some(i) => options[(i + len - 1) % len],
        None if forward => options[0],
        None => options[len - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_forward_wraps() {
        assert_eq!(cycle(&ACTIVE_STATUSES, "Inactive", true), "Active");
    }

    #[test]
    fn test_cycle_backward_wraps() {
        assert_eq!(cycle(&ACTIVE_STATUSES, "Active", false), "Inactive");
    }

    #[test]
    fn test_cycle_unknown_selects_first() {
        assert_eq!(cycle(&BUILDING_TYPES, "", true), "Commercial");
    }

    #[test]
    fn test_cycle_unknown_backward_selects_last() {
        assert_eq!(cycle(&BUILDING_TYPES, "", false), "Other");
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(BARANGAYS.len(), 32);
        assert_eq!(OCCUPANCY_TYPES.len(), 10);
        assert_eq!(NAME_SUFFIXES.len(), 8);
    }
}
