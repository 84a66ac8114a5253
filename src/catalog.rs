//! Static catalogs used for query validation

/// Karnataka districts accepted by the crop-insights query
pub const KARNATAKA_DISTRICTS: &[&str] = &[
    "Bagalkot",
    "Ballari (Bellary)",
    "Belagavi (Belgaum)",
    "Bengaluru Rural",
    "Bengaluru Urban",
    "Bidar",
    "Chamarajanagar",
    "Chikballapur",
    "Chikkamagaluru",
    "Chitradurga",
    "Dakshina Kannada",
    "Davanagere",
    "Dharwad",
    "Gadag",
    "Hassan",
    "Haveri",
    "Kalaburagi (Gulbarga)",
    "Kodagu",
    "Kolar",
    "Koppal",
    "Mandya",
    "Mysuru (Mysore)",
    "Raichur",
    "Ramanagara",
    "Shivamogga (Shimoga)",
    "Tumakuru (Tumkur)",
    "Udupi",
    "Uttara Kannada",
    "Vijayapura (Bijapur)",
    "Yadgir",
];

pub const MONTHS: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Case-insensitive district lookup; matches either the full entry or the
/// name before any parenthesized alias
pub fn find_district(input: &str) -> Option<&'static str> {
    let needle = input.trim().to_ascii_lowercase();
    KARNATAKA_DISTRICTS.iter().copied().find(|district| {
        let full = district.to_ascii_lowercase();
        let short = full.split(" (").next().unwrap_or(&full).to_string();
        full == needle || short == needle
    })
}

/// Case-insensitive month lookup
pub fn find_month(input: &str) -> Option<&'static str> {
    let needle = input.trim().to_ascii_lowercase();
    MONTHS
        .iter()
        .copied()
        .find(|month| month.to_ascii_lowercase() == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_district_exact() {
        assert_eq!(find_district("Mandya"), Some("Mandya"));
    }

    #[test]
    fn test_find_district_short_form_and_case() {
        assert_eq!(find_district("mysuru"), Some("Mysuru (Mysore)"));
        assert_eq!(find_district("BALLARI (BELLARY)"), Some("Ballari (Bellary)"));
    }

    #[test]
    fn test_find_district_unknown() {
        assert_eq!(find_district("Atlantis"), None);
    }

    #[test]
    fn test_find_month() {
        assert_eq!(find_month("june"), Some("June"));
        assert_eq!(find_month("Snowuary"), None);
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(KARNATAKA_DISTRICTS.len(), 30);
        assert_eq!(MONTHS.len(), 12);
    }
}
