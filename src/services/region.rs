// Countries whose players count as in-region for the tournament (EU member states).
const REGION_COUNTRIES: [&str; 27] = [
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE",
    "FI", "FR", "DE", "GR", "HU", "IE", "IT", "LV",
    "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK",
    "SI", "ES", "SE"
];

pub fn is_in_region(country_code: &str) -> bool {
    let code = country_code.trim();
    REGION_COUNTRIES.iter().any(|o| o.eq_ignore_ascii_case(code))
}
