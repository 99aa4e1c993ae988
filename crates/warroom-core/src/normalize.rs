// Normalization of raw team and position codes from ranking exports.

/// Canonicalize an NFL team abbreviation.
///
/// Upper-cases and trims, then maps legacy or alternate codes onto the
/// abbreviation used throughout the catalog (JAX -> JAC, LA -> LAR,
/// WSH -> WAS, STL -> LAR, SD -> LAC).
pub fn normalize_team(abbr: &str) -> String {
    let code = abbr.trim().to_uppercase();
    match code.as_str() {
        "JAX" => "JAC".to_string(),
        "LA" | "STL" => "LAR".to_string(),
        "WSH" => "WAS".to_string(),
        "SD" => "LAC".to_string(),
        _ => code,
    }
}

/// Collapse a raw position string to its base code.
///
/// Ranking exports often suffix positional rank ("WR12", "RB3", "DST1");
/// those are reduced to the bare position. Kickers may appear as "PK",
/// defenses as "DST" or "DSTDEF".
pub fn normalize_position(raw: &str) -> String {
    let p = raw.trim().to_uppercase();
    let base = p.trim_end_matches(|c: char| c.is_ascii_digit());
    if p.starts_with("QB") {
        "QB".to_string()
    } else if p.starts_with("RB") {
        "RB".to_string()
    } else if p.starts_with("WR") {
        "WR".to_string()
    } else if p.starts_with("TE") {
        "TE".to_string()
    } else if base == "K" || base == "PK" {
        "K".to_string()
    } else if base == "DST" || base == "DEF" || base == "DSTDEF" {
        "DEF".to_string()
    } else {
        p
    }
}

/// Interpret a bye week value. Zero and anything outside 1..=u8::MAX mean
/// "no bye known".
pub fn normalize_bye(raw: i64) -> Option<u8> {
    u8::try_from(raw).ok().filter(|w| *w > 0)
}

/// Parse a number out of a decorated cell ("12.5%", "1,204", " 7 ").
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The integer value of `v` when it has no fractional part ("10.0" -> 10).
pub fn whole_number(v: f64) -> Option<i64> {
    (v.is_finite() && v.fract() == 0.0 && v.abs() <= i64::MAX as f64).then(|| v as i64)
}

/// A bye week from a raw cell: "10", "10.0" and " 10 " all mean week 10.
pub fn parse_bye(raw: &str) -> Option<u8> {
    parse_number(raw)
        .and_then(whole_number)
        .and_then(normalize_bye)
}
