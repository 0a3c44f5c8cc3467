/// Canonical form of a callsign as it appears in graph keys: trimmed,
/// uppercased, trailing punctuation stripped. SSID suffixes (`-7`) and
/// portable markers (`/P`) survive normalization.
pub fn normalize_callsign(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '/' || c == '-'))
        .to_ascii_uppercase()
}

pub fn round_snr(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

pub fn format_snr(snr: f32) -> String {
    format!("{snr:.1} dB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_uppercases_and_trims() {
        assert_eq!(normalize_callsign("  w1abc "), "W1ABC");
        assert_eq!(normalize_callsign("n1xyz-7"), "N1XYZ-7");
    }

    #[test]
    fn normalize_strips_trailing_punctuation() {
        assert_eq!(normalize_callsign("W1ABC:"), "W1ABC");
        assert_eq!(normalize_callsign("w1abc-7.,"), "W1ABC-7");
        assert_eq!(normalize_callsign("K2DEF/P>"), "K2DEF/P");
    }

    #[test]
    fn round_snr_keeps_one_decimal() {
        assert_eq!(round_snr(5.24), 5.2);
        assert_eq!(round_snr(-3.04), -3.0);
        assert_eq!(round_snr(0.05), 0.1);
    }

    #[test]
    fn format_snr_keeps_one_decimal() {
        assert_eq!(format_snr(-3.0), "-3.0 dB");
        assert_eq!(format_snr(5.2), "5.2 dB");
    }
}
