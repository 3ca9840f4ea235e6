/// Converts a Letterboxd star rating (0–5, half-star steps) to the 0–10
/// scale the rest of the application uses.
///
/// Empty or non-numeric input means "unrated", not an error.
pub fn normalize_rating(raw: &str) -> Option<u8> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let stars: f64 = trimmed.parse().ok()?;
    if !stars.is_finite() {
        return None;
    }

    Some((stars * 2.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_half_stars() {
        assert_eq!(normalize_rating("4.5"), Some(9));
        assert_eq!(normalize_rating("0.5"), Some(1));
    }

    #[test]
    fn scales_whole_stars() {
        assert_eq!(normalize_rating("5"), Some(10));
        assert_eq!(normalize_rating("3"), Some(6));
    }

    #[test]
    fn empty_input_is_unrated() {
        assert_eq!(normalize_rating(""), None);
        assert_eq!(normalize_rating("   "), None);
    }

    #[test]
    fn non_numeric_input_is_unrated() {
        assert_eq!(normalize_rating("five"), None);
        assert_eq!(normalize_rating("★★★"), None);
    }
}
