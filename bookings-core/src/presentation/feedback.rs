//! Post-meeting feedback links (`?rating=` and `?noShow=`).

pub const DEFAULT_RATING: u8 = 3;

/// Feedback requested through the booking link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    /// Attendee reported the host as a no-show
    pub no_show: bool,
    /// Rating preselected in the form, 1..=5
    pub rating: u8,
}

impl Feedback {
    /// Feedback mode is on when either parameter is present.
    pub fn from_params(no_show: bool, rating: Option<&str>) -> Option<Self> {
        if !no_show && rating.is_none() {
            return None;
        }

        Some(Feedback {
            no_show,
            rating: normalize_rating(rating),
        })
    }
}

/// Parse a rating parameter, defaulting to 3 and clamping to 1..=5.
///
/// Leading digits are used ("4stars" is 4); anything without them is the default.
pub fn normalize_rating(raw: Option<&str>) -> u8 {
    let Some(raw) = raw else {
        return DEFAULT_RATING;
    };

    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if end == 0 {
        return DEFAULT_RATING;
    }
    if negative {
        return 1;
    }

    match digits[..end].parse::<u64>() {
        Ok(n) => n.clamp(1, 5) as u8,
        // Too many digits to fit: certainly above the maximum
        Err(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_garbage_rating_defaults() {
        assert_eq!(normalize_rating(None), 3);
        assert_eq!(normalize_rating(Some("")), 3);
        assert_eq!(normalize_rating(Some("great")), 3);
    }

    #[test]
    fn rating_is_clamped() {
        assert_eq!(normalize_rating(Some("9")), 5);
        assert_eq!(normalize_rating(Some("0")), 1);
        assert_eq!(normalize_rating(Some("-2")), 1);
        assert_eq!(normalize_rating(Some("99999999999999999999999")), 5);
    }

    #[test]
    fn rating_uses_leading_digits() {
        assert_eq!(normalize_rating(Some("4stars")), 4);
        assert_eq!(normalize_rating(Some(" 2")), 2);
        assert_eq!(normalize_rating(Some("4.8")), 4);
    }

    #[test]
    fn feedback_mode_needs_a_parameter() {
        assert_eq!(Feedback::from_params(false, None), None);
        assert_eq!(
            Feedback::from_params(true, None),
            Some(Feedback { no_show: true, rating: 3 })
        );
        assert_eq!(
            Feedback::from_params(false, Some("5")),
            Some(Feedback { no_show: false, rating: 5 })
        );
    }
}
