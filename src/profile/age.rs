//! Date-of-birth parsing and age computation.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date layouts accepted for a date of birth, tried in order.
///
/// Slash and dash day/month layouts are ambiguous; month-first wins, the
/// same way common US-style parsers resolve `01/02/1990`.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a free-form date of birth.
pub fn parse_dob(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
    {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Whole years between `dob` and `today`.
///
/// `None` for unparseable input or a birth date in the future.
pub fn compute_age(dob: &str, today: NaiveDate) -> Option<u32> {
    let born = parse_dob(dob)?;
    today.years_since(born)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_birthday_already_passed() {
        assert_eq!(compute_age("1990-03-15", date(2024, 6, 1)), Some(34));
    }

    #[test]
    fn test_birthday_not_yet_reached() {
        assert_eq!(compute_age("1990-09-15", date(2024, 6, 1)), Some(33));
    }

    #[test]
    fn test_birthday_today() {
        assert_eq!(compute_age("1990-06-01", date(2024, 6, 1)), Some(34));
    }

    #[test]
    fn test_leap_day_birthday() {
        assert_eq!(compute_age("2000-02-29", date(2023, 2, 28)), Some(22));
        assert_eq!(compute_age("2000-02-29", date(2023, 3, 1)), Some(23));
    }

    #[test]
    fn test_accepted_layouts() {
        let today = date(2024, 6, 1);
        for dob in [
            "1990/03/15",
            "1990.03.15",
            "03/15/1990",
            "15/03/1990",
            "15-03-1990",
            "March 15, 1990",
            "Mar 15, 1990",
            "15 March 1990",
            "1990-03-15T08:30:00Z",
            "1990-03-15T08:30:00",
            "  1990-03-15  ",
        ] {
            assert_eq!(compute_age(dob, today), Some(34), "layout {dob:?}");
        }
    }

    #[test]
    fn test_ambiguous_slash_date_is_month_first() {
        assert_eq!(parse_dob("01/02/1990"), Some(date(1990, 1, 2)));
    }

    #[test]
    fn test_unparseable_dob() {
        let today = date(2024, 6, 1);
        assert_eq!(compute_age("", today), None);
        assert_eq!(compute_age("not a date", today), None);
        assert_eq!(compute_age("1990-13-45", today), None);
    }

    #[test]
    fn test_future_dob() {
        assert_eq!(compute_age("2030-01-01", date(2024, 6, 1)), None);
    }
}
