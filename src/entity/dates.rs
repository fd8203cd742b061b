//! Calendar date parsing for listing expiry dates.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/// Storage format of `Expiry_Date`
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Formats accepted on input, tried in order
const ACCEPTED_FORMATS: [&str; 3] = [ISO_DATE, "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a date written as `YYYY-MM-DD`, `M/D/YYYY` or `YYYY/MM/DD`
pub fn parse_date(input: &str) -> Result<NaiveDate, String> {
    let trimmed = input.trim();
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| format!("unrecognized date {input:?}, expected YYYY-MM-DD"))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        assert_eq!(parse_date("2025-03-17").unwrap(), expected);
        assert_eq!(parse_date("3/17/2025").unwrap(), expected);
        assert_eq!(parse_date(" 2025/03/17 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("17.03.2025").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_format_is_iso() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date(d), "2025-01-05");
    }
}
