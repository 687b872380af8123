//! SAUCE date representation.
//!
//! `SauceDate` models the CCYYMMDD 8‑byte date stored inside a SAUCE record.
//! Parsing is strict about calendar validity: month 13 or day 0, which do
//! appear in records written by buggy tools, parse to "no date" (`None`)
//! rather than to a nonsense value. When the `chrono` feature is enabled you
//! can convert to/from `chrono::NaiveDate`.
//!
//! # Storage Format
//!
//! SAUCE dates are stored as 8 ASCII digits: `YYYYMMDD`. This type keeps
//! the split numeric components (`year`, `month`, `day`) for easy
//! formatting without heap allocations. A record with no date stores eight
//! blanks; that wire form round-trips through `None` at the field level.
//!
//! # Display vs Write
//!
//! - `Display` (`fmt`) renders the date as `YYYY/MM/DD` for readability.
//! - `write()` serializes the strict SAUCE wire format `YYYYMMDD`.
//!
//! # Examples
//!
//! ```
//! use sauce_codec::SauceDate;
//! let d = SauceDate::from_bytes(b"19940831").unwrap();
//! assert_eq!(d.to_string(), "1994/08/31");
//! assert!(SauceDate::from_bytes(b"19941331").is_none()); // month 13
//! assert!(SauceDate::from_bytes(b"20230229").is_none()); // not a leap year
//! ```

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SauceDate {
    /// Full 4‑digit year.
    pub year: i32,
    /// Month value (1–12).
    pub month: u8,
    /// Day of month (1–31, validated against the month on parse).
    pub day: u8,
}

impl std::fmt::Display for SauceDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.year >= 0 && self.year < 10_000 {
            write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
        } else {
            write!(f, "{}/{:02}/{:02}", self.year, self.month, self.day)
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

impl SauceDate {
    /// Construct a new `SauceDate` without validation.
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        SauceDate { year, month, day }
    }

    /// Parse an 8‑byte `YYYYMMDD` ASCII slice into a `SauceDate`.
    ///
    /// Returns `None` if:
    /// - Slice length != 8
    /// - Any byte is not an ASCII digit ('0'-'9')
    /// - Month or day are calendar-invalid (month 13, day 0, Feb 30, ...)
    ///
    /// ```
    /// use sauce_codec::SauceDate;
    /// assert!(SauceDate::from_bytes(b"20251108").is_some());
    /// assert!(SauceDate::from_bytes(b"2025").is_none());
    /// assert!(SauceDate::from_bytes(b"ABCD1108").is_none()); // Non-digits rejected
    /// assert!(SauceDate::from_bytes(b"20251100").is_none()); // Day 0 rejected
    /// ```
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 8 {
            return None;
        }

        if !bytes.iter().all(|&b| b.is_ascii_digit()) {
            return None;
        }

        let parse_two_digits = |pair: &[u8]| -> u8 { (pair[0] - b'0') * 10 + (pair[1] - b'0') };

        let year = (bytes[0] - b'0') as i32 * 1000
            + (bytes[1] - b'0') as i32 * 100
            + (bytes[2] - b'0') as i32 * 10
            + (bytes[3] - b'0') as i32;

        let month = parse_two_digits(&bytes[4..6]);
        let day = parse_two_digits(&bytes[6..8]);

        if !(1..=12).contains(&month) {
            return None;
        }
        if day == 0 || day > days_in_month(year, month) {
            return None;
        }

        Some(SauceDate { year, month, day })
    }

    /// Write the strict SAUCE wire format (`YYYYMMDD`) to a writer.
    ///
    /// ```
    /// use sauce_codec::SauceDate;
    /// let mut buf = Vec::new();
    /// SauceDate::new(2025, 11, 8).write(&mut buf).unwrap();
    /// assert_eq!(&buf, b"20251108");
    /// ```
    pub fn write<A: std::io::Write>(&self, writer: &mut A) -> crate::Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// The eight wire bytes of this date. Out-of-range components are
    /// clamped so the output is always eight ASCII digits.
    pub fn to_bytes(&self) -> [u8; 8] {
        let y = self.year.clamp(0, 9999) as u32;
        let m = self.month.min(99) as u32;
        let d = self.day.min(99) as u32;
        [
            b'0' + (y / 1000) as u8,
            b'0' + (y / 100 % 10) as u8,
            b'0' + (y / 10 % 10) as u8,
            b'0' + (y % 10) as u8,
            b'0' + (m / 10) as u8,
            b'0' + (m % 10) as u8,
            b'0' + (d / 10) as u8,
            b'0' + (d % 10) as u8,
        ]
    }

    /// Attempt conversion to `chrono::NaiveDate`, returning `None` on
    /// invalid ranges.
    #[cfg(feature = "chrono")]
    pub fn to_naive_date(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::from_ymd_opt(self.year, self.month as u32, self.day as u32)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for SauceDate {
    fn from(d: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        SauceDate::new(d.year(), d.month() as u8, d.day() as u8)
    }
}

#[cfg(feature = "chrono")]
impl std::convert::TryFrom<SauceDate> for chrono::NaiveDate {
    type Error = ();

    fn try_from(value: SauceDate) -> Result<Self, Self::Error> {
        chrono::NaiveDate::from_ymd_opt(value.year, value.month as u32, value.day as u32).ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(SauceDate::from_bytes(b"20240229").is_some());
        assert!(SauceDate::from_bytes(b"19000229").is_none()); // century, not leap
        assert!(SauceDate::from_bytes(b"20000229").is_some()); // 400-year rule
    }

    #[test]
    fn wire_roundtrip() {
        let date = SauceDate::from_bytes(b"19940831").unwrap();
        assert_eq!(&date.to_bytes(), b"19940831");
    }
}
