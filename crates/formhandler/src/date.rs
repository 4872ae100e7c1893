//! Lenient date parsing with diagnostics.
//!
//! [`parse_date`] never fails. It reports which components it could
//! resolve, plus warnings (a recognised shape that is not a calendar date)
//! and errors (nothing recognisable). Callers decide what is good enough.
//!
//! A shape is recognised from its structure alone; only then are the
//! numbers checked against the calendar. "2024-02-30" is therefore a
//! warning, while "2024-02-3x" is an error.

use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Warning for a recognised date whose fields overflow the calendar.
pub const INVALID_DATE_WARNING: &str = "The parsed date was invalid";

/// Error for an empty input.
pub const EMPTY_STRING_ERROR: &str = "Empty string";

/// Error for input no known shape matches.
pub const UNRECOGNISED_ERROR: &str = "Unrecognised date format";

// Numeric shapes never overlap, so the first structural match decides.
// Groups: y m d, then optional H M S, fraction f and offset tz.
static NUMERIC_SHAPES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        concat!(
            r"^(?P<y>\d{4})-(?P<m>\d{1,2})-(?P<d>\d{1,2})",
            r"(?:[Tt ](?P<H>\d{1,2}):(?P<M>\d{2})(?::(?P<S>\d{2})(?:[.,](?P<f>\d{1,9}))?)?",
            r"\s*(?P<tz>[Zz]|[+-]\d{2}:?\d{2})?)?$",
        ),
        concat!(
            r"^(?P<y>\d{4})/(?P<m>\d{1,2})/(?P<d>\d{1,2})",
            r"(?: (?P<H>\d{1,2}):(?P<M>\d{2})(?::(?P<S>\d{2}))?)?$",
        ),
        r"^(?P<y>\d{4})(?P<m>\d{2})(?P<d>\d{2})$",
        r"^(?P<m>\d{1,2})/(?P<d>\d{1,2})/(?P<y>\d{4})$",
        r"^(?P<d>\d{1,2})\.(?P<m>\d{1,2})\.(?P<y>\d{4})$",
        r"^(?P<d>\d{1,2})-(?P<m>\d{1,2})-(?P<y>\d{4})$",
        r"^(?P<y>\d{4})[-/](?P<m>\d{1,2})$",
        r"^(?P<m>\d{1,2})/(?P<y>\d{4})$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("date pattern is valid"))
    .collect()
});

// Parsed with a day prepended, since chrono needs one to build a date.
// Tried before DATE_FORMATS: chrono skips whitespace before numbers, so
// "%B %d %Y" would read "March 2024" as March 20, year 24.
const MONTH_FORMATS: &[&str] = &["%B %Y", "%B, %Y"];

const DATE_FORMATS: &[&str] = &["%d %B %Y", "%d %B, %Y", "%B %d, %Y", "%B %d %Y"];

/// Components and diagnostics produced by [`parse_date`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    /// UTC offset in seconds, when the input carried one.
    pub offset: Option<i32>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ParsedDate {
    /// Number of warnings raised while parsing.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Number of errors raised while parsing.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// True when parsing raised neither warnings nor errors and at least
    /// the year and month are known.
    pub fn is_calendar_date(&self) -> bool {
        self.warnings.is_empty()
            && self.errors.is_empty()
            && self.year.is_some()
            && self.month.is_some()
    }

    fn from_datetime(dt: NaiveDateTime) -> Self {
        Self {
            hour: Some(dt.hour()),
            minute: Some(dt.minute()),
            second: Some(dt.second()),
            ..Self::from_date(dt.date())
        }
    }

    fn from_date(date: NaiveDate) -> Self {
        Self {
            day: Some(date.day()),
            ..Self::from_month(date)
        }
    }

    fn from_month(date: NaiveDate) -> Self {
        Self {
            year: Some(date.year()),
            month: Some(date.month()),
            ..Self::default()
        }
    }

    fn diagnostic(warning: Option<&str>, error: Option<&str>) -> Self {
        Self {
            warnings: warning.map(str::to_string).into_iter().collect(),
            errors: error.map(str::to_string).into_iter().collect(),
            ..Self::default()
        }
    }

    fn overflow() -> Self {
        Self::diagnostic(Some(INVALID_DATE_WARNING), None)
    }
}

/// Parses a free-form date string.
///
/// ```rust
/// use formhandler::date::parse_date;
///
/// assert!(parse_date("2024-02-29").is_calendar_date());
/// assert!(parse_date("March 2024").is_calendar_date());
/// assert!(parse_date("2024-01-15 10:00:00 +0200").is_calendar_date());
/// assert_eq!(parse_date("2024-02-30").warning_count(), 1);
/// assert_eq!(parse_date("soon").error_count(), 1);
/// ```
pub fn parse_date(input: &str) -> ParsedDate {
    let value = input.trim();
    if value.is_empty() {
        return ParsedDate::diagnostic(None, Some(EMPTY_STRING_ERROR));
    }

    if let Some(caps) = NUMERIC_SHAPES.iter().find_map(|shape| shape.captures(value)) {
        return from_numeric(&caps).unwrap_or_else(ParsedDate::overflow);
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return with_offset(dt);
    }

    let with_day = format!("1 {value}");
    let month_only = MONTH_FORMATS
        .iter()
        .find_map(|fmt| textual(&with_day, &format!("%d {fmt}")));
    let result = match month_only {
        Some(date) => Some(date.map(ParsedDate::from_month)),
        None => DATE_FORMATS
            .iter()
            .find_map(|fmt| textual(value, fmt))
            .map(|date| date.map(ParsedDate::from_date)),
    };

    match result {
        Some(Some(parsed)) => parsed,
        Some(None) => ParsedDate::overflow(),
        None => ParsedDate::diagnostic(None, Some(UNRECOGNISED_ERROR)),
    }
}

/// Builds the result for a structurally matched numeric shape. `None`
/// when a component overflows the calendar or the clock.
fn from_numeric(caps: &Captures<'_>) -> Option<ParsedDate> {
    let number = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = caps.name("y")?.as_str().parse().ok()?;
    let month = number("m")?;
    let date = NaiveDate::from_ymd_opt(year, month, number("d").unwrap_or(1))?;

    if caps.name("d").is_none() {
        return Some(ParsedDate::from_month(date));
    }
    let Some(hour) = number("H") else {
        return Some(ParsedDate::from_date(date));
    };

    let nanos = caps
        .name("f")
        .map_or(Some(0), |f| format!("{:0<9}", f.as_str()).parse::<u32>().ok())?;
    let second = number("S").unwrap_or(0);
    let time = NaiveTime::from_hms_nano_opt(hour, number("M")?, second, nanos)?;
    let offset = match caps.name("tz") {
        Some(tz) => Some(parse_offset(tz.as_str())?.local_minus_utc()),
        None => None,
    };

    Some(ParsedDate {
        offset,
        ..ParsedDate::from_datetime(date.and_time(time))
    })
}

/// Parses `Z`, `+02:00` or `-0530`.
fn parse_offset(tz: &str) -> Option<FixedOffset> {
    if tz.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }
    let (sign, digits) = tz.split_at(1);
    let digits = digits.replace(':', "");
    let hours: i32 = digits.get(..2)?.parse().ok()?;
    let minutes: i32 = digits.get(2..)?.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    let seconds = (hours * 60 + minutes) * 60;
    FixedOffset::east_opt(if sign == "-" { -seconds } else { seconds })
}

fn with_offset(dt: DateTime<FixedOffset>) -> ParsedDate {
    ParsedDate {
        offset: Some(dt.offset().local_minus_utc()),
        ..ParsedDate::from_datetime(dt.naive_local())
    }
}

/// Tries one textual shape. `None` when the structure does not match,
/// `Some(None)` when it matches but names no calendar date.
fn textual(value: &str, fmt: &str) -> Option<Option<NaiveDate>> {
    let mut parsed = Parsed::default();
    parse(&mut parsed, value, StrftimeItems::new(fmt)).ok()?;
    Some(parsed.to_naive_date().ok())
}
