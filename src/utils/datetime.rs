//! Date and time helpers
//!
//! Parsing of the timestamps the API sends, the shifting used by repeating
//! calendar events, and human-readable formatting for terminal output.

use chrono::{DateTime, Datelike, Days, Duration, Local, Months, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

/// Date format used by the API and the config file
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of an editor date-time field (minute precision, no zone)
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Format used when listing activity timestamps
pub const ACTIVITY_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Parse a date string in YYYY-MM-DD format to NaiveDate
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, API_DATE_FORMAT)
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(API_DATE_FORMAT).to_string()
}

/// Parse a timestamp in any of the shapes the API or a user may produce.
///
/// RFC 3339 strings keep their offset. Zone-less strings are read as local time.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive_formats = ["%Y-%m-%dT%H:%M:%S%.f", DATETIME_LOCAL_FORMAT, "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
    let naive = naive_formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| parse_date(s).ok().and_then(|d| d.and_hms_opt(0, 0, 0)))?;

    Some(local_to_utc(&naive))
}

fn local_to_utc(naive: &NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(naive))
}

/// Render a timestamp the way a date-time input shows it, in local time.
pub fn format_datetime_local(dt: DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format(DATETIME_LOCAL_FORMAT).to_string()
}

/// Add whole weeks on the wall clock of `tz`, keeping the local time of day across DST changes.
pub fn add_weeks<Tz: TimeZone>(dt: DateTime<Utc>, n: u32, tz: &Tz) -> Option<DateTime<Utc>> {
    let local = dt.with_timezone(tz).naive_local();
    resolve_in(tz, &local.checked_add_days(Days::new(7 * u64::from(n)))?)
}

/// Add calendar months on the wall clock of `tz`, clamping the day to the end of shorter months.
pub fn add_months<Tz: TimeZone>(dt: DateTime<Utc>, n: u32, tz: &Tz) -> Option<DateTime<Utc>> {
    let local = dt.with_timezone(tz).naive_local();
    resolve_in(tz, &local.checked_add_months(Months::new(n))?)
}

/// Map a wall-clock time in `tz` back to UTC.
///
/// Ambiguous times take the earlier instant. A time skipped by a DST jump
/// moves forward by an hour.
fn resolve_in<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(*naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Pull an end time that sits exactly on midnight (in `tz`) back by one minute.
///
/// Keeps an event ending at 00:00 from spilling into the next day's cell.
pub fn normalize_midnight_end<Tz: TimeZone>(end: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let local = end.with_timezone(tz);
    if local.hour() == 0 && local.minute() == 0 {
        end - Duration::minutes(1)
    } else {
        end
    }
}

/// Format an activity timestamp as `dd/mm/yyyy HH:MM` in local time.
///
/// Unparseable input is returned unchanged.
pub fn format_activity_date(date_str: &str) -> String {
    match parse_timestamp(date_str) {
        Some(dt) => dt.with_timezone(&Local).format(ACTIVITY_FORMAT).to_string(),
        None => date_str.to_string(),
    }
}

/// Describe `date` relative to `today` ("today", "in 3 days", "Jan 15").
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        -1 => "yesterday".to_string(),
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        diff if (2..=7).contains(&diff) => format!("next {}", date.format("%A")),
        diff if (-7..=-2).contains(&diff) => format!("last {}", date.format("%A")),
        diff if (8..=30).contains(&diff) => format!("in {} days", diff),
        diff if (-30..=-8).contains(&diff) => format!("{} days ago", -diff),
        _ if date.year() == today.year() => date.format("%b %d").to_string(),
        _ => date.format("%b %d, %Y").to_string(),
    }
}

/// Human-readable local rendering of a timestamp, e.g. "tomorrow at 09:00".
pub fn format_human_datetime(dt: DateTime<Utc>) -> String {
    let local = dt.with_timezone(&Local);
    let today = Local::now().date_naive();
    format!("{} at {}", relative_day(local.date_naive(), today), local.format("%H:%M"))
}
