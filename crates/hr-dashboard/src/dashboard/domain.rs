use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of the placeholder key carried by rows that have no persisted record.
pub const SYNTHETIC_PREFIX: &str = "temp-";

/// Rendered in place of a time or average when nothing was recorded.
pub const NO_DATA: &str = "-";

/// Backend identifier of a roster member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend identifier of a persisted attendance, payroll or leave record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a reconciled row is backed by a stored record.
///
/// Only `Persisted` rows can be updated. A `Synthetic` row stands in for a record that does
/// not exist yet and has to go through a create operation instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordIdentity {
    Persisted { id: RecordId },
    Synthetic { placeholder: String },
}

impl RecordIdentity {
    pub fn synthetic_for(employee_id: EmployeeId) -> Self {
        Self::Synthetic {
            placeholder: format!("{SYNTHETIC_PREFIX}{employee_id}"),
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, Self::Synthetic { .. })
    }

    pub fn record_id(&self) -> Option<RecordId> {
        match self {
            Self::Persisted { id } => Some(*id),
            Self::Synthetic { .. } => None,
        }
    }

    /// Key used by clients to address a row: the record id, or the `temp-` placeholder.
    pub fn key(&self) -> String {
        match self {
            Self::Persisted { id } => id.to_string(),
            Self::Synthetic { placeholder } => placeholder.clone(),
        }
    }

    /// Parses a row key produced by [`RecordIdentity::key`].
    pub fn from_key(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.starts_with(SYNTHETIC_PREFIX) {
            return Some(Self::Synthetic {
                placeholder: trimmed.to_string(),
            });
        }
        trimmed
            .parse::<i64>()
            .ok()
            .map(|id| Self::Persisted { id: RecordId(id) })
    }
}

/// Wall-clock time of day with minute precision, written as zero-padded `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    pub const MINUTES_PER_DAY: u16 = 24 * 60;

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < Self::MINUTES_PER_DAY).then_some(Self { minutes })
    }

    /// Accepts `H:MM` or `HH:MM`; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (hours, minutes) = raw.trim().split_once(':')?;
        if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
            return None;
        }
        if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let hours: u16 = hours.parse().ok()?;
        let minutes: u16 = minutes.parse().ok()?;
        if hours >= 24 || minutes >= 60 {
            return None;
        }
        Self::from_minutes(hours * 60 + minutes)
    }

    pub fn minutes_since_midnight(self) -> u16 {
        self.minutes
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// Floor of the arithmetic mean, or `None` for an empty input.
pub fn average_time<I>(times: I) -> Option<ClockTime>
where
    I: IntoIterator<Item = ClockTime>,
{
    let (count, total) = times
        .into_iter()
        .fold((0u64, 0u64), |(count, total), time| {
            (count + 1, total + u64::from(time.minutes))
        });
    if count == 0 {
        return None;
    }
    u16::try_from(total / count)
        .ok()
        .and_then(ClockTime::from_minutes)
}

/// The local calendar day, used when no record date is available.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Strict `YYYY-MM-DD`: the value must already be in canonical form.
pub(crate) fn parse_day(raw: &str) -> Option<NaiveDate> {
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    (format_day(day) == raw).then_some(day)
}

pub(crate) fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Collapses whitespace and case so the display name can serve as a fallback join key.
pub(crate) fn normalize_name(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
