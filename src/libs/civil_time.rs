//! Civil time zone formatting for displayed dates.
//!
//! Every date that ends up in the report (payment dates and the export
//! timestamp) is rendered in one fixed, named civil time zone, independent of
//! the machine's local zone. The zone is configured as a name plus a fixed
//! UTC offset; the default is `Asia/Manila` (UTC+08:00, no daylight saving).
//!
//! ## Output Format
//!
//! `Mon D, YYYY, H:MM AM|PM`, with a short English month name, an unpadded
//! day and hour, a two-digit minute and a 12-hour clock:
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use finrec::libs::civil_time::CivilTimeFormatter;
//!
//! let formatter = CivilTimeFormatter::default();
//! let instant = Utc.with_ymd_and_hms(2025, 1, 5, 7, 7, 0).unwrap();
//! assert_eq!(formatter.format_civil_date_time(&instant), "Jan 5, 2025, 3:07 PM");
//! ```

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default civil zone name.
pub const DEFAULT_ZONE_NAME: &str = "Asia/Manila";

/// Default civil zone offset from UTC, in minutes.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 8 * 60;

const CIVIL_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// A named civil time zone with a fixed UTC offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilZone {
    /// IANA-style display name, e.g. `Asia/Manila`.
    pub name: String,
    /// Offset from UTC in minutes, east positive.
    pub utc_offset_minutes: i32,
}

impl Default for CivilZone {
    fn default() -> Self {
        CivilZone {
            name: DEFAULT_ZONE_NAME.to_string(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
        }
    }
}

impl fmt::Display for CivilZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.utc_offset_minutes < 0 { '-' } else { '+' };
        let minutes = self.utc_offset_minutes.unsigned_abs();
        write!(f, "{} (UTC{}{:02}:{:02})", self.name, sign, minutes / 60, minutes % 60)
    }
}

/// Renders instants as civil date-time strings in one fixed zone.
#[derive(Debug, Clone)]
pub struct CivilTimeFormatter {
    zone: CivilZone,
    offset: FixedOffset,
}

impl CivilTimeFormatter {
    /// Creates a formatter for the given zone.
    ///
    /// Offsets outside ±24h are impossible for a real zone; such a
    /// configuration falls back to the default zone and logs a warning.
    pub fn new(zone: CivilZone) -> Self {
        match FixedOffset::east_opt(zone.utc_offset_minutes * 60) {
            Some(offset) => Self { zone, offset },
            None => {
                tracing::warn!(zone = %zone.name, offset = zone.utc_offset_minutes, "invalid civil zone offset, using default");
                Self::default()
            }
        }
    }

    pub fn zone(&self) -> &CivilZone {
        &self.zone
    }

    /// Formats an instant in the civil zone, e.g. `Jan 5, 2025, 3:07 PM`.
    pub fn format_civil_date_time<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> String {
        instant.with_timezone(&self.offset).format(CIVIL_FORMAT).to_string()
    }

    /// Formats an optional instant, using `placeholder` when it is absent.
    pub fn format_or<Tz: TimeZone>(&self, instant: Option<&DateTime<Tz>>, placeholder: &str) -> String {
        instant.map_or_else(|| placeholder.to_string(), |dt| self.format_civil_date_time(dt))
    }
}

impl Default for CivilTimeFormatter {
    fn default() -> Self {
        let zone = CivilZone::default();
        let offset = FixedOffset::east_opt(DEFAULT_UTC_OFFSET_MINUTES * 60).unwrap_or(Utc.fix());
        Self { zone, offset }
    }
}
