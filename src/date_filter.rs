use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;

use crate::data_loader::MatchRecord;

// Formats seen in the wild: ISO stamps from the device, "2024-05-10 18:30" typed into the
// sheet, and the US locale string browsers produce ("5/10/2024, 6:30:00 PM").
const DATE_TIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y, %I:%M:%S %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
];

// Reads a match timestamp. Zoned stamps are brought to UTC; anything without a zone is taken
// as written. A bare date means midnight.
pub fn parse_match_time(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { return None; }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt.naive_utc());
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive);
        }
    }

    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }

    None
}

// Keeps matches dated inside [start, end], both days inclusive. With no bounds at all the input
// comes back untouched. A match whose date can't be read is dropped whenever a bound is set.
pub fn filter_matches(matches: &[MatchRecord], start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<MatchRecord> {
    if start.is_none() && end.is_none() {
        return matches.to_vec();
    }

    let start_at = start.map(|d| d.and_time(NaiveTime::MIN));
    let end_at = end.and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999));

    matches
        .iter()
        .filter(|m| {
            let Some(played) = m.date_time.as_deref().and_then(parse_match_time) else {
                debug!("Excluding {} vs {}: unreadable date {:?}", m.player_a, m.player_b, m.date_time);
                return false;
            };

            start_at.map_or(true, |s| played >= s) && end_at.map_or(true, |e| played <= e)
        })
        .cloned()
        .collect()
}
