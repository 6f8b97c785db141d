use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{Float, RANKED_MODES, RawRecord};

/// The outcome of a single match
///
/// Kept as an explicit tri-state: exports sometimes omit the outcome column
/// entirely (private matches, older exports), and collapsing those rows into
/// losses would skew every win-rate downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Unknown,
}

/// One completed match, fully typed and with all derived ratios computed
///
/// Produced from a [`RawRecord`] by [`MatchRecord::from_raw`]. Every numeric
/// field is finite, and the derived ratios are recomputed here even when the
/// export already contains them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub timestamp: NaiveDateTime,
    pub game_type: String,
    pub map: String,
    pub outcome: Outcome,

    pub kills: Float,
    pub deaths: Float,
    pub assists: Float,
    pub score: Float,
    pub damage_done: Float,
    pub damage_taken: Float,
    pub skill: Float,
    pub hits: Float,
    pub shots: Float,
    pub headshots: Float,
    pub total_xp: Float,
    pub percent_time_moving: Float,

    // Derived fields, never trusted from the export
    pub kd_ratio: Float,
    pub ekia: Float,
    pub ekia_ratio: Float,
    pub headshot_pct: Float,
    pub accuracy_pct: Float,
}

impl MatchRecord {
    /// Normalize a raw CSV row into a typed record.
    ///
    /// Returns `None` when the timestamp is missing or unparseable; that is
    /// the only condition that discards a row. Numeric fields that are
    /// absent or malformed default to 0 instead.
    ///
    /// Zero-death policy: with `deaths == 0` the K/D and EKIA/D ratios
    /// degenerate to their numerators (`kills`, `kills + assists`) rather
    /// than being capped.
    pub fn from_raw(raw: &RawRecord) -> Option<Self> {
        let timestamp = raw
            .get("UTC Timestamp")
            .or_else(|| raw.get("Timestamp"))
            .or_else(|| raw.get("Date"))
            .and_then(parse_timestamp)?;

        let kills = parse_number(raw.get("Kills"));
        let deaths = parse_number(raw.get("Deaths"));
        let assists = parse_number(raw.get("Assists"));
        let hits = parse_number(raw.get("Hits"));
        let shots = parse_number(raw.get("Shots"));
        let headshots = parse_number(raw.get("Headshots"));

        let ekia = kills + assists;
        let (kd_ratio, ekia_ratio) = if deaths > 0.0 {
            (kills / deaths, ekia / deaths)
        } else {
            (kills, ekia)
        };

        let headshot_pct = if kills > 0.0 {
            headshots / kills * 100.0
        } else {
            0.0
        };
        let accuracy_pct = if shots > 0.0 { hits / shots * 100.0 } else { 0.0 };

        Some(Self {
            timestamp,
            game_type: non_empty(raw.get("Game Type").or_else(|| raw.get("Mode"))),
            map: non_empty(raw.get("Map")),
            outcome: parse_outcome(raw.get("Match Outcome")),
            kills,
            deaths,
            assists,
            score: parse_number(raw.get("Score")),
            damage_done: parse_number(raw.get("Damage Done")),
            damage_taken: parse_number(raw.get("Damage Taken")),
            skill: parse_number(raw.get("Skill")),
            hits,
            shots,
            headshots,
            total_xp: parse_number(raw.get("Total XP")),
            percent_time_moving: parse_percent(raw.get("Percentage Of Time Moving")),
            kd_ratio,
            ekia,
            ekia_ratio,
            headshot_pct,
            accuracy_pct,
        })
    }

    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }

    /// Whether the game type belongs to the competitive ("ranked") set
    pub fn is_ranked(&self) -> bool {
        RANKED_MODES.contains(&self.game_type.as_str())
    }
}

/// Parse a timestamp in any of the accepted export shapes
///
/// Accepted: RFC 3339 / ISO-8601 with a `T` separator (optional fractional
/// seconds and `Z` suffix), the `"YYYY-MM-DD H:MM"` shape with optional
/// seconds, and a bare `YYYY-MM-DD` date (read as midnight). Hour and
/// minute default to 0 when the time part is incomplete.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.naive_utc());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime);
    }

    let (date_part, time_part) = match raw.split_once(' ') {
        Some((date, time)) => (date, time),
        None => (raw, ""),
    };

    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;

    let mut clock = time_part.split(':');
    let hour = parse_clock_component(clock.next())?;
    let minute = parse_clock_component(clock.next())?;
    let second = parse_clock_component(clock.next())?;

    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(date.and_time(time))
}

// An absent component reads as 0, e.g. "13" means 13:00:00
fn parse_clock_component(component: Option<&str>) -> Option<u32> {
    match component {
        None => Some(0),
        Some("") => Some(0),
        Some(value) => value.trim().parse().ok(),
    }
}

/// Coerce a numeric field, stripping thousands separators.
/// Absent, empty or malformed values default to 0.
fn parse_number(raw: Option<&str>) -> Float {
    raw.map(|value| value.replace(',', ""))
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0.0)
}

// Same as parse_number, with a trailing percent sign allowed
fn parse_percent(raw: Option<&str>) -> Float {
    parse_number(raw.map(|value| value.trim().trim_end_matches('%')))
}

fn parse_outcome(raw: Option<&str>) -> Outcome {
    match raw.map(str::trim) {
        None | Some("") => Outcome::Unknown,
        Some(value) if value.eq_ignore_ascii_case("win") => Outcome::Win,
        Some(_) => Outcome::Loss,
    }
}

fn non_empty(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        None | Some("") => "Unknown".to_string(),
        Some(value) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_normalizes_a_well_formed_row() {
        let record = MatchRecord::from_raw(&raw(&[
            ("UTC Timestamp", "2025-03-15 1:35"),
            ("Game Type", "Hardpoint"),
            ("Map", "Skyline"),
            ("Match Outcome", "win"),
            ("Kills", "10"),
            ("Deaths", "5"),
            ("Total XP", "100"),
        ]))
        .unwrap();

        assert_eq!(record.kd_ratio, 2.0);
        assert!(record.is_win());
        assert_eq!(
            record.timestamp,
            NaiveDate::from_ymd_opt(2025, 3, 15)
                .unwrap()
                .and_hms_opt(1, 35, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_timestamp_shapes() {
        for input in [
            "2025-03-15T01:35:00Z",
            "2025-03-15T01:35:00",
            "2025-03-15T01:35:00.250Z",
            "2025-03-15 1:35",
            "2025-03-15 01:35:00",
            "2025-03-15 1",
            "2025-03-15",
        ] {
            assert!(parse_timestamp(input).is_some(), "rejected {input:?}");
        }

        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("15/03/2025").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_invalid_timestamp_discards_the_record() {
        let record = MatchRecord::from_raw(&raw(&[
            ("UTC Timestamp", "not a date"),
            ("Kills", "10"),
        ]));
        assert!(record.is_none());

        // No timestamp column at all
        assert!(MatchRecord::from_raw(&raw(&[("Kills", "10")])).is_none());
    }

    #[test]
    fn test_numeric_defaults_never_discard() {
        let record = MatchRecord::from_raw(&raw(&[
            ("UTC Timestamp", "2025-03-15 1:35"),
            ("Kills", "10"),
            ("Deaths", ""),
            ("Score", "garbage"),
        ]))
        .unwrap();

        assert_eq!(record.deaths, 0.0);
        assert_eq!(record.score, 0.0);
        assert_eq!(record.assists, 0.0);
    }

    #[test]
    fn test_thousands_separators_and_percent_signs() {
        let record = MatchRecord::from_raw(&raw(&[
            ("UTC Timestamp", "2025-03-15 1:35"),
            ("Total XP", "12,345"),
            ("Percentage Of Time Moving", "87.5%"),
        ]))
        .unwrap();

        assert_eq!(record.total_xp, 12345.0);
        assert_eq!(record.percent_time_moving, 87.5);
    }

    #[test]
    fn test_zero_death_policy_degenerates_to_numerator() {
        // deaths = 0, kills > 0: ratio is the raw kill count
        let record = MatchRecord::from_raw(&raw(&[
            ("UTC Timestamp", "2025-03-15 1:35"),
            ("Kills", "10"),
            ("Deaths", "0"),
            ("Assists", "4"),
        ]))
        .unwrap();
        assert_eq!(record.kd_ratio, 10.0);
        assert_eq!(record.ekia_ratio, 14.0);

        // deaths = 0, kills = 0: everything stays at 0
        let record = MatchRecord::from_raw(&raw(&[
            ("UTC Timestamp", "2025-03-15 1:35"),
            ("Kills", "0"),
            ("Deaths", "0"),
        ]))
        .unwrap();
        assert_eq!(record.kd_ratio, 0.0);
        assert_eq!(record.ekia_ratio, 0.0);
    }

    #[test]
    fn test_derived_percentages_are_guarded() {
        let record = MatchRecord::from_raw(&raw(&[
            ("UTC Timestamp", "2025-03-15 1:35"),
            ("Kills", "0"),
            ("Shots", "0"),
            ("Hits", "0"),
            ("Headshots", "0"),
        ]))
        .unwrap();
        assert_eq!(record.headshot_pct, 0.0);
        assert_eq!(record.accuracy_pct, 0.0);

        let record = MatchRecord::from_raw(&raw(&[
            ("UTC Timestamp", "2025-03-15 1:35"),
            ("Kills", "8"),
            ("Headshots", "2"),
            ("Hits", "40"),
            ("Shots", "160"),
        ]))
        .unwrap();
        assert_eq!(record.headshot_pct, 25.0);
        assert_eq!(record.accuracy_pct, 25.0);
        assert!(record.accuracy_pct >= 0.0 && record.accuracy_pct <= 100.0);
    }

    #[test]
    fn test_outcome_classification() {
        let outcome = |value| {
            MatchRecord::from_raw(&raw(&[
                ("UTC Timestamp", "2025-03-15 1:35"),
                ("Match Outcome", value),
            ]))
            .unwrap()
            .outcome
        };

        assert_eq!(outcome("win"), Outcome::Win);
        assert_eq!(outcome(" WIN "), Outcome::Win);
        assert_eq!(outcome("loss"), Outcome::Loss);
        assert_eq!(outcome("draw"), Outcome::Loss);
        assert_eq!(outcome(""), Outcome::Unknown);

        // Column missing entirely
        let record =
            MatchRecord::from_raw(&raw(&[("UTC Timestamp", "2025-03-15 1:35")])).unwrap();
        assert_eq!(record.outcome, Outcome::Unknown);
        assert!(!record.is_win());
    }

    #[test]
    fn test_category_defaults() {
        let record =
            MatchRecord::from_raw(&raw(&[("UTC Timestamp", "2025-03-15 1:35")])).unwrap();
        assert_eq!(record.game_type, "Unknown");
        assert_eq!(record.map, "Unknown");

        // "Mode" accepted as a fallback header for the game type
        let record = MatchRecord::from_raw(&raw(&[
            ("UTC Timestamp", "2025-03-15 1:35"),
            ("Mode", "Control"),
        ]))
        .unwrap();
        assert_eq!(record.game_type, "Control");
        assert!(record.is_ranked());
    }
}
