//! Demo dataset generation
//!
//! Produces a CSV in the same shape as a real export, with plausible value
//! ranges, so the dashboard can be tried without a match history at hand.

use std::fmt::Write;

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;

const GAME_MODES: [&str; 3] = ["Hardpoint", "Control", "Search and Destroy"];
const MAPS: [&str; 6] = ["Skyline", "Hacienda", "Vault", "Protocol", "Red Card", "Rewind"];

const HEADER: &str = "UTC Timestamp,Game Type,Map,Match Outcome,Kills,Deaths,Assists,Score,\
                      Damage Done,Damage Taken,Skill,Hits,Shots,Headshots,Total XP,\
                      Percentage Of Time Moving";

/// Generate a demo export with `rows` matches, roughly five per day
/// starting December 2024, at a ~55% win rate
pub fn sample_csv(rows: usize, rng: &mut impl Rng) -> String {
    let start = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap_or_default();

    let mut text = String::from(HEADER);
    text.push('\n');

    for i in 0..rows {
        let date = start + Duration::days((i / 5) as i64);
        let hour = rng.gen_range(12..20);
        let minute = rng.gen_range(0..60);

        let kills: u32 = rng.gen_range(15..40);
        let deaths: u32 = rng.gen_range(10..30);
        let assists: u32 = rng.gen_range(5..20);
        let shots: u32 = rng.gen_range(300..700);
        let hits = (f64::from(shots) * rng.gen_range(0.15..0.40)) as u32;
        let headshots = (f64::from(kills) * rng.gen_range(0.10..0.30)) as u32;
        let outcome = if rng.gen_bool(0.55) { "win" } else { "loss" };

        let game_type = GAME_MODES.choose(rng).unwrap_or(&GAME_MODES[0]);
        let map = MAPS.choose(rng).unwrap_or(&MAPS[0]);

        let _ = writeln!(
            text,
            "{date} {hour}:{minute:02},{game_type},{map},{outcome},{kills},{deaths},{assists},\
             {score},{damage_done},{damage_taken},{skill},{hits},{shots},{headshots},{total_xp},\
             {moving}",
            score = rng.gen_range(2000..5000),
            damage_done = rng.gen_range(3000..8000),
            damage_taken = rng.gen_range(2500..7000),
            skill = rng.gen_range(800..1200),
            total_xp = rng.gen_range(5000..10000),
            moving = rng.gen_range(60..90),
        );
    }

    text
}
