#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::BTreeMap;
use yams::archive::{RoundArchive, RoundEntry};
use yams::catalog::Category;
use yams::{PlayerId, ScoreStore, Scorecard};

/// Fixed clock so archived timestamps are deterministic.
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub fn roster(names: &[&str]) -> (ScoreStore, Vec<PlayerId>) {
    let mut store = ScoreStore::new();
    let ids = names
        .iter()
        .map(|n| store.add_player(n).expect("valid name").id)
        .collect();
    (store, ids)
}

pub fn fill(store: &mut ScoreStore, id: &PlayerId, values: &[(Category, u32)]) {
    for &(cat, v) in values {
        let outcome = store
            .commit_score(id, cat, Some(f64::from(v)))
            .expect("known player")
            .expect("cell not blocked");
        assert!(outcome.valid, "{} is not legal for {}", v, cat);
    }
}

/// Upper section worth exactly 63, so the bonus is earned.
pub const UPPER_63: [(Category, u32); 6] = [
    (Category::Ones, 3),
    (Category::Twos, 6),
    (Category::Threes, 9),
    (Category::Fours, 12),
    (Category::Fives, 15),
    (Category::Sixes, 18),
];

/// Fills a card worth 180 in total.
pub fn fill_180(store: &mut ScoreStore, id: &PlayerId) {
    fill(store, id, &UPPER_63);
    fill(
        store,
        id,
        &[
            (Category::ThreeKind, 20),
            (Category::FourKind, 20),
            (Category::FullHouse, 25),
            (Category::Chance, 17),
        ],
    );
}

/// Fills a card worth 210 in total.
pub fn fill_210(store: &mut ScoreStore, id: &PlayerId) {
    fill(store, id, &UPPER_63);
    fill(
        store,
        id,
        &[
            (Category::ThreeKind, 30),
            (Category::FourKind, 30),
            (Category::FullHouse, 25),
            (Category::Chance, 27),
        ],
    );
}

/// Archived round carrying only totals.
/// Round whose roster order is the order of `totals`.
pub fn entry(minute: i64, totals: &[(&PlayerId, u32)]) -> RoundEntry {
    let order = totals.iter().map(|&(id, _)| id.clone()).collect();
    let totals: BTreeMap<PlayerId, u32> =
        totals.iter().map(|&(id, t)| (id.clone(), t)).collect();
    let scores = totals
        .keys()
        .map(|id| (id.clone(), Scorecard::new()))
        .collect();
    RoundEntry::new(at(minute), totals, scores).with_order(order)
}

pub fn archive_of(rounds: &[&[(&PlayerId, u32)]]) -> RoundArchive {
    RoundArchive::from_entries(
        rounds
            .iter()
            .enumerate()
            .map(|(i, r)| entry(i as i64, r))
            .collect(),
    )
}
