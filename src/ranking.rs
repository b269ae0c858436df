//! Leaderboards and per-player statistics.
//!
//! Everything here is a pure read over the [`ScoreStore`] and the
//! [`RoundArchive`]. Sorting is stable, so equal scores keep roster order.

use crate::aggregate::{self, Totals};
use crate::archive::{RoundArchive, RoundEntry};
use crate::catalog::{Category, CATEGORY_COUNT};
use crate::consts::{PODIUM_SIZE, RECENT_WINDOW, UNKNOWN_PLAYER_LABEL};
use crate::error::{YamsError, YamsResult};
use crate::store::{Cell, Player, PlayerId, ScoreStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentStanding {
    pub id: PlayerId,
    pub name: String,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AverageStanding {
    pub id: PlayerId,
    pub name: String,
    pub avg: u32,
    pub best: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinStanding {
    pub id: PlayerId,
    pub name: String,
    pub wins: usize,
}

/// Historical figures for one player. With no recorded round every
/// optional field is `None` and every counter is zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub count: usize,
    pub avg: Option<u32>,
    pub best: Option<u32>,
    pub worst: Option<u32>,
    /// Totals in chronological order.
    pub scores: Vec<u32>,
    pub wins: usize,
    pub podiums: usize,
    pub win_rate: u32,
    pub recent_avg: Option<u32>,
    pub trend: Option<i64>,
    pub best_streak: usize,
}

impl PlayerStats {
    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCard {
    pub id: PlayerId,
    pub name: String,
    pub totals: Totals,
    /// 1-based position in the current round.
    pub rank: usize,
    pub roster_size: usize,
    pub gap_to_leader: u32,
    pub filled: usize,
    pub total_cells: usize,
    pub bonus_shortfall: u32,
    pub history: PlayerStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// 1-based round number, oldest round is 1.
    pub number: usize,
    pub time: DateTime<Utc>,
    pub podium: Vec<(String, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundDetailRow {
    pub category: Category,
    /// One slot per rostered player; `None` when the player was absent.
    pub cells: Vec<Option<Cell>>,
}

pub fn display_name(player: &Player) -> String {
    if player.name.trim().is_empty() {
        UNKNOWN_PLAYER_LABEL.to_string()
    } else {
        player.name.clone()
    }
}

/// Name of `id` on the current roster, or the placeholder once removed.
pub fn resolve_name(store: &ScoreStore, id: &PlayerId) -> String {
    store
        .player(id)
        .map(display_name)
        .unwrap_or_else(|| UNKNOWN_PLAYER_LABEL.to_string())
}

fn rounded_mean(values: &[u32]) -> Option<u32> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    let mean = sum as f64 / values.len() as f64;
    Some((mean + 0.5).floor() as u32)
}

pub fn current_totals(store: &ScoreStore, id: &PlayerId) -> Totals {
    store
        .scorecard(id)
        .map(aggregate::totals)
        .unwrap_or_default()
}

pub fn current_leaderboard(store: &ScoreStore) -> Vec<CurrentStanding> {
    let mut board: Vec<CurrentStanding> = store
        .players()
        .iter()
        .map(|p| CurrentStanding {
            id: p.id.clone(),
            name: display_name(p),
            totals: current_totals(store, &p.id),
        })
        .collect();
    board.sort_by(|a, b| b.totals.total.cmp(&a.totals.total));
    board
}

pub fn all_time_average_leaderboard(
    store: &ScoreStore,
    archive: &RoundArchive,
) -> Vec<AverageStanding> {
    let mut board: Vec<AverageStanding> = store
        .players()
        .iter()
        .map(|p| {
            let stats = player_stats(archive, &p.id);
            AverageStanding {
                id: p.id.clone(),
                name: display_name(p),
                avg: stats.avg.unwrap_or(0),
                best: stats.best.unwrap_or(0),
            }
        })
        .collect();
    board.sort_by(|a, b| b.avg.cmp(&a.avg));
    board
}

pub fn wins_leaderboard(store: &ScoreStore, archive: &RoundArchive) -> Vec<WinStanding> {
    let mut board: Vec<WinStanding> = store
        .players()
        .iter()
        .map(|p| WinStanding {
            id: p.id.clone(),
            name: display_name(p),
            wins: archive
                .entries()
                .iter()
                .filter(|e| e.winner() == Some(&p.id))
                .count(),
        })
        .collect();
    board.sort_by(|a, b| b.wins.cmp(&a.wins));
    board
}

pub fn player_stats(archive: &RoundArchive, id: &PlayerId) -> PlayerStats {
    let scores: Vec<u32> = archive
        .entries()
        .iter()
        .filter_map(|e| e.total_for(id))
        .collect();
    let count = scores.len();
    if count == 0 {
        return PlayerStats::default();
    }

    let won = |e: &RoundEntry| e.winner() == Some(id);
    let wins = archive.entries().iter().filter(|&e| won(e)).count();
    let podiums = archive
        .entries()
        .iter()
        .filter_map(|e| e.rank_of(id))
        .filter(|&place| place < PODIUM_SIZE)
        .count();

    let mut best_streak = 0;
    let mut streak = 0;
    for entry in archive.entries() {
        if won(entry) {
            streak += 1;
            best_streak = best_streak.max(streak);
        } else {
            streak = 0;
        }
    }

    let avg = rounded_mean(&scores);
    let recent_avg = rounded_mean(&scores[count.saturating_sub(RECENT_WINDOW)..]);
    let win_rate = ((wins as f64 / count as f64) * 100.0 + 0.5).floor() as u32;

    PlayerStats {
        count,
        avg,
        best: scores.iter().copied().max(),
        worst: scores.iter().copied().min(),
        wins,
        podiums,
        win_rate,
        recent_avg,
        trend: recent_avg
            .zip(avg)
            .map(|(recent, all)| i64::from(recent) - i64::from(all)),
        best_streak,
        scores,
    }
}

pub fn player_card(
    store: &ScoreStore,
    archive: &RoundArchive,
    id: &PlayerId,
) -> YamsResult<PlayerCard> {
    let player = store
        .player(id)
        .ok_or_else(|| YamsError::UnknownPlayer(id.to_string()))?;
    let board = current_leaderboard(store);
    let totals = current_totals(store, id);
    let rank = board.iter().position(|s| &s.id == id).map_or(0, |i| i + 1);
    let leader = board.first().map_or(0, |s| s.totals.total);

    Ok(PlayerCard {
        id: id.clone(),
        name: display_name(player),
        totals,
        rank,
        roster_size: store.players().len(),
        gap_to_leader: leader.saturating_sub(totals.total),
        filled: store.scorecard(id).map_or(0, aggregate::filled_count),
        total_cells: CATEGORY_COUNT,
        bonus_shortfall: aggregate::bonus_shortfall(totals.upper),
        history: player_stats(archive, id),
    })
}

/// Newest round first, each with its `top` best totals.
pub fn history_summaries(
    store: &ScoreStore,
    archive: &RoundArchive,
    top: usize,
) -> Vec<HistorySummary> {
    archive
        .entries()
        .iter()
        .enumerate()
        .rev()
        .map(|(i, entry)| {
            let podium: Vec<(String, u32)> = entry
                .standings()
                .into_iter()
                .take(top)
                .map(|(id, t)| (resolve_name(store, id), t))
                .collect();
            HistorySummary {
                number: i + 1,
                time: entry.time(),
                podium,
            }
        })
        .collect()
}

/// Category-by-player grid of an archived round, columns in roster order.
pub fn round_detail(store: &ScoreStore, entry: &RoundEntry) -> Vec<RoundDetailRow> {
    Category::all()
        .map(|category| RoundDetailRow {
            category,
            cells: store
                .players()
                .iter()
                .map(|p| entry.cell(&p.id, category))
                .collect(),
        })
        .collect()
}
