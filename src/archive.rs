//! Append-only log of closed rounds.

use crate::aggregate;
use crate::catalog::Category;
use crate::error::{YamsError, YamsResult};
use crate::store::{Cell, PlayerId, ScoreStore, Scorecard};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Snapshot of one closed round. Never modified once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEntry {
    time: DateTime<Utc>,
    totals: BTreeMap<PlayerId, u32>,
    scores: BTreeMap<PlayerId, Scorecard>,
    /// Roster order when the round was closed; breaks ties in standings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    order: Vec<PlayerId>,
}

impl RoundEntry {
    pub fn new(
        time: DateTime<Utc>,
        totals: BTreeMap<PlayerId, u32>,
        scores: BTreeMap<PlayerId, Scorecard>,
    ) -> Self {
        Self {
            time,
            totals,
            scores,
            order: Vec::new(),
        }
    }

    pub fn with_order(mut self, order: Vec<PlayerId>) -> Self {
        self.order = order;
        self
    }

    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn totals(&self) -> &BTreeMap<PlayerId, u32> {
        &self.totals
    }

    pub fn total_for(&self, id: &PlayerId) -> Option<u32> {
        self.totals.get(id).copied()
    }

    pub fn cell(&self, id: &PlayerId, category: Category) -> Option<Cell> {
        self.scores.get(id).map(|card| card.get(category))
    }

    /// The player holding the strictly highest total, if there is one.
    pub fn winner(&self) -> Option<&PlayerId> {
        let (best_id, best) = self.totals.iter().max_by_key(|&(_, t)| *t)?;
        let tied = self.totals.values().filter(|&&t| t == *best).count();
        (tied == 1).then_some(best_id)
    }

    /// Players with a total, best first. Equal totals keep roster order;
    /// ids missing from the recorded order follow in key order.
    pub fn standings(&self) -> Vec<(&PlayerId, u32)> {
        let mut rows: Vec<(&PlayerId, u32)> = self
            .order
            .iter()
            .filter_map(|id| self.totals.get_key_value(id))
            .map(|(id, &t)| (id, t))
            .collect();
        for (id, &t) in &self.totals {
            if !self.order.contains(id) {
                rows.push((id, t));
            }
        }
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }

    /// Zero-based place in `standings`, `None` when the player has no total.
    pub fn rank_of(&self, id: &PlayerId) -> Option<usize> {
        self.standings().iter().position(|(p, _)| *p == id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundArchive {
    entries: Vec<RoundEntry>,
}

impl RoundArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<RoundEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RoundEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&RoundEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Archives the round in progress and starts a fresh one for the same
    /// roster.
    pub fn close_round(
        &mut self,
        store: &mut ScoreStore,
        now: DateTime<Utc>,
    ) -> YamsResult<&RoundEntry> {
        if store.is_empty() {
            return Err(YamsError::EmptyRosterOnClose);
        }

        let mut totals = BTreeMap::new();
        let mut scores = BTreeMap::new();
        let order = store.players().iter().map(|p| p.id.clone()).collect();
        for player in store.players() {
            let card = store.scorecard(&player.id).cloned().unwrap_or_default();
            totals.insert(player.id.clone(), aggregate::totals(&card).total);
            scores.insert(player.id.clone(), card);
        }

        self.entries
            .push(RoundEntry::new(now, totals, scores).with_order(order));
        store.reset_scores();

        info!(
            "🏁 Round {} closed with {} player(s)",
            self.entries.len(),
            store.players().len()
        );
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Drops every entry. Irreversible, so the caller must confirm.
    pub fn clear(&mut self, confirmed: bool) -> YamsResult<usize> {
        if !confirmed {
            return Err(YamsError::ConfirmationRequired);
        }
        let removed = self.entries.len();
        self.entries.clear();
        info!("🧹 History cleared ({} round(s) removed)", removed);
        Ok(removed)
    }
}
