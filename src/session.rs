//! The application context: roster, active round, archive and the backend
//! they are persisted to.
//!
//! Every mutation is applied to a copy, persisted, and only then swapped in,
//! so readers never observe a change the backend does not hold yet.

use crate::aggregate::Totals;
use crate::archive::{RoundArchive, RoundEntry};
use crate::catalog::Category;
use crate::config::StorageParams;
use crate::consts::LEGACY_STATE_KEY;
use crate::error::{YamsError, YamsResult};
use crate::migrate::{self, StateSchema};
use crate::persist::KeyValueStore;
use crate::ranking;
use crate::store::{Player, PlayerId, ScoreStore};
use crate::transfer;
use crate::validator::Validation;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

pub struct Session<S: KeyValueStore> {
    backend: S,
    state_key: String,
    rounds_key: String,
    scores: ScoreStore,
    archive: RoundArchive,
}

fn parse_record(raw: Option<String>, key: &str) -> Option<Value> {
    let text = raw?;
    match serde_json::from_str(&text) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("⚠️  Ignoring unreadable record '{}': {}", key, e);
            None
        }
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Reads both records, upgrading older schemas, and writes the
    /// normalized result back.
    pub fn load(backend: S, params: &StorageParams) -> YamsResult<Self> {
        let mut session = Self {
            backend,
            state_key: params.state_key.clone(),
            rounds_key: params.rounds_key.clone(),
            scores: ScoreStore::new(),
            archive: RoundArchive::new(),
        };

        session.scores = session.load_state()?;
        let rounds = session.backend.get(&session.rounds_key)?;
        session.archive = parse_record(rounds, &session.rounds_key)
            .map(|v| migrate::upgrade_rounds(&v))
            .unwrap_or_default();

        let (scores, archive) = (session.scores.clone(), session.archive.clone());
        session.write(&scores, &archive)?;

        info!(
            "📂 Session loaded: {} player(s), {} archived round(s)",
            session.scores.players().len(),
            session.archive.len()
        );
        Ok(session)
    }

    fn load_state(&self) -> YamsResult<ScoreStore> {
        let current = parse_record(self.backend.get(&self.state_key)?, &self.state_key);
        if let Some(value) = current {
            if migrate::detect_state_schema(&value) == Some(StateSchema::V7) {
                return migrate::upgrade_state(&value);
            }
            warn!("⚠️  Record '{}' has an unknown shape, ignoring it", self.state_key);
        }

        let legacy = parse_record(self.backend.get(LEGACY_STATE_KEY)?, LEGACY_STATE_KEY);
        if let Some(value) = legacy {
            if migrate::detect_state_schema(&value).is_some() {
                info!("🔄 Migrating roster from '{}'", LEGACY_STATE_KEY);
                return migrate::upgrade_state(&value);
            }
        }

        debug!("Starting with an empty roster");
        Ok(ScoreStore::new())
    }

    fn write(&mut self, scores: &ScoreStore, archive: &RoundArchive) -> YamsResult<()> {
        let rounds_json = serde_json::to_string(archive)?;
        let state_json = serde_json::to_string(scores)?;
        self.backend.set(&self.rounds_key, &rounds_json)?;
        self.backend.set(&self.state_key, &state_json)?;
        Ok(())
    }

    fn write_state(&mut self, scores: &ScoreStore) -> YamsResult<()> {
        let state_json = serde_json::to_string(scores)?;
        self.backend.set(&self.state_key, &state_json)
    }

    fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut ScoreStore) -> YamsResult<T>,
    ) -> YamsResult<T> {
        let mut next = self.scores.clone();
        let out = op(&mut next)?;
        self.write_state(&next)?;
        self.scores = next;
        Ok(out)
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    pub fn archive(&self) -> &RoundArchive {
        &self.archive
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }

    /// Resolves a player by id or name.
    pub fn player_id(&self, query: &str) -> YamsResult<PlayerId> {
        self.scores
            .find_player(query)
            .map(|p| p.id.clone())
            .ok_or_else(|| YamsError::UnknownPlayer(query.to_string()))
    }

    pub fn totals(&self, id: &PlayerId) -> Totals {
        ranking::current_totals(&self.scores, id)
    }

    pub fn add_player(&mut self, name: &str) -> YamsResult<Player> {
        let player = self.apply(|s| s.add_player(name))?;
        info!("👤 Added player '{}' ({})", player.name, player.id);
        Ok(player)
    }

    pub fn rename_player(&mut self, id: &PlayerId, name: &str) -> YamsResult<()> {
        self.apply(|s| s.rename_player(id, name))
    }

    pub fn remove_player(&mut self, id: &PlayerId) -> YamsResult<Player> {
        let player = self.apply(|s| s.remove_player(id))?;
        info!("🗑️  Removed player '{}'", player.name);
        Ok(player)
    }

    pub fn set_score(
        &mut self,
        id: &PlayerId,
        category: Category,
        raw: Option<u32>,
    ) -> YamsResult<Option<Validation>> {
        self.apply(|s| s.set_score(id, category, raw))
    }

    pub fn commit_score(
        &mut self,
        id: &PlayerId,
        category: Category,
        raw: Option<f64>,
    ) -> YamsResult<Option<Validation>> {
        let outcome = self.apply(|s| s.commit_score(id, category, raw))?;
        if let Some(v) = outcome.filter(|v| !v.valid) {
            debug!(
                "Corrected {:?} for {} to {:?}",
                raw,
                category,
                v.normalized
            );
        }
        Ok(outcome)
    }

    pub fn toggle_block(&mut self, id: &PlayerId, category: Category) -> YamsResult<bool> {
        self.apply(|s| s.toggle_block(id, category))
    }

    pub fn close_round_at(&mut self, now: DateTime<Utc>) -> YamsResult<RoundEntry> {
        let mut scores = self.scores.clone();
        let mut archive = self.archive.clone();
        let entry = archive.close_round(&mut scores, now)?.clone();

        self.write(&scores, &archive)?;
        self.scores = scores;
        self.archive = archive;
        Ok(entry)
    }

    pub fn close_round(&mut self) -> YamsResult<RoundEntry> {
        self.close_round_at(Utc::now())
    }

    pub fn clear_history(&mut self, confirmed: bool) -> YamsResult<usize> {
        let mut archive = self.archive.clone();
        let removed = archive.clear(confirmed)?;
        let json = serde_json::to_string(&archive)?;
        self.backend.set(&self.rounds_key, &json)?;
        self.archive = archive;
        Ok(removed)
    }

    pub fn export_json(&self) -> YamsResult<String> {
        transfer::export_json(&self.scores, &self.archive)
    }

    /// Replaces roster, round and archive with the document's content.
    pub fn import_json(&mut self, json: &str) -> YamsResult<()> {
        let (scores, archive) = transfer::import(json)?;
        self.write(&scores, &archive)?;
        self.scores = scores;
        self.archive = archive;
        Ok(())
    }
}
