//! Roster and active-round cells.

use crate::catalog::Category;
use crate::error::{YamsError, YamsResult};
use crate::validator::{self, Validation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// One player's entry for one category.
///
/// A blocked cell always holds `Some(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    score: Option<u32>,
    blocked: bool,
}

impl Cell {
    pub fn new(score: Option<u32>, blocked: bool) -> Self {
        if blocked {
            Self::blocked()
        } else {
            Self {
                score,
                blocked: false,
            }
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn blocked() -> Self {
        Self {
            score: Some(0),
            blocked: true,
        }
    }

    pub fn score(&self) -> Option<u32> {
        self.score
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Contribution to the totals: empty and blocked cells count as zero.
    pub fn points(&self) -> u32 {
        if self.blocked {
            0
        } else {
            self.score.unwrap_or(0)
        }
    }

    pub fn is_filled(&self) -> bool {
        !self.blocked && self.score.is_some()
    }
}

/// A full set of 13 cells. Missing categories read back as empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Category, Cell>",
    into = "BTreeMap<Category, Cell>"
)]
pub struct Scorecard {
    cells: BTreeMap<Category, Cell>,
}

impl Default for Scorecard {
    fn default() -> Self {
        Self {
            cells: Category::all().map(|c| (c, Cell::empty())).collect(),
        }
    }
}

impl From<BTreeMap<Category, Cell>> for Scorecard {
    fn from(mut cells: BTreeMap<Category, Cell>) -> Self {
        for cat in Category::all() {
            cells.entry(cat).or_default();
        }
        for cell in cells.values_mut() {
            *cell = Cell::new(cell.score, cell.blocked);
        }
        Self { cells }
    }
}

impl From<Scorecard> for BTreeMap<Category, Cell> {
    fn from(card: Scorecard) -> Self {
        card.cells
    }
}

impl Scorecard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Cell {
        self.cells.get(&category).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Cell)> + '_ {
        self.cells.iter().map(|(k, v)| (*k, *v))
    }

    fn cell_mut(&mut self, category: Category) -> &mut Cell {
        self.cells.entry(category).or_default()
    }

    /// Live keystroke: keeps the raw value, unvalidated. `None` when blocked.
    pub fn set_raw(&mut self, category: Category, raw: Option<u32>) -> Option<Validation> {
        let cell = self.cell_mut(category);
        if cell.blocked {
            return None;
        }
        cell.score = raw;
        Some(validator::validate_int(category, raw))
    }

    /// Confirmed entry: stores the normalized value. `None` when blocked.
    pub fn commit(&mut self, category: Category, raw: Option<f64>) -> Option<Validation> {
        let cell = self.cell_mut(category);
        if cell.blocked {
            return None;
        }
        let outcome = validator::validate(category, raw);
        cell.score = outcome.normalized;
        Some(outcome)
    }

    /// Flips the blocked flag and returns the new state.
    ///
    /// Both directions leave the score at `0`; the value held before
    /// blocking is not restored.
    pub fn toggle_block(&mut self, category: Category) -> bool {
        let cell = self.cell_mut(category);
        cell.blocked = !cell.blocked;
        cell.score = Some(0);
        cell.blocked
    }

    pub fn filled_count(&self) -> usize {
        self.cells.values().filter(|c| c.is_filled()).count()
    }
}

/// Lower-cased, trimmed, internal whitespace collapsed.
pub fn canonical_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Roster plus the cells of the round in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreStore {
    players: Vec<Player>,
    scores: BTreeMap<PlayerId, Scorecard>,
}

impl ScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from already-migrated parts, creating any missing
    /// scorecard and dropping cells of players not on the roster.
    pub fn from_parts(players: Vec<Player>, mut scores: BTreeMap<PlayerId, Scorecard>) -> Self {
        scores.retain(|id, _| players.iter().any(|p| &p.id == id));
        for p in &players {
            scores.entry(p.id.clone()).or_default();
        }
        Self { players, scores }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Looks a player up by exact id first, then by canonical name.
    pub fn find_player(&self, query: &str) -> Option<&Player> {
        let wanted = canonical_name(query);
        self.players
            .iter()
            .find(|p| p.id.as_str() == query)
            .or_else(|| self.players.iter().find(|p| canonical_name(&p.name) == wanted))
    }

    pub fn scorecard(&self, id: &PlayerId) -> Option<&Scorecard> {
        self.scores.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn name_taken(&self, name: &str, except: Option<&PlayerId>) -> bool {
        let wanted = canonical_name(name);
        self.players
            .iter()
            .any(|p| canonical_name(&p.name) == wanted && Some(&p.id) != except)
    }

    fn checked_name(&self, name: &str, except: Option<&PlayerId>) -> YamsResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(YamsError::EmptyPlayerName);
        }
        if self.name_taken(trimmed, except) {
            return Err(YamsError::DuplicatePlayerName(trimmed.to_string()));
        }
        Ok(trimmed.to_string())
    }

    pub fn add_player(&mut self, name: &str) -> YamsResult<Player> {
        let name = self.checked_name(name, None)?;
        let player = Player {
            id: PlayerId::generate(),
            name,
        };
        self.scores.insert(player.id.clone(), Scorecard::new());
        self.players.push(player.clone());
        Ok(player)
    }

    pub fn rename_player(&mut self, id: &PlayerId, name: &str) -> YamsResult<()> {
        let name = self.checked_name(name, Some(id))?;
        let player = self
            .players
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| YamsError::UnknownPlayer(id.to_string()))?;
        player.name = name;
        Ok(())
    }

    pub fn remove_player(&mut self, id: &PlayerId) -> YamsResult<Player> {
        let idx = self
            .players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| YamsError::UnknownPlayer(id.to_string()))?;
        self.scores.remove(id);
        Ok(self.players.remove(idx))
    }

    fn card_mut(&mut self, id: &PlayerId) -> YamsResult<&mut Scorecard> {
        if self.player(id).is_none() {
            return Err(YamsError::UnknownPlayer(id.to_string()));
        }
        Ok(self.scores.entry(id.clone()).or_default())
    }

    pub fn set_score(
        &mut self,
        id: &PlayerId,
        category: Category,
        raw: Option<u32>,
    ) -> YamsResult<Option<Validation>> {
        Ok(self.card_mut(id)?.set_raw(category, raw))
    }

    pub fn commit_score(
        &mut self,
        id: &PlayerId,
        category: Category,
        raw: Option<f64>,
    ) -> YamsResult<Option<Validation>> {
        Ok(self.card_mut(id)?.commit(category, raw))
    }

    pub fn toggle_block(&mut self, id: &PlayerId, category: Category) -> YamsResult<bool> {
        Ok(self.card_mut(id)?.toggle_block(category))
    }

    /// Fresh cells for everyone on the roster; the roster itself is kept.
    pub fn reset_scores(&mut self) {
        self.scores = self
            .players
            .iter()
            .map(|p| (p.id.clone(), Scorecard::new()))
            .collect();
    }
}
