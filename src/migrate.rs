//! Schema upgrades applied once, when a document is loaded or imported.
//!
//! Older documents stored cells as bare numbers (or strings), omitted fields,
//! or kept the scores inside each player record. Everything is coerced here
//! into values that satisfy the cell invariants, so no other module ever sees
//! a legacy shape.

use crate::archive::{RoundArchive, RoundEntry};
use crate::catalog::Category;
use crate::error::{YamsError, YamsResult};
use crate::store::{Cell, Player, PlayerId, ScoreStore, Scorecard};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSchema {
    /// `{players: [{id?, name, scores: {key: v}}]}`
    V6Roster,
    /// `{players: [{id, name}], scores: {id: {key: {score, blocked}}}}`
    V7,
}

pub fn detect_state_schema(value: &Value) -> Option<StateSchema> {
    let obj = value.as_object()?;
    if !obj.get("players")?.is_array() {
        return None;
    }
    if obj.get("scores").is_some_and(Value::is_object) {
        Some(StateSchema::V7)
    } else {
        Some(StateSchema::V6Roster)
    }
}

/// `Number(v) || 0` over integers: anything unusable becomes zero.
fn coerce_number(value: &Value) -> u32 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() && n > 0.0 {
        (n + 0.5).floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn coerce_score(value: &Value) -> Option<u32> {
    match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        other => Some(coerce_number(other)),
    }
}

pub fn coerce_cell(value: &Value) -> Cell {
    match value {
        Value::Object(obj) => {
            let score = obj.get("score").and_then(coerce_score);
            let blocked = obj.get("blocked").and_then(Value::as_bool).unwrap_or(false);
            Cell::new(score, blocked)
        }
        other => Cell::new(coerce_score(other), false),
    }
}

pub fn coerce_scorecard(value: &Value) -> Scorecard {
    let mut cells = BTreeMap::new();
    if let Some(obj) = value.as_object() {
        for (key, raw) in obj {
            match Category::from_str(key) {
                Ok(cat) => {
                    cells.insert(cat, coerce_cell(raw));
                }
                Err(_) => debug!("Ignoring unknown category key '{}'", key),
            }
        }
    }
    Scorecard::from(cells)
}

fn coerce_id(value: Option<&Value>) -> PlayerId {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => PlayerId::from(s.as_str()),
        Some(Value::Number(n)) => PlayerId::from(n.to_string()),
        _ => PlayerId::generate(),
    }
}

fn coerce_name(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn players_array(obj: &Map<String, Value>) -> YamsResult<&Vec<Value>> {
    obj.get("players")
        .and_then(Value::as_array)
        .ok_or_else(|| YamsError::MalformedImport("state.players is not a list".to_string()))
}

/// Reads a player record; the embedded `scores` map is only present in the
/// v6 roster.
fn coerce_player<'a>(
    raw: &'a Value,
    seen: &mut HashSet<PlayerId>,
) -> Option<(Player, Option<&'a Value>)> {
    let obj = raw.as_object()?;
    let id = coerce_id(obj.get("id"));
    if !seen.insert(id.clone()) {
        warn!("Dropping duplicate player id '{}'", id);
        return None;
    }
    let player = Player {
        id,
        name: coerce_name(obj.get("name")),
    };
    Some((player, obj.get("scores")))
}

pub fn upgrade_state(value: &Value) -> YamsResult<ScoreStore> {
    let obj = value
        .as_object()
        .ok_or_else(|| YamsError::MalformedImport("state is not an object".to_string()))?;
    let raw_players = players_array(obj)?;
    let raw_scores = obj.get("scores").and_then(Value::as_object);

    let mut seen = HashSet::new();
    let mut players = Vec::with_capacity(raw_players.len());
    let mut scores = BTreeMap::new();

    for raw in raw_players {
        let Some((player, embedded)) = coerce_player(raw, &mut seen) else {
            continue;
        };
        let card = raw_scores
            .and_then(|s| s.get(player.id.as_str()))
            .or(embedded)
            .map(coerce_scorecard)
            .unwrap_or_default();
        scores.insert(player.id.clone(), card);
        players.push(player);
    }

    debug!("Upgraded state with {} player(s)", players.len());
    Ok(ScoreStore::from_parts(players, scores))
}

/// RFC 3339 first, then offset-less ISO-8601 date-times and bare dates,
/// both read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// A recorded total: a number or a numeric string. Anything else means the
/// player has no total for that round.
fn coerce_total(value: &Value) -> Option<u32> {
    match value {
        Value::Number(_) => Some(coerce_number(value)),
        Value::String(s) if s.trim().parse::<f64>().is_ok_and(f64::is_finite) => {
            Some(coerce_number(value))
        }
        _ => None,
    }
}

fn coerce_entry(raw: &Value) -> Result<RoundEntry, String> {
    let obj = raw
        .as_object()
        .ok_or_else(|| "archived round is not an object".to_string())?;
    let time = match obj.get("time") {
        Some(Value::String(t)) => {
            parse_timestamp(t).ok_or_else(|| format!("unreadable round timestamp '{}'", t))?
        }
        _ => return Err("archived round without a timestamp".to_string()),
    };

    let totals: BTreeMap<PlayerId, u32> = obj
        .get("totals")
        .and_then(Value::as_object)
        .map(|t| {
            t.iter()
                .filter_map(|(id, v)| match coerce_total(v) {
                    Some(total) => Some((PlayerId::from(id.as_str()), total)),
                    None => {
                        debug!("Skipping unrecorded total for '{}'", id);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let scores: BTreeMap<PlayerId, Scorecard> = obj
        .get("scores")
        .and_then(Value::as_object)
        .map(|s| {
            s.iter()
                .map(|(id, card)| (PlayerId::from(id.as_str()), coerce_scorecard(card)))
                .collect()
        })
        .unwrap_or_default();

    let order: Vec<PlayerId> = obj
        .get("order")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(PlayerId::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(RoundEntry::new(time, totals, scores).with_order(order))
}

/// Lenient read used at load time: unusable rounds are dropped with a
/// warning and anything that is not a list reads as an empty archive.
pub fn upgrade_rounds(value: &Value) -> RoundArchive {
    let entries = value
        .as_array()
        .map(|list| {
            list.iter()
                .filter_map(|raw| match coerce_entry(raw) {
                    Ok(entry) => Some(entry),
                    Err(reason) => {
                        warn!("Dropping archived round: {}", reason);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    RoundArchive::from_entries(entries)
}

/// Strict read used by imports: one unusable round rejects the document.
pub fn try_upgrade_rounds(value: &Value) -> YamsResult<RoundArchive> {
    let list = value
        .as_array()
        .ok_or_else(|| YamsError::MalformedImport("rounds is not a list".to_string()))?;
    let entries = list
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            coerce_entry(raw)
                .map_err(|reason| YamsError::MalformedImport(format!("round {}: {}", i + 1, reason)))
        })
        .collect::<YamsResult<Vec<_>>>()?;
    Ok(RoundArchive::from_entries(entries))
}
