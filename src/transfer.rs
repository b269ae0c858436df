//! Export document, import and CSV totals.

use crate::archive::RoundArchive;
use crate::catalog::Category;
use crate::consts::EXPORT_VERSION;
use crate::error::{YamsError, YamsResult};
use crate::migrate;
use crate::ranking::display_name;
use crate::store::{PlayerId, ScoreStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCell {
    pub score: u32,
    pub blocked: bool,
}

/// Flat per-player view written for third-party tools. Never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub categories: BTreeMap<Category, NormalizedCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub version: String,
    pub state: ScoreStore,
    pub rounds: RoundArchive,
    pub export_normalise: Vec<NormalizedPlayer>,
}

pub fn normalized_view(store: &ScoreStore) -> Vec<NormalizedPlayer> {
    store
        .players()
        .iter()
        .map(|p| {
            let card = store.scorecard(&p.id).cloned().unwrap_or_default();
            NormalizedPlayer {
                player_id: p.id.clone(),
                name: display_name(p),
                categories: card
                    .iter()
                    .map(|(cat, cell)| {
                        (
                            cat,
                            NormalizedCell {
                                score: cell.score().unwrap_or(0),
                                blocked: cell.is_blocked(),
                            },
                        )
                    })
                    .collect(),
            }
        })
        .collect()
}

pub fn export(store: &ScoreStore, archive: &RoundArchive) -> ExportDocument {
    ExportDocument {
        version: EXPORT_VERSION.to_string(),
        state: store.clone(),
        rounds: archive.clone(),
        export_normalise: normalized_view(store),
    }
}

pub fn export_json(store: &ScoreStore, archive: &RoundArchive) -> YamsResult<String> {
    Ok(serde_json::to_string_pretty(&export(store, archive))?)
}

/// Parses an export document (current or legacy field names) into a new
/// store and archive. Nothing is returned unless the whole document is usable.
pub fn import(json: &str) -> YamsResult<(ScoreStore, RoundArchive)> {
    let data: Value =
        serde_json::from_str(json).map_err(|e| YamsError::MalformedImport(e.to_string()))?;

    let state = data
        .get("state")
        .or_else(|| data.get("etat"))
        .ok_or_else(|| YamsError::MalformedImport("missing state".to_string()))?;
    if !state.get("players").is_some_and(Value::is_array) {
        return Err(YamsError::MalformedImport(
            "state.players is not a list".to_string(),
        ));
    }

    let store = migrate::upgrade_state(state)?;
    let archive = match data.get("rounds").or_else(|| data.get("historique_manches")) {
        Some(rounds) => migrate::try_upgrade_rounds(rounds)?,
        None => RoundArchive::new(),
    };

    info!(
        "📥 Imported {} player(s) and {} round(s)",
        store.players().len(),
        archive.len()
    );
    Ok((store, archive))
}

/// One row per archived round with a column per rostered player.
pub fn write_rounds_csv<W: Write>(
    store: &ScoreStore,
    archive: &RoundArchive,
    writer: W,
) -> YamsResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Partie".to_string(), "Date".to_string()];
    header.extend(store.players().iter().map(display_name));
    wtr.write_record(&header)?;

    for (i, entry) in archive.entries().iter().enumerate() {
        let mut row = vec![(i + 1).to_string(), entry.time().to_rfc3339()];
        row.extend(store.players().iter().map(|p| {
            entry
                .total_for(&p.id)
                .map(|t| t.to_string())
                .unwrap_or_default()
        }));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
