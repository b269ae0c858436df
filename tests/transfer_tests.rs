mod common;

use common::{at, fill_180, fill_210, roster};
use serde_json::{json, Value};
use yams::archive::RoundArchive;
use yams::catalog::Category;
use yams::consts::EXPORT_VERSION;
use yams::transfer::{export, export_json, import, normalized_view, write_rounds_csv};
use yams::{PlayerId, YamsError};

fn played_session() -> (yams::ScoreStore, RoundArchive, Vec<PlayerId>) {
    let (mut store, ids) = roster(&["Anne", "Bob"]);
    fill_180(&mut store, &ids[0]);
    fill_210(&mut store, &ids[1]);
    let mut archive = RoundArchive::new();
    archive.close_round(&mut store, at(0)).unwrap();

    store
        .commit_score(&ids[0], Category::Chance, Some(12.0))
        .unwrap();
    store.toggle_block(&ids[1], Category::Yahtzee).unwrap();
    (store, archive, ids)
}

#[test]
fn test_export_import_round_trip() {
    let (store, archive, _) = played_session();
    let json = export_json(&store, &archive).unwrap();

    let (store2, archive2) = import(&json).unwrap();
    assert_eq!(store2, store);
    assert_eq!(archive2, archive);
}

#[test]
fn test_export_document_shape() {
    let (store, archive, ids) = played_session();
    let doc: Value = serde_json::to_value(export(&store, &archive)).unwrap();

    assert_eq!(doc["version"], EXPORT_VERSION);
    assert!(doc["state"]["players"].is_array());
    assert_eq!(doc["rounds"].as_array().unwrap().len(), 1);

    let flat = &doc["export_normalise"][1];
    assert_eq!(flat["playerId"], ids[1].as_str());
    assert_eq!(flat["name"], "Bob");
    assert_eq!(flat["categories"]["yahtzee"], json!({"score": 0, "blocked": true}));
    assert_eq!(flat["categories"]["ones"], json!({"score": 0, "blocked": false}));
}

#[test]
fn test_normalized_view_fills_empty_cells() {
    let (store, ids) = roster(&["Anne"]);
    let view = normalized_view(&store);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].player_id, ids[0]);
    assert_eq!(view[0].categories.len(), 13);
    assert!(view[0].categories.values().all(|c| c.score == 0 && !c.blocked));
}

#[test]
fn test_import_legacy_field_names() {
    let doc = json!({
        "etat": {"players": [{"id": "x", "name": "Xavier", "scores": {"twos": 4}}]},
        "historique_manches": [
            {"time": "2024-01-01T10:00:00.000Z", "totals": {"x": 120}, "scores": {}}
        ]
    });

    let (store, archive) = import(&doc.to_string()).unwrap();
    let x = PlayerId::from("x");
    assert_eq!(store.scorecard(&x).unwrap().get(Category::Twos).score(), Some(4));
    assert_eq!(archive.entries()[0].total_for(&x), Some(120));
}

#[test]
fn test_import_reads_offsetless_timestamps_as_utc() {
    let doc = json!({
        "state": {"players": [{"id": "x", "name": "Xavier"}], "scores": {}},
        "rounds": [
            {"time": "2024-01-01T10:00:00", "totals": {"x": 120}},
            {"time": "2024-01-02 21:30:00", "totals": {"x": 140}},
            {"time": "2024-01-03T08:00:00+01:00", "totals": {"x": 90}}
        ]
    });

    let (_, archive) = import(&doc.to_string()).unwrap();
    assert_eq!(archive.len(), 3);
    assert_eq!(
        archive.entries()[0].time().to_rfc3339(),
        "2024-01-01T10:00:00+00:00"
    );
    assert_eq!(
        archive.entries()[1].time().to_rfc3339(),
        "2024-01-02T21:30:00+00:00"
    );
    assert_eq!(
        archive.entries()[2].time().to_rfc3339(),
        "2024-01-03T07:00:00+00:00"
    );
}

#[test]
fn test_import_rejects_unreadable_round_time() {
    let state = json!({"players": [{"id": "x", "name": "Xavier"}], "scores": {}});
    let cases = [
        json!([{"time": "2024-01-01T10:00:00Z", "totals": {"x": 1}}, {"time": "yesterday", "totals": {"x": 2}}]),
        json!([{"totals": {"x": 2}}]),
        json!([{"time": 1704103200, "totals": {"x": 2}}]),
        json!("not a list"),
    ];
    for rounds in cases {
        let doc = json!({"state": state, "rounds": rounds}).to_string();
        assert!(
            matches!(import(&doc), Err(YamsError::MalformedImport(_))),
            "accepted {}",
            doc
        );
    }
}

#[test]
fn test_import_without_rounds_reads_empty_archive() {
    let doc = json!({"state": {"players": [], "scores": {}}});
    let (store, archive) = import(&doc.to_string()).unwrap();
    assert!(store.is_empty());
    assert!(archive.is_empty());
}

#[test]
fn test_malformed_imports() {
    let cases = [
        "not json".to_string(),
        json!({"rounds": []}).to_string(),
        json!({"state": {"players": "everyone"}}).to_string(),
    ];
    for doc in cases {
        assert!(
            matches!(import(&doc), Err(YamsError::MalformedImport(_))),
            "accepted {}",
            doc
        );
    }
}

#[test]
fn test_rounds_csv() {
    let (mut store, archive, ids) = played_session();
    store.add_player("Chloé").unwrap();

    let mut out = Vec::new();
    write_rounds_csv(&store, &archive, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Partie,Date,Anne,Bob,Chloé");
    assert_eq!(lines[1], format!("1,{},180,210,", at(0).to_rfc3339()));
    assert_eq!(lines.len(), 2);
    assert_eq!(ids.len(), 2);
}
