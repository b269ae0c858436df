mod common;

use common::{archive_of, at, fill, fill_180, fill_210, roster};
use yams::archive::RoundArchive;
use yams::catalog::Category;
use yams::consts::{PODIUM_SIZE, UNKNOWN_PLAYER_LABEL};
use yams::ranking::{
    all_time_average_leaderboard, current_leaderboard, history_summaries, player_card,
    player_stats, round_detail, wins_leaderboard, PlayerStats,
};
use yams::{Cell, PlayerId, YamsError};

fn names<T>(board: &[T], name: impl Fn(&T) -> &str) -> Vec<String> {
    board.iter().map(|s| name(s).to_string()).collect()
}

#[test]
fn test_current_leaderboard_sorted_and_stable() {
    let (mut store, ids) = roster(&["A", "B", "C"]);
    fill(&mut store, &ids[0], &[(Category::Chance, 20)]);
    fill(&mut store, &ids[1], &[(Category::Chance, 25)]);
    fill(&mut store, &ids[2], &[(Category::Chance, 20)]);

    let board = current_leaderboard(&store);
    assert_eq!(names(&board, |s| s.name.as_str()), vec!["B", "A", "C"]);
    assert_eq!(board[0].totals.total, 25);
}

#[test]
fn test_wins_leaderboard() {
    let (store, ids) = roster(&["A", "B"]);
    let (a, b) = (&ids[0], &ids[1]);
    let archive = archive_of(&[
        &[(a, 180), (b, 210)],
        &[(a, 220), (b, 200)],
        &[(a, 150), (b, 150)],
    ]);

    let board = wins_leaderboard(&store, &archive);
    assert_eq!(names(&board, |s| s.name.as_str()), vec!["A", "B"]);
    assert!(board.iter().all(|s| s.wins == 1));
}

#[test]
fn test_average_leaderboard() {
    let (store, ids) = roster(&["A", "B", "C"]);
    let (a, b) = (&ids[0], &ids[1]);
    let archive = archive_of(&[&[(a, 100), (b, 200)], &[(a, 101), (b, 150)]]);

    let board = all_time_average_leaderboard(&store, &archive);
    assert_eq!(names(&board, |s| s.name.as_str()), vec!["B", "A", "C"]);
    assert_eq!((board[0].avg, board[0].best), (175, 200));
    // 100.5 rounds up.
    assert_eq!((board[1].avg, board[1].best), (101, 101));
    assert_eq!((board[2].avg, board[2].best), (0, 0));
}

#[test]
fn test_player_stats_reference_series() {
    let (_, ids) = roster(&["A", "B"]);
    let (a, b) = (&ids[0], &ids[1]);
    let archive = archive_of(&[
        &[(a, 100), (b, 90)],
        &[(a, 150), (b, 200)],
        &[(a, 200), (b, 100)],
        &[(a, 120), (b, 130)],
        &[(a, 300), (b, 250)],
    ]);

    let s = player_stats(&archive, a);
    assert_eq!(s.count, 5);
    assert_eq!(s.avg, Some(174));
    assert_eq!(s.best, Some(300));
    assert_eq!(s.worst, Some(100));
    assert_eq!(s.recent_avg, Some(174));
    assert_eq!(s.trend, Some(0));
    assert_eq!(s.scores, vec![100, 150, 200, 120, 300]);
    assert_eq!(s.wins, 3);
    assert_eq!(s.win_rate, 60);
    assert_eq!(s.podiums, 5);
    assert_eq!(s.best_streak, 1);
}

#[test]
fn test_recent_window_and_trend() {
    let (_, ids) = roster(&["A"]);
    let a = &ids[0];
    let archive = archive_of(&[
        &[(a, 50)],
        &[(a, 100)],
        &[(a, 100)],
        &[(a, 100)],
        &[(a, 100)],
        &[(a, 100)],
    ]);

    let s = player_stats(&archive, a);
    assert_eq!(s.recent_avg, Some(100));
    // 550 / 6 = 91.67
    assert_eq!(s.avg, Some(92));
    assert_eq!(s.trend, Some(8));
    assert_eq!(s.best_streak, 6);
}

#[test]
fn test_streak_broken_by_absence_and_ties() {
    let (_, ids) = roster(&["A", "B"]);
    let (a, b) = (&ids[0], &ids[1]);
    let archive = archive_of(&[
        &[(a, 200), (b, 100)],
        &[(a, 200), (b, 100)],
        &[(b, 100)],
        &[(a, 200), (b, 100)],
        &[(a, 100), (b, 100)],
        &[(a, 200), (b, 100)],
    ]);

    let s = player_stats(&archive, a);
    assert_eq!(s.count, 5);
    assert_eq!(s.wins, 4);
    assert_eq!(s.best_streak, 2);
}

#[test]
fn test_podium_ties_keep_roster_order() {
    let (_, ids) = roster(&["A", "B", "C", "D", "E"]);
    let archive = archive_of(&[&[
        (&ids[0], 300),
        (&ids[1], 300),
        (&ids[2], 200),
        (&ids[3], 200),
        (&ids[4], 100),
    ]]);

    let podiums: Vec<usize> = ids.iter().map(|id| player_stats(&archive, id).podiums).collect();
    assert_eq!(podiums, vec![1, 1, 1, 0, 0]);
}

#[test]
fn test_four_way_tie_awards_three_podiums() {
    let (_, ids) = roster(&["A", "B", "C", "D"]);
    let archive = archive_of(&[&[
        (&ids[0], 150),
        (&ids[1], 150),
        (&ids[2], 150),
        (&ids[3], 150),
    ]]);

    let podiums: Vec<usize> = ids.iter().map(|id| player_stats(&archive, id).podiums).collect();
    assert_eq!(podiums, vec![1, 1, 1, 0]);
    assert_eq!(podiums.iter().sum::<usize>(), PODIUM_SIZE);
}

#[test]
fn test_player_stats_without_history() {
    let (_, ids) = roster(&["A"]);
    let s = player_stats(&RoundArchive::new(), &ids[0]);
    assert_eq!(s, PlayerStats::default());
    assert!(!s.has_data());
    assert_eq!(s.avg, None);
    assert_eq!(s.trend, None);
}

#[test]
fn test_player_card() {
    let (mut store, ids) = roster(&["A", "B"]);
    fill(&mut store, &ids[0], &[(Category::Sixes, 24), (Category::Chance, 20)]);
    fill_210(&mut store, &ids[1]);

    let card = player_card(&store, &RoundArchive::new(), &ids[0]).unwrap();
    assert_eq!(card.rank, 2);
    assert_eq!(card.roster_size, 2);
    assert_eq!(card.totals.total, 44);
    assert_eq!(card.gap_to_leader, 166);
    assert_eq!(card.filled, 2);
    assert_eq!(card.total_cells, 13);
    assert_eq!(card.bonus_shortfall, 39);
    assert!(!card.history.has_data());

    assert!(matches!(
        player_card(&store, &RoundArchive::new(), &PlayerId::from("x")),
        Err(YamsError::UnknownPlayer(_))
    ));
}

#[test]
fn test_history_summaries_newest_first() {
    let (mut store, ids) = roster(&["A", "B", "C", "D"]);
    let archive = archive_of(&[
        &[(&ids[0], 100), (&ids[1], 90)],
        &[(&ids[0], 10), (&ids[1], 40), (&ids[2], 30), (&ids[3], 20)],
    ]);
    store.remove_player(&ids[1]).unwrap();

    let summaries = history_summaries(&store, &archive, 3);
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].number, 2);
    assert_eq!(summaries[0].time, at(1));
    assert_eq!(
        summaries[0].podium,
        vec![
            (UNKNOWN_PLAYER_LABEL.to_string(), 40),
            ("C".to_string(), 30),
            ("D".to_string(), 20),
        ]
    );
    assert_eq!(summaries[1].number, 1);
    assert_eq!(summaries[1].podium.len(), 2);
}

#[test]
fn test_round_detail_follows_roster() {
    let (mut store, ids) = roster(&["A", "B"]);
    fill_180(&mut store, &ids[0]);
    let mut archive = RoundArchive::new();
    archive.close_round(&mut store, at(0)).unwrap();
    let late = store.add_player("C").unwrap();

    let rows = round_detail(&store, &archive.entries()[0]);
    assert_eq!(rows.len(), 13);
    let chance = rows.iter().find(|r| r.category == Category::Chance).unwrap();
    assert_eq!(chance.cells.len(), 3);
    assert_eq!(chance.cells[0].and_then(|c| c.score()), Some(17));
    assert_eq!(chance.cells[1], Some(Cell::empty()));
    assert_eq!(chance.cells[2], None);
    assert!(store.player(&late.id).is_some());
}
