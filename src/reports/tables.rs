use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use yams::aggregate::{self, Totals};
use yams::archive::RoundEntry;
use yams::catalog::Category;
use yams::consts::{BONUS_THRESHOLD, BONUS_VALUE};
use yams::ranking::{
    display_name, AverageStanding, CurrentStanding, HistorySummary, PlayerCard, RoundDetailRow,
    WinStanding,
};
use yams::store::Cell as SheetCell;
use yams::ScoreStore;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right_from(table: &mut Table, first: usize, last: usize) {
    for i in first..=last {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn sheet_cell(cell: Option<SheetCell>) -> Cell {
    match cell {
        Some(c) if c.is_blocked() => Cell::new("X").fg(Color::DarkGrey),
        Some(c) => Cell::new(c.score().map(|v| v.to_string()).unwrap_or_default()),
        None => Cell::new("-").fg(Color::DarkGrey),
    }
}

fn category_label(category: Category) -> Cell {
    Cell::new(format!("{} ({})", category.label(), category.hint()))
}

fn header(first: &str, names: impl Iterator<Item = String>) -> Vec<Cell> {
    let mut row = vec![Cell::new(first).add_attribute(Attribute::Bold)];
    row.extend(names.map(|n| Cell::new(n).add_attribute(Attribute::Bold)));
    row
}

pub fn print_roster(store: &ScoreStore) {
    if store.is_empty() {
        println!("No players yet.");
        return;
    }
    let mut table = new_table();
    table.set_header(header("Joueur", ["Id".to_string()].into_iter()));
    for p in store.players() {
        table.add_row(vec![Cell::new(display_name(p)), Cell::new(p.id.as_str())]);
    }
    println!("{}", table);
}

pub fn print_sheet(store: &ScoreStore) {
    let players = store.players();
    let cards: Vec<_> = players
        .iter()
        .map(|p| store.scorecard(&p.id).cloned().unwrap_or_default())
        .collect();
    let totals: Vec<Totals> = cards.iter().map(aggregate::totals).collect();

    let mut table = new_table();
    table.set_header(header("Catégorie", players.iter().map(display_name)));

    let totals_row = |label: &str, pick: fn(&Totals) -> u32, color: Color| {
        let mut row = vec![Cell::new(label).add_attribute(Attribute::Bold)];
        row.extend(totals.iter().map(|t| Cell::new(pick(t)).fg(color)));
        row
    };

    for category in Category::upper() {
        let mut row = vec![category_label(category)];
        row.extend(cards.iter().map(|c| sheet_cell(Some(c.get(category)))));
        table.add_row(row);
    }
    table.add_row(totals_row("Total haut", |t| t.upper, Color::Cyan));
    table.add_row(totals_row(
        &format!("Bonus (≥{} → +{})", BONUS_THRESHOLD, BONUS_VALUE),
        |t| t.bonus,
        Color::Green,
    ));

    for category in Category::lower() {
        let mut row = vec![category_label(category)];
        row.extend(cards.iter().map(|c| sheet_cell(Some(c.get(category)))));
        table.add_row(row);
    }
    table.add_row(totals_row("Total bas", |t| t.lower, Color::Cyan));
    table.add_row(totals_row("TOTAL", |t| t.total, Color::Yellow));

    align_right_from(&mut table, 1, players.len());
    println!("{}", table);
}

pub fn print_current_board(board: &[CurrentStanding]) {
    let mut table = new_table();
    table.set_header(header(
        "#",
        ["Joueur", "Haut", "Bonus", "Bas", "Total"]
            .iter()
            .map(|s| s.to_string()),
    ));
    for (i, s) in board.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&s.name).add_attribute(Attribute::Bold),
            Cell::new(s.totals.upper),
            Cell::new(s.totals.bonus).fg(Color::Green),
            Cell::new(s.totals.lower),
            Cell::new(s.totals.total).fg(Color::Cyan),
        ]);
    }
    align_right_from(&mut table, 2, 5);
    println!("{}", table);
}

pub fn print_average_board(board: &[AverageStanding]) {
    let mut table = new_table();
    table.set_header(header(
        "#",
        ["Joueur", "Moyenne", "Record"].iter().map(|s| s.to_string()),
    ));
    for (i, s) in board.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&s.name).add_attribute(Attribute::Bold),
            Cell::new(s.avg).fg(Color::Cyan),
            Cell::new(s.best),
        ]);
    }
    align_right_from(&mut table, 2, 3);
    println!("{}", table);
}

pub fn print_wins_board(board: &[WinStanding]) {
    let mut table = new_table();
    table.set_header(header(
        "#",
        ["Joueur", "Victoires"].iter().map(|s| s.to_string()),
    ));
    for (i, s) in board.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&s.name).add_attribute(Attribute::Bold),
            Cell::new(s.wins).fg(Color::Yellow),
        ]);
    }
    align_right_from(&mut table, 2, 2);
    println!("{}", table);
}

fn or_dash(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn print_player_card(card: &PlayerCard) {
    println!("\n👤 {} ({})", card.name, card.id);

    let mut table = new_table();
    table.set_header(header("Manche en cours", ["".to_string()].into_iter()));
    let rows: Vec<(&str, String)> = vec![
        ("Rang", format!("{} / {}", card.rank, card.roster_size)),
        ("Total", card.totals.total.to_string()),
        ("Écart au leader", card.gap_to_leader.to_string()),
        ("Cases remplies", format!("{} / {}", card.filled, card.total_cells)),
        ("Manque pour le bonus", card.bonus_shortfall.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    align_right_from(&mut table, 1, 1);
    println!("{}", table);

    let h = &card.history;
    if !h.has_data() {
        println!("No archived round for this player yet.");
        return;
    }

    let trend = h.trend.map(|t| format!("{:+}", t));
    let mut table = new_table();
    table.set_header(header("Historique", ["".to_string()].into_iter()));
    let rows: Vec<(&str, String)> = vec![
        ("Manches", h.count.to_string()),
        ("Moyenne", or_dash(h.avg)),
        ("Record", or_dash(h.best)),
        ("Pire", or_dash(h.worst)),
        ("Victoires", format!("{} ({}%)", h.wins, h.win_rate)),
        ("Podiums", h.podiums.to_string()),
        ("Moyenne récente", or_dash(h.recent_avg)),
        ("Tendance", or_dash(trend)),
        ("Meilleure série", h.best_streak.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    align_right_from(&mut table, 1, 1);
    println!("{}", table);
}

pub fn print_history(summaries: &[HistorySummary]) {
    let mut table = new_table();
    table.set_header(header(
        "Partie",
        ["Date", "Podium"].iter().map(|s| s.to_string()),
    ));
    for s in summaries {
        let podium = s
            .podium
            .iter()
            .map(|(name, total)| format!("{} {}", name, total))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(format!("#{}", s.number)).add_attribute(Attribute::Bold),
            Cell::new(s.time.format("%Y-%m-%d %H:%M")),
            Cell::new(podium),
        ]);
    }
    println!("{}", table);
}

pub fn print_round_detail(
    number: usize,
    entry: &RoundEntry,
    store: &ScoreStore,
    rows: &[RoundDetailRow],
) {
    println!(
        "\n📜 Round #{} ({})",
        number,
        entry.time().format("%Y-%m-%d %H:%M")
    );

    let players = store.players();
    let mut table = new_table();
    table.set_header(header("Catégorie", players.iter().map(display_name)));

    for row in rows {
        let mut cells = vec![category_label(row.category)];
        cells.extend(row.cells.iter().map(|&c| sheet_cell(c)));
        table.add_row(cells);
    }

    let mut total_row = vec![Cell::new("TOTAL").add_attribute(Attribute::Bold)];
    total_row.extend(
        players
            .iter()
            .map(|p| Cell::new(or_dash(entry.total_for(&p.id))).fg(Color::Yellow)),
    );
    table.add_row(total_row);

    align_right_from(&mut table, 1, players.len());
    println!("{}", table);
}
