use super::AppSession;
use crate::reports;
use clap::{Args, ValueEnum};
use yams::ranking;
use yams::YamsResult;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardView {
    /// Totals of the round in progress
    Current,
    /// Average over archived rounds
    Avg,
    /// Outright wins over archived rounds
    Wins,
}

#[derive(Args, Debug, Clone)]
pub struct BoardArgs {
    #[arg(long, value_enum, default_value_t = BoardView::Current)]
    pub view: BoardView,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// Player id or name
    pub player: String,
}

pub fn board(args: &BoardArgs, session: &AppSession) -> YamsResult<()> {
    let (scores, archive) = (session.scores(), session.archive());
    match args.view {
        BoardView::Current => {
            reports::tables::print_current_board(&ranking::current_leaderboard(scores))
        }
        BoardView::Avg => reports::tables::print_average_board(
            &ranking::all_time_average_leaderboard(scores, archive),
        ),
        BoardView::Wins => {
            reports::tables::print_wins_board(&ranking::wins_leaderboard(scores, archive))
        }
    }
    Ok(())
}

pub fn stats(args: &StatsArgs, session: &AppSession) -> YamsResult<()> {
    let id = session.player_id(&args.player)?;
    let card = ranking::player_card(session.scores(), session.archive(), &id)?;
    reports::tables::print_player_card(&card);
    Ok(())
}
