use super::AppSession;
use crate::reports;
use clap::Args;
use yams::config::DisplayParams;
use yams::ranking;
use yams::{YamsError, YamsResult};

#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Show the full sheet of round N (1 is the oldest)
    #[arg(long)]
    pub detail: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ClearArgs {
    /// Confirm the deletion
    #[arg(long, default_value_t = false)]
    pub yes: bool,
}

pub fn history(
    args: &HistoryArgs,
    session: &AppSession,
    display: &DisplayParams,
) -> YamsResult<()> {
    let (scores, archive) = (session.scores(), session.archive());

    if let Some(number) = args.detail {
        let entry = number
            .checked_sub(1)
            .and_then(|i| archive.get(i))
            .ok_or(YamsError::UnknownRound(number))?;
        let rows = ranking::round_detail(scores, entry);
        reports::tables::print_round_detail(number, entry, scores, &rows);
        return Ok(());
    }

    if archive.is_empty() {
        println!("No archived round yet.");
        return Ok(());
    }
    reports::tables::print_history(&ranking::history_summaries(
        scores,
        archive,
        display.history_top,
    ));
    Ok(())
}

pub fn clear(args: &ClearArgs, session: &mut AppSession) -> YamsResult<()> {
    if !args.yes {
        println!(
            "⚠️  Pass --yes to delete {} archived round(s).",
            session.archive().len()
        );
    }
    let removed = session.clear_history(args.yes)?;
    println!("🧹 Deleted {} archived round(s)", removed);
    Ok(())
}
