use super::AppSession;
use crate::reports;
use yams::ranking::{self, resolve_name};
use yams::YamsResult;

pub fn sheet(session: &AppSession) -> YamsResult<()> {
    if session.scores().is_empty() {
        println!("No players yet. Add one with `yams player add <name>`.");
        return Ok(());
    }
    reports::tables::print_sheet(session.scores());
    Ok(())
}

pub fn close(session: &mut AppSession) -> YamsResult<()> {
    let entry = session.close_round()?;
    println!("🏁 Round #{} archived", session.archive().len());

    match entry.winner() {
        Some(id) => println!(
            "🏆 {} wins with {}",
            resolve_name(session.scores(), id),
            entry.total_for(id).unwrap_or(0)
        ),
        None => println!("🤝 Tie at the top"),
    }

    let summaries = ranking::history_summaries(session.scores(), session.archive(), usize::MAX);
    if let Some(latest) = summaries.first() {
        reports::tables::print_history(std::slice::from_ref(latest));
    }
    Ok(())
}
