use super::AppSession;
use crate::reports;
use clap::Subcommand;
use yams::ranking::display_name;
use yams::YamsResult;

#[derive(Subcommand, Debug, Clone)]
pub enum PlayerCommand {
    /// Add a player with an empty score card
    Add { name: String },
    /// Rename a player (by id or current name)
    Rename { player: String, name: String },
    /// Remove a player and their current cells; archived rounds are kept
    Remove { player: String },
    /// List the roster
    List,
}

pub fn run(command: PlayerCommand, session: &mut AppSession) -> YamsResult<()> {
    match command {
        PlayerCommand::Add { name } => {
            let player = session.add_player(&name)?;
            println!("✅ Added {} ({})", display_name(&player), player.id);
        }
        PlayerCommand::Rename { player, name } => {
            let id = session.player_id(&player)?;
            session.rename_player(&id, &name)?;
            println!("✏️  {} is now {}", player, name.trim());
        }
        PlayerCommand::Remove { player } => {
            let id = session.player_id(&player)?;
            let removed = session.remove_player(&id)?;
            println!("🗑️  Removed {}", display_name(&removed));
        }
        PlayerCommand::List => reports::tables::print_roster(session.scores()),
    }
    Ok(())
}
