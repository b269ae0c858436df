use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::{error, info, Level};
use yams::config::Config;
use yams::persist::FileStore;
use yams::{Session, YamsResult};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Yam's score sheet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    config: Config,

    /// JSON file overriding the built-in settings
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage the roster
    #[command(subcommand)]
    Player(cmd::player::PlayerCommand),
    /// Commit a value to a cell, correcting it when illegal
    Enter(cmd::score::EnterArgs),
    /// Check a value against a category without storing it
    Check(cmd::score::CheckArgs),
    /// Block or unblock a cell
    Block(cmd::score::BlockArgs),
    /// Print the current round
    Sheet,
    /// Archive the current round and start a new one
    Close,
    /// Print one of the leaderboards
    Board(cmd::board::BoardArgs),
    /// Print the card of a player
    Stats(cmd::board::StatsArgs),
    /// List archived rounds
    History(cmd::history::HistoryArgs),
    /// Delete every archived round
    ClearHistory(cmd::history::ClearArgs),
    /// Write roster, round and archive to a JSON document
    Export(cmd::transfer::FileArgs),
    /// Replace everything with the content of a JSON document
    Import(cmd::transfer::FileArgs),
    /// Write one row per archived round to a CSV file
    ExportCsv(cmd::transfer::FileArgs),
}

fn resolve_config(cli: &Cli, matches: &clap::ArgMatches) -> YamsResult<Config> {
    match &cli.config_file {
        Some(path) => {
            info!("⚙️  Loading settings from: {}", path);
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(&cli.config, matches);
            Ok(config)
        }
        None => Ok(cli.config.clone()),
    }
}

fn open_session(config: &Config) -> YamsResult<cmd::AppSession> {
    let backend = FileStore::open(&config.storage.data_dir)?;
    Session::load(backend, &config.storage)
}

fn run(command: Commands, config: &Config) -> YamsResult<()> {
    match command {
        Commands::Check(args) => {
            cmd::score::check(&args);
            Ok(())
        }
        Commands::Player(command) => cmd::player::run(command, &mut open_session(config)?),
        Commands::Enter(args) => cmd::score::enter(&args, &mut open_session(config)?),
        Commands::Block(args) => cmd::score::block(&args, &mut open_session(config)?),
        Commands::Sheet => cmd::round::sheet(&open_session(config)?),
        Commands::Close => cmd::round::close(&mut open_session(config)?),
        Commands::Board(args) => cmd::board::board(&args, &open_session(config)?),
        Commands::Stats(args) => cmd::board::stats(&args, &open_session(config)?),
        Commands::History(args) => {
            cmd::history::history(&args, &open_session(config)?, &config.display)
        }
        Commands::ClearHistory(args) => cmd::history::clear(&args, &mut open_session(config)?),
        Commands::Export(args) => cmd::transfer::export(&args, &open_session(config)?),
        Commands::Import(args) => cmd::transfer::import(&args, &mut open_session(config)?),
        Commands::ExportCsv(args) => cmd::transfer::export_csv(&args, &open_session(config)?),
    }
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli, &matches).unwrap_or_else(|e| {
        error!("❌ {}", e);
        process::exit(1);
    });

    if let Err(e) = run(cli.command, &config) {
        error!("❌ {}", e);
        process::exit(1);
    }
}
