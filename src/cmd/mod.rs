use yams::persist::FileStore;
use yams::Session;

pub mod board;
pub mod history;
pub mod player;
pub mod round;
pub mod score;
pub mod transfer;

pub type AppSession = Session<FileStore>;
