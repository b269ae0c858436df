pub mod aggregate;
pub mod archive;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod error;
pub mod migrate;
pub mod persist;
pub mod ranking;
pub mod session;
pub mod store;
pub mod transfer;
pub mod validator;
// cmd and reports belong to the binary (main.rs).

pub use self::catalog::Category;
pub use self::error::{YamsError, YamsResult};
pub use self::session::Session;
pub use self::store::{Cell, Player, PlayerId, ScoreStore, Scorecard};
