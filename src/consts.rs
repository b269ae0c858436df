/// Upper-section sum required to earn the bonus.
pub const BONUS_THRESHOLD: u32 = 63;

/// Points awarded once the upper section reaches [`BONUS_THRESHOLD`].
pub const BONUS_VALUE: u32 = 35;

/// Highest multiplier of an upper-section category (five dice showing the face).
pub const MAX_DICE: u32 = 5;

/// Number of most recent rounds averaged for the trend.
pub const RECENT_WINDOW: usize = 5;

/// Ranks 0, 1 and 2 count as a podium.
pub const PODIUM_SIZE: usize = 3;

/// Schema tag written into export documents.
pub const EXPORT_VERSION: &str = "v7.5.1";

/// Default storage key of the application state record.
pub const STATE_KEY: &str = "yams-state-v7.5.1";

/// Default storage key of the round archive record.
pub const ROUNDS_KEY: &str = "yams-rounds-v7.5.1";

/// Storage key used by the v6 roster format, read once for migration.
pub const LEGACY_STATE_KEY: &str = "yams-app-pages-v6.1-table";

/// Display name for players without a name or no longer on the roster.
pub const UNKNOWN_PLAYER_LABEL: &str = "Joueur";
