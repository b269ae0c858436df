use crate::consts::{ROUNDS_KEY, STATE_KEY};
use crate::error::{YamsError, YamsResult};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub storage: StorageParams,
    #[command(flatten)]
    pub display: DisplayParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageParams {
    /// Directory holding one JSON document per storage key
    #[arg(long, global = true, default_value = "data")]
    pub data_dir: String,
    #[arg(long, global = true, default_value = STATE_KEY)]
    pub state_key: String,
    #[arg(long, global = true, default_value = ROUNDS_KEY)]
    pub rounds_key: String,
}

impl Default for StorageParams {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            state_key: STATE_KEY.to_string(),
            rounds_key: ROUNDS_KEY.to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayParams {
    /// Players listed per round in the history view
    #[arg(long, global = true, default_value_t = 3)]
    pub history_top: usize,
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self { history_top: 3 }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> YamsResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            YamsError::Config(format!(
                "Failed to read config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| YamsError::Config(format!("Failed to parse config JSON: {}", e)))
    }

    /// Copies every value that was given explicitly on the command line over
    /// the file-provided one.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(storage.data_dir);
        update_if_present!(storage.state_key);
        update_if_present!(storage.rounds_key);
        update_if_present!(display.history_top);
    }
}
