//! Very basic functionality to read and write persistent configuration into a
//! toml configuration file: where enumerator output buckets live and which
//! output filters apply per `(n_states, n_symbols)`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConfigToml {
    /// Directory bucket files (per decider/classification) are written into.
    #[serde(default = "default_output_dir")]
    output_dir: String,

    /// Skip writing machines whose detected period/degree is at or below
    /// this value to the "boring" bucket (still counted, not written).
    #[serde(default = "default_min_period_to_record")]
    min_period_to_record: usize,
}

impl ConfigToml {
    pub fn read_toml() -> ConfigToml {
        if Path::new(CONFIG_FILE).exists() {
            let config_content = fs::read_to_string(CONFIG_FILE)
                .expect("Config file {CONFIG_FILE} could not be read.");
            toml::from_str(&config_content).expect("Config file {CONFIG_FILE} could not be parsed.")
        } else {
            println!(
                "Config file {CONFIG_FILE} not found, creating a new one with default values."
            );
            let default_config = ConfigToml::default();
            let toml_string = toml::to_string_pretty(&default_config)
                .expect("Failed to serialize default config");
            if let Err(e) = fs::write(CONFIG_FILE, toml_string) {
                println!(
                    "ERROR: Config file {CONFIG_FILE} could not be written ({e}). Using default values."
                );
            }
            default_config
        }
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn min_period_to_record(&self) -> usize {
        self.min_period_to_record
    }
}

impl Default for ConfigToml {
    fn default() -> Self {
        ConfigToml {
            output_dir: default_output_dir(),
            min_period_to_record: default_min_period_to_record(),
        }
    }
}

fn default_output_dir() -> String {
    "./data".to_string()
}

fn default_min_period_to_record() -> usize {
    0
}
