use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use toml::Value;

/// Harness-level knobs. Section `[sim]` of the config file.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimConfig {
    /// TOML request trace to schedule; empty means synthetic traffic.
    pub trace: String,
    pub log_level: String,
    /// CSV file receiving the emitted schedule; empty disables the dump.
    pub csv: String,
}

pub trait Config: DeserializeOwned + Default {
    fn from_section(section: Option<&Value>) -> Result<Self, toml::de::Error> {
        match section {
            Some(value) => value.clone().try_into(),
            None => {
                warn!("config section not found");
                Ok(Self::default())
            }
        }
    }
}

impl Config for SimConfig {}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trace: "".to_string(),
            log_level: "warn".to_string(),
            csv: "".to_string(),
        }
    }
}

impl Config for crate::dram::TimingConfig {}

impl Config for crate::traffic::TrafficConfig {}
