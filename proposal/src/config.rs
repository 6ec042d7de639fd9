use super::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BEACON_BLOCK_POSITION: usize = 0;
pub const DEFAULT_BLOB_SIDECARS_POSITION: usize = 1;

/// Positions of the beacon chain entries inside a proposal.
///
/// Preparation and processing must run with the same configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub beacon_block_position: usize,
    pub blob_sidecars_position: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            beacon_block_position: DEFAULT_BEACON_BLOCK_POSITION,
            blob_sidecars_position: DEFAULT_BLOB_SIDECARS_POSITION,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if self.beacon_block_position == self.blob_sidecars_position {
            return Err(Error::InvalidConfig(format!(
                "beacon block and blob sidecars share position {}",
                self.beacon_block_position
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.beacon_block_position, 0);
        assert_eq!(config.blob_sidecars_position, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overlapping_positions() {
        let config: Config = serde_json::from_str(r#"{"blob_sidecars_position": 0}"#).unwrap();

        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
