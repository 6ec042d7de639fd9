//! Chain configuration mapping slots to epochs and epochs to forks.

use super::*;
use beacon::version;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainSpec {
    pub slots_per_epoch: u64,
    pub deneb_fork_epoch: Epoch,
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self {
            slots_per_epoch: SLOTS_PER_EPOCH,
            deneb_fork_epoch: 0,
        }
    }
}

impl ChainSpec {
    pub fn epoch_at_slot(&self, slot: Slot) -> Epoch {
        slot / self.slots_per_epoch.max(1)
    }

    pub fn active_fork_version(&self, epoch: Epoch) -> ForkVersion {
        match epoch >= self.deneb_fork_epoch {
            true => version::DENEB,
            false => version::CAPELLA,
        }
    }

    pub fn fork_version_at_slot(&self, slot: Slot) -> ForkVersion {
        self.active_fork_version(self.epoch_at_slot(slot))
    }
}
