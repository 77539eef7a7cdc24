use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Seconds between passes that drop expired entries. 0 disables the job.
    #[serde(default = "default_compaction_interval")]
    pub compaction_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            compaction_interval_secs: default_compaction_interval(),
        }
    }
}

fn default_capacity() -> usize {
    1000
}

fn default_compaction_interval() -> u64 {
    60
}
