use crate::dns_name::DomainName;
use serde::{Serialize, Serializer};

/// Latency of one benchmark target.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetLatency {
    Millis(f64),
    /// The per-target deadline elapsed.
    TimedOut,
    /// The target failed before the deadline.
    Failed(String),
}

impl TargetLatency {
    pub fn is_measured(&self) -> bool {
        matches!(self, TargetLatency::Millis(_))
    }
}

/// Wire form: milliseconds as a number rounded to two decimals, `-1` for a
/// timeout, `"Err: <reason>"` for a failure.
impl Serialize for TargetLatency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TargetLatency::Millis(ms) => serializer.serialize_f64((ms * 100.0).round() / 100.0),
            TargetLatency::TimedOut => serializer.serialize_i64(-1),
            TargetLatency::Failed(reason) => serializer.collect_str(&format_args!("Err: {}", reason)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRow {
    pub domain: DomainName,
    pub local: TargetLatency,
    /// Never `Failed`: public targets collapse every failure to `TimedOut`.
    pub google: TargetLatency,
    pub cloudflare: TargetLatency,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BenchmarkReport {
    Rows(Vec<BenchmarkRow>),
    /// The run was declined; the message says why.
    Declined(String),
}
