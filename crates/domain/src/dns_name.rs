use crate::errors::DomainError;
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 253;

/// Case-insensitive, fully-qualified domain name.
///
/// The stored form is canonical: ASCII lowercase, no trailing dot, labels
/// joined by `.`. The root name is the empty string and displays as `.`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainName(CompactString);

impl DomainName {
    pub fn root() -> Self {
        Self(CompactString::default())
    }

    /// Parses user-supplied presentation text. Rejects the root name, empty
    /// labels, oversized labels and characters outside `[a-z0-9_-]`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        let without_dot = trimmed.strip_suffix('.').unwrap_or(trimmed);

        if without_dot.is_empty() {
            return Err(DomainError::InvalidInput("domain name is empty".into()));
        }
        if without_dot.len() > MAX_NAME_LEN {
            return Err(DomainError::InvalidInput(format!(
                "domain name exceeds {} characters",
                MAX_NAME_LEN
            )));
        }

        let canonical = without_dot.to_ascii_lowercase();
        for label in canonical.split('.') {
            validate_label(label, input)?;
        }

        Ok(Self(CompactString::from(canonical)))
    }

    /// Builds a name from raw wire labels. The packet decoder has already
    /// enforced length limits and rejected labels holding `.` or bytes
    /// outside printable ASCII, so joining on `.` cannot merge labels.
    pub fn from_wire_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut name = CompactString::default();
        for label in labels {
            if !name.is_empty() {
                name.push('.');
            }
            name.push_str(&String::from_utf8_lossy(label).to_ascii_lowercase());
        }
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|label| !label.is_empty())
    }

    pub fn label_count(&self) -> usize {
        self.labels().count()
    }

    /// True when `self` equals `zone` or sits below it.
    pub fn is_within(&self, zone: &DomainName) -> bool {
        if zone.is_root() || self == zone {
            return true;
        }
        self.0
            .strip_suffix(zone.as_str())
            .is_some_and(|prefix| prefix.ends_with('.'))
    }
}

fn validate_label(label: &str, original: &str) -> Result<(), DomainError> {
    if label.is_empty() {
        return Err(DomainError::InvalidInput(format!(
            "empty label in '{}'",
            original
        )));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(DomainError::InvalidInput(format!(
            "label '{}' exceeds {} characters",
            label, MAX_LABEL_LEN
        )));
    }
    if let Some(bad) = label
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(DomainError::InvalidInput(format!(
            "invalid character '{}' in '{}'",
            bad, original
        )));
    }
    Ok(())
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            f.write_str(self.as_str())
        }
    }
}

impl FromStr for DomainName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DomainName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DomainName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
