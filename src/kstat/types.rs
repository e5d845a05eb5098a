use std::fmt;

/// Prefix shared by every ZFS kstat identifier
pub const STAT_PREFIX: &str = "kstat.zfs.misc";

/// Integer value carried by a kstat row
pub type MetricValue = u64;

/// Fully-qualified stat name, e.g. `kstat.zfs.misc.arcstats.hits`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatIdentifier(String);

impl StatIdentifier {
    pub fn new(category: &str, name: &str) -> Self {
        Self(format!("{}.{}.{}", STAT_PREFIX, category, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StatIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for StatIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StatIdentifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StatIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// One parsed data row of a kstat file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KstatRow {
    pub identifier: StatIdentifier,
    pub type_code: String, // Raw kstat data type, never interpreted
    pub value: MetricValue,
    pub line_number: usize, // 1-based, counting the header lines
}

/// How the parser reacts to a bad data row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Abort the parse on the first malformed row or undecodable value
    #[default]
    Strict,
    /// Skip bad rows with a warning and keep going
    Tolerant,
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseMode::Strict => write!(f, "strict"),
            ParseMode::Tolerant => write!(f, "tolerant"),
        }
    }
}

/// Counters for a single parse call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub emitted: usize,
    pub skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_format() {
        let id = StatIdentifier::new("arcstats", "hits");
        assert_eq!(id.as_str(), "kstat.zfs.misc.arcstats.hits");
        assert_eq!(id.to_string(), "kstat.zfs.misc.arcstats.hits");
        assert_eq!(id, "kstat.zfs.misc.arcstats.hits");
    }

    #[test]
    fn test_identifier_keeps_name_verbatim() {
        let id = StatIdentifier::new("vdev_cache_stats", "delegations");
        assert_eq!(
            id.into_string(),
            "kstat.zfs.misc.vdev_cache_stats.delegations"
        );
    }

    #[test]
    fn test_parse_mode_default_is_strict() {
        assert_eq!(ParseMode::default(), ParseMode::Strict);
        assert_eq!(ParseMode::Tolerant.to_string(), "tolerant");
    }
}
