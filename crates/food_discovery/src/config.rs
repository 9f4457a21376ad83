use std::{
    collections::{HashMap, HashSet},
    env, fmt,
    fs::File,
    io,
};

use model::{source::Source, station::Station};
use serde::Deserialize;
use utility::id::Id;

pub const DEFAULT_PAGE_SIZE: usize = 20;

pub const FALLBACK_TABLE_PATH_VAR: &str = "FALLBACK_TABLE_PATH";
pub const SOURCE_EXCLUSIONS_PATH_VAR: &str = "SOURCE_EXCLUSIONS_PATH";
pub const HOURS_POLICY_VAR: &str = "HOURS_POLICY";
pub const PAGE_SIZE_VAR: &str = "PAGE_SIZE";

/// Manually curated nearby-station candidates, consulted in order when a
/// station has no food of its own. Not derived from geography.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct FallbackTable {
    candidates: HashMap<Id<Station>, Vec<Id<Station>>>,
}

impl FallbackTable {
    pub fn empty() -> Self {
        Self {
            candidates: HashMap::new(),
        }
    }

    pub fn candidates(&self, station: &Id<Station>) -> &[Id<Station>] {
        self.candidates
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn with(mut self, station: Id<Station>, candidates: Vec<Id<Station>>) -> Self {
        self.candidates.insert(station, candidates);
        self
    }
}

impl Default for FallbackTable {
    /// The curated table for the western LRT feeder stations, most of which
    /// have no food of their own.
    fn default() -> Self {
        let station = |name: &str| Id::<Station>::from_name(name);
        Self::empty()
            .with(
                station("Senja"),
                vec![station("Jelapang"), station("Segar"), station("Bukit Panjang")],
            )
            .with(
                station("Jelapang"),
                vec![station("Senja"), station("Bukit Panjang")],
            )
            .with(
                station("Segar"),
                vec![station("Fajar"), station("Bukit Panjang")],
            )
            .with(station("Fajar"), vec![station("Segar"), station("Bukit Panjang")])
            .with(
                station("Pending"),
                vec![station("Bangkit"), station("Bukit Panjang")],
            )
            .with(station("Bangkit"), vec![station("Bukit Panjang")])
            .with(station("South View"), vec![station("Keat Hong"), station("Teck Whye")])
    }
}

/// Source ids that never qualify a listing for discovery on their own.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct SourceExclusions {
    excluded: HashSet<Id<Source>>,
}

impl SourceExclusions {
    pub fn empty() -> Self {
        Self {
            excluded: HashSet::new(),
        }
    }

    pub fn of(ids: impl IntoIterator<Item = Id<Source>>) -> Self {
        Self {
            excluded: ids.into_iter().collect(),
        }
    }

    pub fn is_excluded(&self, source: &Id<Source>) -> bool {
        self.excluded.contains(source)
    }
}

impl Default for SourceExclusions {
    /// Star-rating guides count as decoration, not as discovery sources.
    fn default() -> Self {
        Self::of([Id::from_name("Michelin Guide")])
    }
}

/// Whether parseable-but-closed opening hours may exclude an item from a
/// time-sensitive tag filter. Hour data never excludes under `FailOpen`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoursPolicy {
    #[default]
    FailOpen,
    Strict,
}

#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    pub fallback: FallbackTable,
    pub excluded_sources: SourceExclusions,
    pub hours_policy: HoursPolicy,
    pub page_size: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackTable::default(),
            excluded_sources: SourceExclusions::default(),
            hours_policy: HoursPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DiscoveryConfig {
    /// Configuration from the environment, falling back to the compiled-in
    /// curated defaults where a variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let fallback = match env::var(FALLBACK_TABLE_PATH_VAR) {
            Ok(path) => serde_json::from_reader(File::open(path)?)?,
            Err(_) => FallbackTable::default(),
        };
        let excluded_sources = match env::var(SOURCE_EXCLUSIONS_PATH_VAR) {
            Ok(path) => serde_json::from_reader(File::open(path)?)?,
            Err(_) => SourceExclusions::default(),
        };
        let hours_policy = match env::var(HOURS_POLICY_VAR) {
            Ok(value) => match value.as_str() {
                "strict" => HoursPolicy::Strict,
                "fail-open" => HoursPolicy::FailOpen,
                other => {
                    return Err(ConfigError::Invalid(format!(
                        "{HOURS_POLICY_VAR} must be 'strict' or 'fail-open', got '{other}'"
                    )))
                }
            },
            Err(_) => HoursPolicy::default(),
        };
        let page_size = match env::var(PAGE_SIZE_VAR) {
            Ok(value) => value.parse().map_err(|_| {
                ConfigError::Invalid(format!("{PAGE_SIZE_VAR} must be a positive integer"))
            })?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            return Err(ConfigError::Invalid(format!(
                "{PAGE_SIZE_VAR} must be a positive integer"
            )));
        }
        Ok(Self {
            fallback,
            excluded_sources,
            hours_policy,
            page_size,
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(why) => write!(f, "cannot read config file: {why}"),
            ConfigError::Parse(why) => write!(f, "cannot parse config file: {why}"),
            ConfigError::Invalid(why) => write!(f, "{why}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.hours_policy, HoursPolicy::FailOpen);
    }

    #[test]
    fn fallback_table_lookup() {
        let senja = Id::<Station>::from_name("Senja");
        let table = FallbackTable::default();
        assert!(!table.candidates(&senja).is_empty());
        assert!(table.candidates(&Id::from_name("Orchard")).is_empty());
    }

    #[test]
    fn fallback_table_deserializes_from_json() {
        let table: FallbackTable =
            serde_json::from_str(r#"{"senja": ["keat-hong", "phoenix"]}"#).unwrap();
        let candidates = table.candidates(&Id::from_name("Senja"));
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0], Id::from_name("Keat Hong"));
    }

    #[test]
    fn exclusions_deserialize_from_json() {
        let exclusions: SourceExclusions =
            serde_json::from_str(r#"["michelin-guide", "legacy-import"]"#).unwrap();
        assert!(exclusions.is_excluded(&Id::from_name("Michelin Guide")));
        assert!(!exclusions.is_excluded(&Id::from_name("Eatbook")));
    }
}
