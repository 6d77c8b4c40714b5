//! Configuration for the converter and the loaded index.

/// Environment variable overriding [`ConverterConfig::category_depth_threshold`]
pub const CATEGORY_DEPTH_ENV: &str = "DISEASE_INDEX_CATEGORY_DEPTH";

/// Environment variable overriding [`StoreConfig::path_cache_capacity`]
pub const PATH_CACHE_CAPACITY_ENV: &str = "DISEASE_INDEX_PATH_CACHE_CAPACITY";

/// Default depth below which every source node is treated as a category
///
/// Whether this holds for classification trees shallower than two levels has
/// not been confirmed with the classification's maintainers.
pub const DEFAULT_CATEGORY_DEPTH_THRESHOLD: usize = 2;

/// Default capacity of the memoised path-to-root cache
pub const DEFAULT_PATH_CACHE_CAPACITY: usize = 4096;

/// Configuration for the `Converter`
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Nodes shallower than this depth are categories regardless of their label
    pub category_depth_threshold: usize,
    /// Separator after which the trailing part of a disease name becomes an alias
    pub alias_separator: char,
    /// Write artifacts as indented JSON
    pub pretty_json: bool,
    /// Show a spinner while traversing the source tree
    pub show_progress: bool,
    /// Number of warnings carried into validation summaries
    pub max_reported_warnings: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            category_depth_threshold: DEFAULT_CATEGORY_DEPTH_THRESHOLD,
            alias_separator: '-',
            pretty_json: true,
            show_progress: true,
            max_reported_warnings: 10,
        }
    }
}

impl ConverterConfig {
    /// Default configuration with environment overrides applied
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(depth) = env_usize(CATEGORY_DEPTH_ENV) {
            config.category_depth_threshold = depth;
        }
        config
    }

    /// Configuration suited to tests: quiet and compact
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            pretty_json: false,
            show_progress: false,
            ..Default::default()
        }
    }
}

/// Configuration for the loaded `CategoryGraph` and `DiseaseStore`
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum number of memoised path-to-root results kept per graph
    pub path_cache_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path_cache_capacity: DEFAULT_PATH_CACHE_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Default configuration with environment overrides applied
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(capacity) = env_usize(PATH_CACHE_CAPACITY_ENV) {
            config.path_cache_capacity = capacity;
        }
        config
    }
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name).ok().and_then(|s| s.parse::<usize>().ok())
}
