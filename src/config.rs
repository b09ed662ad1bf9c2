use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub tables: TableSettings,
    pub oracle: OracleSettings,
    #[serde(default)]
    pub engagement: EngagementSettings,
    #[serde(default)]
    pub recommendations: RecommendationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub service_role_key: String,
    pub timeout_secs: Option<u64>,
}

/// Relation names in the catalog store
#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_wishlists_table")]
    pub wishlists: String,
    #[serde(default = "default_swipes_table")]
    pub swipes: String,
    #[serde(default = "default_viewed_table")]
    pub viewed: String,
    #[serde(default = "default_experiences_table")]
    pub experiences: String,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            wishlists: default_wishlists_table(),
            swipes: default_swipes_table(),
            viewed: default_viewed_table(),
            experiences: default_experiences_table(),
        }
    }
}

fn default_wishlists_table() -> String { "wishlists".to_string() }
fn default_swipes_table() -> String { "swipes".to_string() }
fn default_viewed_table() -> String { "viewed_experiences".to_string() }
fn default_experiences_table() -> String { "experiences".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct OracleSettings {
    #[serde(default = "default_oracle_api_base")]
    pub api_base: String,
    pub api_key: String,
    #[serde(default = "default_oracle_model")]
    pub model: String,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

fn default_oracle_api_base() -> String { "https://api.groq.com/openai/v1".to_string() }
fn default_oracle_model() -> String { "llama3-8b-8192".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngagementSettings {
    /// Count viewed experiences as seen, alongside wishlist and likes
    #[serde(default)]
    pub include_viewed: bool,
}

/// Where the available-tag vocabulary comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabularySource {
    #[default]
    Catalog,
    Static,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_expansion_count")]
    pub expansion_count: usize,
    #[serde(default = "default_ranking_window")]
    pub ranking_window: usize,
    #[serde(default = "default_traits")]
    pub traits: Vec<String>,
    #[serde(default)]
    pub vocabulary: VocabularySource,
    #[serde(default)]
    pub static_tags: Vec<String>,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            expansion_count: default_expansion_count(),
            ranking_window: default_ranking_window(),
            traits: default_traits(),
            vocabulary: VocabularySource::default(),
            static_tags: Vec::new(),
        }
    }
}

fn default_expansion_count() -> usize { 10 }
fn default_ranking_window() -> usize { 20 }
fn default_traits() -> Vec<String> {
    vec!["adventurous".to_string(), "romantic".to_string(), "group_a".to_string()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with RECS__)
    /// 5. Well-known provider variables (SUPABASE_URL, GROQ_API_KEY, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(env_source())
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }
}

/// `RECS__` variables, e.g. RECS__SERVER__PORT -> server.port
///
/// List settings take comma-separated values.
fn env_source() -> Environment {
    Environment::with_prefix("RECS")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("recommendations.traits")
        .with_list_parse_key("recommendations.static_tags")
        .try_parsing(true)
}

/// Apply the provider variables that deployments already export
///
/// These take precedence over `RECS__` variables so the service can share an
/// environment file with the rest of the stack.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("supabase.url", "SUPABASE_URL"),
        ("supabase.service_role_key", "SUPABASE_SERVICE_ROLE_KEY"),
        ("oracle.api_key", "GROQ_API_KEY"),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (key, var) in overrides {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
