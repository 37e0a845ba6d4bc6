use nightdealer_ai::AI_TYPES;
use nightdealer_engine::config::RulesConfig;
use serde::{Deserialize, Serialize};
use std::fs;

pub const ENV_CONFIG: &str = "NIGHTDEALER_CONFIG";
pub const ENV_SEED: &str = "NIGHTDEALER_SEED";
pub const ENV_ECLIPSE_CHANCE: &str = "NIGHTDEALER_ECLIPSE_CHANCE";
pub const ENV_AI: &str = "NIGHTDEALER_AI";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub ai: String,
    pub eclipse_chance: f64,
    pub rerolls_per_round: u8,
    pub wins_to_take_match: u8,
    pub max_rounds: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub ai: ValueSource,
    pub eclipse_chance: ValueSource,
    pub rerolls_per_round: ValueSource,
    pub wins_to_take_match: ValueSource,
    pub max_rounds: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            ai: ValueSource::Default,
            eclipse_chance: ValueSource::Default,
            rerolls_per_round: ValueSource::Default,
            wins_to_take_match: ValueSource::Default,
            max_rounds: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let rules = RulesConfig::default();
        Self {
            seed: None,
            ai: "baseline".into(),
            eclipse_chance: rules.eclipse_chance,
            rerolls_per_round: rules.rerolls_per_round,
            wins_to_take_match: rules.wins_to_take_match,
            max_rounds: rules.max_rounds,
        }
    }
}

impl Config {
    /// Rule constants handed to the engine.
    pub fn rules(&self) -> RulesConfig {
        RulesConfig {
            eclipse_chance: self.eclipse_chance,
            rerolls_per_round: self.rerolls_per_round,
            wins_to_take_match: self.wins_to_take_match,
            max_rounds: self.max_rounds,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Resolves the configuration from the process environment.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Layers defaults, the TOML file named by `NIGHTDEALER_CONFIG`, then the
/// `NIGHTDEALER_*` variables, reading variables through `env`.
pub fn load_from<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env(ENV_CONFIG)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
        if let Some(v) = f.eclipse_chance {
            cfg.eclipse_chance = v;
            sources.eclipse_chance = ValueSource::File;
        }
        if let Some(v) = f.rerolls_per_round {
            cfg.rerolls_per_round = v;
            sources.rerolls_per_round = ValueSource::File;
        }
        if let Some(v) = f.wins_to_take_match {
            cfg.wins_to_take_match = v;
            sources.wins_to_take_match = ValueSource::File;
        }
        if let Some(v) = f.max_rounds {
            cfg.max_rounds = v;
            sources.max_rounds = ValueSource::File;
        }
    }

    if let Some(seed) = env(ENV_SEED)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(chance) = env(ENV_ECLIPSE_CHANCE)
        && !chance.is_empty()
    {
        cfg.eclipse_chance = chance
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid eclipse chance: {}", chance)))?;
        sources.eclipse_chance = ValueSource::Env;
    }
    if let Some(ai) = env(ENV_AI)
        && !ai.is_empty()
    {
        cfg.ai = ai.trim().to_ascii_lowercase();
        sources.ai = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    ai: Option<String>,
    #[serde(default)]
    eclipse_chance: Option<f64>,
    #[serde(default)]
    rerolls_per_round: Option<u8>,
    #[serde(default)]
    wins_to_take_match: Option<u8>,
    #[serde(default)]
    max_rounds: Option<u8>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if !AI_TYPES.contains(&cfg.ai.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: unknown ai '{}' (expected one of {})",
            cfg.ai,
            AI_TYPES.join(", ")
        )));
    }
    cfg.rules()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let resolved = load_from(env_of(&[])).unwrap();
        assert_eq!(resolved.config, Config::default());
        assert_eq!(resolved.sources.seed, ValueSource::Default);
        assert_eq!(resolved.config.rules(), RulesConfig::default());
    }

    #[test]
    fn env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 5\neclipse_chance = 0.25\nmax_rounds = 5").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let resolved = load_from(env_of(&[
            (ENV_CONFIG, path.as_str()),
            (ENV_SEED, "9"),
            (ENV_AI, "Random"),
        ]))
        .unwrap();
        assert_eq!(resolved.config.seed, Some(9));
        assert_eq!(resolved.sources.seed, ValueSource::Env);
        assert_eq!(resolved.config.eclipse_chance, 0.25);
        assert_eq!(resolved.sources.eclipse_chance, ValueSource::File);
        assert_eq!(resolved.config.max_rounds, 5);
        assert_eq!(resolved.config.ai, "random");
        assert_eq!(resolved.sources.ai, ValueSource::Env);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load_from(env_of(&[(ENV_SEED, "abc")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_from(env_of(&[(ENV_ECLIPSE_CHANCE, "1.5")])),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load_from(env_of(&[(ENV_AI, "oracle")])),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let path = path.to_string_lossy().to_string();
        assert!(matches!(
            load_from(env_of(&[(ENV_CONFIG, path.as_str())])),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn unknown_file_keys_fail_to_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "board_size = 4").unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert!(matches!(
            load_from(env_of(&[(ENV_CONFIG, path.as_str())])),
            Err(ConfigError::Parse(_))
        ));
    }
}
