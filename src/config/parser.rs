use crate::config::source::{ConfigSource, BASE_URL_KEY, SEARCH_URL_KEY};
use crate::config::types::{Config, Settings, SiteConfig};
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a settings file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML settings file
///
/// # Returns
///
/// * `Ok(Settings)` - Parsed settings, with defaults for omitted keys
/// * `Err(ConfigError)` - Failed to read or parse the file
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}

/// Resolves the site addresses from a key/value source
pub fn resolve_site(source: &dyn ConfigSource) -> Result<SiteConfig, ConfigError> {
    Ok(SiteConfig {
        base_url: source.resolve(BASE_URL_KEY)?,
        search_url: source.resolve(SEARCH_URL_KEY)?,
    })
}

/// Builds the run configuration
///
/// The site addresses are resolved once, here, and carried through the run.
///
/// # Arguments
///
/// * `settings_path` - Optional TOML settings file; defaults apply when absent
/// * `source` - Where `BASE_URL` and `SEARCH_URL` come from
///
/// # Example
///
/// ```no_run
/// use listing_harvester::config::{load_config, EnvSource};
///
/// let config = load_config(None, &EnvSource::new()).unwrap();
/// println!("Writing to {}", config.output.csv_path);
/// ```
pub fn load_config(
    settings_path: Option<&Path>,
    source: &dyn ConfigSource,
) -> Result<Config, ConfigError> {
    let settings = match settings_path {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };

    let site = resolve_site(source)?;

    let config = Config {
        site,
        crawler: settings.crawler,
        output: settings.output,
        selectors: settings.selectors,
    };

    validate(&config)?;

    Ok(config)
}

/// Replaces the configured CSV path and validates the result again
///
/// Used for the `--output` command-line override, which must meet the same
/// rules as `[output] csv-path`.
pub fn override_output(config: &mut Config, csv_path: &str) -> Result<(), ConfigError> {
    config.output.csv_path = csv_path.to_string();
    validate(config)
}
