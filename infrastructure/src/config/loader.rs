//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "search-relay";
const PROJECT_FILES: [&str; 2] = ["search-relay.toml", ".search-relay.toml"];
const ENV_PREFIX: &str = "SEARCH_RELAY_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./search-relay.toml` or `./.search-relay.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/search-relay/config.toml`
    /// 4. Environment: `SEARCH_RELAY_SECTION__KEY`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::load_from(config_path, Path::new("."))
    }

    /// Same as [`load`](Self::load) with the project root given explicitly.
    pub fn load_from(
        config_path: Option<&PathBuf>,
        project_dir: &Path,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path_in(project_dir) {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Default location of the key/value settings file
    pub fn default_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("settings.toml"))
    }

    /// Directory for rolling log files
    pub fn log_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(APP_DIR).join("logs"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        Self::project_config_path_in(Path::new("."))
    }

    fn project_config_path_in(dir: &Path) -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&PathBuf>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<7}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND  ] Project:  {}", path.display());
        } else {
            println!("  [       ] Project:  ./search-relay.toml or ./.search-relay.toml");
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "" };
            println!("  [{:<7}] Global:   {}", mark, path.display());
        }

        println!("  [       ] Env:      {}<SECTION>__<KEY>", ENV_PREFIX);
        println!("  [       ] Default:  built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.workflow.debounce_ms, 750);
        assert_eq!(config.search.timeout_seconds, 60);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("search-relay"));
    }

    #[test]
    fn test_project_file_is_merged() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".search-relay.toml"),
            "[workflow]\nsubmit_attempts = 7\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from(None, dir.path()).unwrap();
        assert_eq!(config.workflow.submit_attempts, 7);
        assert_eq!(config.workflow.debounce_ms, 750);
    }

    #[test]
    fn test_explicit_file_overrides_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("search-relay.toml"),
            "[search]\ntimeout_seconds = 5\n[chat]\nmodel = \"project\"\n",
        )
        .unwrap();
        let explicit = dir.path().join("explicit.toml");
        std::fs::write(&explicit, "[chat]\nmodel = \"explicit\"\n").unwrap();

        let config = ConfigLoader::load_from(Some(&explicit), dir.path()).unwrap();
        assert_eq!(config.chat.model, "explicit");
        assert_eq!(config.search.timeout_seconds, 5);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("bad.toml");
        std::fs::write(&explicit, "[workflow]\nsubmit_attempts = \"many\"\n").unwrap();

        assert!(ConfigLoader::load_from(Some(&explicit), dir.path()).is_err());
    }
}
