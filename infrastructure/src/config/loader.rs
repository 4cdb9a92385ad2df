//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["arena.toml", ".arena.toml"];

/// Prefix for environment overrides, e.g. `ARENA_PIPELINE__STRATEGY`
const ENV_PREFIX: &str = "ARENA_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `ARENA_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./arena.toml` or `./.arena.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/debate-arena/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let global = Self::global_config_path();
        let project = Self::project_config_path();
        Self::load_from(
            global.as_deref(),
            project.as_deref(),
            config_path.map(PathBuf::as_path),
        )
    }

    /// Merge the given files (each optional) over the defaults, then the
    /// environment.
    pub fn load_from(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // An explicit path must exist
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/debate-arena/config.toml` if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join("debate-arena").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for --show-config)
    ///
    /// Written to stderr; stdout carries only the result payload.
    pub fn print_config_sources(explicit: Option<&PathBuf>) {
        eprintln!("Configuration sources (in priority order):");

        eprintln!("  [ENV  ] Environment: {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            eprintln!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            eprintln!("  [FOUND] Project: {}", path.display());
        } else {
            eprintln!(
                "  [     ] Project: ./{} or ./{}",
                PROJECT_FILES[0],
                PROJECT_FILES[1]
            );
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                eprintln!("  [FOUND] Global:  {}", path.display());
            } else {
                eprintln!("  [     ] Global:  {}", path.display());
            }
        }

        eprintln!("  [     ] Default: built-in defaults");
    }
}
