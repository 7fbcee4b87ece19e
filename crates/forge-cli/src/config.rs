//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the resolved
//! [`BuildSettings`](forge_core::application::BuildSettings) and variables.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `FORGE_<SECTION>__<KEY>`, e.g.
//!    `FORGE_PATHS__ENGINE_DIR` or `FORGE_BUILD_TOOL__PROGRAM`
//! 3. Config file: `--config <FILE>`, else [`AppConfig::config_path`] if it
//!    exists, else `.forge.toml` in the current directory if it exists
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// File name used by `forge init --local`.
pub const LOCAL_CONFIG_FILE: &str = ".forge.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default directories for builds.
    pub paths: PathsConfig,
    /// The external build tool.
    pub build_tool: BuildToolConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub engine_dir: Option<PathBuf>,
    pub intermediate_dir: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub resources_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildToolConfig {
    pub program: PathBuf,
    pub configure_args: Vec<String>,
    pub build_args: Vec<String>,
}

impl Default for BuildToolConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("cmake"),
            configure_args: Vec::new(),
            build_args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; the `--output-format` flag wins.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(config_file, Environment::with_prefix("FORGE"))
    }

    fn load_with_env(config_file: Option<&Path>, env: Environment) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode default config")?;

        let mut builder = Config::builder().add_source(defaults);
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        } else if let Some(path) = Self::active_path() {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let env = env
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(" ")
            .with_list_parse_key("build_tool.configure_args")
            .with_list_parse_key("build_tool.build_args");

        builder
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.forge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "tungsten", "forge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }

    /// The implicit config file that [`load`](Self::load) would read, if any.
    pub fn active_path() -> Option<PathBuf> {
        [Self::config_path(), PathBuf::from(LOCAL_CONFIG_FILE)]
            .into_iter()
            .find(|p| p.is_file())
    }

    /// Serialise to the TOML written by `forge init`.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("FORGE").source(Some(source))
    }

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("forge.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn default_program_is_cmake() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.build_tool.program, PathBuf::from("cmake"));
        assert!(cfg.paths.engine_dir.is_none());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            [paths]
            engine_dir = "/opt/tungsten"

            [build_tool]
            build_args = ["--parallel", "8"]
            "#,
        );

        let cfg = AppConfig::load_with_env(Some(&path), env_from(&[])).unwrap();
        assert_eq!(cfg.paths.engine_dir, Some(PathBuf::from("/opt/tungsten")));
        assert_eq!(cfg.build_tool.build_args, ["--parallel", "8"]);
        assert_eq!(cfg.build_tool.program, PathBuf::from("cmake"));
    }

    #[test]
    fn environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[build_tool]\nprogram = \"cmake3\"\n");

        let env = env_from(&[
            ("FORGE_BUILD_TOOL__PROGRAM", "/usr/local/bin/cmake"),
            ("FORGE_PATHS__BUILD_DIR", "dist"),
            ("FORGE_BUILD_TOOL__CONFIGURE_ARGS", "-G Ninja"),
        ]);
        let cfg = AppConfig::load_with_env(Some(&path), env).unwrap();

        assert_eq!(cfg.build_tool.program, PathBuf::from("/usr/local/bin/cmake"));
        assert_eq!(cfg.paths.build_dir, Some(PathBuf::from("dist")));
        assert_eq!(cfg.build_tool.configure_args, ["-G", "Ninja"]);
    }

    #[test]
    fn explicit_file_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load_with_env(Some(&missing), env_from(&[])).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[paths\nengine_dir = ");
        assert!(AppConfig::load_with_env(Some(&path), env_from(&[])).is_err());
    }

    #[test]
    fn toml_round_trips_through_load() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, &AppConfig::default().to_toml().unwrap());

        let cfg = AppConfig::load_with_env(Some(&path), env_from(&[])).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
