//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable prefix; `__` separates section and key.
pub const ENV_PREFIX: &str = "AWSOPS_";

const PROJECT_FILES: [&str; 2] = ["awsops.toml", ".awsops.toml"];

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error(transparent)]
    Invalid(#[from] Box<figment::Error>),
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `AWSOPS_*` environment variables
    /// 2. Explicit config path (if provided; must exist)
    /// 3. Project root: `./awsops.toml` or `./.awsops.toml`
    /// 4. Global: `~/.config/awsops/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigLoadError> {
        let mut files: Vec<PathBuf> = Self::global_config_path().into_iter().collect();
        files.extend(Self::project_config_path());
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigLoadError::NotFound(path.to_path_buf()));
            }
            files.push(path.to_path_buf());
        }
        Self::extract(Self::figment(&files, ENV_PREFIX))
    }

    /// Defaults plus environment, skipping every file (for --no-config)
    pub fn load_without_files() -> Result<FileConfig, ConfigLoadError> {
        Self::extract(Self::figment(&[], ENV_PREFIX))
    }

    /// Build the merged figment: defaults, then each existing file in
    /// order, then environment variables under `env_prefix`.
    pub fn figment(files: &[PathBuf], env_prefix: &str) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        for path in files.iter().filter(|p| p.exists()) {
            tracing::debug!(path = %path.display(), "Merging config file");
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(env_prefix).split("__"))
    }

    fn extract(figment: Figment) -> Result<FileConfig, ConfigLoadError> {
        figment.extract().map_err(|e| ConfigLoadError::Invalid(Box::new(e)))
    }

    /// Get the global config file path (`~/.config/awsops/config.toml` on Linux)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("awsops").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES.iter().map(PathBuf::from).find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(config_path: Option<&Path>) -> String {
        let mark = |found: bool| if found { "[FOUND]" } else { "[     ]" };
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!("  [ENV  ] Environment: {}<SECTION>__<KEY>", ENV_PREFIX));
        if let Some(path) = config_path {
            lines.push(format!("  {} Explicit: {}", mark(path.exists()), path.display()));
        }
        match Self::project_config_path() {
            Some(path) => lines.push(format!("  {} Project: {}", mark(true), path.display())),
            None => lines.push(format!("  {} Project: ./awsops.toml or ./.awsops.toml", mark(false))),
        }
        if let Some(path) = Self::global_config_path() {
            lines.push(format!("  {} Global:  {}", mark(path.exists()), path.display()));
        }
        lines.push("  [     ] Default: built-in defaults".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = write(
            dir.path(),
            "global.toml",
            "[aws]\nregion = \"us-west-2\"\nprofile = \"base\"\n\n[agent]\nmax_tool_calls = 4\n",
        );
        let project = write(dir.path(), "project.toml", "[aws]\nregion = \"eu-central-1\"\n");

        let config: FileConfig = ConfigLoader::figment(&[global, project], "AWSOPS_TEST_UNSET_")
            .extract()
            .unwrap();
        assert_eq!(config.aws.region, "eu-central-1");
        assert_eq!(config.aws.profile.as_deref(), Some("base"));
        assert_eq!(config.agent.max_tool_calls, 4);
        assert_eq!(config.engine.model_id, "claude-sonnet-4");
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config: FileConfig = ConfigLoader::figment(&[dir.path().join("absent.toml")], "AWSOPS_TEST_UNSET_")
            .extract()
            .unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_environment_overrides_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "config.toml", "[aws]\nregion = \"us-west-2\"\n");

        // SAFETY: the prefix is unique to this test.
        unsafe {
            std::env::set_var("AWSOPS_TEST_ENV_AWS__REGION", "sa-east-1");
            std::env::set_var("AWSOPS_TEST_ENV_AGENT__COMMAND_TIMEOUT_SECS", "45");
        }
        let config: FileConfig = ConfigLoader::figment(&[file], "AWSOPS_TEST_ENV_").extract().unwrap();
        assert_eq!(config.aws.region, "sa-east-1");
        assert_eq!(config.agent.command_timeout_secs, 45);
    }

    #[test]
    fn test_invalid_type_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "bad.toml", "[agent]\nmax_tool_calls = \"many\"\n");
        let result: Result<FileConfig, _> = ConfigLoader::figment(&[file], "AWSOPS_TEST_UNSET_").extract();
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let result = ConfigLoader::load(Some(Path::new("/nonexistent/awsops.toml")));
        assert!(matches!(result, Err(ConfigLoadError::NotFound(_))));
    }

    #[test]
    fn test_global_config_path() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.ends_with("awsops/config.toml"));
        }
    }

    #[test]
    fn test_describe_sources_lists_explicit_path() {
        let text = ConfigLoader::describe_sources(Some(Path::new("/nonexistent/custom.toml")));
        assert!(text.contains("Explicit: /nonexistent/custom.toml"));
        assert!(text.contains("AWSOPS_<SECTION>__<KEY>"));
    }
}
