use crate::error::Result;
use crate::narration::{Narrator, SilentNarrator, SpeechCommand};
use crate::status::DEFAULT_LOOKUP_DELAY;
use crate::wizard::AdvancePolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const CONFIG_DIR: &str = "aadhaar-portal";
const CONFIG_FILE: &str = "portal.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub general: GeneralConfig,
    pub narration: NarrationConfig,
    pub status: StatusConfig,
    pub home: HomeConfig,
    pub enrollment: EnrollmentConfig,
}

impl PortalConfig {
    /// `$XDG_CONFIG_HOME/aadhaar-portal/portal.toml` or platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => {
                info!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: PortalConfig = toml::from_str(&content)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Build the narrator this config asks for
    pub fn narrator(&self) -> Arc<dyn Narrator> {
        if self.narration.enabled {
            Arc::new(SpeechCommand::new(
                self.narration.program.clone(),
                self.narration.args.clone(),
            ))
        } else {
            Arc::new(SilentNarrator)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub title: String,
    pub subtitle: String,
    /// Path of the view shown at startup
    pub start_route: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            title: "Aadhaar Seva".to_string(),
            subtitle: "आधार सेवा".to_string(),
            start_route: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    pub enabled: bool,
    /// Text-to-speech program; the sentence is appended as the last argument
    pub program: String,
    pub args: Vec<String>,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "espeak-ng".to_string(),
            args: vec!["-v".to_string(), "en-in".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Artificial latency of the mock status table
    pub lookup_delay_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            lookup_delay_ms: DEFAULT_LOOKUP_DELAY.as_millis() as u64,
        }
    }
}

impl StatusConfig {
    pub fn lookup_delay(&self) -> Duration {
        Duration::from_millis(self.lookup_delay_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub carousel_interval_ms: u64,
    pub trivia_interval_ms: u64,
    /// Speak a greeting the first time the home view opens
    pub greeting: bool,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            carousel_interval_ms: 3000,
            trivia_interval_ms: 5000,
            greeting: true,
        }
    }
}

impl HomeConfig {
    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms.max(1))
    }

    pub fn trivia_interval(&self) -> Duration {
        Duration::from_millis(self.trivia_interval_ms.max(1))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnrollmentConfig {
    pub advance_policy: AdvancePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PortalConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.status.lookup_delay(), Duration::from_millis(2000));
        assert_eq!(config.home.carousel_interval_ms, 3000);
        assert_eq!(config.home.trivia_interval_ms, 5000);
        assert_eq!(config.enrollment.advance_policy, AdvancePolicy::Permissive);
        assert_eq!(config.general.start_route, "/");
    }

    #[test]
    fn partial_file_overrides_only_what_it_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[status]
lookup_delay_ms = 250

[enrollment]
advance_policy = "require-valid-step"

[narration]
enabled = false
"#
        )
        .unwrap();

        let config = PortalConfig::load_from(file.path()).unwrap();
        assert_eq!(config.status.lookup_delay_ms, 250);
        assert_eq!(
            config.enrollment.advance_policy,
            AdvancePolicy::RequireValidStep
        );
        assert!(!config.narration.enabled);
        assert_eq!(config.narration.program, "espeak-ng");
        assert!(config.home.greeting);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[status]\nlookup_delay_ms = \"soon\"").unwrap();
        assert!(matches!(
            PortalConfig::load_from(file.path()),
            Err(crate::error::PortalError::TomlParse(_))
        ));
    }
}
