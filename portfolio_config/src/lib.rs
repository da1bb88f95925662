use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{File, FileFormat};
pub use duration::Duration;
use serde::Deserialize;
use url::Url;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Colon separated list of config files, later files take precedence.
pub const CONFIG_PATHS_ENV: &str = "PORTFOLIO_CONFIG";
pub const EMAIL_USER_ENV: &str = "EMAIL_USER";
pub const EMAIL_PASS_ENV: &str = "EMAIL_PASS";

/// Load the configuration from the files listed in `PORTFOLIO_CONFIG` (or the
/// bundled default) and apply the relay credentials from the environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = match std::env::var(CONFIG_PATHS_ENV) {
        Ok(paths) => paths.split(':').map(PathBuf::from).collect(),
        Err(_) => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };

    load_with_env(&paths, &[], EnvOverrides::from_env())
}

/// Load the configuration from `paths` followed by the inline TOML `overrides`.
///
/// The process environment is not consulted.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    load_with_env(paths, overrides, EnvOverrides::default())
}

pub fn load_with_env(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
    env: EnvOverrides,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, &x| {
            builder.add_source(File::from_str(x, FileFormat::Toml))
        })
        .set_override_option("email.user", env.email_user)?
        .set_override_option("email.password", env.email_password)?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

/// Values read from dedicated environment variables rather than config files.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub email_user: Option<String>,
    pub email_password: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|x| !x.is_empty());
        Self {
            email_user: var(EMAIL_USER_ENV),
            email_password: var(EMAIL_PASS_ENV),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub form: FormConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub user: Option<String>,
    pub password: Option<Secret>,
}

impl EmailConfig {
    /// The relay account, if both the user and the password are configured.
    pub fn relay(&self) -> Option<EmailRelayConfig> {
        let user = self.user.as_ref().filter(|x| !x.is_empty())?;
        let password = self.password.as_ref().filter(|x| !x.0.is_empty())?;
        Some(EmailRelayConfig {
            user: user.clone(),
            password: password.0.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailRelayConfig {
    pub user: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct FormConfig {
    pub endpoint: Url,
    pub error_reset_delay: Duration,
}

/// A string that is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(pub String);

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[redacted]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_paths() -> [&'static Path; 1] {
        [Path::new(DEFAULT_CONFIG_PATH)]
    }

    #[test]
    fn load_default_config() {
        let config = load_with_override(&default_paths(), &[]).unwrap();

        assert_eq!(config.http.port, 8000);
        assert_eq!(config.form.error_reset_delay.as_secs(), 3);
        assert_eq!(config.email.relay(), None);
    }

    #[test]
    fn relay_from_env() {
        let env = EnvOverrides {
            email_user: Some("me@example.com".into()),
            email_password: Some("hunter2".into()),
        };

        let config = load_with_env(&default_paths(), &[], env).unwrap();

        assert_eq!(
            config.email.relay(),
            Some(EmailRelayConfig {
                user: "me@example.com".into(),
                password: "hunter2".into(),
            })
        );
    }

    #[test]
    fn env_takes_precedence_over_files() {
        let env = EnvOverrides {
            email_user: Some("env@example.com".into()),
            email_password: None,
        };

        let config = load_with_env(
            &default_paths(),
            &["[email]\nuser = \"file@example.com\"\npassword = \"pw\""],
            env,
        )
        .unwrap();

        assert_eq!(config.email.relay().unwrap().user, "env@example.com");
    }

    #[test]
    fn relay_requires_both_credentials() {
        for overrides in [
            "[email]\nuser = \"me@example.com\"",
            "[email]\npassword = \"hunter2\"",
            "[email]\nuser = \"\"\npassword = \"hunter2\"",
            "[email]\nuser = \"me@example.com\"\npassword = \"\"",
        ] {
            let config = load_with_override(&default_paths(), &[overrides]).unwrap();
            assert_eq!(config.email.relay(), None, "{overrides}");
        }
    }

    #[test]
    fn password_is_redacted() {
        let config = load_with_override(
            &default_paths(),
            &["[email]\nuser = \"me@example.com\"\npassword = \"hunter2\""],
        )
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[redacted]"));
    }
}
