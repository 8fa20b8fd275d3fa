// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Environment-variable configuration surface.
//!
//! All variables are optional; every read falls back to a sensible
//! default, so a process with an empty environment still logs to the
//! console at INFO.

/// Snapshot of the `NEXLOG_*` environment variables.
#[derive(Debug, Clone)]
pub struct Settings {
    /// `NEXLOG_APP_NAME`, default `app`. Root logger name and default
    /// remote topic.
    pub app_name: String,
    /// `NEXLOG_LEVEL`, default `INFO`.
    pub level: String,
    /// `NEXLOG_CONSOLE_ENABLED`, default `true`.
    pub console_enabled: bool,
    /// `NEXLOG_FILE_ENABLED`, default `false`.
    pub file_enabled: bool,
    /// `NEXLOG_FILE_PATH`, default `logs/<app_name>.log`.
    pub file_path: String,
    /// `NEXLOG_REMOTE_ENABLED`, default `false`.
    pub remote_enabled: bool,
    /// `NEXLOG_REMOTE_ENDPOINT`.
    pub remote_endpoint: Option<String>,
    /// `NEXLOG_REMOTE_ACCESS_KEY_ID`.
    pub remote_access_key_id: Option<String>,
    /// `NEXLOG_REMOTE_ACCESS_KEY_SECRET`.
    pub remote_access_key_secret: Option<String>,
    /// `NEXLOG_REMOTE_PROJECT`.
    pub remote_project: Option<String>,
    /// `NEXLOG_REMOTE_LOGSTORE`.
    pub remote_logstore: Option<String>,
    /// `NEXLOG_REMOTE_TOPIC`, defaults to the app name when unset.
    pub remote_topic: Option<String>,
    /// `NEXLOG_REMOTE_SOURCE`, defaults to the host name when unset.
    pub remote_source: Option<String>,
    /// `NEXLOG_SERVER_LOG_REDIRECT`, default `false`.
    pub server_log_redirect: bool,
}

impl Settings {
    /// Read the environment. Infallible: unset or unparseable values fall
    /// back to their defaults.
    pub fn from_env() -> Self {
        let app_name = env_or("NEXLOG_APP_NAME", "app");
        let file_path = std::env::var("NEXLOG_FILE_PATH")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| format!("logs/{app_name}.log"));
        Settings {
            level: env_or("NEXLOG_LEVEL", "INFO"),
            console_enabled: env_bool("NEXLOG_CONSOLE_ENABLED", true),
            file_enabled: env_bool("NEXLOG_FILE_ENABLED", false),
            file_path,
            remote_enabled: env_bool("NEXLOG_REMOTE_ENABLED", false),
            remote_endpoint: env_opt("NEXLOG_REMOTE_ENDPOINT"),
            remote_access_key_id: env_opt("NEXLOG_REMOTE_ACCESS_KEY_ID"),
            remote_access_key_secret: env_opt("NEXLOG_REMOTE_ACCESS_KEY_SECRET"),
            remote_project: env_opt("NEXLOG_REMOTE_PROJECT"),
            remote_logstore: env_opt("NEXLOG_REMOTE_LOGSTORE"),
            remote_topic: env_opt("NEXLOG_REMOTE_TOPIC"),
            remote_source: env_opt("NEXLOG_REMOTE_SOURCE"),
            server_log_redirect: env_bool("NEXLOG_SERVER_LOG_REDIRECT", false),
            app_name,
        }
    }

    /// Defaults with nothing read from the environment; used as a base in
    /// tests.
    pub fn defaults() -> Self {
        Settings {
            app_name: "app".to_string(),
            level: "INFO".to_string(),
            console_enabled: true,
            file_enabled: false,
            file_path: "logs/app.log".to_string(),
            remote_enabled: false,
            remote_endpoint: None,
            remote_access_key_id: None,
            remote_access_key_secret: None,
            remote_project: None,
            remote_logstore: None,
            remote_topic: None,
            remote_source: None,
            server_log_redirect: false,
        }
    }

    /// The remote configuration, when every required remote variable is
    /// present. `None` means the remote sink must be skipped (with a
    /// warning) rather than failing startup.
    pub fn remote_config(&self) -> Option<nexlog_remote::RemoteConfig> {
        let endpoint = self.remote_endpoint.as_deref()?;
        let key_id = self.remote_access_key_id.as_deref()?;
        let key_secret = self.remote_access_key_secret.as_deref()?;
        let project = self.remote_project.as_deref()?;
        let logstore = self.remote_logstore.as_deref()?;

        let mut config = nexlog_remote::RemoteConfig::new(
            endpoint,
            nexlog_remote::Credentials::new(key_id, key_secret),
            project,
            logstore,
        )
        .with_topic(
            self.remote_topic
                .clone()
                .unwrap_or_else(|| self.app_name.clone()),
        );
        if let Some(source) = &self.remote_source {
            config = config.with_source(source.clone());
        }
        Some(config)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => match value.to_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexlog_test_utils::EnvGuard;
    use std::sync::{Mutex, MutexGuard};

    // The process environment is shared; tests that touch it serialize here.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        match ENV_LOCK.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn test_defaults_without_environment() {
        let _lock = env_lock();
        let _guard = EnvGuard::unset(&[
            "NEXLOG_APP_NAME",
            "NEXLOG_LEVEL",
            "NEXLOG_CONSOLE_ENABLED",
            "NEXLOG_FILE_ENABLED",
            "NEXLOG_FILE_PATH",
            "NEXLOG_REMOTE_ENABLED",
        ]);
        let settings = Settings::from_env();
        assert_eq!(settings.app_name, "app");
        assert_eq!(settings.level, "INFO");
        assert!(settings.console_enabled);
        assert!(!settings.file_enabled);
        assert_eq!(settings.file_path, "logs/app.log");
        assert!(!settings.remote_enabled);
    }

    #[test]
    fn test_file_path_follows_app_name() {
        let _lock = env_lock();
        let _guard = EnvGuard::set(&[("NEXLOG_APP_NAME", "billing")]);
        let _unset = EnvGuard::unset(&["NEXLOG_FILE_PATH"]);
        let settings = Settings::from_env();
        assert_eq!(settings.file_path, "logs/billing.log");
    }

    #[test]
    fn test_bool_parsing_is_lenient() {
        let _lock = env_lock();
        let _guard = EnvGuard::set(&[
            ("NEXLOG_FILE_ENABLED", "TRUE"),
            ("NEXLOG_CONSOLE_ENABLED", "0"),
            ("NEXLOG_REMOTE_ENABLED", "not-a-bool"),
        ]);
        let settings = Settings::from_env();
        assert!(settings.file_enabled);
        assert!(!settings.console_enabled);
        assert!(!settings.remote_enabled);
    }

    #[test]
    fn test_remote_config_requires_all_coordinates() {
        let mut settings = Settings::defaults();
        settings.remote_enabled = true;
        settings.remote_endpoint = Some("https://ingest.example.com".to_string());
        settings.remote_access_key_id = Some("id".to_string());
        assert!(settings.remote_config().is_none());

        settings.remote_access_key_secret = Some("secret".to_string());
        settings.remote_project = Some("proj".to_string());
        settings.remote_logstore = Some("store".to_string());
        let config = settings.remote_config().expect("complete coordinates");
        assert_eq!(config.topic, "app");
    }
}
