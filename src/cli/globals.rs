use crate::{
    auth::{AuthController, FileArea, HttpSubmitter, TokenStore},
    cli::commands::{ARG_API_BASE_URL, ARG_DATA_DIR, ARG_SESSION_DIR, ARG_TIMEOUT},
};
use anyhow::{anyhow, Context, Result};
use std::{env, path::PathBuf, time::Duration};
use url::Url;

const SESSION_DIR_NAME: &str = "joovi-session";
const DATA_DIR_NAME: &str = ".joovi";

/// Configuration shared by every action.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub api_base_url: String,
    pub timeout: Duration,
    pub session_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl GlobalArgs {
    /// Resolves the global options, filling in directory defaults.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or no data directory can be
    /// determined.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let api_base_url = matches
            .get_one::<String>(ARG_API_BASE_URL)
            .cloned()
            .context("missing required argument: --api-base-url")?;

        let url = Url::parse(api_base_url.trim()).context("invalid JOOVI_API_BASE_URL")?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!(
                "invalid JOOVI_API_BASE_URL: unsupported scheme {}",
                url.scheme()
            ));
        }

        let timeout =
            Duration::from_secs(matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(10));

        let session_dir = matches
            .get_one::<PathBuf>(ARG_SESSION_DIR)
            .cloned()
            .unwrap_or_else(|| env::temp_dir().join(SESSION_DIR_NAME));

        let data_dir = match matches.get_one::<PathBuf>(ARG_DATA_DIR) {
            Some(dir) => dir.clone(),
            None => env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(DATA_DIR_NAME))
                .context("HOME is not set, use --data-dir or JOOVI_DATA_DIR")?,
        };

        Ok(Self {
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
            timeout,
            session_dir,
            data_dir,
        })
    }

    /// Session tokens live under `session_dir`, persistent ones under `data_dir`.
    #[must_use]
    pub fn token_store(&self) -> TokenStore {
        TokenStore::new(
            FileArea::new(&self.session_dir),
            FileArea::new(&self.data_dir),
        )
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn submitter(&self) -> Result<HttpSubmitter> {
        HttpSubmitter::new(&self.api_base_url, self.timeout)
            .with_context(|| format!("failed to build client for {}", self.api_base_url))
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn controller(&self) -> Result<AuthController<HttpSubmitter>> {
        Ok(AuthController::new(self.submitter()?, self.token_store()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::{StorageScope, TokenPair};
    use crate::cli::commands;

    fn parse(args: &[&str]) -> Result<GlobalArgs> {
        let matches = commands::new().get_matches_from(args.iter().copied());
        GlobalArgs::parse(&matches)
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("JOOVI_API_BASE_URL", None),
                ("JOOVI_SESSION_DIR", None),
                ("JOOVI_DATA_DIR", None),
                ("JOOVI_TIMEOUT_SECONDS", None),
                ("HOME", Some("/home/joovi")),
            ],
            || {
                let globals = parse(&["joovi", "status"]).unwrap();
                assert_eq!(globals.api_base_url, "http://localhost:8000");
                assert_eq!(globals.timeout, Duration::from_secs(10));
                assert_eq!(globals.session_dir, env::temp_dir().join("joovi-session"));
                assert_eq!(globals.data_dir, PathBuf::from("/home/joovi/.joovi"));
            },
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        temp_env::with_vars(
            [("JOOVI_API_BASE_URL", Some("https://api.joovi.dev/"))],
            || {
                let globals = parse(&["joovi", "--data-dir", "/tmp/d", "status"]).unwrap();
                assert_eq!(globals.api_base_url, "https://api.joovi.dev");
            },
        );
    }

    #[test]
    fn test_invalid_base_url() {
        temp_env::with_vars([("JOOVI_API_BASE_URL", Some("not a url"))], || {
            let err = parse(&["joovi", "--data-dir", "/tmp/d", "status"]).unwrap_err();
            assert!(err.to_string().contains("invalid JOOVI_API_BASE_URL"));
        });
    }

    #[test]
    fn test_unsupported_scheme() {
        temp_env::with_vars([("JOOVI_API_BASE_URL", Some("ftp://joovi.dev"))], || {
            let err = parse(&["joovi", "--data-dir", "/tmp/d", "status"]).unwrap_err();
            assert!(err.to_string().contains("unsupported scheme ftp"));
        });
    }

    #[test]
    fn test_missing_home_requires_data_dir() {
        temp_env::with_vars(
            [("JOOVI_DATA_DIR", None::<&str>), ("HOME", None::<&str>)],
            || {
                let err = parse(&["joovi", "status"]).unwrap_err();
                assert!(err.to_string().contains("HOME is not set"));
            },
        );
    }

    #[test]
    fn test_token_store_uses_both_dirs() {
        let session = tempfile::tempdir().unwrap();
        let data = tempfile::tempdir().unwrap();
        let globals = GlobalArgs {
            api_base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(1),
            session_dir: session.path().to_path_buf(),
            data_dir: data.path().to_path_buf(),
        };

        let mut store = globals.token_store();
        store
            .save(&TokenPair::new("a", "r"), StorageScope::Persistent)
            .unwrap();

        assert!(data.path().join("joovi_auth_tokens.json").exists());
        assert!(!session.path().join("joovi_auth_tokens.json").exists());
        assert!(globals.controller().is_ok());
    }
}
