#![allow(dead_code)]

use anyhow::{Context, Result};
use joovi::auth::{AuthController, FileArea, HttpSubmitter, TokenStore};
use serde_json::{json, Value};
use std::{
    fs,
    net::TcpListener,
    path::{Path, PathBuf},
    time::Duration,
};
use tempfile::TempDir;
use wiremock::{MockServer, Request};

pub const ACCESS_TOKEN: &str = "test-access-token";
pub const REFRESH_TOKEN: &str = "test-refresh-token";
pub const TOKEN_FILE: &str = "joovi_auth_tokens.json";

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

pub fn token_body() -> Value {
    json!({ "access_token": ACCESS_TOKEN, "refresh_token": REFRESH_TOKEN })
}

/// Session and persistent areas backed by throwaway directories.
pub struct Areas {
    pub session: TempDir,
    pub data: TempDir,
}

impl Areas {
    pub fn new() -> Result<Self> {
        Ok(Self {
            session: tempfile::tempdir().context("session dir")?,
            data: tempfile::tempdir().context("data dir")?,
        })
    }

    pub fn store(&self) -> TokenStore {
        TokenStore::new(
            FileArea::new(self.session.path()),
            FileArea::new(self.data.path()),
        )
    }

    pub fn session_file(&self) -> PathBuf {
        self.session.path().join(TOKEN_FILE)
    }

    pub fn persistent_file(&self) -> PathBuf {
        self.data.path().join(TOKEN_FILE)
    }

    /// Parsed JSON stored in the session area, if any.
    pub fn session_value(&self) -> Result<Option<Value>> {
        read_json(&self.session_file())
    }

    pub fn persistent_value(&self) -> Result<Option<Value>> {
        read_json(&self.persistent_file())
    }
}

fn read_json(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(Some(serde_json::from_str(&raw)?))
}

pub fn controller(
    base_url: &str,
    timeout: Duration,
    areas: &Areas,
) -> Result<AuthController<HttpSubmitter>> {
    let submitter = HttpSubmitter::new(base_url, timeout)?;
    Ok(AuthController::new(submitter, areas.store()))
}

/// Requests received so far, empty when recording is off.
pub async fn requests(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

/// A base URL nothing listens on.
pub fn closed_port_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{port}"))
}
