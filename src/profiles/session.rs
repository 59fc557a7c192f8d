//! SSO session status from the token cache.
//!
//! The AWS CLI stores one JSON file per SSO login under
//! `~/.aws/sso/cache/`, named by the SHA-1 of the session name (or of the
//! start URL for legacy profiles). A session counts as active while its
//! `expiresAt` lies in the future. Anything unreadable counts as expired.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use super::SessionStatus;
use super::config::ProfileAttributes;
use crate::error::{Result, SelectorError};

/// `~/.aws/sso/cache`.
pub fn default_cache_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".aws").join("sso").join("cache"))
        .ok_or(SelectorError::HomeDirUnavailable)
}

/// Cache file name stem for a session name or start URL.
pub fn cache_key(session: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(session.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    expires_at: Option<String>,
}

/// Read-only view of the SSO token cache at a fixed point in time.
#[derive(Debug, Clone)]
pub struct SessionCache {
    dir: PathBuf,
    now: DateTime<Utc>,
}

impl SessionCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_clock(dir, Utc::now())
    }

    /// Evaluate expiry against `now` instead of the wall clock.
    pub fn with_clock(dir: impl Into<PathBuf>, now: DateTime<Utc>) -> Self {
        Self {
            dir: dir.into(),
            now,
        }
    }

    /// Session status of a profile section.
    pub fn status(&self, attrs: &ProfileAttributes) -> SessionStatus {
        let key = attrs
            .get("sso_session")
            .or_else(|| attrs.get("sso_start_url"));
        match key {
            None => SessionStatus::None,
            Some(key) if self.is_active(key) => SessionStatus::Active,
            Some(_) => SessionStatus::Expired,
        }
    }

    /// Whether the cached token for `session` is still valid.
    pub fn is_active(&self, session: &str) -> bool {
        let path = self.dir.join(format!("{}.json", cache_key(session)));
        match self.expiry(&path) {
            Some(expires_at) => expires_at > self.now,
            None => false,
        }
    }

    fn expiry(&self, path: &Path) -> Option<DateTime<Utc>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!("no session cache at {}: {err}", path.display());
                return None;
            }
        };
        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("unreadable session cache {}: {err}", path.display());
                return None;
            }
        };
        let raw = entry.expires_at?;
        let parsed = parse_expiry(&raw);
        if parsed.is_none() {
            tracing::debug!("unparseable expiresAt {raw:?} in {}", path.display());
        }
        parsed
    }
}

/// Parse an `expiresAt` value.
///
/// Accepts RFC 3339 and the older `2024-01-01T00:00:00UTC` form.
fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = raw.strip_suffix("UTC")?;
    NaiveDateTime::parse_from_str(naive.trim_end(), "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc())
}
