//! Profile records.
//!
//! A [`Profile`] is one selectable row: the profile name plus the account
//! and region columns and a derived SSO session status. The full list is
//! built once at startup by [`load_profiles`] and never mutated afterwards.

pub mod config;
pub mod session;

use std::path::Path;

pub use config::{ProfileAttributes, ProfileMap, default_config_path, parse_config, read_config};
pub use session::{SessionCache, default_cache_dir};

use crate::error::{Result, SelectorError};

/// Shown when a profile has no `sso_account_id`.
pub const MISSING_ACCOUNT_ID: &str = "N/A";
/// Shown when a profile has no `region`.
pub const MISSING_REGION: &str = "-";

// =============================================================================
// TYPES
// =============================================================================

/// State of the SSO login behind a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Not an SSO profile.
    #[default]
    None,
    /// Cached token is still valid.
    Active,
    /// SSO profile without a valid cached token.
    Expired,
}

impl SessionStatus {
    /// Text for the session column.
    pub fn label(self) -> &'static str {
        match self {
            SessionStatus::None => "-",
            SessionStatus::Active => "active",
            SessionStatus::Expired => "expired",
        }
    }
}

/// One selectable record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub account_id: String,
    pub region: String,
    pub session: SessionStatus,
}

impl Profile {
    pub fn new(name: impl Into<String>, account_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account_id: account_id.into(),
            region: MISSING_REGION.to_string(),
            session: SessionStatus::None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_session(mut self, session: SessionStatus) -> Self {
        self.session = session;
        self
    }

    /// Build a record from a parsed config section.
    pub fn from_attributes(name: &str, attrs: &ProfileAttributes, cache: &SessionCache) -> Self {
        let account_id = attrs
            .get("sso_account_id")
            .map(String::as_str)
            .unwrap_or(MISSING_ACCOUNT_ID);
        let region = attrs
            .get("region")
            .map(String::as_str)
            .unwrap_or(MISSING_REGION);

        Self::new(name, account_id)
            .with_region(region)
            .with_session(cache.status(attrs))
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Read the config at `config_path` and build the sorted record list.
///
/// Fails with [`SelectorError::NoProfiles`] when the file declares none.
pub fn load_profiles(config_path: &Path, cache: &SessionCache) -> Result<Vec<Profile>> {
    let map = read_config(config_path)?;
    if map.is_empty() {
        return Err(SelectorError::NoProfiles(config_path.to_path_buf()));
    }

    // ProfileMap is ordered by name, so records come out sorted and unique
    let profiles: Vec<Profile> = map
        .iter()
        .map(|(name, attrs)| Profile::from_attributes(name, attrs, cache))
        .collect();

    tracing::debug!(
        "loaded {} profiles from {}",
        profiles.len(),
        config_path.display()
    );
    Ok(profiles)
}
