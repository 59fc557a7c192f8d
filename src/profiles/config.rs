//! AWS shared config parsing.
//!
//! Only profile sections matter: `[profile NAME]` and the bare `[default]`.
//! Everything else (`[sso-session ..]`, `[services ..]`) is skipped along
//! with its keys.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, SelectorError};

/// Key/value pairs of one profile section.
pub type ProfileAttributes = BTreeMap<String, String>;
/// Profile name to attributes, ordered by name.
pub type ProfileMap = BTreeMap<String, ProfileAttributes>;

/// `~/.aws/config`.
pub fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".aws").join("config"))
        .ok_or(SelectorError::HomeDirUnavailable)
}

/// Read and parse the config file at `path`.
pub fn read_config(path: &Path) -> Result<ProfileMap> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(SelectorError::ConfigNotFound(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };
    Ok(parse_config(&content))
}

/// Parse config text into profile sections.
///
/// A section repeated later in the file is merged into the first one;
/// keys seen later win.
pub fn parse_config(content: &str) -> ProfileMap {
    let mut map = ProfileMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = section_header(line) {
            current = profile_name(header).map(str::to_string);
            if let Some(name) = &current {
                map.entry(name.clone()).or_default();
            }
            continue;
        }

        let Some(name) = &current else { continue };
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            if let Some(attrs) = map.get_mut(name) {
                attrs.insert(key.to_string(), value.trim().to_string());
            }
        }
    }

    map
}

/// Contents between `[` and `]`, if `line` is a section header.
fn section_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('[')?;
    let end = rest.find(']')?;
    Some(rest[..end].trim())
}

/// Profile name declared by a section header, if it is a profile section.
fn profile_name(header: &str) -> Option<&str> {
    if header == "default" {
        return Some("default");
    }
    let rest = header.strip_prefix("profile")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let name = rest.trim();
    (!name.is_empty()).then_some(name)
}
