//! Error type shared by the selector, its terminal plumbing and the
//! profile source.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the library.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// stdin is not a TTY, so raw mode cannot be entered and no keys will arrive.
    #[error("stdin is not a terminal; the selector needs an interactive TTY")]
    NotATerminal,

    /// stdin reached end of input while the selector was still running.
    #[error("terminal input closed before a selection was made")]
    InputClosed,

    /// The AWS config file does not exist.
    #[error("config not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The config file parsed but declared no profiles.
    #[error("no profiles found in {}", .0.display())]
    NoProfiles(PathBuf),

    /// The home directory could not be resolved for default paths.
    #[error("could not determine the home directory")]
    HomeDirUnavailable,

    /// Reading from or writing to the terminal failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SelectorError>;
