//! Shell integration snippets.
//!
//! A child process cannot change its parent shell's environment, so the
//! `awsp` binary only reports the chosen profile. The snippets below wrap it
//! in a shell function that reads the result from a temp file and exports
//! `AWS_PROFILE`, and bind it to Ctrl+T.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// First line of every installed snippet.
pub const START_MARKER: &str = "# >>> awsp start >>>";
/// Last line of every installed snippet.
pub const END_MARKER: &str = "# <<< awsp end <<<";

const BASH: &str = r#"awsp() {
  local tmp prof
  tmp=$(mktemp)
  command awsp "$@" --out "$tmp" || { rm -f "$tmp"; return; }
  prof=$(<"$tmp")
  rm -f "$tmp"
  [ -z "$prof" ] && return
  export AWS_PROFILE="$prof"
  echo "AWS_PROFILE=$AWS_PROFILE"
}
bind -x '"\C-t":awsp'
"#;

const ZSH: &str = r#"awsp() {
  local tmp prof
  tmp=$(mktemp)
  command awsp "$@" --out "$tmp" || { rm -f "$tmp"; return; }
  prof=$(<"$tmp"); rm -f "$tmp"
  [ -z "$prof" ] && return
  export AWS_PROFILE="$prof"
  echo "AWS_PROFILE=$AWS_PROFILE"
}
bindkey -s '^T' 'awsp\n'
"#;

const FISH: &str = r#"function awsp
    set -l tmp (mktemp)
    command awsp $argv --out $tmp
    or begin; rm -f $tmp; return; end
    set -l prof (cat $tmp)
    rm -f $tmp
    test -z "$prof"; and return
    set -gx AWS_PROFILE $prof
    echo (set_color green)"AWS_PROFILE=$AWS_PROFILE"(set_color normal)
end
function bind_awsp
    awsp
    commandline -f repaint
end
bind \ct bind_awsp
"#;

const POWERSHELL: &str = r#"function awsp {
  $file = New-TemporaryFile
  $bin = (Get-Command awsp -CommandType Application | Select-Object -First 1).Source
  & $bin @Args --out $file.FullName
  if ($LASTEXITCODE -ne 0) { Remove-Item $file; return }
  $prof = Get-Content $file -Raw; Remove-Item $file
  if ($prof) { $env:AWS_PROFILE = $prof.Trim(); Write-Host "AWS_PROFILE=$($env:AWS_PROFILE)" }
}
function Invoke-Awsp { awsp }
Set-PSReadLineKeyHandler -Key Ctrl+t -ScriptBlock ${function:Invoke-Awsp}
"#;

/// Shells with a helper snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl Shell {
    /// Guess the shell from `$SHELL`.
    ///
    /// Windows always gets PowerShell; anything unrecognised falls back to
    /// bash.
    pub fn detect(shell_env: Option<&str>) -> Self {
        if cfg!(windows) {
            return Shell::PowerShell;
        }
        match shell_env.unwrap_or_default() {
            s if s.ends_with("zsh") => Shell::Zsh,
            s if s.ends_with("fish") => Shell::Fish,
            _ => Shell::Bash,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
            Shell::PowerShell => "powershell",
        }
    }

    /// The helper, wrapped in start and end markers.
    pub fn snippet(self) -> String {
        let body = match self {
            Shell::Bash => BASH,
            Shell::Zsh => ZSH,
            Shell::Fish => FISH,
            Shell::PowerShell => POWERSHELL,
        };
        format!("{START_MARKER}\n{body}{END_MARKER}\n")
    }

    /// The rc file the snippet belongs in.
    pub fn rc_path(self, home: &Path) -> PathBuf {
        match self {
            Shell::Bash => home.join(".bashrc"),
            Shell::Zsh => home.join(".zshrc"),
            Shell::Fish => home.join(".config").join("fish").join("config.fish"),
            Shell::PowerShell => home
                .join("Documents")
                .join("PowerShell")
                .join("Microsoft.PowerShell_profile.ps1"),
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Added,
    AlreadyPresent,
}

/// Append the snippet for `shell` to `rc_path`.
///
/// Missing parent directories and the file itself are created. Nothing is
/// written when the start marker is already in the file.
pub fn apply(shell: Shell, rc_path: &Path) -> io::Result<ApplyOutcome> {
    let existing = match fs::read_to_string(rc_path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(err) => return Err(err),
    };
    if existing.contains(START_MARKER) {
        tracing::debug!("snippet already in {}", rc_path.display());
        return Ok(ApplyOutcome::AlreadyPresent);
    }

    if let Some(parent) = rc_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(rc_path)?;
    write!(file, "\n{}", shell.snippet())?;
    tracing::debug!("appended {shell} snippet to {}", rc_path.display());
    Ok(ApplyOutcome::Added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(windows))]
    fn test_detect_from_shell_env() {
        assert_eq!(Shell::detect(Some("/bin/zsh")), Shell::Zsh);
        assert_eq!(Shell::detect(Some("/usr/local/bin/fish")), Shell::Fish);
        assert_eq!(Shell::detect(Some("/bin/bash")), Shell::Bash);
        assert_eq!(Shell::detect(Some("/bin/tcsh")), Shell::Bash);
        assert_eq!(Shell::detect(None), Shell::Bash);
    }

    #[test]
    fn test_snippets_wrapped_in_markers() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell] {
            let snippet = shell.snippet();
            assert!(snippet.starts_with(START_MARKER), "{shell}");
            assert!(snippet.ends_with(&format!("{END_MARKER}\n")), "{shell}");
            assert!(snippet.contains("--out"), "{shell}");
        }
    }

    #[test]
    fn test_posix_snippets_call_the_binary_not_the_function() {
        assert!(Shell::Bash.snippet().contains("command awsp \"$@\""));
        assert!(Shell::Zsh.snippet().contains("command awsp \"$@\""));
        assert!(Shell::Fish.snippet().contains("command awsp $argv"));
    }

    #[test]
    fn test_rc_paths() {
        let home = Path::new("/home/me");
        assert_eq!(Shell::Bash.rc_path(home), home.join(".bashrc"));
        assert_eq!(Shell::Zsh.rc_path(home), home.join(".zshrc"));
        assert!(Shell::Fish.rc_path(home).ends_with("fish/config.fish"));
    }

    #[test]
    fn test_apply_creates_file_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let rc = dir.path().join(".config").join("fish").join("config.fish");

        assert_eq!(apply(Shell::Fish, &rc).unwrap(), ApplyOutcome::Added);
        let first = fs::read_to_string(&rc).unwrap();
        assert!(first.contains(START_MARKER));
        assert!(first.contains("function awsp"));

        assert_eq!(apply(Shell::Fish, &rc).unwrap(), ApplyOutcome::AlreadyPresent);
        assert_eq!(fs::read_to_string(&rc).unwrap(), first);
    }

    #[test]
    fn test_apply_appends_after_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let rc = dir.path().join(".bashrc");
        fs::write(&rc, "alias ll='ls -l'\n").unwrap();

        apply(Shell::Bash, &rc).unwrap();
        let content = fs::read_to_string(&rc).unwrap();
        assert!(content.starts_with("alias ll='ls -l'\n\n# >>> awsp start >>>"));
    }
}
