use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use awsp::selector::DEFAULT_PAGE_SIZE;
use awsp::shell_init::Shell;

/// Command-line arguments accepted by the `awsp` binary.
#[derive(Parser, Debug)]
#[command(
    name = "awsp",
    version,
    about = "Pick an AWS profile with an inline fuzzy selector"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        value_name = "FILE",
        env = "AWS_CONFIG_FILE",
        help = "AWS config file to read profiles from (default: ~/.aws/config)"
    )]
    pub(crate) config: Option<PathBuf>,
    #[arg(
        long = "sso-cache",
        value_name = "DIR",
        help = "SSO token cache directory (default: ~/.aws/sso/cache)"
    )]
    pub(crate) sso_cache: Option<PathBuf>,
    #[arg(
        long,
        value_name = "NAME",
        env = "AWS_PROFILE",
        help = "Profile to mark as currently active"
    )]
    pub(crate) current: Option<String>,
    #[arg(
        long,
        value_name = "N",
        env = "AWSP_PAGE_SIZE",
        default_value_t = DEFAULT_PAGE_SIZE,
        help = "Lines for the table header and rows, at least 4"
    )]
    pub(crate) page_size: usize,
    #[arg(long, help = "Print only the profile name")]
    pub(crate) pure: bool,
    #[arg(
        long,
        value_name = "FILE",
        help = "Write the chosen profile name to FILE instead of stdout"
    )]
    pub(crate) out: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Print or install the shell helper that exports AWS_PROFILE
    Init {
        #[arg(short, long, value_enum, help = "Target shell (default: from $SHELL)")]
        shell: Option<ShellArg>,
        #[arg(short, long, help = "Append the helper to the shell's rc file")]
        apply: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ShellArg {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

impl From<ShellArg> for Shell {
    fn from(value: ShellArg) -> Self {
        match value {
            ShellArg::Bash => Shell::Bash,
            ShellArg::Zsh => Shell::Zsh,
            ShellArg::Fish => Shell::Fish,
            ShellArg::PowerShell => Shell::PowerShell,
        }
    }
}

pub(crate) fn parse_cli() -> Cli {
    Cli::parse()
}
