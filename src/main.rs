mod cli;

use std::env;
use std::fs;
use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use awsp::layout::TableLayout;
use awsp::profiles::{self, SessionCache};
use awsp::search::FuzzySearcher;
use awsp::selector::{Outcome, Selector, SelectorOptions};
use awsp::shell_init::{self, ApplyOutcome, Shell};
use awsp::SelectorError;
use cli::{Cli, Command, ShellArg, parse_cli};

fn main() -> Result<()> {
    let cli = parse_cli();
    init_tracing();

    match cli.command {
        Some(Command::Init { shell, apply }) => run_init(shell, apply),
        None => run_selector(&cli),
    }
}

/// Log to stderr, filtered by `AWSP_LOG`; silent by default.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("AWSP_LOG").unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load profiles, run the selector and report the choice.
fn run_selector(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => path.clone(),
        None => profiles::default_config_path()?,
    };
    let cache_dir = match &cli.sso_cache {
        Some(dir) => dir.clone(),
        None => profiles::default_cache_dir()?,
    };

    let cache = SessionCache::new(cache_dir);
    let profiles = profiles::load_profiles(&config, &cache).context("failed to load AWS profiles")?;

    let layout = TableLayout::new(&profiles);
    let searcher = FuzzySearcher::new(profiles);
    let options = SelectorOptions::default()
        .with_page_size(cli.page_size)
        .with_current(cli.current.clone());

    let outcome = Selector::terminal(&searcher, &layout, options)
        .run()
        .context("profile selector failed")?;

    match outcome {
        Outcome::Selected(name) => deliver(cli, &name),
        Outcome::Cancelled => {
            eprintln!("Cancelled.");
            Ok(())
        }
    }
}

fn deliver(cli: &Cli, name: &str) -> Result<()> {
    if let Some(out) = &cli.out {
        fs::write(out, name).with_context(|| format!("failed to write {}", out.display()))?;
    } else if cli.pure {
        println!("{name}");
    } else {
        println!("export AWS_PROFILE={name}");
    }
    Ok(())
}

/// Print the shell helper, or append it to the rc file with `--apply`.
fn run_init(shell: Option<ShellArg>, apply: bool) -> Result<()> {
    let shell = match shell {
        Some(arg) => Shell::from(arg),
        None => Shell::detect(env::var("SHELL").ok().as_deref()),
    };

    if !apply {
        println!("# --- Add the following to your {shell} rc ---\n");
        print!("{}", shell.snippet());
        return Ok(());
    }

    let home = dirs::home_dir().ok_or(SelectorError::HomeDirUnavailable)?;
    let rc = shell.rc_path(&home);
    let outcome = shell_init::apply(shell, &rc)
        .with_context(|| format!("failed to write {}", rc.display()))?;

    match outcome {
        ApplyOutcome::Added => {
            println!("Added awsp helper to {}", rc.display());
            println!(
                "Restart your shell or run 'source {}' to use it.",
                rc.display()
            );
        }
        ApplyOutcome::AlreadyPresent => {
            println!("awsp helper already present in {}", rc.display());
        }
    }
    Ok(())
}
