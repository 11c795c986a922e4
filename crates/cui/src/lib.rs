mod actions;
mod app;
mod config;
mod input;
mod logging;
mod view;

use anyhow::{Context, Result};
use app::{App, DEFAULT_RUN_SEED};
use config::{default_config_path, load_config};
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use starmatch_core::RngState;
use std::io::{self, stdout, IsTerminal};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub seed: Option<u64>,
    pub random_seed: bool,
    pub config_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let log_path = options
        .log_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(logging::DEFAULT_LOG_FILE));
    logging::init(&log_path)?;

    let config = load_config(options.config_path.as_deref()).context("load config")?;
    let seeds = if options.random_seed {
        RngState::from_entropy()
    } else {
        RngState::from_seed(options.seed.unwrap_or(DEFAULT_RUN_SEED))
    };
    tracing::info!(seed = seeds.seed(), ?config, "starting star match");
    let mut app = App::bootstrap(config, seeds, Instant::now())?;

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;
    tracing::info!(games = app.game_id(), "exiting");
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

fn parse_options(args: &[String]) -> LaunchOptions {
    let mut options = LaunchOptions {
        config_path: default_config_path(),
        log_path: std::env::var_os("STARMATCH_LOG").map(PathBuf::from),
        ..LaunchOptions::default()
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--random-seed" => options.random_seed = true,
            "--config" | "-c" => {
                if let Some(value) = args.get(idx + 1) {
                    options.config_path = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--log" => {
                if let Some(value) = args.get(idx + 1) {
                    options.log_path = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Short poll keeps the countdown display within a frame of the real deadline.
    let poll_rate = Duration::from_millis(50);
    while !app.should_quit {
        terminal.draw(|frame| view::draw(frame, app))?;
        if event::poll(poll_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = input::map_key(key);
                    actions::dispatch(app, action, Instant::now());
                }
            }
        }
        app.on_tick(Instant::now());
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "starmatch requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_seed_config_and_log() {
        let options = parse_options(&args(&[
            "--seed", "42", "--config", "game.json", "--log", "out.log",
        ]));
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.config_path, Some(PathBuf::from("game.json")));
        assert_eq!(options.log_path, Some(PathBuf::from("out.log")));
        assert!(!options.random_seed);
    }

    #[test]
    fn ignores_unknown_flags_and_bad_seed() {
        let options = parse_options(&args(&["--bogus", "--seed", "abc", "--random-seed"]));
        assert_eq!(options.seed, None);
        assert!(options.random_seed);
    }
}
