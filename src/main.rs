//! duel-input - play one answer round of a two-player quiz in the terminal
//!
//! Usage:
//!   duel-input [--timeout <seconds>]
//!
//! Player 1 types and presses the commit key, then player 2 does the same
//! (twice to lock). Ctrl+C quits. Logs go to stderr; set RUST_LOG to tune.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, queue};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use duel_input::channel::QueuedChannel;
use duel_input::config::Config;
use duel_input::events::InputEvent;
use duel_input::keys::Key;
use duel_input::lifecycle::{self, Component};
use duel_input::paths;
use duel_input::player_input::{PlayerInput, RoundStatus};
use duel_input::render::{self, CRLF};
use duel_input::surface::MemorySurface;

type TerminalRound = PlayerInput<MemorySurface, QueuedChannel>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("duel_input=info".parse()?),
        )
        .init();

    let timeout = parse_timeout(std::env::args().skip(1))?;

    let config = Config::load(paths::config_path()).context("failed to load config")?;
    let mut input = PlayerInput::new(config, MemorySurface::player_input(), QueuedChannel::new());

    // Spectator relay: mirrors what a host display would receive
    let mut spectator = input.subscribe();
    tokio::spawn(async move {
        while let Some(event) = spectator.recv().await {
            match &event {
                InputEvent::Keypress(snapshot) => {
                    let payload = serde_json::to_string(snapshot).unwrap_or_default();
                    debug!(event = event.name(), %payload, "relay");
                }
                _ => info!(event = event.name(), "relay"),
            }
        }
    });

    lifecycle::mount(&mut input).context("failed to mount player input")?;
    input.visible()?;

    terminal::enable_raw_mode().context("failed to enter raw mode")?;
    let outcome = run_round(&mut input, timeout);
    terminal::disable_raw_mode()?;

    let status = outcome?;
    print!("{CRLF}{CRLF}");
    let raw = input.session().raw();
    println!(
        "round {:?}: player 1 = {:?}, player 2 = {:?}",
        status, raw.player1, raw.player2
    );

    input.tear_down();
    Ok(())
}

fn parse_timeout(mut args: impl Iterator<Item = String>) -> Result<Option<Duration>> {
    let mut timeout = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--timeout" | "-t" => {
                let secs = args.next().context("--timeout needs a value")?;
                let secs: u64 = secs
                    .parse()
                    .with_context(|| format!("invalid timeout: {}", secs))?;
                timeout = Some(Duration::from_secs(secs));
            }
            other => anyhow::bail!("unknown argument: {}", other),
        }
    }
    Ok(timeout)
}

fn run_round(input: &mut TerminalRound, timeout: Option<Duration>) -> Result<RoundStatus> {
    let started = Instant::now();
    draw(input)?;

    loop {
        if timeout.is_some_and(|t| started.elapsed() >= t) {
            input.finalize_timeout();
            draw(input)?;
            return Ok(RoundStatus::Open);
        }

        while let Some(message) = input.channel_mut().try_next() {
            if let Some(RoundStatus::Complete) = input.handle_channel_message(&message) {
                draw(input)?;
                return Ok(RoundStatus::Complete);
            }
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        let key = Key::from(key_event);
        if key == Key::Interrupt {
            return Ok(RoundStatus::Open);
        }

        let status = input.press_focused(key);
        draw(input)?;
        if status == Some(RoundStatus::Complete) {
            return Ok(RoundStatus::Complete);
        }
    }
}

fn draw(input: &TerminalRound) -> Result<()> {
    let Some(handles) = input.handles() else {
        return Ok(());
    };

    let mut out = std::io::stdout();
    queue!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::FromCursorDown),
        Print(render::panels(input.surface(), handles, input.config())),
        cursor::MoveUp(1),
    )?;
    out.flush()?;
    Ok(())
}
