mod app;
mod renderer;

use std::io::stdout;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dimli_core::hero::ICON_FADE;
use dimli_core::views::nav::render_nav;
use dimli_core::{Clock, HeroConfig, HeroView, ManualClock, ProfileMenu, StaticMetrics, SystemClock};
use dimli_protocol::Viewport;
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::renderer::CELL_H;

/// Upper bound on how long the loop sleeps; particles keep moving.
const FRAME: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "dimli")]
#[command(version, about = "3DIMLI landing hero in the terminal")]
struct Cli {
    /// Hero config (TOML). Built-in content is used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a settled SVG snapshot of the page to this path and exit
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,

    /// Append logs to this file (the terminal is busy drawing)
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref(), cli.svg.is_some())?;

    let config = match &cli.config {
        Some(path) => HeroConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => HeroConfig::default(),
    };

    if let Some(path) = &cli.svg {
        return snapshot(config, path);
    }
    run(config)
}

fn init_logging(path: Option<&Path>, headless: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );
    match path {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        // Stderr only when nothing is drawing over it.
        None if headless => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        None => {}
    }
    Ok(())
}

/// Play the intro to completion on a manual clock, then render once.
fn snapshot(config: HeroConfig, path: &Path) -> Result<()> {
    let viewport = Viewport::new(1280.0, 800.0);
    let clock = ManualClock::new();
    let mut hero = HeroView::new(config);
    hero.mount(clock.now(), &StaticMetrics::new(0.0, 0.0, viewport.height));

    while let Some(due) = hero.next_deadline() {
        clock.set(due);
        hero.advance(clock.now());
    }
    let settled = hero
        .icons()
        .iter()
        .map(|icon| icon.display_delay() + ICON_FADE)
        .max()
        .unwrap_or_default();
    if clock.now() < settled {
        clock.set(settled);
    }

    let mut commands = hero.render(&viewport, clock.now());
    commands.extend(render_nav(&hero.config().nav, &ProfileMenu::new(), &viewport));
    let svg = dimli_core::svg::render_svg(&commands, viewport.width, viewport.height, true);
    std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), at = ?clock.now(), "wrote snapshot");
    Ok(())
}

fn run(config: HeroConfig) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, config: HeroConfig) -> Result<()> {
    let clock = SystemClock::new();
    let mut app = App::new(config);
    let section_height = |rows: u16| f64::from(rows.saturating_sub(2)) * CELL_H;

    app.mount(clock.now(), section_height(terminal.size()?.height));

    loop {
        let now = clock.now();
        app.advance(now);
        app.resize(section_height(terminal.size()?.height));
        terminal.draw(|frame| app.draw(frame, now))?;

        let timeout = app
            .hero()
            .next_deadline()
            .map_or(FRAME, |due| due.saturating_sub(clock.now()).min(FRAME));
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Esc => app.escape(),
                KeyCode::Up => app.scroll(-1.0),
                KeyCode::Down => app.scroll(1.0),
                KeyCode::Tab => app.cycle_hover(clock.now()),
                KeyCode::Char('p') => app.toggle_menu(),
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => app.scroll(1.0),
                MouseEventKind::ScrollUp => app.scroll(-1.0),
                MouseEventKind::Moved => app.pointer_moved(mouse.column, mouse.row, clock.now()),
                MouseEventKind::Down(MouseButton::Left) => app.pointer_down(mouse.column, mouse.row),
                _ => {}
            },
            _ => {}
        }
    }

    app.unmount();
    Ok(())
}
