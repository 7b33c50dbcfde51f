pub mod events;
pub mod state;
pub mod ui;
pub mod worker;

use anyhow::{Result, anyhow};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

use crate::terminal::state::App;

pub fn run_tui(app: App) -> Result<()> {
    color_eyre::install().map_err(|e| anyhow!("{e}"))?;

    let terminal = ratatui::init();
    let result = run(terminal, app);

    ratatui::restore();

    result
}

fn run(mut terminal: DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        app.pump()?;
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|f| ui::render(f, &app, now))?;

        // short poll so replies and expiring notifications show up unprompted
        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && events::handle_key(key, &mut app)?
        {
            break;
        }
    }
    Ok(())
}
