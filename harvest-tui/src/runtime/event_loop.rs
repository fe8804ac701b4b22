use crate::api::Services;
use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::future::Future;
use std::io;
use std::time::{Duration, Instant};

use super::action_queue::{channel, Action};
use super::actions::{apply, perform};
use super::views::handle_view_key;

const SPINNER_TICK: Duration = Duration::from_millis(100);

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    services: &Services,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();

    // The first configured source is loaded on start.
    let _ = action_tx.send(Action::LoadDataset);

    loop {
        app.toasts.prune(Instant::now());
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_view_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            app.is_loading = true;
            let pending = perform(action, app.workbench.clone(), services);
            let completed = spin_until_done(terminal, app, pending).await?;
            apply(app, completed);
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}

/// Keep the throbber turning until `pending` resolves.
async fn spin_until_done<F: Future>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    pending: F,
) -> Result<F::Output> {
    tokio::pin!(pending);
    let mut tick = tokio::time::interval(SPINNER_TICK);
    loop {
        tokio::select! {
            output = &mut pending => return Ok(output),
            _ = tick.tick() => {
                app.throbber_state.calc_next();
                app.toasts.prune(Instant::now());
                terminal.draw(|f| ui::render(f, app))?;
            }
        }
    }
}
