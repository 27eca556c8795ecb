//! Interactive dashboard: dataset sidebar plus a table/chart main panel.

mod app;
mod ui;

use crate::context::AppContext;
use anyhow::Result;
use app::DashboardApp;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use datadeck_application::DashboardUseCase;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::time::Duration;

pub async fn run(ctx: AppContext) -> Result<()> {
    if !ctx.session.is_authenticated().await {
        anyhow::bail!("not logged in; run `datadeck login` first");
    }

    let mut dashboard = DashboardUseCase::new(ctx.gateway.clone(), ctx.config.page_size);
    dashboard.refresh_directory();
    let mut app = DashboardApp::new(dashboard);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app).await;

    // Restore the terminal even when the loop errored.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut DashboardApp,
) -> Result<()> {
    while !app.should_quit() {
        app.pump();
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }
    }
    Ok(())
}
