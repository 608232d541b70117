//! Main application struct and event loop for the norn monitor.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::style::Style;
use ratatui::widgets::Block;
use tracing::debug;

use crate::controller::{DEFAULT_REFRESH_INTERVAL, SwarmListController};
use crate::keybindings::{Action, KeyBindings};
use crate::model::Swarm;
use crate::source::SwarmSource;
use crate::views::{MonitorView, ViewRenderer};
use crate::{AppState, NornTerminal, Theme, norn_default, restore_terminal, setup_terminal};

/// Main TUI application.
#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub controller: SwarmListController,
    pub keybindings: KeyBindings,
    pub theme: Theme,
    pub running: bool,
}

impl App {
    /// Creates an app that refreshes on the default interval.
    pub fn new(source: Arc<dyn SwarmSource>) -> Self {
        Self::with_interval(source, DEFAULT_REFRESH_INTERVAL)
    }

    pub fn with_interval(source: Arc<dyn SwarmSource>, interval: Duration) -> Self {
        Self {
            state: AppState::default(),
            controller: SwarmListController::with_interval(source, interval),
            keybindings: KeyBindings::default(),
            theme: norn_default(),
            running: true,
        }
    }

    /// The swarm under the cursor, if any are loaded.
    pub fn selected_swarm(&self) -> Option<&Swarm> {
        self.controller.swarms().get(self.state.selected)
    }

    /// Handles a key event.
    ///
    /// Ctrl-C always quits; everything else goes through the keybindings.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        if let Some(action) = self.keybindings.resolve(key) {
            self.execute_action(action);
        }
    }

    fn execute_action(&mut self, action: Action) {
        let count = self.controller.swarms().len();

        match action {
            Action::Quit => self.running = false,
            Action::NavigateDown => self.state.select_next(count),
            Action::NavigateUp => self.state.select_prev(count),
            Action::Toggle => {
                if let Some(swarm_id) = self.selected_swarm().map(|s| s.swarm_id.clone()) {
                    let expanded = self.state.cards.toggle(&swarm_id);
                    debug!(%swarm_id, expanded, "Swarm card toggled");
                }
            }
            Action::Refresh => {
                self.controller.refresh();
            }
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let background = Block::default()
            .style(Style::default().bg(self.theme.bg).fg(self.theme.fg));
        frame.render_widget(background, area);

        MonitorView.render(frame, area, self);
    }

    /// Applies finished fetches. Returns true if the list changed.
    pub fn tick(&mut self) -> bool {
        if !self.controller.poll_updates() {
            return false;
        }

        for swarm in self.controller.swarms() {
            self.state.cards.entry(&swarm.swarm_id);
        }
        self.state.clamp_selection(self.controller.swarms().len());
        true
    }

    /// Runs the TUI until the user quits.
    ///
    /// Polling starts when the screen opens and stops before the terminal is
    /// restored.
    pub async fn run(&mut self) -> io::Result<()> {
        let mut terminal = setup_terminal()?;
        self.controller.activate();

        let result = self.event_loop(&mut terminal).await;

        self.controller.deactivate();
        restore_terminal(&mut terminal)?;

        result
    }

    async fn event_loop(&mut self, terminal: &mut NornTerminal) -> io::Result<()> {
        while self.running {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key);
            }

            // Fetch tasks need a turn on a current-thread runtime.
            tokio::task::yield_now().await;
            self.tick();
        }

        Ok(())
    }
}
