//! Monitor view - the swarm list with header, explanation and key hints.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::traits::ViewRenderer;
use crate::App;
use crate::controller::ListState;
use crate::model::Swarm;
use crate::widgets::SwarmCard;

const SUBTITLE: &str = "Multi-agent pipelines · inter-agent alignment and collective drift";

const ALIGNMENT_HELP: &str = "Measures how closely each agent's task aligns with the first \
agent's intent in the swarm. 100% = all agents work toward the same goal · <50% = \
significant topic drift.";

const HOOK_SNIPPET: [&str; 5] = [
    "hook = NornHook(",
    "  swarm_id=\"my-pipeline\",",
    "  swarm_order=1,",
    "  agent_name=\"Researcher\"",
    ")",
];

/// The swarm monitor screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonitorView;

impl MonitorView {
    fn render_header(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(32)])
            .split(area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Swarm Monitor",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(SUBTITLE, theme.dim)),
        ]);
        frame.render_widget(title, chunks[0]);

        let mut status = Vec::new();
        if let Some(updated) = app.controller.last_updated() {
            status.push(Span::styled(
                format!("Updated {}", updated.format("%H:%M:%S")),
                theme.dim,
            ));
        }
        if app.controller.in_flight() {
            if !status.is_empty() {
                status.push(Span::raw("  "));
            }
            status.push(Span::styled("⟳ Refreshing", Style::default().fg(theme.accent)));
        }
        let status = Paragraph::new(Line::from(status)).alignment(Alignment::Right);
        frame.render_widget(status, chunks[1]);
    }

    fn render_explanation(&self, frame: &mut Frame, area: Rect, app: &App) {
        let block = Block::default()
            .title(Span::styled(" What is Alignment Score? ", app.theme.bold))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border));

        let help = Paragraph::new(Span::styled(ALIGNMENT_HELP, app.theme.dim))
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(help, area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect, app: &App) {
        match app.controller.state() {
            ListState::Loading => self.render_loading(frame, area, app),
            ListState::Error(message) => self.render_error(frame, area, app, message),
            ListState::Loaded(swarms) if swarms.is_empty() => self.render_empty(frame, area, app),
            ListState::Loaded(swarms) => self.render_cards(frame, area, app, swarms),
        }
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect, app: &App) {
        let loading = Paragraph::new(Span::styled("Loading swarms...", app.theme.dim))
            .alignment(Alignment::Center);
        frame.render_widget(loading, area);
    }

    fn render_error(&self, frame: &mut Frame, area: Rect, app: &App, message: &str) {
        let block = Block::default()
            .title(" Error ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.error));

        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(app.theme.error),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Press ", app.theme.dim),
                Span::styled("r", Style::default().fg(app.theme.accent)),
                Span::styled(" to retry", app.theme.dim),
            ]),
        ])
        .wrap(Wrap { trim: false })
        .block(block);
        frame.render_widget(body, area);
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let code = Style::default().fg(theme.accent);

        let mut lines = vec![
            Line::from(Span::styled("No swarms yet", theme.bold)),
            Line::default(),
            Line::from(vec![
                Span::styled("Group agents into a monitored pipeline by passing ", theme.dim),
                Span::styled("swarm_id", code),
                Span::styled(", ", theme.dim),
                Span::styled("swarm_order", code),
                Span::styled(" and ", theme.dim),
                Span::styled("agent_name", code),
                Span::styled(" to ", theme.dim),
                Span::styled("NornHook", code),
                Span::styled(":", theme.dim),
            ]),
            Line::default(),
        ];
        lines.extend(
            HOOK_SNIPPET
                .iter()
                .map(|line| Line::from(Span::styled(format!("  {}", line), code))),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(body, area);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, app: &App, swarms: &[Swarm]) {
        let mut lines = Vec::new();
        let mut heights = Vec::with_capacity(swarms.len());

        for (idx, swarm) in swarms.iter().enumerate() {
            let card = SwarmCard::new(
                swarm,
                app.state.cards.is_expanded(&swarm.swarm_id),
                idx == app.state.selected,
            );
            let card_lines = card.lines(&app.theme);
            heights.push(card_lines.len());
            lines.extend(card_lines);
            lines.push(Line::default());
        }

        let offset = scroll_offset(&heights, app.state.selected, area.height as usize);
        let list = Paragraph::new(lines).scroll((offset, 0));
        frame.render_widget(list, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, app: &App) {
        let key = Style::default().fg(app.theme.accent);
        let hints = Line::from(vec![
            Span::styled("[j/k]", key),
            Span::raw(" Select  "),
            Span::styled("[Enter]", key),
            Span::raw(" Expand  "),
            Span::styled("[r]", key),
            Span::raw(" Refresh  "),
            Span::styled("[q]", key),
            Span::raw(" Quit  "),
            Span::styled(
                format!("auto-refresh every {}s", app.controller.interval().as_secs()),
                app.theme.dim,
            ),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }
}

/// First visible row so the selected card fits in a viewport of `height`
/// rows. Cards are separated by one blank row.
fn scroll_offset(heights: &[usize], selected: usize, height: usize) -> u16 {
    let Some(&selected_height) = heights.get(selected) else {
        return 0;
    };
    let start: usize = heights[..selected].iter().map(|h| h + 1).sum();
    let end = start + selected_height;

    let offset = if end <= height {
        0
    } else {
        (end - height).min(start)
    };
    u16::try_from(offset).unwrap_or(u16::MAX)
}

impl ViewRenderer for MonitorView {
    fn render(&self, frame: &mut Frame, area: Rect, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title and subtitle
                Constraint::Length(4), // Alignment explanation
                Constraint::Min(3),    // Swarm list
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        self.render_header(frame, chunks[0], app);
        self.render_explanation(frame, chunks[1], app);
        self.render_content(frame, chunks[2], app);
        self.render_footer(frame, chunks[3], app);
    }

    fn title(&self) -> &str {
        "Swarm Monitor"
    }
}
