//! Swarm card widget.
//!
//! A collapsed card is a two-line summary: id, quality badge, agent count,
//! drift band and alignment gauge. Expanding it appends the agent pipeline in
//! supplied order.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::Theme;
use crate::grading::{drift, quality};
use crate::model::{Quality, Swarm, SwarmAgent, format_score, format_timestamp, round_score};
use crate::pipeline::{PipelineRow, pipeline_rows};

/// Security scores below this are highlighted.
pub const SECURITY_WARNING_THRESHOLD: f64 = 70.0;

/// Width of the alignment gauge in cells.
pub const GAUGE_WIDTH: usize = 10;

/// Longest task preview shown before truncating.
pub const TASK_PREVIEW_CHARS: usize = 120;

/// Indent under the card header.
const INDENT: &str = "   ";

/// Renders a quality grade as a colored badge.
pub fn quality_badge<'a>(grade: &'a Quality, theme: &Theme) -> Span<'a> {
    let color = quality::categorize(grade).color(theme);
    let label = if grade.as_str().is_empty() {
        "UNKNOWN"
    } else {
        grade.as_str()
    };
    Span::styled(
        format!(" {} ", label),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

/// Widget for one swarm in the monitor list.
#[derive(Debug, Clone, Copy)]
pub struct SwarmCard<'a> {
    pub swarm: &'a Swarm,
    pub expanded: bool,
    pub selected: bool,
}

impl<'a> SwarmCard<'a> {
    pub fn new(swarm: &'a Swarm, expanded: bool, selected: bool) -> Self {
        Self {
            swarm,
            expanded,
            selected,
        }
    }

    /// Builds all lines of the card.
    ///
    /// Layout:
    /// ```text
    /// ▾ hashtrade-20250301  GOOD
    ///   2 agents · Aligned (82%) · 2025-03-01 10:15:00   ████████░░ 82%
    ///   AGENT PIPELINE
    ///   (1) Controller  EXCELLENT
    ///    │  Get system status
    ///    │  7 steps  Eff 91%
    ///    ↓
    ///   (2) Thinker  GOOD  ● Running
    ///       3 steps  ! Sec 64.5%
    /// ```
    pub fn lines(&self, theme: &Theme) -> Vec<Line<'a>> {
        let mut lines = self.header_lines(theme);

        if self.selected {
            lines = lines
                .into_iter()
                .map(|line| line.style(Style::default().bg(theme.selection)))
                .collect();
        }

        if self.expanded {
            lines.extend(self.pipeline_lines(theme));
        }

        lines
    }

    /// Number of terminal rows the card occupies.
    pub fn height(&self, theme: &Theme) -> usize {
        self.lines(theme).len()
    }

    fn header_lines(&self, theme: &Theme) -> Vec<Line<'a>> {
        let swarm = self.swarm;
        let reading = drift::classify(swarm.drift_score);
        let drift_color = reading.band.color(theme);
        let chevron = if self.expanded { "▾ " } else { "▸ " };

        let title = Line::from(vec![
            Span::styled(chevron, Style::default().fg(theme.muted)),
            Span::styled(swarm.swarm_id.as_str(), theme.bold),
            Span::raw("  "),
            quality_badge(&swarm.overall_quality, theme),
        ]);

        let agents = if swarm.agent_count == 1 {
            "1 agent".to_string()
        } else {
            format!("{} agents", swarm.agent_count)
        };

        let mut summary = vec![
            Span::raw(INDENT),
            Span::styled(agents, Style::default().fg(theme.muted)),
            Span::styled(" · ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("{} ({}%)", reading.band.label(), reading.percent),
                Style::default().fg(drift_color),
            ),
        ];

        if let Some(started_at) = &swarm.started_at {
            summary.push(Span::styled(" · ", Style::default().fg(theme.muted)));
            summary.push(Span::styled(
                format_timestamp(started_at),
                Style::default().fg(theme.muted),
            ));
        }

        summary.push(Span::raw("   "));
        summary.push(Span::styled(
            reading.gauge(GAUGE_WIDTH),
            Style::default().fg(drift_color),
        ));
        summary.push(Span::styled(
            format!(" {}%", reading.percent),
            Style::default().fg(drift_color),
        ));

        vec![title, Line::from(summary)]
    }

    fn pipeline_lines(&self, theme: &Theme) -> Vec<Line<'a>> {
        let swarm = self.swarm;
        let rows = pipeline_rows(&swarm.agents);

        let mut lines = vec![Line::from(vec![
            Span::raw(INDENT),
            Span::styled(
                "AGENT PIPELINE",
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];

        if rows.is_empty() {
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled("No agents reported", theme.dim),
            ]));
        }

        for row in rows {
            lines.extend(agent_lines(row, theme));
        }

        lines
    }
}

/// Lines for one pipeline step, including the connector below it.
fn agent_lines<'a>(row: PipelineRow<'a>, theme: &Theme) -> Vec<Line<'a>> {
    let agent = row.agent;
    let rail = if row.has_connector { " │  " } else { "    " };
    let rail_style = Style::default().fg(theme.accent);

    let mut heading = vec![
        Span::raw(INDENT),
        Span::styled(
            format!("({})", row.label),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(agent.agent_name.as_str(), Style::default().fg(theme.fg)),
        Span::raw("  "),
        quality_badge(&agent.overall_quality, theme),
    ];
    if agent.status.is_running() {
        heading.push(Span::styled("  ● Running", Style::default().fg(theme.accent)));
    }

    let mut lines = vec![Line::from(heading)];

    if !agent.task.is_empty() {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(rail, rail_style),
            Span::styled(task_preview(&agent.task), Style::default().fg(theme.neutral)),
        ]));
    }

    let mut metrics = vec![
        Span::raw(INDENT),
        Span::styled(rail, rail_style),
    ];
    metrics.extend(score_spans(agent, theme));
    lines.push(Line::from(metrics));

    if row.has_connector {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(" ↓", rail_style),
        ]));
    }

    lines
}

/// Step count and whichever scores have been measured.
fn score_spans<'a>(agent: &SwarmAgent, theme: &Theme) -> Vec<Span<'a>> {
    let muted = Style::default().fg(theme.muted);
    let mut spans = vec![Span::styled(format!("{} steps", agent.total_steps), muted)];

    if let Some(efficiency) = agent.efficiency_score {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("✓ ", Style::default().fg(theme.good)));
        spans.push(Span::styled(format!("Eff {}", format_score(efficiency)), muted));
    }

    if let Some(security) = agent.security_score {
        spans.push(Span::raw("  "));
        // Flag on the value shown, not the raw score.
        if round_score(security) < SECURITY_WARNING_THRESHOLD {
            spans.push(Span::styled(
                format!("! Sec {}", format_score(security)),
                Style::default().fg(theme.error),
            ));
        } else {
            spans.push(Span::styled(format!("Sec {}", format_score(security)), muted));
        }
    }

    spans
}

/// Shortens long task descriptions to a single preview line.
pub fn task_preview(task: &str) -> String {
    let flat = task.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(TASK_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}…", &flat[..idx]),
        None => flat,
    }
}
