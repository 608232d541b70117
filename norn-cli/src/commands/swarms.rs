//! Swarms command - prints the swarm list once and exits.

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use norn_tui::grading::{DriftBand, QualityCategory, drift, quality};
use norn_tui::pipeline::pipeline_rows;
use norn_tui::{Swarm, SwarmSource, format_score, format_timestamp, task_preview};

use crate::config::NornConfig;

#[derive(Args, Debug, Default)]
pub struct SwarmsArgs {
    /// Also list each swarm's agent pipeline
    #[arg(long)]
    pub agents: bool,
}

pub async fn run(args: SwarmsArgs, config: NornConfig) -> Result<()> {
    let source = super::http_source(&config)?;
    let swarms = source
        .get_swarms()
        .await
        .with_context(|| format!("Failed to load swarms from {}", source.swarms_url()))?;

    if swarms.is_empty() {
        println!("No swarms yet.");
        println!("Pass swarm_id, swarm_order and agent_name to NornHook to group agents.");
        return Ok(());
    }

    println!("{}", swarm_table(&swarms));

    if args.agents {
        for swarm in &swarms {
            println!();
            println!("{}", swarm.swarm_id);
            println!("{}", pipeline_table(swarm));
        }
    }

    Ok(())
}

fn swarm_table(swarms: &[Swarm]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Swarm").fg(Color::Cyan),
        Cell::new("Quality").fg(Color::Cyan),
        Cell::new("Agents").fg(Color::Cyan),
        Cell::new("Alignment").fg(Color::Cyan),
        Cell::new("Started").fg(Color::Cyan),
    ]);

    for swarm in swarms {
        let reading = drift::classify(swarm.drift_score);
        let started = swarm
            .started_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&swarm.swarm_id),
            quality_cell(swarm.overall_quality.as_str()),
            Cell::new(swarm.agent_count),
            Cell::new(format!("{} ({}%)", reading.band.label(), reading.percent))
                .fg(band_color(reading.band)),
            Cell::new(started),
        ]);
    }

    table
}

fn pipeline_table(swarm: &Swarm) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Step").fg(Color::Cyan),
        Cell::new("Agent").fg(Color::Cyan),
        Cell::new("Quality").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Steps").fg(Color::Cyan),
        Cell::new("Eff").fg(Color::Cyan),
        Cell::new("Sec").fg(Color::Cyan),
        Cell::new("Task").fg(Color::Cyan),
    ]);

    for row in pipeline_rows(&swarm.agents) {
        let agent = row.agent;
        let score = |s: Option<f64>| s.map(format_score).unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(row.label),
            Cell::new(&agent.agent_name),
            quality_cell(agent.overall_quality.as_str()),
            Cell::new(agent.status.as_str()),
            Cell::new(agent.total_steps),
            Cell::new(score(agent.efficiency_score)),
            Cell::new(score(agent.security_score)),
            Cell::new(task_preview(&agent.task)),
        ]);
    }

    table
}

fn quality_cell(label: &str) -> Cell {
    let color = match quality::classify(label) {
        QualityCategory::Excellent => Color::Green,
        QualityCategory::Good => Color::Blue,
        QualityCategory::Poor => Color::Yellow,
        QualityCategory::Failed => Color::Red,
        QualityCategory::Stuck => Color::DarkYellow,
        QualityCategory::Neutral => Color::Grey,
    };
    let label = if label.is_empty() { "UNKNOWN" } else { label };
    Cell::new(label).fg(color)
}

fn band_color(band: DriftBand) -> Color {
    match band {
        DriftBand::Aligned => Color::Green,
        DriftBand::SlightDrift => Color::Yellow,
        DriftBand::HighDrift => Color::Red,
    }
}
