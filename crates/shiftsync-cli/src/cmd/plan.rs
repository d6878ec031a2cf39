//! `ssy plan`: analyze one workday + shift and show the change sets.

use clap::Args;
use std::path::PathBuf;

use shiftsync_core::analysis::Analysis;
use shiftsync_core::config::SyncConfig;
use shiftsync_core::model::change::ChangeItem;
use shiftsync_core::shift::Shift;

use crate::cmd::run_analysis;
use crate::output::{OutputMode, print_json, section};

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Workday to analyze, YYYY-MM-DD.
    #[arg(long)]
    pub date: String,

    /// Shift to analyze: day, general, or night.
    #[arg(long)]
    pub shift: String,

    /// Read schedule.json, devices.json, and assignments.json from this
    /// directory instead of the network.
    #[arg(long, value_name = "DIR")]
    pub from_files: Option<PathBuf>,
}

impl PlanArgs {
    pub(crate) fn parsed_shift(&self) -> anyhow::Result<Shift> {
        Ok(self.shift.parse::<Shift>()?)
    }
}

pub fn run_plan(args: &PlanArgs, config: &SyncConfig, output: OutputMode) -> anyhow::Result<()> {
    let shift = args.parsed_shift()?;
    let analysis = run_analysis(&args.date, shift, args.from_files.as_deref(), config)?;
    render_analysis(&analysis, output)
}

pub(crate) fn render_analysis(analysis: &Analysis, output: OutputMode) -> anyhow::Result<()> {
    if output.is_json() {
        return print_json(analysis);
    }

    section(&format!(
        "Plan for {} {} shift: {} rows accepted, {} rejected",
        analysis.date,
        analysis.shift,
        analysis.accepted,
        analysis.rejected.len()
    ));
    render_bucket("ADD", &analysis.changes.adds, '+');
    render_bucket("UPDATE", &analysis.changes.updates, '~');
    render_bucket("DELETE", &analysis.changes.deletes, '-');

    if !analysis.rejected.is_empty() {
        println!("Rejected rows:");
        for rejected in &analysis.rejected {
            let label = if rejected.work_order.is_empty() {
                String::new()
            } else {
                format!(" ({})", rejected.work_order)
            };
            println!("  row {}: {}{}", rejected.index, rejected.reason, label);
        }
    }

    if analysis.changes.is_empty() {
        println!("Nothing to apply: local records match the ERP schedule.");
    }
    Ok(())
}

fn render_bucket(heading: &str, items: &[ChangeItem], marker: char) {
    println!("{heading} ({})", items.len());
    for item in items {
        let diff = item
            .diff
            .as_deref()
            .map(|d| format!("  [{d}]"))
            .unwrap_or_default();
        println!("  {marker} {}  {}  {}{diff}", item.id, item.title, item.subtitle);
    }
}

#[cfg(test)]
mod tests {
    use super::PlanArgs;
    use clap::Parser;

    #[derive(Parser)]
    struct Wrapper {
        #[command(flatten)]
        args: PlanArgs,
    }

    #[test]
    fn plan_args_parse() {
        let w = Wrapper::parse_from(["test", "--date", "2026-01-17", "--shift", "day"]);
        assert_eq!(w.args.date, "2026-01-17");
        assert!(w.args.from_files.is_none());
        assert!(w.args.parsed_shift().is_ok());
    }

    #[test]
    fn unknown_shift_is_an_error() {
        let w = Wrapper::parse_from(["test", "--date", "2026-01-17", "--shift", "swing"]);
        assert!(w.args.parsed_shift().is_err());
    }
}
