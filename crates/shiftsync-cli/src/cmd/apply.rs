//! `ssy apply`: analyze, select, and submit the combined batch.
//!
//! Selection is opt-out: every generated change is selected until the
//! operator narrows it down with `--only` or `--skip`. `--dry-run` prints
//! the exact wire body instead of submitting it.

use anyhow::bail;
use clap::Args;

use shiftsync_core::config::SyncConfig;
use shiftsync_core::executor::{execute, plan_batch};
use shiftsync_core::select::Selection;

use crate::client::lighthouse::LighthouseClient;
use crate::cmd::plan::PlanArgs;
use crate::cmd::run_analysis;
use crate::output::{OutputMode, print_json};

#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub plan: PlanArgs,

    /// Apply only these change ids (repeatable). Default: every change.
    #[arg(long = "only", value_name = "ID")]
    pub only: Vec<String>,

    /// Skip these change ids (repeatable).
    #[arg(long = "skip", value_name = "ID")]
    pub skip: Vec<String>,

    /// Print the combined batch body instead of submitting it.
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run_apply(args: &ApplyArgs, config: &SyncConfig, output: OutputMode) -> anyhow::Result<()> {
    let shift = args.plan.parsed_shift()?;
    let analysis = run_analysis(&args.plan.date, shift, args.plan.from_files.as_deref(), config)?;

    let mut selection = Selection::new(&analysis.changes);
    if !args.only.is_empty() {
        selection.deselect_all();
        for id in &args.only {
            selection.toggle(id);
        }
    }
    for id in &args.skip {
        if selection.is_selected(id) {
            selection.toggle(id);
        }
    }
    let confirmed = selection.confirm(&analysis.changes);

    if args.dry_run {
        let batch = plan_batch(&confirmed, &analysis.snapshot);
        if output.is_json() {
            return print_json(&batch);
        }
        println!(
            "Dry run: {} of {} changes selected, batch body follows.",
            selection.selected_count(),
            selection.total()
        );
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    if args.plan.from_files.is_some() {
        bail!("--from-files has no mutation endpoint; add --dry-run to inspect the batch");
    }

    let api = LighthouseClient::new(&config.lighthouse);
    let result = execute(&api, &confirmed, &analysis.snapshot)?;

    if output.is_json() {
        return print_json(&result);
    }
    if result == shiftsync_core::executor::SyncResult::default() {
        println!("Nothing to apply: local records match the ERP schedule.");
    } else {
        println!(
            "Applied: {} created, {} updated, {} deleted. Refresh the local snapshot.",
            result.created, result.updated, result.deleted
        );
    }
    Ok(())
}
