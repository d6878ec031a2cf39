//! `ssy shifts`: show the resolved UTC window for each shift on a workday.

use clap::Args;
use serde::Serialize;

use shiftsync_core::shift::{Shift, resolve_shift_range};

use crate::output::{OutputMode, print_json, section};

#[derive(Args, Debug)]
pub struct ShiftsArgs {
    /// Workday to resolve, YYYY-MM-DD.
    #[arg(long)]
    pub date: String,
}

#[derive(Debug, Serialize)]
struct ShiftWindow {
    shift: &'static str,
    code: &'static str,
    start: String,
    end: String,
}

pub fn run_shifts(args: &ShiftsArgs, output: OutputMode) -> anyhow::Result<()> {
    let mut windows = Vec::with_capacity(Shift::ALL.len());
    for shift in Shift::ALL {
        let range = resolve_shift_range(&args.date, shift)?;
        windows.push(ShiftWindow {
            shift: shift.display_name(),
            code: shift.code(),
            start: range.start_iso(),
            end: range.end_iso(),
        });
    }

    if output.is_json() {
        return print_json(&serde_json::json!({ "date": args.date, "shifts": windows }));
    }

    section(&format!("Shift windows for {}", args.date));
    for window in &windows {
        println!(
            "  {:<8} ({})  {} to {}",
            window.shift, window.code, window.start, window.end
        );
    }
    Ok(())
}
