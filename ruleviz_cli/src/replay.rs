use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use ruleviz_core::viewer::TraceStep;
use ruleviz_core::{AnalysisSheet, InlineStyles, PointerEvent, Viewer};

use crate::load_sheet;

#[derive(Args, Debug)]
#[command(about)]
/// Run a scripted sequence of pointer events and print the resulting states
pub struct ReplayArgs {
    /// Analysis sheet JSON
    sheet: PathBuf,

    /// JSON array of pointer events
    events: PathBuf,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let sheet = load_sheet(&args.sheet)?;
    let file = std::fs::File::open(&args.events)
        .wrap_err_with(|| format!("failed to open {}", args.events.display()))?;
    let events: Vec<PointerEvent> = serde_json::from_reader(file)
        .wrap_err_with(|| format!("failed to parse events in {}", args.events.display()))?;

    let trace = replay(&sheet, &events);
    println!("{}", serde_json::to_string_pretty(&trace)?);
    Ok(())
}

pub fn replay(sheet: &AnalysisSheet, events: &[PointerEvent]) -> Vec<TraceStep> {
    let mut viewer = Viewer::from_sheet(sheet);
    let mut styles = InlineStyles::default();
    viewer.replay(events, &mut styles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ruleviz_core::include_test_file;

    #[test]
    fn demo_trace_json() {
        let sheet = AnalysisSheet::load(include_test_file!("demo-sheet.json")).unwrap();
        let events: Vec<PointerEvent> =
            serde_json::from_str(include_test_file!("demo-events.json")).unwrap();

        let trace = serde_json::to_value(replay(&sheet, &events)).unwrap();
        let steps = trace.as_array().unwrap();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[0]["current"], "0-4");
        assert_eq!(steps[1]["placement"]["horizontal"]["right"], 0.0);
        assert_eq!(steps[1]["placement"]["top"], 239.0);
        assert_eq!(steps[2]["click"]["outcome"], "zoomed_out");
        assert_eq!(steps[2]["click"]["to"], "0-3");
        assert_eq!(steps[4]["click"]["outcome"], "no_parent");
        assert_eq!(steps[5]["tooltip_visible"], false);
    }
}
