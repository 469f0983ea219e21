use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{Result, bail};
use ruleviz_core::{AnalysisSheet, SheetIssue};

use crate::load_sheet;

#[derive(Args, Debug)]
#[command(about)]
/// Report missing rules and broken parent links in a sheet
pub struct CheckArgs {
    /// Analysis sheet JSON
    sheet: PathBuf,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let sheet = load_sheet(&args.sheet)?;
    let issues = sheet.validate();
    print!("{}", report(&sheet, &issues));
    if !issues.is_empty() {
        bail!("{} issue(s) in {}", issues.len(), args.sheet.display());
    }
    Ok(())
}

fn report(sheet: &AnalysisSheet, issues: &[SheetIssue]) -> String {
    let mut out = format!(
        "{} sentences, {} rules, {} parent links\n",
        sheet.sentences.len(),
        sheet.tables.desc.len(),
        sheet.tables.parentref.len()
    );
    for issue in issues {
        out.push_str(&format!("  {issue}\n"));
    }
    out
}
