use std::path::Path;

use clap::Args;
use color_eyre::eyre::{Result, WrapErr, bail};
use ruleviz_core::include_test_file;

#[derive(Args, Debug)]
#[command(about)]
/// Create a folder with a sample sheet and event script
pub struct NewArgs {
    /// Name of the new folder
    name: String,
}

pub fn new_project(args: NewArgs) -> Result<()> {
    write_samples(Path::new(&args.name))?;
    println!("Created {}", args.name);
    Ok(())
}

fn write_samples(project_path: &Path) -> Result<()> {
    if project_path.exists() {
        bail!("{} already exists", project_path.display());
    }
    std::fs::create_dir_all(project_path)
        .wrap_err_with(|| format!("failed to create {}", project_path.display()))?;

    std::fs::write(
        project_path.join("sheet.json"),
        include_test_file!("demo-sheet.json"),
    )
    .wrap_err("failed to write sample sheet")?;
    std::fs::write(
        project_path.join("events.json"),
        include_test_file!("demo-events.json"),
    )
    .wrap_err("failed to write sample events")?;
    Ok(())
}
