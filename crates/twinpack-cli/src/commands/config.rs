use std::fs;

use tracing::{debug, info};
use twinpack_bundler::{BuildInfo, BuildMode, BuildVariant, compose};

use crate::cli::ConfigArgs;
use crate::commands::load_project;
use crate::error::Result;
use crate::ui;

/// Compose the configurations and print or write them as JSON.
pub fn execute(args: ConfigArgs) -> Result<()> {
    let project = load_project(&args.root)?;
    let mode = BuildMode::from(args.mode);
    let info = BuildInfo::collect(&project.settings, &project.package);

    let mut configs = compose(mode, &project.settings, &project.package, &info);
    if let Some(variant) = args.variant.map(BuildVariant::from) {
        configs.retain(|c| c.variant == variant);
    }
    debug!(%mode, count = configs.len(), "Selected configurations");

    let json = serde_json::to_string_pretty(&configs)?;
    match &args.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))?;
            info!(path = %path.display(), "Wrote configuration");
            ui::success(&format!(
                "Wrote {} {} configuration(s) to {}",
                configs.len(),
                mode,
                path.display()
            ));
        }
        None => println!("{json}"),
    }

    Ok(())
}
