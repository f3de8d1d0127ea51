use serde_json::json;

use crate::cli::SettingsArgs;
use crate::commands::load_project;
use crate::error::Result;

/// Print the effective settings, package metadata and environment-resolved
/// values as JSON.
pub fn execute(args: SettingsArgs) -> Result<()> {
    let project = load_project(&args.root)?;
    let settings = &project.settings;

    let report = json!({
        "settings": settings,
        "package": project.package,
        "resolved": {
            "publicPath": settings.public_path(),
            "devServer": {
                "public": settings.dev_server_public(),
                "host": settings.dev_server_host(),
                "port": settings.dev_server_port(),
                "poll": settings.dev_server_poll(),
                "https": settings.dev_server_https(),
            },
        },
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
