//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

use crate::config_resolver::{project_file, CONFIG_FILE};

const DEFAULT_CONFIG: &str = r#"# doclint configuration

# Rule preset: recommended | strict | minimal
preset = "recommended"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/build/**",
    "**/target/**",
    "**/generated/**",
]

# Each rule can be enabled/disabled and have its severity overridden

[rules.internal-comments]
# Regions where block comments may appear, or a regex per region
allowed_block_formats = "package class func init prestmts stmts"
allowed_line_formats = "stmts prestmts"

[rules.javadoc-method]
# severity = "warning"
scope = "private"
allowed_annotations = ["Override"]
# allow_narrative_param_tags = true
# unused_param_format = "unused.*"

[rules.javadoc-type]
# author_format = "\\S"
# version_format = "\\S"
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(enclosing) = project_file(Path::new("..")) {
        tracing::info!(
            "{} will take precedence over {} for this directory",
            CONFIG_FILE,
            enclosing.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: doclint check");

    Ok(())
}
