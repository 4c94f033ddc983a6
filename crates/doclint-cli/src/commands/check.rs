//! Check command implementation.

use anyhow::{Context, Result};
use doclint_core::{Analyzer, Config, RuleBox};
use doclint_java::JavaFrontend;
use doclint_rules::{all_rules, rule_from_config, rules_from_config};
use std::path::Path;

use crate::config_resolver::{self, ConfigFile};
use crate::OutputFormat;

/// Options of one `doclint check` invocation.
pub struct CheckOptions<'a> {
    /// Directory to analyze.
    pub path: &'a Path,
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules_filter: Option<&'a str>,
    /// Extra exclude globs.
    pub exclude: &'a [String],
    /// Preset overriding the configuration file.
    pub preset: Option<&'a str>,
    /// Selected configuration file, if any.
    pub config_file: Option<&'a ConfigFile>,
}

/// Runs the check command.
pub fn run(options: &CheckOptions<'_>) -> Result<()> {
    let mut config = config_resolver::load(options.config_file)?;
    if let Some(preset) = options.preset {
        config.preset = Some(preset.to_string());
    }

    let rules = match options.rules_filter {
        Some(filter) => filter_rules(filter, &config)?,
        None => rules_from_config(&config).context("Invalid rule configuration")?,
    };

    let analyzer = Analyzer::builder()
        .root(options.path)
        .config(config)
        .frontend(JavaFrontend::new())
        .excludes(options.exclude.iter().cloned())
        .rules(rules)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {:?} with {} rules",
        options.path,
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.root())?;

    // Exit with error code if there are errors
    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Selects rules by name or code, honoring their configuration sections.
fn filter_rules(filter: &str, config: &Config) -> Result<Vec<RuleBox>> {
    let mut rules: Vec<RuleBox> = Vec::new();

    for name in filter.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        let Some(rule) = all_rules()
            .into_iter()
            .find(|r| r.name() == name || r.code().eq_ignore_ascii_case(name))
        else {
            tracing::warn!("Unknown rule: {}", name);
            continue;
        };

        let rule = match config.rules.get(rule.name()) {
            Some(section) => rule_from_config(rule.name(), section)
                .with_context(|| format!("Invalid configuration for {}", rule.name()))?
                .unwrap_or(rule),
            None => rule,
        };
        rules.push(rule);
    }

    Ok(rules)
}
