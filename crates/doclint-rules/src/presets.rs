//! Rule presets for common configurations.

use crate::{internal_comments, javadoc_method, javadoc_type};
use crate::{InternalComments, JavadocMethod, JavadocType};
use doclint_core::{Config, ConfigError, RuleBox, RuleConfig};
use std::str::FromStr;
use tracing::warn;

/// Preset configurations for doclint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every rule with its defaults.
    #[default]
    Recommended,
    /// Authorship and versioning required, no narrative documentation.
    Strict,
    /// Method comments only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Configuration name of the preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "recommended" => Ok(Self::Recommended),
            "strict" => Ok(Self::Strict),
            "minimal" => Ok(Self::Minimal),
            other => Err(ConfigError::Parse {
                message: format!("unknown preset '{other}' (expected recommended, strict or minimal)"),
            }),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes:
/// - `internal-comments` (DL001) - any comment anywhere until configured
/// - `javadoc-method` (DL002) - method and constructor comments
/// - `javadoc-type` (DL003) - type comments
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    vec![
        Box::new(InternalComments::new()),
        Box::new(JavadocMethod::new()),
        Box::new(JavadocType::new()),
    ]
}

/// Returns the strict set of rules.
///
/// Includes all recommended rules with:
/// - `javadoc-type` requiring `@author` and `@version`
/// - no narrative parameter or result descriptions
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    vec![
        Box::new(InternalComments::new()),
        Box::new(
            JavadocMethod::new()
                .allow_narrative_param_tags(false)
                .allow_narrative_return_tags(false),
        ),
        Box::new(JavadocType::new().require_author(true).require_version(true)),
    ]
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes `javadoc-method`.
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![Box::new(JavadocMethod::new())]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    recommended_rules()
}

/// Builds a rule by name from its configuration section.
///
/// Returns `Ok(None)` for names no rule answers to.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOption`] if the section holds an invalid option.
pub fn rule_from_config(name: &str, config: &RuleConfig) -> Result<Option<RuleBox>, ConfigError> {
    let rule: RuleBox = match name {
        internal_comments::NAME => Box::new(InternalComments::from_config(config)?),
        javadoc_method::NAME => Box::new(JavadocMethod::from_config(config)?),
        javadoc_type::NAME => Box::new(JavadocType::from_config(config)?),
        _ => return Ok(None),
    };
    Ok(Some(rule))
}

/// Builds the rule set described by a configuration.
///
/// The preset (default: recommended) selects the rules; a `[rules.<name>]`
/// section rebuilds that rule from its options, and `enabled = true` adds a
/// rule the preset leaves out. Disabling is left to the analyzer.
///
/// # Errors
///
/// Returns [`ConfigError`] for an unknown preset or an invalid rule option.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, ConfigError> {
    let preset = config
        .preset
        .as_deref()
        .map_or(Ok(Preset::default()), |name| name.parse::<Preset>())?;

    let mut rules = Vec::new();
    for rule in preset.rules() {
        match config.rules.get(rule.name()) {
            Some(section) => rules.extend(rule_from_config(rule.name(), section)?),
            None => rules.push(rule),
        }
    }

    let mut names: Vec<&String> = config.rules.keys().collect();
    names.sort();
    for name in names {
        if rules.iter().any(|r| r.name() == name.as_str()) {
            continue;
        }
        let section = &config.rules[name];
        match rule_from_config(name, section)? {
            Some(rule) if section.enabled == Some(true) => rules.push(rule),
            Some(_) => {}
            None => warn!(rule = %name, "Unknown rule in configuration"),
        }
    }
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert_eq!(Preset::Recommended.rules().len(), 3);
        assert_eq!(Preset::Strict.rules().len(), 3);
        assert_eq!(names(&Preset::Minimal.rules()), vec!["javadoc-method"]);
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in [Preset::Recommended, Preset::Strict, Preset::Minimal] {
            assert_eq!(preset.name().parse::<Preset>().ok(), Some(preset));
        }
        assert!("lenient".parse::<Preset>().is_err());
    }

    #[test]
    fn config_adds_rules_outside_the_preset() {
        let config = Config::parse(
            "preset = \"minimal\"\n[rules.javadoc-type]\nenabled = true\nrequire_author = true\n",
        )
        .expect("config");
        let rules = rules_from_config(&config).expect("rules");
        assert_eq!(names(&rules), vec!["javadoc-method", "javadoc-type"]);
    }

    #[test]
    fn config_without_preset_is_recommended() {
        let rules = rules_from_config(&Config::default()).expect("rules");
        assert_eq!(
            names(&rules),
            vec!["internal-comments", "javadoc-method", "javadoc-type"]
        );
    }

    #[test]
    fn invalid_options_fail_setup() {
        let config = Config::parse("[rules.internal-comments]\nallowed_line_formats = \"here\"\n")
            .expect("config");
        assert!(rules_from_config(&config).is_err());

        let config = Config::parse("preset = \"lenient\"\n").expect("config");
        assert!(rules_from_config(&config).is_err());
    }
}
