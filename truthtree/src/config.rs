//! Tableau configuration.
use serde::Deserialize;
use thiserror::Error;

use truthtree_macros::{ConfigHelp, DocDefault};

/// Errors when applying a configuration update.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for option '{}': {}", option, reason)]
    InvalidValue {
        option: &'static str,
        reason: &'static str,
    },
}

/// Configurable parameters used during tableau expansion.
#[derive(DocDefault, ConfigHelp, Clone, Debug, PartialEq, Eq)]
pub struct TableauConfig {
    /// Maximal number of node expansions before expansion stops with an unknown verdict.
    /// (Default: 1000)
    pub max_expansions: usize,

    /// Derive the consequent of an implication whose antecedent is present without branching.
    /// (Default: true)
    pub modus_ponens: bool,

    /// Derive the remaining disjunct of a disjunction with a negated disjunct without branching.
    /// (Default: true)
    pub disjunctive_syllogism: bool,
}

/// Partial configuration that can be applied to a [`TableauConfig`].
///
/// Can be deserialized using serde, e.g. from a TOML file. Unknown options are rejected.
#[derive(Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TableauConfigUpdate {
    pub max_expansions: Option<usize>,
    pub modus_ponens: Option<bool>,
    pub disjunctive_syllogism: Option<bool>,
}

impl TableauConfigUpdate {
    /// Create an update that changes nothing.
    pub fn new() -> TableauConfigUpdate {
        TableauConfigUpdate::default()
    }

    /// Combine two updates, options set in `other` take precedence.
    pub fn merge(&mut self, other: TableauConfigUpdate) {
        self.max_expansions = other.max_expansions.or(self.max_expansions);
        self.modus_ponens = other.modus_ponens.or(self.modus_ponens);
        self.disjunctive_syllogism = other.disjunctive_syllogism.or(self.disjunctive_syllogism);
    }

    /// Apply the update to a configuration.
    ///
    /// The configuration is left unchanged if any value is invalid.
    pub fn apply(&self, config: &mut TableauConfig) -> Result<(), ConfigError> {
        if self.max_expansions == Some(0) {
            return Err(ConfigError::InvalidValue {
                option: "max_expansions",
                reason: "the expansion budget must be positive",
            });
        }

        if let Some(max_expansions) = self.max_expansions {
            config.max_expansions = max_expansions;
        }
        if let Some(modus_ponens) = self.modus_ponens {
            config.modus_ponens = modus_ponens;
        }
        if let Some(disjunctive_syllogism) = self.disjunctive_syllogism {
            config.disjunctive_syllogism = disjunctive_syllogism;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::Error;

    #[test]
    fn defaults_from_docs() {
        let config = TableauConfig::default();
        assert_eq!(config.max_expansions, 1000);
        assert!(config.modus_ponens);
        assert!(config.disjunctive_syllogism);
    }

    #[test]
    fn help_lists_options() {
        let help = TableauConfig::help();
        assert!(help.contains("max_expansions:"));
        assert!(help.contains("(Default: 1000)"));
        assert!(help.contains("disjunctive_syllogism:"));
    }

    #[test]
    fn merge_and_apply() -> Result<(), Error> {
        let mut update: TableauConfigUpdate = toml::from_str("max_expansions = 20")?;
        update.merge(toml::from_str("modus_ponens = false\nmax_expansions = 30")?);

        let mut config = TableauConfig::default();
        update.apply(&mut config)?;

        assert_eq!(config.max_expansions, 30);
        assert!(!config.modus_ponens);
        assert!(config.disjunctive_syllogism);

        Ok(())
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert!(toml::from_str::<TableauConfigUpdate>("max_depth = 3").is_err());
    }

    #[test]
    fn zero_budget_is_rejected() -> Result<(), Error> {
        let update: TableauConfigUpdate = toml::from_str("max_expansions = 0\nmodus_ponens = false")?;
        let mut config = TableauConfig::default();

        assert!(matches!(
            update.apply(&mut config),
            Err(ConfigError::InvalidValue {
                option: "max_expansions",
                ..
            })
        ));
        assert_eq!(config, TableauConfig::default());

        Ok(())
    }
}
