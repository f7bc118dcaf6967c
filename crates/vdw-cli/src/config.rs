use crate::cli::EvalArgs;
use crate::error::{CliError, Result};
use halvdw::core::models::site::ReductionPolicy;
use halvdw::engine::config::{NonbondedMethod, VdwConfig, VdwConfigBuilder};
use nalgebra::Vector3;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Kernel configuration as written in a TOML file; every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialVdwConfig {
    method: Option<NonbondedMethod>,
    sigma_combining_rule: Option<String>,
    epsilon_combining_rule: Option<String>,
    cutoff: Option<f64>,
    box_lengths: Option<[f64; 3]>,
    reduction_policy: Option<ReductionPolicy>,
}

impl PartialVdwConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Command-line overrides win over file values; anything still unset
    /// falls back to the kernel defaults.
    pub fn merge_with_cli(self, args: &EvalArgs) -> Result<VdwConfig> {
        let mut builder = VdwConfigBuilder::new();

        if let Some(method) = args.method.or(self.method) {
            builder = builder.method(method);
        }
        if let Some(rule) = args.sigma_rule.clone().or(self.sigma_combining_rule) {
            builder = builder.sigma_combining_rule(rule);
        }
        if let Some(rule) = args.epsilon_rule.clone().or(self.epsilon_combining_rule) {
            builder = builder.epsilon_combining_rule(rule);
        }
        if let Some(cutoff) = args.cutoff.or(self.cutoff) {
            builder = builder.cutoff(cutoff);
        }
        if let Some([x, y, z]) = self.box_lengths {
            builder = builder.box_lengths(Vector3::new(x, y, z));
        }
        if let Some(policy) = self.reduction_policy {
            builder = builder.reduction_policy(policy);
        }

        let config = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;
        debug!("Merged kernel configuration: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn bare_args() -> EvalArgs {
        EvalArgs {
            system: PathBuf::from("system.toml"),
            config: None,
            output: None,
            method: None,
            sigma_rule: None,
            epsilon_rule: None,
            cutoff: None,
        }
    }

    #[test]
    fn empty_file_yields_kernel_defaults() {
        let partial = PartialVdwConfig::from_toml("").unwrap();
        let config = partial.merge_with_cli(&bare_args()).unwrap();
        assert_eq!(config, VdwConfig::default());
    }

    #[test]
    fn file_values_are_applied() {
        let partial = PartialVdwConfig::from_toml(
            r#"
            method = "cutoff-periodic"
            sigma-combining-rule = "CUBIC-MEAN"
            epsilon-combining-rule = "HHG"
            cutoff = 9.0
            box-lengths = [30.0, 31.0, 32.0]
            reduction-policy = "clamp"
            "#,
        )
        .unwrap();
        let config = partial.merge_with_cli(&bare_args()).unwrap();
        assert_eq!(config.method, NonbondedMethod::CutoffPeriodic);
        assert_eq!(config.sigma_combining_rule, "CUBIC-MEAN");
        assert_eq!(config.epsilon_combining_rule, "HHG");
        assert_eq!(config.cutoff, Some(9.0));
        assert_eq!(config.box_lengths, Some(Vector3::new(30.0, 31.0, 32.0)));
        assert_eq!(config.reduction_policy, ReductionPolicy::Clamp);
    }

    #[test]
    fn command_line_overrides_file_values() {
        let partial = PartialVdwConfig::from_toml(
            r#"
            sigma-combining-rule = "GEOMETRIC"
            cutoff = 9.0
            method = "cutoff-non-periodic"
            "#,
        )
        .unwrap();
        let args = EvalArgs {
            sigma_rule: Some("arithmetic".into()),
            cutoff: Some(6.5),
            ..bare_args()
        };
        let config = partial.merge_with_cli(&args).unwrap();
        assert_eq!(config.sigma_combining_rule, "arithmetic");
        assert_eq!(config.cutoff, Some(6.5));
        assert_eq!(config.method, NonbondedMethod::CutoffNonPeriodic);
    }

    #[test]
    fn cutoff_method_without_cutoff_is_a_config_error() {
        let args = EvalArgs {
            method: Some(NonbondedMethod::CutoffNonPeriodic),
            ..bare_args()
        };
        let result = PartialVdwConfig::default().merge_with_cli(&args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PartialVdwConfig::from_toml("switching-distance = 8.0").is_err());
    }

    #[test]
    fn from_file_reports_the_offending_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "method = \"ewald\"").unwrap();
        match PartialVdwConfig::from_file(file.path()) {
            Err(CliError::FileParsing { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
