use crate::core::models::site::ReductionPolicy;
use nalgebra::Vector3;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error(
        "Unknown nonbonded method '{0}' (expected no-cutoff, cutoff-non-periodic or cutoff-periodic)"
    )]
    UnknownMethod(String),
}

/// How long-range van der Waals interactions are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NonbondedMethod {
    /// Every non-excluded pair is evaluated exactly.
    #[default]
    NoCutoff,
    /// Pairs beyond the cutoff are ignored.
    CutoffNonPeriodic,
    /// Minimum-image separations; pairs beyond the cutoff are ignored.
    CutoffPeriodic,
}

impl NonbondedMethod {
    pub fn uses_cutoff(self) -> bool {
        !matches!(self, Self::NoCutoff)
    }

    pub fn is_periodic(self) -> bool {
        matches!(self, Self::CutoffPeriodic)
    }
}

impl FromStr for NonbondedMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "no-cutoff" | "nocutoff" => Ok(Self::NoCutoff),
            "cutoff-non-periodic" | "cutoffnonperiodic" => Ok(Self::CutoffNonPeriodic),
            "cutoff-periodic" | "cutoffperiodic" => Ok(Self::CutoffPeriodic),
            _ => Err(ConfigError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for NonbondedMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoCutoff => "no-cutoff",
            Self::CutoffNonPeriodic => "cutoff-non-periodic",
            Self::CutoffPeriodic => "cutoff-periodic",
        })
    }
}

/// Kernel configuration, fixed once a `VdwForce` is built from it.
///
/// Combining rules are kept as names; they are resolved (and rejected if
/// unknown) when the kernel is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct VdwConfig {
    pub method: NonbondedMethod,
    pub sigma_combining_rule: String,
    pub epsilon_combining_rule: String,
    pub cutoff: Option<f64>,
    pub box_lengths: Option<Vector3<f64>>,
    pub reduction_policy: ReductionPolicy,
}

impl Default for VdwConfig {
    fn default() -> Self {
        Self {
            method: NonbondedMethod::NoCutoff,
            sigma_combining_rule: "ARITHMETIC".to_string(),
            epsilon_combining_rule: "ARITHMETIC".to_string(),
            cutoff: None,
            box_lengths: None,
            reduction_policy: ReductionPolicy::Strict,
        }
    }
}

#[derive(Default)]
pub struct VdwConfigBuilder {
    method: Option<NonbondedMethod>,
    sigma_combining_rule: Option<String>,
    epsilon_combining_rule: Option<String>,
    cutoff: Option<f64>,
    box_lengths: Option<Vector3<f64>>,
    reduction_policy: Option<ReductionPolicy>,
}

impl VdwConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: NonbondedMethod) -> Self {
        self.method = Some(method);
        self
    }
    pub fn sigma_combining_rule(mut self, rule: impl Into<String>) -> Self {
        self.sigma_combining_rule = Some(rule.into());
        self
    }
    pub fn epsilon_combining_rule(mut self, rule: impl Into<String>) -> Self {
        self.epsilon_combining_rule = Some(rule.into());
        self
    }
    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }
    pub fn box_lengths(mut self, lengths: Vector3<f64>) -> Self {
        self.box_lengths = Some(lengths);
        self
    }
    pub fn reduction_policy(mut self, policy: ReductionPolicy) -> Self {
        self.reduction_policy = Some(policy);
        self
    }

    pub fn build(self) -> Result<VdwConfig, ConfigError> {
        let defaults = VdwConfig::default();
        let method = self.method.unwrap_or(defaults.method);

        let cutoff = if method.uses_cutoff() {
            Some(self.cutoff.ok_or(ConfigError::MissingParameter("cutoff"))?)
        } else {
            self.cutoff
        };
        let box_lengths = if method.is_periodic() {
            Some(
                self.box_lengths
                    .ok_or(ConfigError::MissingParameter("box_lengths"))?,
            )
        } else {
            self.box_lengths
        };

        Ok(VdwConfig {
            method,
            sigma_combining_rule: self
                .sigma_combining_rule
                .unwrap_or(defaults.sigma_combining_rule),
            epsilon_combining_rule: self
                .epsilon_combining_rule
                .unwrap_or(defaults.epsilon_combining_rule),
            cutoff,
            box_lengths,
            reduction_policy: self.reduction_policy.unwrap_or(defaults.reduction_policy),
        })
    }
}
