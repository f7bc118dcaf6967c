use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CombiningRuleError {
    #[error(
        "Unknown sigma combining rule '{0}' (expected ARITHMETIC, GEOMETRIC or CUBIC-MEAN)"
    )]
    UnknownSigmaRule(String),
    #[error(
        "Unknown epsilon combining rule '{0}' (expected ARITHMETIC, GEOMETRIC, HARMONIC or HHG)"
    )]
    UnknownEpsilonRule(String),
}

/// Rule used to derive the pairwise size parameter from two per-particle sigmas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SigmaCombiningRule {
    /// `(σi + σj) / 2`
    #[default]
    Arithmetic,
    /// `sqrt(σi · σj)`
    Geometric,
    /// `(σi³ + σj³) / (σi² + σj²)`
    CubicMean,
}

impl SigmaCombiningRule {
    pub const ALL: [Self; 3] = [Self::Arithmetic, Self::Geometric, Self::CubicMean];

    #[inline]
    pub fn combine(self, sigma_i: f64, sigma_j: f64) -> f64 {
        match self {
            Self::Arithmetic => 0.5 * (sigma_i + sigma_j),
            Self::Geometric => (sigma_i * sigma_j).sqrt(),
            Self::CubicMean => {
                let sigma_i2 = sigma_i * sigma_i;
                let sigma_j2 = sigma_j * sigma_j;
                let denominator = sigma_i2 + sigma_j2;
                if denominator == 0.0 {
                    return 0.0;
                }
                (sigma_i2 * sigma_i + sigma_j2 * sigma_j) / denominator
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Arithmetic => "ARITHMETIC",
            Self::Geometric => "GEOMETRIC",
            Self::CubicMean => "CUBIC-MEAN",
        }
    }
}

impl FromStr for SigmaCombiningRule {
    type Err = CombiningRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ARITHMETIC" => Ok(Self::Arithmetic),
            "GEOMETRIC" => Ok(Self::Geometric),
            "CUBIC-MEAN" => Ok(Self::CubicMean),
            _ => Err(CombiningRuleError::UnknownSigmaRule(s.to_string())),
        }
    }
}

impl fmt::Display for SigmaCombiningRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rule used to derive the pairwise well depth from two per-particle epsilons.
///
/// `Harmonic` and `Hhg` return zero when their denominator vanishes, which
/// happens only when both input epsilons are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EpsilonCombiningRule {
    /// `(εi + εj) / 2`
    #[default]
    Arithmetic,
    /// `sqrt(εi · εj)`
    Geometric,
    /// `2·εi·εj / (εi + εj)`
    Harmonic,
    /// Halgren's HHG rule, `4·εi·εj / (sqrt(εi) + sqrt(εj))²`
    Hhg,
}

impl EpsilonCombiningRule {
    pub const ALL: [Self; 4] = [
        Self::Arithmetic,
        Self::Geometric,
        Self::Harmonic,
        Self::Hhg,
    ];

    #[inline]
    pub fn combine(self, epsilon_i: f64, epsilon_j: f64) -> f64 {
        match self {
            Self::Arithmetic => 0.5 * (epsilon_i + epsilon_j),
            Self::Geometric => (epsilon_i * epsilon_j).sqrt(),
            Self::Harmonic => {
                let denominator = epsilon_i + epsilon_j;
                if denominator == 0.0 {
                    return 0.0;
                }
                2.0 * (epsilon_i * epsilon_j) / denominator
            }
            Self::Hhg => {
                let root_sum = epsilon_i.sqrt() + epsilon_j.sqrt();
                let denominator = root_sum * root_sum;
                if denominator == 0.0 {
                    return 0.0;
                }
                4.0 * (epsilon_i * epsilon_j) / denominator
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Arithmetic => "ARITHMETIC",
            Self::Geometric => "GEOMETRIC",
            Self::Harmonic => "HARMONIC",
            Self::Hhg => "HHG",
        }
    }
}

impl FromStr for EpsilonCombiningRule {
    type Err = CombiningRuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ARITHMETIC" => Ok(Self::Arithmetic),
            "GEOMETRIC" => Ok(Self::Geometric),
            "HARMONIC" => Ok(Self::Harmonic),
            "HHG" => Ok(Self::Hhg),
            _ => Err(CombiningRuleError::UnknownEpsilonRule(s.to_string())),
        }
    }
}

impl fmt::Display for EpsilonCombiningRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn every_sigma_rule_returns_input_for_equal_sigmas() {
        for rule in SigmaCombiningRule::ALL {
            assert!(
                f64_approx_equal(rule.combine(3.4, 3.4), 3.4),
                "{rule} did not preserve an equal pair"
            );
        }
    }

    #[test]
    fn every_epsilon_rule_returns_input_for_equal_epsilons() {
        for rule in EpsilonCombiningRule::ALL {
            assert!(
                f64_approx_equal(rule.combine(0.25, 0.25), 0.25),
                "{rule} did not preserve an equal pair"
            );
        }
    }

    #[test]
    fn sigma_rules_match_closed_forms() {
        assert_eq!(SigmaCombiningRule::Arithmetic.combine(2.0, 4.0), 3.0);
        assert!(f64_approx_equal(
            SigmaCombiningRule::Geometric.combine(2.0, 8.0),
            4.0
        ));
        assert!(f64_approx_equal(
            SigmaCombiningRule::CubicMean.combine(1.0, 2.0),
            9.0 / 5.0
        ));
    }

    #[test]
    fn epsilon_rules_match_closed_forms() {
        assert_eq!(EpsilonCombiningRule::Arithmetic.combine(1.0, 3.0), 2.0);
        assert!(f64_approx_equal(
            EpsilonCombiningRule::Geometric.combine(1.0, 4.0),
            2.0
        ));
        assert!(f64_approx_equal(
            EpsilonCombiningRule::Harmonic.combine(1.0, 3.0),
            1.5
        ));
        assert!(f64_approx_equal(
            EpsilonCombiningRule::Hhg.combine(1.0, 4.0),
            16.0 / 9.0
        ));
    }

    #[test]
    fn guarded_rules_return_zero_for_zero_inputs() {
        assert_eq!(SigmaCombiningRule::CubicMean.combine(0.0, 0.0), 0.0);
        assert_eq!(EpsilonCombiningRule::Harmonic.combine(0.0, 0.0), 0.0);
        assert_eq!(EpsilonCombiningRule::Hhg.combine(0.0, 0.0), 0.0);
    }

    #[test]
    fn guarded_rules_are_zero_when_one_side_is_zero() {
        assert_eq!(EpsilonCombiningRule::Harmonic.combine(0.0, 0.3), 0.0);
        assert_eq!(EpsilonCombiningRule::Hhg.combine(0.3, 0.0), 0.0);
    }

    #[test]
    fn rule_names_parse_case_insensitively() {
        assert_eq!(
            "cubic-mean".parse::<SigmaCombiningRule>(),
            Ok(SigmaCombiningRule::CubicMean)
        );
        assert_eq!(
            "Geometric".parse::<SigmaCombiningRule>(),
            Ok(SigmaCombiningRule::Geometric)
        );
        assert_eq!(
            "hhg".parse::<EpsilonCombiningRule>(),
            Ok(EpsilonCombiningRule::Hhg)
        );
        assert_eq!(
            "HARMONIC".parse::<EpsilonCombiningRule>(),
            Ok(EpsilonCombiningRule::Harmonic)
        );
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for rule in SigmaCombiningRule::ALL {
            assert_eq!(rule.to_string().parse::<SigmaCombiningRule>(), Ok(rule));
        }
        for rule in EpsilonCombiningRule::ALL {
            assert_eq!(rule.to_string().parse::<EpsilonCombiningRule>(), Ok(rule));
        }
    }

    #[test]
    fn unknown_names_are_rejected_with_the_offending_string() {
        assert_eq!(
            "bogus".parse::<SigmaCombiningRule>(),
            Err(CombiningRuleError::UnknownSigmaRule("bogus".to_string()))
        );
        let err = "bogus".parse::<EpsilonCombiningRule>().unwrap_err();
        assert!(err.to_string().contains("'bogus'"));
    }

    #[test]
    fn harmonic_is_not_a_sigma_rule() {
        assert!("HARMONIC".parse::<SigmaCombiningRule>().is_err());
        assert!("CUBIC-MEAN".parse::<EpsilonCombiningRule>().is_err());
    }

    #[test]
    fn defaults_are_arithmetic() {
        assert_eq!(SigmaCombiningRule::default(), SigmaCombiningRule::Arithmetic);
        assert_eq!(
            EpsilonCombiningRule::default(),
            EpsilonCombiningRule::Arithmetic
        );
    }
}
