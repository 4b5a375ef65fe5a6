//! Metric value objects and scoring results.
//!
//! One value object exists per CVSS formula family, each carrying only the
//! metrics that family needs, joined by the [`CvssVector`] tagged union. A
//! calculator can therefore never receive the wrong variant: the mismatch the
//! runtime used to detect is unrepresentable by construction.
//!
//! Every numeric field holds a weight drawn from the version's published
//! table, never a free-form float parsed out of the vector. A value object
//! lives for exactly one scoring call: created by a parser, populated once,
//! passed through one calculator, then snapshotted into [`CvssResults`] and
//! discarded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::version::CvssVersion;

/// Qualitative severity band derived from a numeric score.
///
/// Rendered as the single-letter codes used in reports ("N", "L", "M", "H",
/// "C"). CVSS 2.0 only uses Low/Medium/High; 3.x and 4.0 use all five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Score 0.0 (3.x / 4.0 only).
    None,
    /// 2.0: 0.0 - 3.9; 3.x / 4.0: 0.1 - 3.9.
    Low,
    /// Score 4.0 - 6.9.
    Medium,
    /// Score 7.0 - 8.9 (2.0: 7.0 - 10.0).
    High,
    /// Score 9.0 - 10.0 (3.x / 4.0 only).
    Critical,
}

impl Severity {
    /// Classify a CVSS 2.0 base score. The 2.0 bands have no None/Critical.
    pub fn from_v2_score(score: f64) -> Self {
        match score {
            s if s >= 7.0 => Self::High,
            s if s >= 4.0 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Classify a CVSS 3.x / 4.0 base score.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 9.0 => Self::Critical,
            s if s >= 7.0 => Self::High,
            s if s >= 4.0 => Self::Medium,
            s if s >= 0.1 => Self::Low,
            _ => Self::None,
        }
    }

    /// Single-letter report code for this band.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "N",
            Self::Low => "L",
            Self::Medium => "M",
            Self::High => "H",
            Self::Critical => "C",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::None
    }
}

/// Immutable snapshot of a completed scoring call.
///
/// Outlives the mutable value object used mid-computation; this is what the
/// caller keeps. `metrics` holds the base metric letter-codes as given, for
/// audit/round-trip display (empty for 4.0, whose raw-metric map output is
/// out of scope).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvssResults {
    /// Intrinsic severity from base metrics alone.
    pub base_score: f64,
    /// Base score adjusted for exploit/remediation/confidence state.
    pub temporal_score: f64,
    /// Temporal score further adjusted for the deployer's environment.
    pub environmental_score: f64,
    /// Qualitative band for the base score.
    pub severity: Severity,
    /// Base metric letter-codes as parsed from the vector.
    pub metrics: BTreeMap<String, String>,
}

/// CVSS 2.0 metric weights plus computation slots.
///
/// Optional temporal metrics default to their documented not-defined weights
/// (1.0); collateral damage potential defaults to 0.0 and target distribution
/// to 1.0 per the 2.0 specification.
#[derive(Debug, Clone, PartialEq)]
pub struct Cvss2Metrics {
    pub access_vector: f64,
    pub access_complexity: f64,
    pub authentication: f64,
    pub confidentiality: f64,
    pub integrity: f64,
    pub availability: f64,

    /// Temporal exploitability factor (metric E).
    pub exploitability: f64,
    pub remediation_level: f64,
    pub report_confidence: f64,

    pub collateral_damage_potential: f64,
    pub target_distribution: f64,
    pub confidentiality_requirement: f64,
    pub integrity_requirement: f64,
    pub availability_requirement: f64,

    /// Impact sub-formula result, written by the base-score step and read
    /// back by the environmental step.
    pub impact: f64,

    pub base_score: f64,
    pub temporal_score: f64,
    pub environmental_score: f64,
    pub severity: Severity,
    /// Base metric letter-codes as parsed, for the results snapshot.
    pub metrics: BTreeMap<String, String>,
}

impl Default for Cvss2Metrics {
    fn default() -> Self {
        Self {
            access_vector: 0.0,
            access_complexity: 0.0,
            authentication: 0.0,
            confidentiality: 0.0,
            integrity: 0.0,
            availability: 0.0,
            exploitability: 1.0,
            remediation_level: 1.0,
            report_confidence: 1.0,
            collateral_damage_potential: 0.0,
            target_distribution: 1.0,
            confidentiality_requirement: 1.0,
            integrity_requirement: 1.0,
            availability_requirement: 1.0,
            impact: 0.0,
            base_score: 0.0,
            temporal_score: 0.0,
            environmental_score: 0.0,
            severity: Severity::None,
            metrics: BTreeMap::new(),
        }
    }
}

impl Cvss2Metrics {
    /// Snapshot the finished computation.
    pub fn into_results(self) -> CvssResults {
        CvssResults {
            base_score: self.base_score,
            temporal_score: self.temporal_score,
            environmental_score: self.environmental_score,
            severity: self.severity,
            metrics: self.metrics,
        }
    }
}

/// CVSS 3.0 / 3.1 metric weights plus computation slots.
///
/// The two versions share one shape; `version` selects the impact curve and
/// rounding rule inside the calculator. Modified metrics default to their
/// base counterparts, requirement multipliers to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct Cvss3Metrics {
    pub version: CvssVersion,
    pub scope_changed: bool,
    pub modified_scope_changed: bool,

    pub attack_vector: f64,
    pub attack_complexity: f64,
    pub privileges_required: f64,
    pub user_interaction: f64,
    pub confidentiality: f64,
    pub integrity: f64,
    pub availability: f64,

    pub exploit_code_maturity: f64,
    pub remediation_level: f64,
    pub report_confidence: f64,

    pub modified_attack_vector: f64,
    pub modified_attack_complexity: f64,
    pub modified_privileges_required: f64,
    pub modified_user_interaction: f64,
    pub modified_confidentiality: f64,
    pub modified_integrity: f64,
    pub modified_availability: f64,
    pub confidentiality_requirement: f64,
    pub integrity_requirement: f64,
    pub availability_requirement: f64,

    // Written by the base-score step, read by temporal/environmental.
    pub impact_sub_score: f64,
    pub impact: f64,
    pub exploitability: f64,
    // Written by the environmental step.
    pub modified_impact_sub_score: f64,
    pub modified_impact: f64,
    pub modified_exploitability: f64,

    pub base_score: f64,
    pub temporal_score: f64,
    pub environmental_score: f64,
    pub severity: Severity,
    pub metrics: BTreeMap<String, String>,
}

impl Cvss3Metrics {
    /// Empty object for the given 3.x version, with not-defined defaults in
    /// the temporal and requirement slots.
    pub fn new(version: CvssVersion) -> Self {
        Self {
            version,
            scope_changed: false,
            modified_scope_changed: false,
            attack_vector: 0.0,
            attack_complexity: 0.0,
            privileges_required: 0.0,
            user_interaction: 0.0,
            confidentiality: 0.0,
            integrity: 0.0,
            availability: 0.0,
            exploit_code_maturity: 1.0,
            remediation_level: 1.0,
            report_confidence: 1.0,
            modified_attack_vector: 0.0,
            modified_attack_complexity: 0.0,
            modified_privileges_required: 0.0,
            modified_user_interaction: 0.0,
            modified_confidentiality: 0.0,
            modified_integrity: 0.0,
            modified_availability: 0.0,
            confidentiality_requirement: 1.0,
            integrity_requirement: 1.0,
            availability_requirement: 1.0,
            impact_sub_score: 0.0,
            impact: 0.0,
            exploitability: 0.0,
            modified_impact_sub_score: 0.0,
            modified_impact: 0.0,
            modified_exploitability: 0.0,
            base_score: 0.0,
            temporal_score: 0.0,
            environmental_score: 0.0,
            severity: Severity::None,
            metrics: BTreeMap::new(),
        }
    }

    /// Snapshot the finished computation.
    pub fn into_results(self) -> CvssResults {
        CvssResults {
            base_score: self.base_score,
            temporal_score: self.temporal_score,
            environmental_score: self.environmental_score,
            severity: self.severity,
            metrics: self.metrics,
        }
    }
}

/// CVSS 4.0 value object.
///
/// 4.0 scoring is table-driven rather than weight-algebraic, so this variant
/// keeps the parsed letter-codes and resolves effective values on demand
/// instead of storing numeric weights.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cvss4Metrics {
    /// Metric letter-codes exactly as parsed from the vector.
    pub raw: BTreeMap<String, String>,

    pub base_score: f64,
    pub temporal_score: f64,
    pub environmental_score: f64,
    pub severity: Severity,
}

impl Cvss4Metrics {
    /// Effective value of a metric: the environmental override wins when
    /// defined, then the parsed value, then the metric's documented default
    /// (E defaults to A, the requirement multipliers to H).
    pub fn value(&self, metric: &str) -> &str {
        if let Some(modified) = self.raw.get(&format!("M{metric}")) {
            if modified != "X" {
                return modified;
            }
        }
        if let Some(value) = self.raw.get(metric) {
            if value != "X" {
                return value;
            }
        }
        match metric {
            "E" => "A",
            "CR" | "IR" | "AR" => "H",
            _ => "X",
        }
    }

    /// Snapshot the finished computation. The raw-metric map is intentionally
    /// not exposed for 4.0.
    pub fn into_results(self) -> CvssResults {
        CvssResults {
            base_score: self.base_score,
            temporal_score: self.temporal_score,
            environmental_score: self.environmental_score,
            severity: self.severity,
            metrics: BTreeMap::new(),
        }
    }
}

/// Distances between a 4.0 vector and the highest-severity vectors of its
/// macro-vector, one slot per scored equivalence-class axis (EQ3 and EQ6 are
/// tracked jointly in the third slot).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cvss4Distance {
    pub eq_one: f64,
    pub eq_two: f64,
    pub eq_three: f64,
    pub eq_four: f64,
    pub eq_five: f64,
}

/// A parsed vector, tagged by formula family.
///
/// The facade matches on this to pick the calculator, so a 2.0 object can
/// never reach the 4.0 calculator or vice versa.
#[derive(Debug, Clone, PartialEq)]
pub enum CvssVector {
    V2(Cvss2Metrics),
    V3(Cvss3Metrics),
    V4(Cvss4Metrics),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v2_severity_bands() {
        assert_eq!(Severity::from_v2_score(10.0), Severity::High);
        assert_eq!(Severity::from_v2_score(7.0), Severity::High);
        assert_eq!(Severity::from_v2_score(6.9), Severity::Medium);
        assert_eq!(Severity::from_v2_score(4.0), Severity::Medium);
        assert_eq!(Severity::from_v2_score(0.0), Severity::Low);
    }

    #[test]
    fn test_v3_severity_bands() {
        assert_eq!(Severity::from_score(9.0), Severity::Critical);
        assert_eq!(Severity::from_score(8.9), Severity::High);
        assert_eq!(Severity::from_score(4.0), Severity::Medium);
        assert_eq!(Severity::from_score(0.1), Severity::Low);
        assert_eq!(Severity::from_score(0.0), Severity::None);
    }

    #[test]
    fn test_severity_letter_codes() {
        assert_eq!(Severity::Critical.to_string(), "C");
        assert_eq!(Severity::None.to_string(), "N");
    }

    #[test]
    fn test_v2_not_defined_defaults() {
        let m = Cvss2Metrics::default();
        assert_eq!(m.exploitability, 1.0);
        assert_eq!(m.remediation_level, 1.0);
        assert_eq!(m.report_confidence, 1.0);
        assert_eq!(m.collateral_damage_potential, 0.0);
        assert_eq!(m.target_distribution, 1.0);
        assert_eq!(m.confidentiality_requirement, 1.0);
    }

    #[test]
    fn test_results_serialize_round_trip() {
        let results = CvssResults {
            base_score: 9.8,
            temporal_score: 9.8,
            environmental_score: 9.8,
            severity: Severity::Critical,
            metrics: BTreeMap::from([("AV".to_string(), "N".to_string())]),
        };
        let json = serde_json::to_string(&results).unwrap();
        assert!(json.contains("\"severity\":\"CRITICAL\""));
        let back: CvssResults = serde_json::from_str(&json).unwrap();
        assert_eq!(back, results);
    }

    #[test]
    fn test_v4_effective_value_defaults_and_overrides() {
        let mut m = Cvss4Metrics::default();
        m.raw.insert("VC".into(), "L".into());
        m.raw.insert("MVC".into(), "H".into());
        m.raw.insert("VI".into(), "N".into());
        m.raw.insert("MVI".into(), "X".into());

        assert_eq!(m.value("VC"), "H");
        assert_eq!(m.value("VI"), "N");
        assert_eq!(m.value("E"), "A");
        assert_eq!(m.value("CR"), "H");
        assert_eq!(m.value("MSI"), "X");
    }
}
