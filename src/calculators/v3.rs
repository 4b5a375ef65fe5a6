//! CVSS 3.0 / 3.1 score calculator.
//!
//! One shared implementation of the 3.x base-score algebra, parameterized by
//! the two places where the versions deliberately diverge: the rounding rule
//! and the changed-scope modified-impact curve. Both divergences are
//! deliberate revisions between the published versions and have to be
//! reproduced exactly; they are the most common source of
//! cross-implementation score mismatches.

use crate::metrics::{Cvss3Metrics, Severity};
use crate::version::CvssVersion;

/// Base score. Writes the impact sub-score, impact and exploitability into
/// the value object; the temporal and environmental steps read them back.
pub fn calculate_base_score(m: &mut Cvss3Metrics) -> f64 {
    m.impact_sub_score = impact_sub_score(m);
    m.impact = impact(m);
    m.exploitability = exploitability(m);

    if m.impact <= 0.0 {
        return 0.0;
    }

    let sum = if m.scope_changed {
        1.08 * (m.impact + m.exploitability)
    } else {
        m.impact + m.exploitability
    };
    round_up(m.version, sum.min(10.0))
}

/// Temporal score: base score times exploit-code-maturity, remediation-level
/// and report-confidence. Requires the base score to be set.
pub fn calculate_temporal_score(m: &Cvss3Metrics) -> f64 {
    round_up(
        m.version,
        m.base_score * m.exploit_code_maturity * m.remediation_level * m.report_confidence,
    )
}

/// Environmental score: the base algebra re-run on modified metrics with the
/// requirement multipliers, then the temporal multipliers reapplied to the
/// already-rounded result (the double round-up is specified, not an
/// accident).
pub fn calculate_environmental_score(m: &mut Cvss3Metrics) -> f64 {
    m.modified_impact_sub_score = modified_impact_sub_score(m);
    m.modified_impact = modified_impact(m);
    m.modified_exploitability = modified_exploitability(m);

    if m.modified_impact <= 0.0 {
        return 0.0;
    }

    let sum = if m.modified_scope_changed {
        1.08 * (m.modified_impact + m.modified_exploitability)
    } else {
        m.modified_impact + m.modified_exploitability
    };
    let adjusted = round_up(m.version, sum.min(10.0));

    round_up(
        m.version,
        adjusted * m.exploit_code_maturity * m.remediation_level * m.report_confidence,
    )
}

/// Severity band for the base score.
pub fn calculate_severity(m: &Cvss3Metrics) -> Severity {
    Severity::from_score(m.base_score)
}

fn impact_sub_score(m: &Cvss3Metrics) -> f64 {
    1.0 - (1.0 - m.confidentiality) * (1.0 - m.integrity) * (1.0 - m.availability)
}

/// The base impact curve is shared by 3.0 and 3.1; only the modified-impact
/// curve was revised between them.
fn impact(m: &Cvss3Metrics) -> f64 {
    if m.scope_changed {
        7.52 * (m.impact_sub_score - 0.029) - 3.25 * (m.impact_sub_score - 0.02).powi(15)
    } else {
        6.42 * m.impact_sub_score
    }
}

fn exploitability(m: &Cvss3Metrics) -> f64 {
    8.22 * m.attack_vector * m.attack_complexity * m.privileges_required * m.user_interaction
}

fn modified_impact_sub_score(m: &Cvss3Metrics) -> f64 {
    (1.0 - (1.0 - m.confidentiality_requirement * m.modified_confidentiality)
        * (1.0 - m.integrity_requirement * m.modified_integrity)
        * (1.0 - m.availability_requirement * m.modified_availability))
        .min(0.915)
}

/// Changed-scope modified impact is where 3.0 and 3.1 part ways: 3.1 scales
/// the sub-score by 0.9731 and drops the exponent from 15 to 13.
fn modified_impact(m: &Cvss3Metrics) -> f64 {
    if !m.modified_scope_changed {
        return 6.42 * m.modified_impact_sub_score;
    }
    match m.version {
        CvssVersion::V3_0 => {
            7.52 * (m.modified_impact_sub_score - 0.029)
                - 3.25 * (m.modified_impact_sub_score - 0.02).powi(15)
        }
        _ => {
            7.52 * (m.modified_impact_sub_score - 0.029)
                - 3.25 * (m.modified_impact_sub_score * 0.9731 - 0.02).powi(13)
        }
    }
}

fn modified_exploitability(m: &Cvss3Metrics) -> f64 {
    8.22 * m.modified_attack_vector
        * m.modified_attack_complexity
        * m.modified_privileges_required
        * m.modified_user_interaction
}

/// Round up to one decimal, using the version's own rule.
///
/// 3.0 takes a plain ceiling at one decimal. 3.1 rescales to an integer at
/// five decimals first, which avoids the floating-point artifacts the plain
/// ceiling is prone to (e.g. an input conceptually equal to 8.6 represented
/// as 8.600000000000001 must not round to 8.7).
pub fn round_up(version: CvssVersion, value: f64) -> f64 {
    if version == CvssVersion::V3_0 {
        (value * 10.0).ceil() / 10.0
    } else {
        let scaled = (value * 100_000.0).round() as i64;
        if scaled % 10_000 == 0 {
            scaled as f64 / 100_000.0
        } else {
            ((scaled / 10_000) as f64 + 1.0) / 10.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::v3::parse_vector;

    fn scored(vector: &str) -> Cvss3Metrics {
        let mut m = parse_vector(vector).unwrap();
        m.base_score = calculate_base_score(&mut m);
        m
    }

    #[test]
    fn test_base_score_unchanged_scope() {
        let m = scored("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H");
        assert_eq!(m.base_score, 9.8);
        assert_eq!(calculate_severity(&m), Severity::Critical);
    }

    #[test]
    fn test_base_score_changed_scope() {
        let m = scored("CVSS:3.1/AV:N/AC:L/PR:L/UI:N/S:C/C:L/I:L/A:N");
        assert_eq!(m.base_score, 6.4);
        assert_eq!(calculate_severity(&m), Severity::Medium);
    }

    #[test]
    fn test_no_impact_is_exactly_zero() {
        let m = scored("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:N/I:N/A:N");
        assert_eq!(m.base_score, 0.0);
        assert_eq!(calculate_severity(&m), Severity::None);
    }

    #[test]
    fn test_temporal_score() {
        let mut m = scored("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H/E:P/RL:O/RC:C");
        m.temporal_score = calculate_temporal_score(&m);
        assert_eq!(m.temporal_score, 8.8);
    }

    #[test]
    fn test_environmental_score_requirements() {
        let mut m = scored("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H/CR:L/IR:L/AR:L");
        m.environmental_score = calculate_environmental_score(&mut m);
        assert_eq!(m.environmental_score, 8.0);
        // The clamp keeps the modified impact sub-score at or below 0.915.
        assert!(m.modified_impact_sub_score <= 0.915);
    }

    #[test]
    fn test_v30_and_v31_curves_stay_distinct() {
        // Same metrics, changed modified scope: the two versions' modified
        // impact curves and rounding rules land on different scores.
        let suffix = "/AV:N/AC:L/PR:L/UI:N/S:C/C:H/I:H/A:H/CR:H/IR:H/AR:H";
        let mut v30 = scored(&format!("CVSS:3.0{suffix}"));
        let mut v31 = scored(&format!("CVSS:3.1{suffix}"));
        assert_eq!(v30.base_score, v31.base_score);

        let env30 = calculate_environmental_score(&mut v30);
        let env31 = calculate_environmental_score(&mut v31);
        assert_eq!(env30, 9.9);
        assert_eq!(env31, 10.0);
    }

    #[test]
    fn test_round_up_rules_agree_on_exact_decimals() {
        for i in 0..=100 {
            let value = f64::from(i) / 10.0;
            assert_eq!(
                round_up(CvssVersion::V3_0, value),
                round_up(CvssVersion::V3_1, value),
                "{value}"
            );
        }
    }

    #[test]
    fn test_v31_round_up_avoids_float_artifacts() {
        // 0.1 + 0.2 is 0.30000000000000004 in binary floating point; the
        // 3.1 rule must still treat it as 0.3, while the 3.0 ceiling
        // faithfully reproduces the artifact.
        assert_eq!(round_up(CvssVersion::V3_1, 0.1 + 0.2), 0.3);
        assert_eq!(round_up(CvssVersion::V3_0, 0.1 + 0.2), 0.4);
        // Real differences above the five-decimal precision still round up.
        assert_eq!(round_up(CvssVersion::V3_1, 4.02), 4.1);
        assert_eq!(round_up(CvssVersion::V3_1, 8.60001), 8.7);
    }
}
