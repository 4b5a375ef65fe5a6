//! CVSS 2.0 score calculator.
//!
//! Formulas from the CVSS v2.0 guide. Intermediate results are rounded to
//! one decimal exactly where the guide says to round; the order of those
//! roundings is load-bearing and must not be algebraically simplified.

use crate::metrics::{Cvss2Metrics, Severity};

/// Base score. Writes the impact sub-formula result into the value object;
/// the environmental step reads it back for the f(impact) factor.
pub fn calculate_base_score(m: &mut Cvss2Metrics) -> f64 {
    m.impact = impact(m);
    round1((0.6 * m.impact + 0.4 * base_exploitability(m) - 1.5) * f_impact(m.impact))
}

/// Temporal score: base score times the exploitability, remediation-level
/// and report-confidence factors. Requires the base score to be set.
pub fn calculate_temporal_score(m: &Cvss2Metrics) -> f64 {
    round1(m.base_score * m.exploitability * m.remediation_level * m.report_confidence)
}

/// Environmental score: the temporal formula re-run on a requirement-adjusted
/// base, then spread by collateral damage potential and target distribution.
pub fn calculate_environmental_score(m: &Cvss2Metrics) -> f64 {
    let adjusted_temporal =
        adjusted_base(m) * m.exploitability * m.remediation_level * m.report_confidence;

    round1(
        (adjusted_temporal + (10.0 - adjusted_temporal) * m.collateral_damage_potential)
            * m.target_distribution,
    )
}

/// Severity band for the base score.
pub fn calculate_severity(m: &Cvss2Metrics) -> Severity {
    Severity::from_v2_score(m.base_score)
}

fn impact(m: &Cvss2Metrics) -> f64 {
    10.41
        * (1.0 - (1.0 - m.confidentiality) * (1.0 - m.integrity) * (1.0 - m.availability))
}

fn base_exploitability(m: &Cvss2Metrics) -> f64 {
    20.0 * m.access_vector * m.access_complexity * m.authentication
}

/// f(impact) is 0 only when impact is exactly 0; the exact comparison is
/// intentional.
fn f_impact(impact: f64) -> f64 {
    if impact == 0.0 {
        0.0
    } else {
        1.176
    }
}

/// Adjusted base re-runs the base formula with the requirement-weighted
/// impact. f(impact) still reads the unadjusted impact slot written by the
/// base-score step.
fn adjusted_base(m: &Cvss2Metrics) -> f64 {
    round1((0.6 * adjusted_impact(m) + 0.4 * base_exploitability(m) - 1.5) * f_impact(m.impact))
}

fn adjusted_impact(m: &Cvss2Metrics) -> f64 {
    (10.41
        * (1.0
            - (1.0 - m.confidentiality * m.confidentiality_requirement)
                * (1.0 - m.integrity * m.integrity_requirement)
                * (1.0 - m.availability * m.availability_requirement)))
        .min(10.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_object(
        av: f64,
        ac: f64,
        au: f64,
        c: f64,
        i: f64,
        a: f64,
    ) -> Cvss2Metrics {
        Cvss2Metrics {
            access_vector: av,
            access_complexity: ac,
            authentication: au,
            confidentiality: c,
            integrity: i,
            availability: a,
            ..Cvss2Metrics::default()
        }
    }

    #[test]
    fn test_base_score() {
        let cases = [
            (1.0, 0.71, 0.704, 0.66, 0.66, 0.66, 10.0),
            (0.395, 0.35, 0.704, 0.66, 0.66, 0.66, 6.2),
            (0.395, 0.35, 0.704, 0.0, 0.0, 0.0, 0.0),
        ];
        for (av, ac, au, c, i, a, expected) in cases {
            let mut m = base_object(av, ac, au, c, i, a);
            assert_eq!(calculate_base_score(&mut m), expected);
        }
    }

    #[test]
    fn test_zero_impact_zeroes_base_score() {
        // C=I=A=0 forces impact to exactly 0, and f(impact) kills the score.
        let mut m = base_object(1.0, 0.71, 0.704, 0.0, 0.0, 0.0);
        assert_eq!(calculate_base_score(&mut m), 0.0);
    }

    #[test]
    fn test_temporal_score() {
        let cases = [
            (10.0, 0.95, 0.87, 1.0, 8.3),
            (7.8, 0.95, 0.87, 1.0, 6.4),
            (6.2, 0.90, 0.87, 1.0, 4.9),
        ];
        for (base, e, rl, rc, expected) in cases {
            let m = Cvss2Metrics {
                base_score: base,
                exploitability: e,
                remediation_level: rl,
                report_confidence: rc,
                ..Cvss2Metrics::default()
            };
            assert_eq!(calculate_temporal_score(&m), expected);
        }
    }

    #[test]
    fn test_environmental_score() {
        let mut m = base_object(1.0, 0.71, 0.704, 0.66, 0.66, 0.66);
        m.base_score = calculate_base_score(&mut m);
        m.exploitability = 0.95;
        m.remediation_level = 0.87;
        m.report_confidence = 1.0;
        m.collateral_damage_potential = 0.5;
        m.target_distribution = 1.0;
        m.confidentiality_requirement = 1.0;
        m.integrity_requirement = 1.0;
        m.availability_requirement = 0.5;

        assert_eq!(calculate_environmental_score(&m), 9.0);
    }

    #[test]
    fn test_severity_bands() {
        let mut m = base_object(1.0, 0.71, 0.704, 0.66, 0.66, 0.66);
        m.base_score = calculate_base_score(&mut m);
        assert_eq!(calculate_severity(&m), Severity::High);

        let mut low = base_object(0.395, 0.35, 0.45, 0.0, 0.0, 0.275);
        low.base_score = calculate_base_score(&mut low);
        assert_eq!(calculate_severity(&low), Severity::Low);
    }
}
