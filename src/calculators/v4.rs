//! CVSS 4.0 score calculator.
//!
//! 4.0 abandons the additive-impact algebra of 2.0/3.x for a table-driven
//! model: the vector's metrics are partitioned into equivalence classes,
//! the resulting macro-vector is looked up in the published score table,
//! and the final score interpolates between that score and the next-lower
//! macro-vector on each class axis, proportionally to how far the vector
//! sits from the highest-severity vectors of its own macro-vector.
//!
//! Threat and environmental metrics participate in the equivalence classes
//! directly, so the single score already carries them; the temporal and
//! environmental slots repeat it.

use crate::calculators::v4_lookup as lookup;
use crate::error::{CvssError, Result};
use crate::metrics::{Cvss4Distance, Cvss4Metrics, Severity};

const STEP: f64 = 0.1;

const IMPACT_METRICS: [&str; 6] = ["VC", "VI", "VA", "SC", "SI", "SA"];

/// Metrics that participate in the severity-distance computation, grouped
/// into their equivalence-class axes by [`severity_distance`].
const DISTANCE_METRICS: [&str; 14] = [
    "AV", "PR", "UI", "AC", "AT", "VC", "VI", "VA", "SC", "SI", "SA", "CR", "IR", "AR",
];

/// Base score per the v4.0 macro-vector model.
///
/// Returns an error only if the vector's equivalence classes fall outside
/// the published tables, which cannot happen for a validated vector.
pub fn calculate_base_score(m: &Cvss4Metrics) -> Result<f64> {
    // No impact anywhere means no score, before any table work.
    if IMPACT_METRICS.iter().all(|metric| m.value(metric) == "N") {
        return Ok(0.0);
    }

    let eq = equivalence_classes(m);
    let value = lookup::macro_vector_score(eq).ok_or_else(CvssError::invalid_value)?;
    let distance = severity_distance(m, eq)?;

    // Next-lower macro-vector score on each axis, where one exists. EQ3 and
    // EQ6 move jointly; from (0,0) both neighbours exist and the higher
    // score wins.
    let eq1_lower = lookup::macro_vector_score(bump(eq, 0));
    let eq2_lower = lookup::macro_vector_score(bump(eq, 1));
    let eq4_lower = lookup::macro_vector_score(bump(eq, 3));
    let eq5_lower = lookup::macro_vector_score(bump(eq, 4));
    let eq3_eq6_lower = match (eq[2], eq[5]) {
        (0, 0) => {
            let left = lookup::macro_vector_score(bump(eq, 5));
            let right = lookup::macro_vector_score(bump(eq, 2));
            match (left, right) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (a, b) => a.or(b),
            }
        }
        (1, 0) => lookup::macro_vector_score(bump(eq, 5)),
        (0 | 1, 1) => lookup::macro_vector_score(bump(eq, 2)),
        _ => None,
    };

    // Mean of the proportional distances toward the lower macro-vectors,
    // over the axes that have one.
    let mut total = 0.0;
    let mut axes = 0usize;
    let mut add = |lower: Option<f64>, severity_distance: f64, depth: f64| {
        if let Some(lower) = lower {
            total += (value - lower) * (severity_distance / (depth * STEP));
            axes += 1;
        }
    };
    add(eq1_lower, distance.eq_one, lookup::max_severity_eq1(eq[0]));
    add(eq2_lower, distance.eq_two, lookup::max_severity_eq2(eq[1]));
    add(
        eq3_eq6_lower,
        distance.eq_three,
        lookup::max_severity_eq3_eq6(eq[2], eq[5]),
    );
    add(eq4_lower, distance.eq_four, lookup::max_severity_eq4(eq[3]));
    add(eq5_lower, distance.eq_five, lookup::max_severity_eq5(eq[4]));

    let mean = if axes == 0 { 0.0 } else { total / axes as f64 };
    let score = (value - mean).clamp(0.0, 10.0);
    Ok((score * 10.0).round() / 10.0)
}

/// Threat and environmental adjustments are already folded into the score.
pub fn calculate_temporal_score(m: &Cvss4Metrics) -> f64 {
    m.base_score
}

/// See [`calculate_temporal_score`].
pub fn calculate_environmental_score(m: &Cvss4Metrics) -> f64 {
    m.base_score
}

/// Severity band for the score (4.0 uses the 3.x thresholds).
pub fn calculate_severity(m: &Cvss4Metrics) -> Severity {
    Severity::from_score(m.base_score)
}

/// Partition the effective metric values into the six equivalence classes.
fn equivalence_classes(m: &Cvss4Metrics) -> [u8; 6] {
    let (av, pr, ui) = (m.value("AV"), m.value("PR"), m.value("UI"));
    let (ac, at) = (m.value("AC"), m.value("AT"));
    let (vc, vi, va) = (m.value("VC"), m.value("VI"), m.value("VA"));
    let (sc, si, sa) = (m.value("SC"), m.value("SI"), m.value("SA"));
    let (cr, ir, ar) = (m.value("CR"), m.value("IR"), m.value("AR"));

    let eq1 = if av == "N" && pr == "N" && ui == "N" {
        0
    } else if (av == "N" || pr == "N" || ui == "N") && av != "P" {
        1
    } else {
        2
    };
    let eq2 = u8::from(!(ac == "L" && at == "N"));
    let eq3 = if vc == "H" && vi == "H" {
        0
    } else if vc == "H" || vi == "H" || va == "H" {
        1
    } else {
        2
    };
    let eq4 = if m.value("MSI") == "S" || m.value("MSA") == "S" {
        0
    } else if sc == "H" || si == "H" || sa == "H" {
        1
    } else {
        2
    };
    let eq5 = match m.value("E") {
        "A" => 0,
        "P" => 1,
        _ => 2,
    };
    let eq6 = u8::from(!((cr == "H" && vc == "H") || (ir == "H" && vi == "H") || (ar == "H" && va == "H")));

    [eq1, eq2, eq3, eq4, eq5, eq6]
}

fn bump(mut eq: [u8; 6], axis: usize) -> [u8; 6] {
    eq[axis] += 1;
    eq
}

/// Distance of the vector from the highest-severity vectors of its own
/// macro-vector, summed per equivalence-class axis.
///
/// The candidate max vectors are tried in order; the first one every metric
/// sits at or below (all distances non-negative) defines the distances.
fn severity_distance(m: &Cvss4Metrics, eq: [u8; 6]) -> Result<Cvss4Distance> {
    'candidates: for max_vector in lookup::max_composed(eq) {
        let mut distances = [0.0; DISTANCE_METRICS.len()];
        for (slot, metric) in DISTANCE_METRICS.iter().enumerate() {
            let current = lookup::metric_level(metric, m.value(metric))?;
            let max = lookup::metric_level(metric, extract_value(&max_vector, metric)?)?;
            let distance = current - max;
            if distance < 0.0 {
                continue 'candidates;
            }
            distances[slot] = distance;
        }

        let [av, pr, ui, ac, at, vc, vi, va, sc, si, sa, cr, ir, ar] = distances;
        return Ok(Cvss4Distance {
            eq_one: av + pr + ui,
            eq_two: ac + at,
            eq_three: vc + vi + va + cr + ir + ar,
            eq_four: sc + si + sa,
            eq_five: 0.0,
        });
    }
    // Every defined macro-vector has a dominating max vector; not finding
    // one means the tables and the partition disagree.
    Err(CvssError::invalid_value())
}

/// Letter-code of a metric inside a composed max-vector fragment string.
fn extract_value<'a>(max_vector: &'a str, metric: &str) -> Result<&'a str> {
    max_vector
        .split('/')
        .filter_map(|segment| segment.split_once(':'))
        .find(|(name, _)| *name == metric)
        .map(|(_, value)| value)
        .ok_or_else(CvssError::invalid_value)
}
