//! CVSS 2.0 vector parser.
//!
//! Weight constants come from the CVSS v2.0 guide's published tables. The
//! 2.0 wire format has no version prefix and allows multi-letter codes
//! (e.g. `RL:OF`, `CDP:LM`).

use std::collections::BTreeMap;

use crate::error::{CvssError, Result};
use crate::metrics::Cvss2Metrics;
use crate::parsers::metric_pairs;

const BASE_METRICS: [&str; 6] = ["AV", "AC", "Au", "C", "I", "A"];

/// Parse a validated 2.0 vector into a populated value object.
///
/// Absent temporal metrics keep their not-defined weight of 1.0; collateral
/// damage potential defaults to 0.0 and target distribution to 1.0.
pub fn parse_vector(vector: &str) -> Result<Cvss2Metrics> {
    let mut m = Cvss2Metrics::default();
    let mut seen = Vec::new();

    for (metric, value) in metric_pairs(vector) {
        let weight = weight(metric, value)?;
        match metric {
            "AV" => m.access_vector = weight,
            "AC" => m.access_complexity = weight,
            "Au" => m.authentication = weight,
            "C" => m.confidentiality = weight,
            "I" => m.integrity = weight,
            "A" => m.availability = weight,
            "E" => m.exploitability = weight,
            "RL" => m.remediation_level = weight,
            "RC" => m.report_confidence = weight,
            "CDP" => m.collateral_damage_potential = weight,
            "TD" => m.target_distribution = weight,
            "CR" => m.confidentiality_requirement = weight,
            "IR" => m.integrity_requirement = weight,
            "AR" => m.availability_requirement = weight,
            _ => return Err(CvssError::invalid_value()),
        }
        if BASE_METRICS.contains(&metric) {
            seen.push(metric);
        }
    }

    if BASE_METRICS.iter().any(|base| !seen.contains(base)) {
        return Err(CvssError::missing_value());
    }
    Ok(m)
}

/// Base metric letter-codes as given, for audit/round-trip display.
pub fn parse_base_metrics(vector: &str) -> BTreeMap<String, String> {
    metric_pairs(vector)
        .filter(|(metric, _)| BASE_METRICS.contains(metric))
        .map(|(metric, value)| (metric.to_string(), value.to_string()))
        .collect()
}

/// CVSS v2.0 weight table. Every cell is a published constant; anything
/// outside the table is an invalid value.
fn weight(metric: &str, value: &str) -> Result<f64> {
    let weight = match (metric, value) {
        ("AV", "L") => 0.395,
        ("AV", "A") => 0.646,
        ("AV", "N") => 1.0,
        ("AC", "H") => 0.35,
        ("AC", "M") => 0.61,
        ("AC", "L") => 0.71,
        ("Au", "M") => 0.45,
        ("Au", "S") => 0.56,
        ("Au", "N") => 0.704,
        ("C" | "I" | "A", "N") => 0.0,
        ("C" | "I" | "A", "P") => 0.275,
        ("C" | "I" | "A", "C") => 0.660,
        ("E", "U") => 0.85,
        ("E", "POC") => 0.9,
        ("E", "F") => 0.95,
        ("E", "H" | "ND") => 1.0,
        ("RL", "OF") => 0.87,
        ("RL", "TF") => 0.90,
        ("RL", "W") => 0.95,
        ("RL", "U" | "ND") => 1.0,
        ("RC", "UC") => 0.90,
        ("RC", "UR") => 0.95,
        ("RC", "C" | "ND") => 1.0,
        ("CDP", "N" | "ND") => 0.0,
        ("CDP", "L") => 0.1,
        ("CDP", "LM") => 0.3,
        ("CDP", "MH") => 0.4,
        ("CDP", "H") => 0.5,
        ("TD", "N") => 0.0,
        ("TD", "L") => 0.25,
        ("TD", "M") => 0.75,
        ("TD", "H" | "ND") => 1.0,
        ("CR" | "IR" | "AR", "L") => 0.5,
        ("CR" | "IR" | "AR", "M") => 1.0,
        ("CR" | "IR" | "AR", "H") => 1.51,
        ("CR" | "IR" | "AR", "ND") => 1.0,
        _ => return Err(CvssError::invalid_value()),
    };
    Ok(weight)
}
