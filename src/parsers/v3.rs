//! CVSS 3.0 / 3.1 vector parser (the two versions share one wire grammar
//! and weight table; only the calculators diverge).
//!
//! Weight constants come from the CVSS v3.1 specification tables, which are
//! identical to v3.0's. The privileges-required weight depends on scope, and
//! its modified counterpart on modified scope, so letter-codes are collected
//! first and resolved to weights afterwards.

use std::collections::BTreeMap;

use crate::error::{CvssError, Result};
use crate::metrics::Cvss3Metrics;
use crate::parsers::metric_pairs;
use crate::version::CvssVersion;

const BASE_METRICS: [&str; 8] = ["AV", "AC", "PR", "UI", "S", "C", "I", "A"];
const KNOWN_METRICS: [&str; 23] = [
    "AV", "AC", "PR", "UI", "S", "C", "I", "A", "E", "RL", "RC", "CR", "IR", "AR", "MAV", "MAC",
    "MPR", "MUI", "MS", "MC", "MI", "MA", "CVSS",
];

/// Parse a validated 3.x vector into a populated value object.
///
/// The version tag is read back out of the `CVSS:` prefix. Absent temporal
/// metrics keep weight 1.0; absent modified metrics inherit their base
/// letter-code; absent requirements default to 1.0.
pub fn parse_vector(vector: &str) -> Result<Cvss3Metrics> {
    let mut codes: BTreeMap<&str, &str> = BTreeMap::new();
    for (metric, value) in metric_pairs(vector) {
        if !KNOWN_METRICS.contains(&metric) {
            return Err(CvssError::invalid_value());
        }
        codes.insert(metric, value);
    }

    let version = match codes.get("CVSS") {
        Some(&"3.0") => CvssVersion::V3_0,
        Some(&"3.1") => CvssVersion::V3_1,
        _ => return Err(CvssError::missing_value()),
    };

    let mut m = Cvss3Metrics::new(version);
    m.scope_changed = scope_changed(mandatory(&codes, "S")?)?;
    m.modified_scope_changed = match codes.get("MS") {
        Some(&code) if code != "X" => scope_changed(code)?,
        _ => m.scope_changed,
    };

    m.attack_vector = attack_vector_weight(mandatory(&codes, "AV")?)?;
    m.attack_complexity = attack_complexity_weight(mandatory(&codes, "AC")?)?;
    m.privileges_required = privileges_weight(mandatory(&codes, "PR")?, m.scope_changed)?;
    m.user_interaction = user_interaction_weight(mandatory(&codes, "UI")?)?;
    m.confidentiality = impact_weight(mandatory(&codes, "C")?)?;
    m.integrity = impact_weight(mandatory(&codes, "I")?)?;
    m.availability = impact_weight(mandatory(&codes, "A")?)?;

    if let Some(code) = defined(&codes, "E") {
        m.exploit_code_maturity = exploit_maturity_weight(code)?;
    }
    if let Some(code) = defined(&codes, "RL") {
        m.remediation_level = remediation_weight(code)?;
    }
    if let Some(code) = defined(&codes, "RC") {
        m.report_confidence = confidence_weight(code)?;
    }

    // Modified base metrics inherit the base letter-code when not defined.
    // Modified privileges-required is always weighted under modified scope,
    // including when it inherits the base letter.
    m.modified_attack_vector = attack_vector_weight(effective(&codes, "MAV", "AV")?)?;
    m.modified_attack_complexity = attack_complexity_weight(effective(&codes, "MAC", "AC")?)?;
    m.modified_privileges_required =
        privileges_weight(effective(&codes, "MPR", "PR")?, m.modified_scope_changed)?;
    m.modified_user_interaction = user_interaction_weight(effective(&codes, "MUI", "UI")?)?;
    m.modified_confidentiality = impact_weight(effective(&codes, "MC", "C")?)?;
    m.modified_integrity = impact_weight(effective(&codes, "MI", "I")?)?;
    m.modified_availability = impact_weight(effective(&codes, "MA", "A")?)?;

    if let Some(code) = defined(&codes, "CR") {
        m.confidentiality_requirement = requirement_weight(code)?;
    }
    if let Some(code) = defined(&codes, "IR") {
        m.integrity_requirement = requirement_weight(code)?;
    }
    if let Some(code) = defined(&codes, "AR") {
        m.availability_requirement = requirement_weight(code)?;
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

fn mandatory<'a>(codes: &BTreeMap<&str, &'a str>, metric: &str) -> Result<&'a str> {
    codes
        .get(metric)
        .copied()
        .ok_or_else(CvssError::missing_value)
}

/// An optional metric counts as defined only when present and not `X`.
fn defined<'a>(codes: &BTreeMap<&str, &'a str>, metric: &str) -> Option<&'a str> {
    codes.get(metric).copied().filter(|code| *code != "X")
}

/// Letter-code of a modified metric, falling back to its base counterpart.
fn effective<'a>(
    codes: &BTreeMap<&str, &'a str>,
    modified: &str,
    base: &str,
) -> Result<&'a str> {
    match defined(codes, modified) {
        Some(code) => Ok(code),
        None => mandatory(codes, base),
    }
}

fn scope_changed(code: &str) -> Result<bool> {
    match code {
        "U" => Ok(false),
        "C" => Ok(true),
        _ => Err(CvssError::invalid_value()),
    }
}

fn attack_vector_weight(code: &str) -> Result<f64> {
    match code {
        "N" => Ok(0.85),
        "A" => Ok(0.62),
        "L" => Ok(0.55),
        "P" => Ok(0.2),
        _ => Err(CvssError::invalid_value()),
    }
}

fn attack_complexity_weight(code: &str) -> Result<f64> {
    match code {
        "L" => Ok(0.77),
        "H" => Ok(0.44),
        _ => Err(CvssError::invalid_value()),
    }
}

/// Privileges-required weights are scope-sensitive: L and H score higher
/// when a scope change is in play.
fn privileges_weight(code: &str, scope_changed: bool) -> Result<f64> {
    match (code, scope_changed) {
        ("N", _) => Ok(0.85),
        ("L", false) => Ok(0.62),
        ("L", true) => Ok(0.68),
        ("H", false) => Ok(0.27),
        ("H", true) => Ok(0.5),
        _ => Err(CvssError::invalid_value()),
    }
}

fn user_interaction_weight(code: &str) -> Result<f64> {
    match code {
        "N" => Ok(0.85),
        "R" => Ok(0.62),
        _ => Err(CvssError::invalid_value()),
    }
}

fn impact_weight(code: &str) -> Result<f64> {
    match code {
        "H" => Ok(0.56),
        "L" => Ok(0.22),
        "N" => Ok(0.0),
        _ => Err(CvssError::invalid_value()),
    }
}

fn exploit_maturity_weight(code: &str) -> Result<f64> {
    match code {
        "H" => Ok(1.0),
        "F" => Ok(0.97),
        "P" => Ok(0.94),
        "U" => Ok(0.91),
        _ => Err(CvssError::invalid_value()),
    }
}

fn remediation_weight(code: &str) -> Result<f64> {
    match code {
        "U" => Ok(1.0),
        "W" => Ok(0.97),
        "T" => Ok(0.96),
        "O" => Ok(0.95),
        _ => Err(CvssError::invalid_value()),
    }
}

fn confidence_weight(code: &str) -> Result<f64> {
    match code {
        "C" => Ok(1.0),
        "R" => Ok(0.96),
        "U" => Ok(0.92),
        _ => Err(CvssError::invalid_value()),
    }
}

fn requirement_weight(code: &str) -> Result<f64> {
    match code {
        "H" => Ok(1.5),
        "M" => Ok(1.0),
        "L" => Ok(0.5),
        _ => Err(CvssError::invalid_value()),
    }
}
