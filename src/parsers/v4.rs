//! CVSS 4.0 vector parser.
//!
//! 4.0 metrics stay as letter-codes: the calculator resolves effective
//! values and maps them through the macro-vector tables itself, so there is
//! no weight lookup here. The parser records every metric as given and only
//! checks that the codes are ones 4.0 defines and that the mandatory block
//! is complete.

use tracing::debug;

use crate::error::{CvssError, Result};
use crate::metrics::Cvss4Metrics;
use crate::parsers::metric_pairs;

/// Metrics every 4.0 vector must carry, in vector order.
const BASE_METRICS: [&str; 11] = [
    "AV", "AC", "AT", "PR", "UI", "VC", "VI", "VA", "SC", "SI", "SA",
];

/// Every metric-code 4.0 defines, including the supplemental group, which is
/// recorded but never scored.
const KNOWN_METRICS: [&str; 33] = [
    "CVSS", "AV", "AC", "AT", "PR", "UI", "VC", "VI", "VA", "SC", "SI", "SA", "E", "CR", "IR",
    "AR", "MAV", "MAC", "MAT", "MPR", "MUI", "MVC", "MVI", "MVA", "MSC", "MSI", "MSA", "S", "AU",
    "R", "V", "RE", "U",
];

/// Parse a validated 4.0 vector into its value object.
pub fn parse_vector(vector: &str) -> Result<Cvss4Metrics> {
    debug!(vector, "parsing CVSS 4.0 vector");
    let mut m = Cvss4Metrics::default();

    for (metric, value) in metric_pairs(vector) {
        if !KNOWN_METRICS.contains(&metric) {
            return Err(CvssError::invalid_value());
        }
        if metric == "CVSS" {
            continue;
        }
        m.raw.insert(metric.to_string(), value.to_string());
    }

    for metric in BASE_METRICS {
        if !m.raw.contains_key(metric) {
            return Err(CvssError::missing_value());
        }
    }
    Ok(m)
}
