//! Scoring facade: one call from vector string to scores.
//!
//! The pipeline is validate/detect, parse into the version-tagged value
//! object, then run that version's calculators in order (base first; the
//! later steps read slots the base step writes).

use tracing::debug;

use crate::calculators::{v2, v3, v4};
use crate::error::Result;
use crate::metrics::{CvssResults, CvssVector};
use crate::parsers;
use crate::version::CvssVersion;

/// Score a CVSS vector string of any supported version (2.0, 3.0, 3.1, 4.0).
///
/// Returns the base, temporal and environmental scores, the severity band
/// and the base metric letter-codes as parsed. Fails with
/// [`CvssError::InvalidVector`](crate::error::CvssError) when the string
/// matches no supported grammar.
pub fn generate_scores(vector: &str) -> Result<CvssResults> {
    let version = CvssVersion::detect(vector)?;
    debug!(vector, %version, "scoring vector");

    match parsers::parse_vector(vector, version)? {
        CvssVector::V2(mut m) => {
            m.base_score = v2::calculate_base_score(&mut m);
            m.temporal_score = v2::calculate_temporal_score(&m);
            m.environmental_score = v2::calculate_environmental_score(&m);
            m.severity = v2::calculate_severity(&m);
            m.metrics = parsers::v2::parse_base_metrics(vector);
            Ok(m.into_results())
        }
        CvssVector::V3(mut m) => {
            m.base_score = v3::calculate_base_score(&mut m);
            m.temporal_score = v3::calculate_temporal_score(&m);
            m.environmental_score = v3::calculate_environmental_score(&mut m);
            m.severity = v3::calculate_severity(&m);
            m.metrics = parsers::v3::parse_base_metrics(vector);
            Ok(m.into_results())
        }
        CvssVector::V4(mut m) => {
            m.base_score = v4::calculate_base_score(&m)?;
            m.temporal_score = v4::calculate_temporal_score(&m);
            m.environmental_score = v4::calculate_environmental_score(&m);
            m.severity = v4::calculate_severity(&m);
            Ok(m.into_results())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CvssError;
    use crate::metrics::Severity;

    #[test]
    fn test_scores_v2_vector() {
        let results = generate_scores("AV:N/AC:L/Au:N/C:C/I:C/A:C").unwrap();
        assert_eq!(results.base_score, 10.0);
        assert_eq!(results.severity, Severity::High);
        assert_eq!(results.metrics["Au"], "N");
    }

    #[test]
    fn test_scores_v31_vector() {
        let results = generate_scores("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H").unwrap();
        assert_eq!(results.base_score, 9.8);
        assert_eq!(results.severity, Severity::Critical);
        assert_eq!(results.metrics["S"], "U");
    }

    #[test]
    fn test_scores_v4_vector() {
        let results = generate_scores(
            "CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N",
        )
        .unwrap();
        assert_eq!(results.base_score, 9.3);
        assert_eq!(results.temporal_score, 9.3);
        assert_eq!(results.environmental_score, 9.3);
        assert_eq!(results.severity, Severity::Critical);
        assert!(results.metrics.is_empty());
    }

    #[test]
    fn test_scores_v2_temporal_and_environmental() {
        let results =
            generate_scores("AV:N/AC:L/Au:N/C:C/I:C/A:C/E:F/RL:OF/CDP:H/TD:H/CR:M/IR:M/AR:L")
                .unwrap();
        assert_eq!(results.base_score, 10.0);
        assert_eq!(results.temporal_score, 8.3);
        assert_eq!(results.environmental_score, 9.0);
        // Only the six base metrics come back in the map.
        assert_eq!(results.metrics.len(), 6);
    }

    #[test]
    fn test_scores_v30_and_v31_separately() {
        let suffix = "/AV:N/AC:L/PR:L/UI:N/S:C/C:H/I:H/A:H/CR:H/IR:H/AR:H";
        let v30 = generate_scores(&format!("CVSS:3.0{suffix}")).unwrap();
        let v31 = generate_scores(&format!("CVSS:3.1{suffix}")).unwrap();
        assert_eq!(v30.base_score, v31.base_score);
        assert_eq!(v30.environmental_score, 9.9);
        assert_eq!(v31.environmental_score, 10.0);
    }

    #[test]
    fn test_scores_v4_threat_vector() {
        let results = generate_scores(
            "CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N/E:U",
        )
        .unwrap();
        assert_eq!(results.base_score, 8.1);
        assert_eq!(results.severity, Severity::High);
    }

    #[test]
    fn test_scores_v4_no_impact_as_zero() {
        let results = generate_scores(
            "CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:N/VI:N/VA:N/SC:N/SI:N/SA:N",
        )
        .unwrap();
        assert_eq!(results.base_score, 0.0);
        assert_eq!(results.severity, Severity::None);
    }

    #[test]
    fn test_rejects_invalid_vector() {
        assert_eq!(
            generate_scores("CVSS:3.1/AV:Z/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"),
            Err(CvssError::InvalidVector)
        );
        assert_eq!(generate_scores(""), Err(CvssError::InvalidVector));

        let err = generate_scores("not a vector").unwrap_err();
        assert_eq!(err.to_string(), "The vector you have provided is invalid");
        assert_eq!(err.code(), 403);
    }
}
