//! Vector parsers, one per CVSS formula family.
//!
//! Parsers assume their input already passed grammar validation and do not
//! re-validate; an unrecognized metric-code or letter at this stage surfaces
//! as [`CvssError::InvalidValue`](crate::error::CvssError). Each parser maps
//! letter-codes through its version's published weight table and fills in
//! documented not-defined defaults for absent optional metrics.

pub mod v2;
pub mod v3;
pub mod v4;

use crate::error::Result;
use crate::metrics::CvssVector;
use crate::version::CvssVersion;

/// Parse a validated vector into its version-tagged value object.
pub fn parse_vector(vector: &str, version: CvssVersion) -> Result<CvssVector> {
    match version {
        CvssVersion::V2_0 => Ok(CvssVector::V2(v2::parse_vector(vector)?)),
        CvssVersion::V3_0 | CvssVersion::V3_1 => Ok(CvssVector::V3(v3::parse_vector(vector)?)),
        CvssVersion::V4_0 => Ok(CvssVector::V4(v4::parse_vector(vector)?)),
    }
}

/// Split a vector into (metric-code, letter-code) pairs.
///
/// Segments without a `:` separator are skipped; the loose 3.x grammar can
/// let such tokens through. Surrounding parentheses, seen in some 2.0 feeds,
/// are stripped.
fn metric_pairs(vector: &str) -> impl Iterator<Item = (&str, &str)> {
    vector
        .trim_matches(|c| c == '(' || c == ')')
        .split('/')
        .filter_map(|segment| segment.split_once(':'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_pairs_split() {
        let pairs: Vec<_> = metric_pairs("AV:N/AC:L/Au:N").collect();
        assert_eq!(pairs, vec![("AV", "N"), ("AC", "L"), ("Au", "N")]);
    }

    #[test]
    fn test_metric_pairs_strip_parentheses() {
        let pairs: Vec<_> = metric_pairs("(AV:N/AC:L)").collect();
        assert_eq!(pairs, vec![("AV", "N"), ("AC", "L")]);
    }

    #[test]
    fn test_tagged_union_selection() {
        let v2 = parse_vector("AV:N/AC:L/Au:N/C:C/I:C/A:C", CvssVersion::V2_0).unwrap();
        assert!(matches!(v2, CvssVector::V2(_)));

        let v3 = parse_vector(
            "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H",
            CvssVersion::V3_1,
        )
        .unwrap();
        assert!(matches!(v3, CvssVector::V3(_)));

        let v4 = parse_vector(
            "CVSS:4.0/AV:N/AC:L/AT:N/PR:N/UI:N/VC:H/VI:H/VA:H/SC:N/SI:N/SA:N",
            CvssVersion::V4_0,
        )
        .unwrap();
        assert!(matches!(v4, CvssVector::V4(_)));
    }
}
