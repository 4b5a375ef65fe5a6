//! Vector grammar validation and CVSS version detection.
//!
//! Each CVSS major version defines its own vector grammar. Detection tries
//! the grammars in precedence order 4.0 → 3.x → 2.0 and stops at the first
//! match, so every input string is classified as exactly one of
//! {4.0, 3.1, 3.0, 2.0, invalid}.
//!
//! The 3.x grammar only checks the mandatory base block; malformed optional
//! metrics are accepted silently. That looseness is inherited behavior, kept
//! on purpose so acceptance of real-world vectors does not change.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::error::{CvssError, Result};

/// CVSS 4.0 mandatory prefix: the version tag followed by the 11 base
/// metrics in fixed order, each with its fixed alphabet.
static V4_BASE_REGEX: Lazy<std::result::Result<Regex, regex_lite::Error>> = Lazy::new(|| {
    Regex::new(
        r"^CVSS:4\.0/AV:[NALP]/AC:[LH]/AT:[NP]/PR:[NLH]/UI:[NPA]/VC:[NLH]/VI:[NLH]/VA:[NLH]/SC:[NLH]/SI:[NLH]/SA:[NLH]",
    )
});

/// CVSS 4.0 optional tail: threat, environmental and supplemental metrics in
/// `/KEY:VALUE` form, unordered and individually optional. The remainder
/// after the base block must match this fully; any leftover token is invalid.
static V4_OPTIONAL_REGEX: Lazy<std::result::Result<Regex, regex_lite::Error>> = Lazy::new(|| {
    Regex::new(
        r"^(/(E:[APU]|CR:[HML]|IR:[HML]|AR:[HML]|MAV:[NALP]|MAC:[LH]|MAT:[NP]|MPR:[NLH]|MUI:[NPA]|MVC:[NLH]|MVI:[NLH]|MVA:[NLH]|MSC:[NLH]|MSI:[SNLH]|MSA:[SNLH]|S:[NP]|AU:[YN]|R:[AIU]|V:[CD]|RE:[LMH]|U:[CGAR]))*$",
    )
});

/// CVSS 3.x mandatory prefix. Optional metrics are deliberately not
/// grammar-checked (see module docs).
static V3_REGEX: Lazy<std::result::Result<Regex, regex_lite::Error>> = Lazy::new(|| {
    Regex::new(
        r"^CVSS:(3\.1|3\.0)/AV:[NALP]/AC:[LH]/PR:[NLH]/UI:[NR]/S:[UC]/C:[NLH]/I:[NLH]/A:[NLH]",
    )
});

/// CVSS 2.0 has no version prefix on the wire; the base block is matched
/// anywhere in the string, by elimination after 4.0 and 3.x fail.
static V2_REGEX: Lazy<std::result::Result<Regex, regex_lite::Error>> =
    Lazy::new(|| Regex::new(r"AV:[LAN]/AC:[HML]/Au:[MSN]/C:[NCP]/I:[NCP]/A:[NCP]"));

/// The CVSS specification version a vector string belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CvssVersion {
    /// CVSS 2.0
    V2_0,
    /// CVSS 3.0
    V3_0,
    /// CVSS 3.1
    V3_1,
    /// CVSS 4.0
    V4_0,
}

impl CvssVersion {
    /// Detect which CVSS version a vector string belongs to.
    ///
    /// Precedence is 4.0, then 3.x, then 2.0; the first grammar that matches
    /// wins. Failing all three is a hard [`CvssError::InvalidVector`].
    pub fn detect(vector: &str) -> Result<Self> {
        if is_valid_v4_vector(vector) {
            return Ok(Self::V4_0);
        }
        if is_valid_v3_vector(vector) {
            return match vector.split('/').next() {
                Some("CVSS:3.1") => Ok(Self::V3_1),
                Some("CVSS:3.0") => Ok(Self::V3_0),
                _ => Err(CvssError::invalid_vector()),
            };
        }
        if is_valid_v2_vector(vector) {
            return Ok(Self::V2_0);
        }
        Err(CvssError::invalid_vector())
    }

    /// Version tag as it appears in vector prefixes ("2.0" has no prefix on
    /// the wire but is still rendered here).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V2_0 => "2.0",
            Self::V3_0 => "3.0",
            Self::V3_1 => "3.1",
            Self::V4_0 => "4.0",
        }
    }
}

impl std::fmt::Display for CvssVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a vector string matches any supported CVSS grammar.
///
/// Pure predicate; no side effects.
pub fn validate(vector: &str) -> bool {
    is_valid_v4_vector(vector) || is_valid_v3_vector(vector) || is_valid_v2_vector(vector)
}

/// Two-phase CVSS 4.0 check: the anchored base regex consumes the mandatory
/// block, then the remainder (if any) must fully match the optional grammar.
/// The split exists because optional metrics are unordered and individually
/// optional, unlike the strictly ordered base block.
fn is_valid_v4_vector(vector: &str) -> bool {
    let Ok(base) = V4_BASE_REGEX.as_ref() else {
        return false;
    };
    let Some(matched) = base.find(vector) else {
        return false;
    };

    let optional = &vector[matched.end()..];
    if optional.is_empty() {
        return true;
    }
    match V4_OPTIONAL_REGEX.as_ref() {
        Ok(re) => re.is_match(optional),
        Err(_) => false,
    }
}

fn is_valid_v3_vector(vector: &str) -> bool {
    matches!(V3_REGEX.as_ref(), Ok(re) if re.is_match(vector))
}

fn is_valid_v2_vector(vector: &str) -> bool {
    matches!(V2_REGEX.as_ref(), Ok(re) if re.is_match(vector))
}
