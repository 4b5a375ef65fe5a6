//! CVSS vector validation and scoring for versions 2.0, 3.0, 3.1 and 4.0.
//!
//! The crate takes a vector string, detects which CVSS version it belongs
//! to, and produces base, temporal and environmental scores plus a
//! qualitative severity band, reproducing each version's published formulas
//! and rounding rules exactly.
//!
//! # Example
//!
//! ```
//! use vulnera_cvss::{generate_scores, Severity};
//!
//! let results = generate_scores("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H").unwrap();
//! assert_eq!(results.base_score, 9.8);
//! assert_eq!(results.severity, Severity::Critical);
//! assert_eq!(results.severity.to_string(), "C");
//! ```

pub mod calculators;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod parsers;
pub mod version;

pub use engine::generate_scores;
pub use error::{CvssError, Result};
pub use metrics::{CvssResults, CvssVector, Severity};
pub use version::{validate, CvssVersion};
