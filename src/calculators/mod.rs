//! Score calculators, one per CVSS version.
//!
//! Each calculator implements its version's base/temporal/environmental
//! formulas, rounding rule and severity bands against the matching value
//! object. The facade selects a calculator by matching the parsed vector's
//! version tag, so a calculator can only ever see its own variant.
//!
//! The base score must be computed first: the temporal and environmental
//! formulas read fields the base-score step writes into the value object.

pub mod v2;
pub mod v3;
pub mod v4;
mod v4_lookup;
