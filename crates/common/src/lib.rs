//! Pieces shared by every BYield crate and binary.

pub mod logging;

#[cfg(feature = "test-utils")]
pub mod test_utils;
