//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation (and minting, for tooling and tests).

pub mod jwt;
