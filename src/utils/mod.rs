//! Shared helpers for validating configuration and parsing exact decimals.

pub mod validation;
