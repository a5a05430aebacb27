//! Scenario tests for the CertiTrust crates live in `tests/`.
