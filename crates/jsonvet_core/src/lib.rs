//! Lazy, first-error-wins structural validation for JSON documents.

/// Documents, field accessors, error taxonomy, and stock validators.
pub mod vet;
