//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    pub fn name() -> String {
        "Statue Site".into()
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }
}

// ============================================================================
// [[groups]] Defaults
// ============================================================================

pub mod group {
    pub fn listable() -> bool {
        true
    }
}
