//! Version information.

#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version string including the engine name.
#[must_use]
pub fn full_version() -> String {
    format!("picalc {} (Chudnovsky engine)", version())
}
