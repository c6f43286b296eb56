/// Environment variable helpers.
pub mod env;

/// Version parsing and the supported-runtime gate.
pub mod version;
