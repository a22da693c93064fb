/// Crate-wide Result alias.
///
/// Domain failures are raised as `SbomError` and travel as `anyhow::Error`,
/// so callers can add context with `?` and still downcast at the CLI boundary.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
