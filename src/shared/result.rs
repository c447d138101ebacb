/// Result alias used outside the pure graph algorithm; errors are
/// `anyhow::Error` so adapters can attach context freely.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
