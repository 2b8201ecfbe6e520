pub mod application;
pub mod committee;
pub mod user;

/// A string did not name any variant of a fixed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a recognized value")]
pub struct InvalidEnumValue(pub String);
