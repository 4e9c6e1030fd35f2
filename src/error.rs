/// Error returned by [`typecast`](crate::typecast::typecast).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TypecastError {
    #[error("fields argument should be an object, found {found}")]
    InvalidFields { found: &'static str },
}

/// Boxed error used at the sink boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
