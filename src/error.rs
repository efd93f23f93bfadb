#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The facade was constructed without a usable query client.
    #[error("A valid query client is required.")]
    InvalidClient,

    /// A coordinate string did not match the expected `x,y,srid` shape.
    #[error("Invalid point format: {0}")]
    InvalidFormat(String),

    /// The client rejected a built query. Wraps the underlying message.
    #[error("Query execution failed: {0}")]
    QueryExecutionFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
