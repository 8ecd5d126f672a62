use thiserror::Error;

/// The error taxonomy for the whole crate.
///
/// Build-time errors that compromise corpus identity ([`IrError::NoMoreIdentifiers`],
/// [`IrError::IncompatibleTerms`]) are meant to be propagated to the caller. Every other
/// variant is a *recovered* condition: the engine logs it and keeps answering queries, per
/// the propagation policy in the error-handling design.
#[derive(Debug, Error)]
pub enum IrError {
    /// The document-identifier counter overflowed. Fatal at corpus construction.
    #[error("document identifier counter exhausted")]
    NoMoreIdentifiers,

    /// Attempt to merge two terms whose tokens differ. Programmer error.
    #[error("cannot merge terms with different tokens: {left:?} vs {right:?}")]
    IncompatibleTerms { left: String, right: String },

    /// Any exception during query parsing. Recovered: treated as an empty expression.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A phrase was reduced to nothing (or to one surviving word) by normalization.
    #[error("normalization dropped all terms from phrase")]
    NormalizationDropped,

    /// A configuration property was missing or malformed. Recovered with defaults.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Deep recursion during evaluation or correction exceeded the guard depth.
    #[error("stack exhaustion guard tripped during {0}")]
    StackExhaustion(&'static str),

    /// A stop-word or other external resource failed to load. Recovered with an empty set.
    #[error("io error loading {resource}: {source}")]
    IOError {
        resource: String,
        #[source]
        source: std::io::Error,
    },
}

pub type IrResult<T> = Result<T, IrError>;
