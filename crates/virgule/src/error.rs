use thiserror::Error;

/// Error raised while compiling a route pattern.
///
/// Every variant is a syntax problem in the pattern text, reported at
/// route-registration time. Matching a compiled pattern never errors;
/// a path either matches or it does not.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The pattern does not start with `/` once the leading `i`/`!` flags
    /// are stripped, or carries an unrecognized flag character.
    #[error("pattern must start with '/' after optional 'i'/'!' flags: {0:?}")]
    MissingLeadingSlash(String),

    /// A `:` or `*` with no parameter name after it.
    #[error("'{0}' must be followed by a parameter name ([A-Za-z0-9_]+); use '\\{0}' to match it literally")]
    UnnamedParam(char),

    /// Two parameters with no literal text between them; the boundary
    /// between their captures would be ambiguous.
    #[error("parameters {0:?} and {1:?} have no separating literal between them")]
    AdjacentParams(String, String),

    /// A pattern may contain at most one `*` parameter.
    #[error("second multi-segment parameter {1:?} (first was {0:?})")]
    SecondMultiParam(String, String),

    /// An optional section `{}` with nothing inside it.
    #[error("optional section has an empty body")]
    EmptyGroup,

    /// An unclosed `{`, or a `}` with no matching open.
    #[error("unbalanced optional-section braces")]
    UnbalancedBraces,

    /// The generated matcher was rejected by the regex engine. Unreachable
    /// for any pattern this compiler emits.
    #[error("failed to build matcher: {0}")]
    Matcher(#[from] Box<fancy_regex::Error>),
}
