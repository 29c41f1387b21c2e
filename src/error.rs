use crate::tree::Node;

use thiserror::Error;

/// Represents errors that can occur when inserting a new route.
///
/// Every variant carries the full path that was being registered so that a
/// misconfigured route table can be fixed from the message alone.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum InsertError {
    /// A segment of the new path conflicts with an existing wildcard.
    #[error(
        "'{segment}' in new path '{path}' conflicts with existing wildcard '{wildcard}' in existing prefix '{prefix}'"
    )]
    WildcardConflict {
        /// The conflicting segment of the new path.
        segment: String,
        /// The path that was being inserted.
        path: String,
        /// The wildcard that is already registered.
        wildcard: String,
        /// The registered prefix ending in that wildcard.
        prefix: String,
    },
    /// A wildcard would make existing static children unreachable.
    #[error("wildcard segment '{segment}' conflicts with existing children in path '{path}'")]
    ChildConflict {
        /// The wildcard segment of the new path.
        segment: String,
        /// The path that was being inserted.
        path: String,
    },
    /// The exact path is already registered.
    #[error("a route is already registered for path '{path}'")]
    Duplicate {
        /// The path that was being inserted.
        path: String,
    },
    /// Only one parameter per route segment is allowed.
    #[error("only one wildcard per path segment is allowed, has: '{segment}' in path '{path}'")]
    TooManyParams {
        /// The offending remainder of the path.
        segment: String,
        /// The path that was being inserted.
        path: String,
    },
    /// Parameters must be registered with a name.
    #[error("wildcards must be named with a non-empty name in path '{path}'")]
    UnnamedParam {
        /// The path that was being inserted.
        path: String,
    },
    /// Catch-all parameters are only allowed at the end of a path.
    #[error("catch-all routes are only allowed at the end of the path in path '{path}'")]
    InvalidCatchAll {
        /// The path that was being inserted.
        path: String,
    },
    /// A catch-all would take over a segment root that already has a route.
    #[error("catch-all conflicts with existing handle for the path segment root in path '{path}'")]
    CatchAllConflict {
        /// The path that was being inserted.
        path: String,
    },
    /// Catch-all parameters must directly follow a `/`.
    #[error("no / before catch-all in path '{path}'")]
    CatchAllWithoutSlash {
        /// The path that was being inserted.
        path: String,
    },
    /// Paths must begin with a `/`.
    #[error("path must begin with '/' in path '{path}'")]
    MalformedPath {
        /// The path that was being inserted.
        path: String,
    },
    /// The route name is already bound to a different path.
    #[error("route name '{name}' is already registered for a different path than '{path}'")]
    DuplicateName {
        /// The route name.
        name: String,
        /// The path that was being inserted.
        path: String,
    },
}

impl InsertError {
    pub(crate) fn wildcard_conflict<T>(full_path: &str, remaining: &[u8], wildcard: &Node<T>) -> Self {
        let existing = wildcard.prefix();

        // a catch-all swallows the rest of the path, a param only its segment
        let segment = if wildcard.is_catch_all() {
            remaining
        } else {
            let end = remaining
                .iter()
                .position(|&c| c == b'/')
                .unwrap_or(remaining.len());
            &remaining[..end]
        };

        let mut prefix = full_path.as_bytes()[..full_path.len() - remaining.len()].to_vec();
        prefix.extend_from_slice(existing);

        InsertError::WildcardConflict {
            segment: lossy(segment),
            path: full_path.to_owned(),
            wildcard: lossy(existing),
            prefix: lossy(&prefix),
        }
    }
}

pub(crate) fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// A failed match attempt.
///
/// ```
/// use routetree::{MatchError, Node};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut tree = Node::new();
/// tree.insert("/home", "Welcome!")?;
/// tree.insert("/blog/", "Our blog.")?;
///
/// // no routes match
/// if let Err(err) = tree.at("/foobar") {
///     assert_eq!(err, MatchError::new(false));
/// }
///
/// // a route exists with a trailing slash
/// if let Err(err) = tree.at("/blog") {
///     assert!(err.tsr());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
#[error("matching route not found")]
pub struct MatchError {
    tsr: bool,
}

impl MatchError {
    /// Creates a new match error with the given trailing slash recommendation.
    pub fn new(tsr: bool) -> Self {
        MatchError { tsr }
    }

    /// Indicates whether a route exists at the same path with or without a
    /// trailing slash, so the caller can redirect instead of answering `404`.
    pub fn tsr(&self) -> bool {
        self.tsr
    }
}

/// A typed parameter lookup failed.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParamError {
    /// No parameter with this name was captured.
    #[error("parameter '{name}' not found")]
    Missing {
        /// The requested parameter name.
        name: String,
    },
    /// The parameter exists but could not be parsed into the requested type.
    #[error("parameter '{name}' with value '{value}' is not a valid {expected}")]
    Invalid {
        /// The requested parameter name.
        name: String,
        /// The captured value.
        value: String,
        /// The requested type.
        expected: &'static str,
    },
}

/// Building a URL for a named route failed.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum UrlError {
    /// No route was registered under this name.
    #[error("no route named '{0}'")]
    UnknownName(String),
    /// The route pattern needs a parameter that was not supplied.
    #[error("route '{name}' requires parameter '{param}'")]
    MissingParam {
        /// The route name.
        name: String,
        /// The missing parameter.
        param: String,
    },
}
