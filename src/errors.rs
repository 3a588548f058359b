//! Error types that are reported when binding buffers and indexing views.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error when binding a buffer whose length does not equal the product of
/// the bounds it is being aliased with.
///
/// Operations that return this error leave the view they were called on
/// unmodified.
#[derive(Clone, Debug, PartialEq)]
pub struct LengthError {
    /// Product of the bounds, or `None` if the product overflows `usize`.
    pub expected: Option<usize>,

    /// Length of the buffer that was supplied.
    pub actual: usize,
}

impl Display for LengthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.expected {
            Some(expected) => write!(
                f,
                "buffer length {} does not match bounds product {}",
                self.actual, expected
            ),
            None => write!(
                f,
                "buffer length {} does not match bounds whose product overflows usize",
                self.actual
            ),
        }
    }
}

impl Error for LengthError {}

/// Errors that can occur when accessing an element with a checked index.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexError {
    /// An index component is not less than the bound of its dimension.
    OutOfBounds {
        dim: usize,
        index: usize,
        size: usize,
    },

    /// The index is valid for the bounds, but maps to an offset past the end
    /// of the bound cursor.
    ///
    /// This can only happen for views that were bound to a cursor without a
    /// length check.
    BeyondStorage { offset: usize, len: usize },
}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexError::OutOfBounds { dim, index, size } => write!(
                f,
                "index {} out of range for dim {} with size {}",
                index, dim, size
            ),
            IndexError::BeyondStorage { offset, len } => {
                write!(f, "offset {} beyond end of storage with len {}", offset, len)
            }
        }
    }
}

impl Error for IndexError {}

/// Any error produced by this crate.
///
/// This is useful for callers which bind and index in the same function and
/// want to propagate either failure with `?`.
#[derive(Clone, Debug, PartialEq)]
pub enum AliasError {
    /// The supplied buffer has the wrong length.
    InvalidArgument(LengthError),

    /// An index was out of range.
    OutOfRange(IndexError),
}

impl Display for AliasError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AliasError::InvalidArgument(err) => write!(f, "invalid argument: {}", err),
            AliasError::OutOfRange(err) => write!(f, "out of range: {}", err),
        }
    }
}

impl Error for AliasError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AliasError::InvalidArgument(err) => Some(err),
            AliasError::OutOfRange(err) => Some(err),
        }
    }
}

impl From<LengthError> for AliasError {
    fn from(value: LengthError) -> AliasError {
        AliasError::InvalidArgument(value)
    }
}

impl From<IndexError> for AliasError {
    fn from(value: IndexError) -> AliasError {
        AliasError::OutOfRange(value)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{AliasError, IndexError, LengthError};

    #[test]
    fn test_display() {
        let err = LengthError {
            expected: Some(60),
            actual: 59,
        };
        assert_eq!(
            err.to_string(),
            "buffer length 59 does not match bounds product 60"
        );

        let err = AliasError::from(err);
        assert!(matches!(err, AliasError::InvalidArgument(_)));
        assert_eq!(
            err.to_string(),
            "invalid argument: buffer length 59 does not match bounds product 60"
        );
        assert!(err.source().is_some());

        let err = LengthError {
            expected: None,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "buffer length 4 does not match bounds whose product overflows usize"
        );

        let err = IndexError::OutOfBounds {
            dim: 1,
            index: 2,
            size: 2,
        };
        assert_eq!(err.to_string(), "index 2 out of range for dim 1 with size 2");

        let err = AliasError::from(err);
        assert_eq!(
            err.to_string(),
            "out of range: index 2 out of range for dim 1 with size 2"
        );
        assert!(err.source().is_some());
    }
}
