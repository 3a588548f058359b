//! Checks that a buffer can be aliased with a given set of bounds.

use crate::errors::LengthError;
use crate::layout::bounds_product;

/// Check that a buffer of length `len` has exactly one element for every
/// index that is valid for `bounds`.
#[inline]
pub fn validate_len(len: usize, bounds: &[usize]) -> Result<(), LengthError> {
    match bounds_product(bounds) {
        Some(expected) if expected == len => Ok(()),
        expected => Err(LengthError {
            expected,
            actual: len,
        }),
    }
}

/// Check that `buffer` can be aliased as an array with the given bounds.
///
/// This succeeds only if the buffer's length equals the product of the
/// bounds. Every method that binds a buffer (rather than a cursor) to a view
/// calls this before modifying any state.
///
/// ```
/// use matalias::validate;
///
/// let buffer = [0i16; 60];
/// assert!(validate(&buffer, &[3, 4, 5]).is_ok());
/// assert!(validate(&buffer, &[3, 4, 4]).is_err());
/// ```
pub fn validate<T>(buffer: &[T], bounds: &[usize]) -> Result<(), LengthError> {
    validate_len(buffer.len(), bounds)
}

#[cfg(test)]
mod tests {
    use matalias_testing::TestCases;

    use super::{validate, validate_len};
    use crate::errors::LengthError;

    #[test]
    fn test_validate_len() {
        #[derive(Debug)]
        struct Case {
            len: usize,
            bounds: &'static [usize],
            expected: Result<(), LengthError>,
        }

        let cases = [
            Case {
                len: 60,
                bounds: &[3, 4, 5],
                expected: Ok(()),
            },
            Case {
                len: 1,
                bounds: &[1, 1, 1],
                expected: Ok(()),
            },
            Case {
                len: 59,
                bounds: &[3, 4, 5],
                expected: Err(LengthError {
                    expected: Some(60),
                    actual: 59,
                }),
            },
            Case {
                len: 61,
                bounds: &[3, 4, 5],
                expected: Err(LengthError {
                    expected: Some(60),
                    actual: 61,
                }),
            },
            Case {
                len: 4,
                bounds: &[usize::MAX, 2],
                expected: Err(LengthError {
                    expected: None,
                    actual: 4,
                }),
            },
            Case {
                len: usize::MAX,
                bounds: &[usize::MAX, 1],
                expected: Ok(()),
            },
        ];

        cases.test_each(|case| {
            assert_eq!(validate_len(case.len, case.bounds), case.expected);
        });
    }

    #[test]
    fn test_validate() {
        let buffer = vec![0u8; 12];
        assert_eq!(validate(&buffer, &[3, 4]), Ok(()));
        assert_eq!(validate(&buffer, &[12]), Ok(()));
        assert!(validate(&buffer, &[5, 5]).is_err());
    }
}
