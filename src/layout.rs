//! Offset computation and index conversion shared by all view types.
//!
//! The functions in this module are the only place where strides are derived
//! from bounds, or where indices are mapped to linear offsets. Both
//! [`FixedLayout`](crate::FixedLayout) and [`FlexLayout`](crate::FlexLayout)
//! go through them, so views with the same bounds and order agree exactly
//! regardless of whether their shape is fixed at compile time.

use std::fmt::Debug;

use smallvec::smallvec;

use crate::errors::IndexError;
use crate::index_iterator::DynIndex;
use crate::order::Order;

/// Return the offset (stride) of dimension `dim` for a buffer with the given
/// bounds and order.
///
/// For row-major order this is the product of the bounds after `dim`, for
/// column-major order the product of the bounds before it. The product of an
/// empty range is 1.
///
/// Panics if the product overflows `usize`, which cannot happen for bounds
/// accepted by [`valid_bounds`].
#[inline]
pub const fn dim_offset(bounds: &[usize], order: Order, dim: usize) -> usize {
    let (start, end) = match order {
        Order::RowMajor => (dim + 1, bounds.len()),
        Order::ColumnMajor => (0, dim),
    };
    let mut offset: usize = 1;
    let mut i = start;
    while i < end {
        offset = match offset.checked_mul(bounds[i]) {
            Some(offset) => offset,
            None => panic!("bounds product overflows usize"),
        };
        i += 1;
    }
    offset
}

/// Return true if `bounds` has at least one dimension, every bound is
/// positive and the product of the bounds fits in a `usize`.
pub const fn valid_bounds(bounds: &[usize]) -> bool {
    if bounds.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bounds.len() {
        if bounds[i] == 0 {
            return false;
        }
        i += 1;
    }
    bounds_product(bounds).is_some()
}

/// Return the number of elements in a buffer with the given bounds, or `None`
/// if that number overflows `usize`.
pub const fn bounds_product(bounds: &[usize]) -> Option<usize> {
    let mut product: usize = 1;
    let mut i = 0;
    while i < bounds.len() {
        product = match product.checked_mul(bounds[i]) {
            Some(product) => product,
            None => return None,
        };
        i += 1;
    }
    Some(product)
}

/// Compute the offsets for an N-dimensional buffer with the given bounds and
/// order.
///
/// This can be evaluated in a const context. Panics if `N == 0`, any bound is
/// zero or the product of the bounds overflows `usize`, which is a compile
/// error when evaluated as a constant.
pub const fn compute_offsets<const N: usize>(bounds: [usize; N], order: Order) -> [usize; N] {
    assert!(
        valid_bounds(&bounds),
        "bounds must be non-empty and positive, with a product that fits in usize"
    );
    let mut offsets = [0; N];
    let mut dim = 0;
    while dim < N {
        offsets[dim] = dim_offset(&bounds, order, dim);
        dim += 1;
    }
    offsets
}

/// Compute offsets for `bounds` and write them into `out`.
///
/// Panics if `bounds` and `out` have different lengths, or if `bounds` is not
/// valid according to [`valid_bounds`].
pub fn compute_offsets_into(bounds: &[usize], order: Order, out: &mut [usize]) {
    assert_bounds(bounds);
    assert_eq!(
        bounds.len(),
        out.len(),
        "bounds and offsets have different lengths"
    );
    for (dim, offset) in out.iter_mut().enumerate() {
        *offset = dim_offset(bounds, order, dim);
    }
}

/// Compute offsets for `bounds`, where the number of dimensions is only known
/// at runtime.
///
/// Panics if `bounds` is not valid according to [`valid_bounds`].
pub fn dyn_offsets(bounds: &[usize], order: Order) -> DynIndex {
    let mut offsets = smallvec![0; bounds.len()];
    compute_offsets_into(bounds, order, &mut offsets);
    offsets
}

/// Panic if `bounds` is not a valid set of bounds.
#[track_caller]
pub(crate) fn assert_bounds(bounds: &[usize]) {
    assert!(
        valid_bounds(bounds),
        "bounds {:?} must be non-empty and positive, with a product that fits in usize",
        bounds
    );
}

/// Map an index to a linear offset using the given offsets.
///
/// This does not check the index against any bounds. Use [`check_bounds`]
/// first if the index is untrusted.
#[inline]
pub fn to_linear(index: &[usize], offsets: &[usize]) -> usize {
    debug_assert_eq!(
        index.len(),
        offsets.len(),
        "index and offsets have different lengths"
    );
    let mut linear = 0;
    for (idx, offset) in index.iter().zip(offsets) {
        linear += idx * offset;
    }
    linear
}

/// Return true if any component of `index` is not less than the
/// corresponding bound.
#[inline]
pub fn out_of_bounds(index: &[usize], bounds: &[usize]) -> bool {
    debug_assert_eq!(index.len(), bounds.len());
    index.iter().zip(bounds).any(|(idx, size)| idx >= size)
}

/// Check that every component of `index` is less than the corresponding
/// bound.
///
/// Returns an error for the first dimension that is out of range. Panics if
/// `index` and `bounds` have different lengths.
#[inline]
pub fn check_bounds(index: &[usize], bounds: &[usize]) -> Result<(), IndexError> {
    assert_eq!(
        index.len(),
        bounds.len(),
        "index has {} dims but bounds have {}",
        index.len(),
        bounds.len()
    );
    for (dim, (&index, &size)) in index.iter().zip(bounds).enumerate() {
        if index >= size {
            return Err(IndexError::OutOfBounds { dim, index, size });
        }
    }
    Ok(())
}

/// Layouts describe the bounds and order of an aliased buffer, and the
/// offsets derived from them.
///
/// The main implementations are [`FixedLayout`](crate::FixedLayout), where
/// everything is a compile-time constant, and
/// [`FlexLayout`](crate::FlexLayout), where bounds and order can change at
/// runtime.
pub trait Layout {
    /// Type used to represent indices.
    ///
    /// It is assumed that this type can also represent the bounds and
    /// offsets.
    type Index<'a>: AsRef<[usize]> + Clone + Debug + PartialEq<Self::Index<'a>>;

    /// Iterator over all valid indices, in the order of this layout.
    type Indices: Iterator;

    /// Return the number of dimensions.
    fn ndim(&self) -> usize;

    /// Return the extent of each dimension.
    fn bounds(&self) -> Self::Index<'_>;

    /// Return the offset between adjacent indices along each dimension.
    fn offsets(&self) -> Self::Index<'_>;

    /// Return whether the first or last dimension is contiguous.
    fn order(&self) -> Order;

    /// Return the iterator over all valid indices.
    fn indices(&self) -> Self::Indices;

    /// Return the number of elements, ie. the product of the bounds.
    fn len(&self) -> usize {
        // Layouts only hold bounds whose product fits in a usize.
        bounds_product(self.bounds().as_ref()).unwrap_or(usize::MAX)
    }

    /// Layouts always have at least one element.
    fn is_empty(&self) -> bool {
        false
    }

    fn is_row_major(&self) -> bool {
        self.order().is_row_major()
    }

    fn is_column_major(&self) -> bool {
        self.order().is_column_major()
    }

    /// Return true if any component of `index` is out of bounds.
    fn out_of_bounds(&self, index: Self::Index<'_>) -> bool {
        out_of_bounds(index.as_ref(), self.bounds().as_ref())
    }

    /// Check `index` against the bounds of this layout.
    fn check_bounds(&self, index: Self::Index<'_>) -> Result<(), IndexError> {
        check_bounds(index.as_ref(), self.bounds().as_ref())
    }

    /// Map an index to a linear offset, without checking it against the
    /// bounds.
    #[inline]
    fn linear_index(&self, index: Self::Index<'_>) -> usize {
        to_linear(index.as_ref(), self.offsets().as_ref())
    }

    /// Map an index to a linear offset, or return an error if it is out of
    /// bounds.
    #[inline]
    fn try_offset(&self, index: Self::Index<'_>) -> Result<usize, IndexError> {
        self.check_bounds(index.clone())?;
        Ok(self.linear_index(index))
    }
}

/// Trait for converting types into indices for use with a given layout.
///
/// Fixed-shape views are indexed with `[usize; N]` arrays. Flexible-shape
/// views can be indexed with anything that converts to `&[usize]`.
pub trait AsIndex<L: Layout> {
    fn as_index(&self) -> L::Index<'_>;
}
