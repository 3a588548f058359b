//! Views whose rank, bounds and order are fixed at compile time.

use std::fmt;
use std::marker::PhantomData;

use crate::errors::LengthError;
use crate::index_iterator::NdIndices;
use crate::layout::{bounds_product, compute_offsets, AsIndex, Layout};
use crate::order::Order;
use crate::storage::{IntoStorage, Storage, ViewData, ViewMutData};
use crate::validate::validate_len;
use crate::view::AliasBase;

/// Describes an N-dimensional shape and order which are known at compile
/// time.
///
/// Implementations are usually declared with the
/// [`fixed_shape!`](crate::fixed_shape) macro. The offsets for a shape are
/// computed once, as a constant, and shared by every view with that shape.
///
/// Bounds must be non-empty and positive. This is checked when the constants
/// of the corresponding [FixedLayout] are evaluated, so violations are
/// reported as compile errors.
pub trait FixedShape<const N: usize>: Sized {
    /// Extent of each dimension.
    const BOUNDS: [usize; N];

    /// Order of dimensions in memory.
    const ORDER: Order = Order::RowMajor;

    /// Create an immutable view of `data` with this shape.
    ///
    /// Fails if the length of `data` does not equal the product of the bounds.
    fn view<T>(data: &[T]) -> Result<FixedView<'_, T, Self, N>, LengthError> {
        FixedView::from_data(data)
    }

    /// Create a mutable view of `data` with this shape.
    ///
    /// Fails if the length of `data` does not equal the product of the bounds.
    fn view_mut<T>(data: &mut [T]) -> Result<FixedViewMut<'_, T, Self, N>, LengthError> {
        FixedViewMut::from_data(data)
    }
}

/// Layout for a shape that is fixed at compile time.
///
/// This is a zero-sized type. All of its properties are associated constants
/// derived from `F`.
pub struct FixedLayout<F, const N: usize> {
    shape: PhantomData<fn() -> F>,
}

impl<F: FixedShape<N>, const N: usize> FixedLayout<F, N> {
    pub const BOUNDS: [usize; N] = F::BOUNDS;
    pub const ORDER: Order = F::ORDER;
    pub const OFFSETS: [usize; N] = compute_offsets(F::BOUNDS, F::ORDER);
    pub const LEN: usize = match bounds_product(&F::BOUNDS) {
        Some(len) => len,
        None => panic!("bounds product overflows usize"),
    };

    pub const fn new() -> Self {
        // Force evaluation of the offsets, so that invalid shapes fail to
        // compile even if the offsets are never read.
        let _ = Self::OFFSETS;
        FixedLayout { shape: PhantomData }
    }
}

impl<F: FixedShape<N>, const N: usize> Default for FixedLayout<F, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, const N: usize> Clone for FixedLayout<F, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F, const N: usize> Copy for FixedLayout<F, N> {}

impl<F, const N: usize> PartialEq for FixedLayout<F, N> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<F: FixedShape<N>, const N: usize> fmt::Debug for FixedLayout<F, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedLayout")
            .field("bounds", &Self::BOUNDS)
            .field("offsets", &Self::OFFSETS)
            .field("order", &Self::ORDER)
            .finish()
    }
}

impl<F: FixedShape<N>, const N: usize> Layout for FixedLayout<F, N> {
    type Index<'a> = [usize; N];
    type Indices = NdIndices<N>;

    #[inline]
    fn ndim(&self) -> usize {
        N
    }

    #[inline]
    fn bounds(&self) -> [usize; N] {
        Self::BOUNDS
    }

    #[inline]
    fn offsets(&self) -> [usize; N] {
        Self::OFFSETS
    }

    #[inline]
    fn order(&self) -> Order {
        Self::ORDER
    }

    #[inline]
    fn len(&self) -> usize {
        Self::LEN
    }

    fn indices(&self) -> NdIndices<N> {
        NdIndices::from_shape(Self::BOUNDS, Self::ORDER)
    }
}

impl<F: FixedShape<N>, const N: usize> AsIndex<FixedLayout<F, N>> for [usize; N] {
    fn as_index(&self) -> [usize; N] {
        *self
    }
}

/// Immutable view of a buffer with a shape fixed at compile time.
pub type FixedView<'a, T, F, const N: usize> = AliasBase<ViewData<'a, T>, FixedLayout<F, N>>;

/// Mutable view of a buffer with a shape fixed at compile time.
pub type FixedViewMut<'a, T, F, const N: usize> = AliasBase<ViewMutData<'a, T>, FixedLayout<F, N>>;

impl<S: Storage, F: FixedShape<N>, const N: usize> AliasBase<S, FixedLayout<F, N>> {
    /// Create a view from a cursor, without checking the cursor's length
    /// against the bounds.
    ///
    /// Checked accessors remain safe if the cursor is too short: indices
    /// that map past its end are reported as errors.
    pub fn from_cursor(cursor: S) -> Self {
        AliasBase::from_parts(cursor, FixedLayout::new())
    }

    /// Create a view of `data`.
    ///
    /// Fails if the length of `data` does not equal the product of the bounds.
    pub fn from_data<D: IntoStorage<Output = S>>(data: D) -> Result<Self, LengthError> {
        let data = data.into_storage();
        validate_len(data.len(), &F::BOUNDS)?;
        Ok(Self::from_cursor(data))
    }
}

impl<'a, T, F: FixedShape<N>, const N: usize> FixedView<'a, T, F, N> {
    /// Variant of [`at`](AliasBase::at) which returns a reference with the
    /// lifetime of the buffer rather than the view.
    pub fn at_ref(&self, index: [usize; N]) -> Option<&'a T> {
        let offset = self.layout.try_offset(index).ok()?;
        self.data.get(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::{FixedLayout, FixedShape, FixedView, FixedViewMut};
    use crate::errors::{IndexError, LengthError};
    use crate::layout::Layout;
    use crate::order::Order;
    use crate::storage::{Storage, ViewData};

    crate::fixed_shape!(Grid345 = [3, 4, 5]);
    crate::fixed_shape!(Grid345Col = ColumnMajor[3, 4, 5]);
    crate::fixed_shape!(Square2 = [2, 2]);
    crate::fixed_shape!(Line = [7]);

    fn iota(len: usize) -> Vec<i16> {
        (0..len as i16).collect()
    }

    #[test]
    fn test_layout_constants() {
        assert_eq!(FixedLayout::<Grid345, 3>::OFFSETS, [20, 5, 1]);
        assert_eq!(FixedLayout::<Grid345Col, 3>::OFFSETS, [1, 3, 12]);
        assert_eq!(FixedLayout::<Grid345, 3>::LEN, 60);
        assert_eq!(FixedLayout::<Line, 1>::OFFSETS, [1]);

        let layout = FixedLayout::<Grid345Col, 3>::new();
        assert_eq!(layout.ndim(), 3);
        assert_eq!(layout.bounds(), [3, 4, 5]);
        assert!(layout.is_column_major());
    }

    #[test]
    fn test_from_data() {
        let data = iota(60);
        let view = FixedView::<i16, Grid345, 3>::from_data(&data[..]).unwrap();
        assert_eq!(view.ndim(), 3);
        assert_eq!(view.len(), 60);
        assert_eq!(view.bounds(), [3, 4, 5]);
        assert_eq!(view.offsets(), [20, 5, 1]);
        assert_eq!(view.order(), Order::RowMajor);
        assert!(view.is_row_major());
        assert_eq!(view.cursor().as_ptr(), data.as_ptr());
        assert_eq!(view[[1, 2, 3]], 33);

        let short = iota(59);
        let err = FixedView::<i16, Grid345, 3>::from_data(&short[..]).err();
        assert_eq!(
            err,
            Some(LengthError {
                expected: Some(60),
                actual: 59
            })
        );
    }

    #[test]
    fn test_view_from_shape() {
        let data = iota(60);
        let view = Grid345Col::view(&data).unwrap();
        assert_eq!(view[[1, 2, 3]], 43);
        assert_eq!(view.linear_index([1, 2, 3]), 43);
        assert!(Grid345::view(&data[..30]).is_err());
    }

    #[test]
    fn test_checked_index() {
        let data = [10, 11, 12, 13];
        let view = Square2::view(&data).unwrap();

        assert_eq!(
            view.at([2, 0]),
            Err(IndexError::OutOfBounds {
                dim: 0,
                index: 2,
                size: 2
            })
        );
        assert_eq!(
            view.at([0, 2]),
            Err(IndexError::OutOfBounds {
                dim: 1,
                index: 2,
                size: 2
            })
        );
        assert_eq!(view.get([0, 2]), None);
        assert_eq!(view.check_bounds([1, 1]), Ok(()));

        let checked = view.at([1, 1]).unwrap();
        // Safety: The index was checked above.
        let unchecked = unsafe { view.get_unchecked([1, 1]) };
        assert_eq!(*checked, 13);
        assert!(std::ptr::eq(checked, unchecked));
        assert_eq!(view.at_ref([1, 0]), Some(&12));
    }

    #[test]
    #[should_panic(expected = "index 2 out of range for dim 1 with size 2")]
    fn test_index_panics() {
        let data = [0; 4];
        let view = Square2::view(&data).unwrap();
        let _ = view[[0, 2]];
    }

    #[test]
    fn test_set_cursor() {
        let a = iota(60);
        let b: Vec<i16> = a.iter().map(|x| x * 2).collect();
        let mut view = Grid345::view(&a).unwrap();

        view.set_data(&b).unwrap();
        assert_eq!(view.cursor().as_ptr(), b.as_ptr());
        assert_eq!(view[[0, 0, 1]], 2);

        // A buffer with the wrong length leaves the cursor unchanged.
        let short = iota(10);
        assert_eq!(
            view.set_data(&short),
            Err(LengthError {
                expected: Some(60),
                actual: 10
            })
        );
        assert_eq!(view.cursor().as_ptr(), b.as_ptr());

        view.set_cursor(ViewData::from_slice(&a));
        assert_eq!(view[[2, 3, 4]], 59);
    }

    #[test]
    fn test_short_cursor() {
        let data = iota(10);
        let view = FixedView::<i16, Grid345, 3>::from_cursor(ViewData::from_slice(&data));
        assert_eq!(view[[0, 1, 4]], 9);
        assert_eq!(
            view.at([0, 2, 0]),
            Err(IndexError::BeyondStorage { offset: 10, len: 10 })
        );
    }

    #[test]
    fn test_view_mut() {
        let mut data = vec![0i16; 60];
        let mut view = Grid345Col::view_mut(&mut data).unwrap();
        for (i, index) in view.indices().enumerate() {
            view[index] = i as i16;
        }
        *view.at_mut([2, 3, 4]).unwrap() += 100;
        assert!(view.at_mut([3, 0, 0]).is_err());
        // Safety: Index is within bounds and the buffer length was checked.
        unsafe {
            *view.get_unchecked_mut([0, 0, 0]) = -1;
        }

        // Visiting indices in the view's own order fills the buffer in storage
        // order.
        let mut expected = iota(60);
        expected[0] = -1;
        expected[59] += 100;
        assert_eq!(view.as_slice(), expected.as_slice());

        // Column-major: offset 1 is the second element of the first dimension.
        view.as_slice_mut()[1] = 42;
        assert_eq!(view[[1, 0, 0]], 42);
        expected[1] = 42;
        assert_eq!(data, expected);
    }

    #[test]
    fn test_mut_view_set_data() {
        let mut a = vec![0u8; 4];
        let mut b = vec![0u8; 4];
        {
            let mut view = FixedViewMut::<u8, Square2, 2>::from_data(&mut a).unwrap();
            view[[0, 1]] = 1;
            view.set_data(&mut b).unwrap();
            view[[1, 0]] = 2;
        }
        assert_eq!(a, [0, 1, 0, 0]);
        assert_eq!(b, [0, 0, 2, 0]);
    }

    #[test]
    fn test_debug() {
        let data = [0; 4];
        let view = Square2::view(&data).unwrap();
        assert_eq!(
            format!("{:?}", view),
            "AliasBase { order: RowMajor, bounds: [2, 2], offsets: [2, 1], cursor_len: 4 }"
        );
    }
}
