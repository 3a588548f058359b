use std::iter::FusedIterator;

use smallvec::{smallvec, SmallVec};

use crate::order::Order;

pub trait IndexArray: AsMut<[usize]> + AsRef<[usize]> + Clone {}
impl<const N: usize> IndexArray for SmallVec<[usize; N]> {}
impl<const N: usize> IndexArray for [usize; N] {}

/// The index type used for flexible-shape views.
pub type DynIndex = SmallVec<[usize; 4]>;

/// Iterator over every valid index for a set of bounds.
///
/// Indices are visited in nested order: for [`Order::RowMajor`] the last
/// dimension varies fastest, for [`Order::ColumnMajor`] the first dimension
/// does. Either way, visiting the elements of a view in the view's own order
/// walks the aliased buffer from start to end.
///
/// The number of dimensions may be zero, in which case the iterator will yield
/// a single empty index.
pub struct Indices<Index: IndexArray> {
    /// End index (exclusive) along each dimension.
    end: Index,

    next: Option<Index>,

    order: Order,

    /// Remaining iteration steps.
    steps: usize,
}

/// Iterator over indices where the number of dimensions is known at compile
/// time.
pub type NdIndices<const N: usize> = Indices<[usize; N]>;

/// Iterator over indices where the number of dimensions is only known at
/// runtime.
pub type DynIndices = Indices<DynIndex>;

impl<Index: IndexArray> Indices<Index> {
    fn from_zero_and_end(start: Index, end: Index, order: Order) -> Indices<Index> {
        let steps = end.as_ref().iter().product();
        Indices {
            // Note that if the index is empty, the product is 1 and the
            // iterator yields a single empty element.
            next: (steps > 0).then_some(start),
            end,
            order,
            steps,
        }
    }

    /// Advance `index` to its successor, returning false if it was the last.
    fn step(&self, index: &mut Index) -> bool {
        let mut dims = index.as_mut().iter_mut().zip(self.end.as_ref());
        let step_dim = |(index, &end): (&mut usize, &usize)| {
            *index += 1;
            if *index == end {
                *index = 0;
                false
            } else {
                true
            }
        };
        match self.order {
            Order::RowMajor => dims.rev().any(step_dim),
            Order::ColumnMajor => dims.any(step_dim),
        }
    }
}

impl<const N: usize> Indices<[usize; N]> {
    /// Return an iterator over all the indices where each dimension is between
    /// `0` and `shape[dim]`.
    pub fn from_shape(shape: [usize; N], order: Order) -> NdIndices<N> {
        Self::from_zero_and_end([0; N], shape, order)
    }
}

impl Indices<DynIndex> {
    /// Return an iterator over all the indices where each dimension is between
    /// `0` and `shape[dim]`.
    pub fn from_shape(shape: &[usize], order: Order) -> DynIndices {
        Self::from_zero_and_end(smallvec![0; shape.len()], shape.into(), order)
    }
}

impl<Index: IndexArray> Iterator for Indices<Index> {
    type Item = Index;

    /// Return the next index in the sequence, or `None` after all indices
    /// have been returned.
    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut next = current.clone();
        if self.step(&mut next) {
            self.next = Some(next);
        }
        self.steps -= 1;
        Some(current)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.steps, Some(self.steps))
    }
}

impl<Index: IndexArray> ExactSizeIterator for Indices<Index> {}

impl<Index: IndexArray> FusedIterator for Indices<Index> {}

#[cfg(test)]
mod tests {
    use super::{DynIndices, NdIndices};
    use crate::order::Order;

    #[test]
    fn test_nd_indices() {
        // Empty iterator
        let mut iter = NdIndices::from_shape([0], Order::RowMajor);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);

        // Scalar index iterator
        let mut iter = NdIndices::from_shape([], Order::RowMajor);
        assert_eq!(iter.next(), Some([]));
        assert_eq!(iter.next(), None);

        // 1D index iterator
        let iter = NdIndices::from_shape([3], Order::ColumnMajor);
        let visited: Vec<_> = iter.collect();
        assert_eq!(visited, &[[0], [1], [2]]);

        // 2D, row major
        let iter = NdIndices::from_shape([2, 3], Order::RowMajor);
        assert_eq!(iter.len(), 6);
        let visited: Vec<_> = iter.collect();
        assert_eq!(
            visited,
            &[[0, 0], [0, 1], [0, 2], [1, 0], [1, 1], [1, 2]]
        );

        // 2D, column major
        let iter = NdIndices::from_shape([2, 3], Order::ColumnMajor);
        let visited: Vec<_> = iter.collect();
        assert_eq!(
            visited,
            &[[0, 0], [1, 0], [0, 1], [1, 1], [0, 2], [1, 2]]
        );
    }

    #[test]
    fn test_dyn_indices() {
        let iter = DynIndices::from_shape(&[2, 1, 2], Order::RowMajor);
        let visited: Vec<Vec<usize>> = iter.map(|ix| ix.into_iter().collect()).collect();
        assert_eq!(
            visited,
            vec![
                vec![0, 0, 0],
                vec![0, 0, 1],
                vec![1, 0, 0],
                vec![1, 0, 1],
            ]
        );

        // More dims than the inline capacity of `DynIndex`.
        let iter = DynIndices::from_shape(&[2, 1, 1, 1, 2], Order::ColumnMajor);
        assert_eq!(iter.len(), 4);
        let visited: Vec<Vec<usize>> = iter.map(|ix| ix.into_iter().collect()).collect();
        assert_eq!(
            visited,
            vec![
                vec![0, 0, 0, 0, 0],
                vec![1, 0, 0, 0, 0],
                vec![0, 0, 0, 0, 1],
                vec![1, 0, 0, 0, 1],
            ]
        );
    }

    #[test]
    fn test_size_hint() {
        let mut iter = NdIndices::from_shape([3, 4, 5], Order::RowMajor);
        assert_eq!(iter.size_hint(), (60, Some(60)));
        iter.next();
        assert_eq!(iter.size_hint(), (59, Some(59)));
        assert_eq!(iter.count(), 59);
    }
}
