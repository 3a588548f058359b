use std::fmt;
use std::ops::{Index, IndexMut};

use crate::errors::{IndexError, LengthError};
use crate::layout::{out_of_bounds, AsIndex, Layout};
use crate::order::Order;
use crate::storage::{IntoStorage, Storage, StorageMut, ViewData};
use crate::validate::validate_len;

/// Multi-dimensional view of a caller-owned contiguous buffer.
///
/// This is not normally used directly but instead via one of the type aliases
/// which specify the layout and whether the view is mutable:
///
/// | Shape      | Immutable | Mutable |
/// | -----      | --------- | ------- |
/// | Fixed      | [FixedView](crate::FixedView) | [FixedViewMut](crate::FixedViewMut) |
/// | Flexible   | [FlexView](crate::FlexView)   | [FlexViewMut](crate::FlexViewMut)   |
///
/// The view stores a cursor into the buffer and a layout. It never copies or
/// frees the elements, and it cannot outlive the borrow the cursor was
/// created from.
#[derive(Clone)]
pub struct AliasBase<S: Storage, L: Layout> {
    // Cursor to the first element of the aliased buffer.
    //
    // Indices which are valid for `layout` are not guaranteed to map to
    // offsets less than `data.len()` if the view was bound with `from_cursor`
    // or `set_cursor`. Checked accessors verify this, unchecked ones rely on
    // the caller.
    pub(crate) data: S,

    pub(crate) layout: L,
}

impl<S: Storage, L: Layout> AliasBase<S, L> {
    pub(crate) fn from_parts(data: S, layout: L) -> Self {
        AliasBase { data, layout }
    }

    /// Return the layout of this view.
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Return the number of dimensions.
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Return the number of logical elements, ie. the product of the bounds.
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    /// Views always have at least one logical element.
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn bounds(&self) -> L::Index<'_> {
        self.layout.bounds()
    }

    pub fn offsets(&self) -> L::Index<'_> {
        self.layout.offsets()
    }

    pub fn order(&self) -> Order {
        self.layout.order()
    }

    pub fn is_row_major(&self) -> bool {
        self.layout.is_row_major()
    }

    pub fn is_column_major(&self) -> bool {
        self.layout.is_column_major()
    }

    /// Return a shared cursor to the aliased buffer.
    pub fn cursor(&self) -> ViewData<'_, S::Elem> {
        self.data.view()
    }

    /// Return the elements reachable through the cursor, in storage order.
    pub fn as_slice(&self) -> &[S::Elem] {
        self.data.as_slice()
    }

    /// Replace the cursor without checking its length against the bounds.
    pub fn set_cursor(&mut self, cursor: S) {
        self.data = cursor;
    }

    /// Replace the cursor with one for `data`.
    ///
    /// Fails without modifying the view if the length of `data` does not
    /// equal the product of the current bounds.
    pub fn set_data<D: IntoStorage<Output = S>>(&mut self, data: D) -> Result<(), LengthError> {
        let data = data.into_storage();
        validate_len(data.len(), self.layout.bounds().as_ref())?;
        self.data = data;
        Ok(())
    }

    /// Check `index` against the bounds of this view.
    pub fn check_bounds<I: AsIndex<L>>(&self, index: I) -> Result<(), IndexError> {
        self.layout.check_bounds(index.as_index())
    }

    /// Map `index` to a linear offset into the aliased buffer, without
    /// checking it against the bounds.
    pub fn linear_index<I: AsIndex<L>>(&self, index: I) -> usize {
        self.layout.linear_index(index.as_index())
    }

    /// Return an iterator over all valid indices of this view, in the view's
    /// order.
    pub fn indices(&self) -> L::Indices {
        self.layout.indices()
    }

    /// Return the element at a given index, or an error if the index is out
    /// of bounds.
    pub fn at<I: AsIndex<L>>(&self, index: I) -> Result<&S::Elem, IndexError> {
        let offset = self.layout.try_offset(index.as_index())?;
        self.data.get(offset).ok_or(IndexError::BeyondStorage {
            offset,
            len: self.data.len(),
        })
    }

    /// Return the element at a given index, or `None` if the index is out of
    /// bounds.
    pub fn get<I: AsIndex<L>>(&self, index: I) -> Option<&S::Elem> {
        self.at(index).ok()
    }

    /// Return the element at a given index, without any bounds checks.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the index is valid for the view's bounds
    /// and that it maps to an offset within the bound cursor. The latter is
    /// always true if the buffer was bound with a length check.
    #[inline]
    pub unsafe fn get_unchecked<I: AsIndex<L>>(&self, index: I) -> &S::Elem {
        let index = index.as_index();
        debug_assert!(!out_of_bounds(
            index.as_ref(),
            self.layout.bounds().as_ref()
        ));
        let offset = self.layout.linear_index(index);
        unsafe { self.data.get_unchecked(offset) }
    }
}

impl<S: StorageMut, L: Layout> AliasBase<S, L> {
    /// Mutable version of [`at`](AliasBase::at).
    pub fn at_mut<I: AsIndex<L>>(&mut self, index: I) -> Result<&mut S::Elem, IndexError> {
        let offset = self.layout.try_offset(index.as_index())?;
        let len = self.data.len();
        self.data
            .get_mut(offset)
            .ok_or(IndexError::BeyondStorage { offset, len })
    }

    /// Mutable version of [`get`](AliasBase::get).
    pub fn get_mut<I: AsIndex<L>>(&mut self, index: I) -> Option<&mut S::Elem> {
        self.at_mut(index).ok()
    }

    /// Mutable version of [`get_unchecked`](AliasBase::get_unchecked).
    ///
    /// # Safety
    ///
    /// See [`get_unchecked`](AliasBase::get_unchecked).
    #[inline]
    pub unsafe fn get_unchecked_mut<I: AsIndex<L>>(&mut self, index: I) -> &mut S::Elem {
        let index = index.as_index();
        debug_assert!(!out_of_bounds(
            index.as_ref(),
            self.layout.bounds().as_ref()
        ));
        let offset = self.layout.linear_index(index);
        unsafe { self.data.get_unchecked_mut(offset) }
    }

    /// Mutable version of [`as_slice`](AliasBase::as_slice).
    pub fn as_slice_mut(&mut self) -> &mut [S::Elem] {
        self.data.as_slice_mut()
    }
}

impl<S: Storage, L: Layout, I: AsIndex<L>> Index<I> for AliasBase<S, L> {
    type Output = S::Elem;

    /// Return the element at a given index.
    ///
    /// Panics if the index is out of bounds.
    fn index(&self, index: I) -> &Self::Output {
        match self.at(index) {
            Ok(elem) => elem,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<S: StorageMut, L: Layout, I: AsIndex<L>> IndexMut<I> for AliasBase<S, L> {
    /// Return the element at a given index.
    ///
    /// Panics if the index is out of bounds.
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        match self.at_mut(index) {
            Ok(elem) => elem,
            Err(err) => panic!("{}", err),
        }
    }
}

impl<S: Storage, L: Layout> fmt::Debug for AliasBase<S, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasBase")
            .field("order", &self.layout.order())
            .field("bounds", &self.layout.bounds())
            .field("offsets", &self.layout.offsets())
            .field("cursor_len", &self.data.len())
            .finish()
    }
}
