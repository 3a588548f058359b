//! Views whose bounds and order can change at runtime.

use std::fmt;

use smallvec::SmallVec;

use crate::errors::LengthError;
use crate::fixed::{FixedLayout, FixedShape};
use crate::index_iterator::DynIndices;
use crate::layout::{assert_bounds, compute_offsets_into, AsIndex, Layout};
use crate::order::Order;
use crate::storage::{IntoStorage, Storage, ViewData, ViewMutData};
use crate::validate::validate_len;
use crate::view::AliasBase;

/// Layout whose bounds and order are runtime values.
///
/// The offsets are recomputed whenever the bounds or order change, so they
/// are always consistent with them.
#[derive(Clone, PartialEq, Eq)]
pub struct FlexLayout {
    order: Order,

    /// Bounds of each dimension followed by the corresponding offsets.
    ///
    /// Both have the same length, so they share one array. Layouts with up to
    /// four dimensions are stored inline.
    bounds_and_offsets: SmallVec<[usize; 8]>,
}

impl FlexLayout {
    /// Create a layout with the given bounds and order.
    ///
    /// Panics if `bounds` is empty or any bound is zero.
    #[track_caller]
    pub fn new(bounds: &[usize], order: Order) -> FlexLayout {
        FlexLayout {
            order,
            bounds_and_offsets: Self::bounds_and_offsets(bounds, order),
        }
    }

    /// Create a layout with the same bounds, order and offsets as a fixed
    /// shape.
    pub fn from_fixed<F: FixedShape<N>, const N: usize>() -> FlexLayout {
        FixedLayout::<F, N>::new().into()
    }

    #[track_caller]
    fn bounds_and_offsets(bounds: &[usize], order: Order) -> SmallVec<[usize; 8]> {
        assert_bounds(bounds);
        let ndim = bounds.len();
        let mut bounds_and_offsets: SmallVec<[usize; 8]> = SmallVec::with_capacity(ndim * 2);
        bounds_and_offsets.extend_from_slice(bounds);
        bounds_and_offsets.resize(ndim * 2, 0);
        let (bounds, offsets) = bounds_and_offsets.split_at_mut(ndim);
        compute_offsets_into(bounds, order, offsets);
        bounds_and_offsets
    }

    /// Replace the bounds and recompute the offsets.
    ///
    /// The number of dimensions may change. Panics if `bounds` is empty, any
    /// bound is zero or the product of the bounds overflows `usize`, in which
    /// case the layout is left unchanged.
    #[track_caller]
    pub fn set_bounds(&mut self, bounds: &[usize]) {
        self.bounds_and_offsets = Self::bounds_and_offsets(bounds, self.order);
    }

    /// Replace the order and recompute the offsets.
    ///
    /// This does nothing if the order is unchanged.
    pub fn set_order(&mut self, order: Order) {
        if order == self.order {
            return;
        }
        self.order = order;
        let ndim = self.ndim();
        let (bounds, offsets) = self.bounds_and_offsets.split_at_mut(ndim);
        compute_offsets_into(bounds, order, offsets);
    }

    /// Switch between row-major and column-major order.
    pub fn toggle_order(&mut self) {
        self.set_order(self.order.toggled());
    }

    /// Replace the bounds and order together.
    #[track_caller]
    pub fn set_bounds_and_order(&mut self, bounds: &[usize], order: Order) {
        self.bounds_and_offsets = Self::bounds_and_offsets(bounds, order);
        self.order = order;
    }
}

impl Layout for FlexLayout {
    type Index<'a> = &'a [usize];
    type Indices = DynIndices;

    #[inline]
    fn ndim(&self) -> usize {
        self.bounds_and_offsets.len() / 2
    }

    #[inline]
    fn bounds(&self) -> &[usize] {
        &self.bounds_and_offsets[..self.ndim()]
    }

    #[inline]
    fn offsets(&self) -> &[usize] {
        &self.bounds_and_offsets[self.ndim()..]
    }

    #[inline]
    fn order(&self) -> Order {
        self.order
    }

    fn indices(&self) -> DynIndices {
        DynIndices::from_shape(self.bounds(), self.order)
    }
}

impl<F: FixedShape<N>, const N: usize> From<FixedLayout<F, N>> for FlexLayout {
    fn from(_: FixedLayout<F, N>) -> FlexLayout {
        let mut bounds_and_offsets = SmallVec::with_capacity(N * 2);
        bounds_and_offsets.extend_from_slice(&FixedLayout::<F, N>::BOUNDS);
        bounds_and_offsets.extend_from_slice(&FixedLayout::<F, N>::OFFSETS);
        FlexLayout {
            order: F::ORDER,
            bounds_and_offsets,
        }
    }
}

impl fmt::Debug for FlexLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlexLayout")
            .field("bounds", &self.bounds())
            .field("offsets", &self.offsets())
            .field("order", &self.order)
            .finish()
    }
}

impl<T: AsRef<[usize]>> AsIndex<FlexLayout> for T {
    fn as_index(&self) -> &[usize] {
        self.as_ref()
    }
}

/// Immutable view of a buffer with bounds and order that can change at
/// runtime.
///
/// ```
/// use matalias::{FlexView, Order};
///
/// let data: Vec<i16> = (0..60).collect();
/// let mut view = FlexView::from_data(&data, &[3, 4, 5]).unwrap();
/// assert_eq!(view[[1, 2, 3]], 33);
///
/// view.set_order(Order::ColumnMajor);
/// assert_eq!(view[[1, 2, 3]], 43);
///
/// view.set_bounds(&[6, 10]);
/// assert_eq!(view[[5, 9]], 59);
/// ```
pub type FlexView<'a, T> = AliasBase<ViewData<'a, T>, FlexLayout>;

/// Mutable view of a buffer with bounds and order that can change at
/// runtime.
pub type FlexViewMut<'a, T> = AliasBase<ViewMutData<'a, T>, FlexLayout>;

impl<S: Storage> AliasBase<S, FlexLayout> {
    /// Create a row-major view from a cursor, without checking the cursor's
    /// length against the bounds.
    ///
    /// Panics if `bounds` is empty or any bound is zero.
    #[track_caller]
    pub fn from_cursor(cursor: S, bounds: &[usize]) -> Self {
        Self::from_cursor_with_order(cursor, bounds, Order::RowMajor)
    }

    /// Variant of [`from_cursor`](AliasBase::from_cursor) which specifies
    /// the order.
    #[track_caller]
    pub fn from_cursor_with_order(cursor: S, bounds: &[usize], order: Order) -> Self {
        AliasBase::from_parts(cursor, FlexLayout::new(bounds, order))
    }

    /// Create a row-major view of `data`.
    ///
    /// Fails if the length of `data` does not equal the product of `bounds`.
    /// Panics if `bounds` is empty or any bound is zero.
    #[track_caller]
    pub fn from_data<D: IntoStorage<Output = S>>(
        data: D,
        bounds: &[usize],
    ) -> Result<Self, LengthError> {
        Self::from_data_with_order(data, bounds, Order::RowMajor)
    }

    /// Variant of [`from_data`](AliasBase::from_data) which specifies the
    /// order.
    #[track_caller]
    pub fn from_data_with_order<D: IntoStorage<Output = S>>(
        data: D,
        bounds: &[usize],
        order: Order,
    ) -> Result<Self, LengthError> {
        let data = data.into_storage();
        let layout = FlexLayout::new(bounds, order);
        validate_len(data.len(), bounds)?;
        Ok(AliasBase::from_parts(data, layout))
    }

    /// Replace the bounds and recompute the offsets.
    ///
    /// The new bounds are not checked against the length of the cursor, so
    /// this can be followed by [`set_data`](AliasBase::set_data) to bind a
    /// matching buffer. Use [`update`](AliasBase::update) to change both at
    /// once with a length check.
    #[track_caller]
    pub fn set_bounds(&mut self, bounds: &[usize]) {
        self.layout.set_bounds(bounds);
    }

    /// Replace the order and recompute the offsets.
    pub fn set_order(&mut self, order: Order) {
        self.layout.set_order(order);
    }

    /// Switch between row-major and column-major order.
    pub fn toggle_order(&mut self) {
        self.layout.toggle_order();
    }

    /// Replace the cursor and bounds, keeping the current order.
    #[track_caller]
    pub fn update_cursor(&mut self, cursor: S, bounds: &[usize]) {
        self.update_cursor_with_order(cursor, bounds, self.order());
    }

    /// Replace the cursor, bounds and order.
    #[track_caller]
    pub fn update_cursor_with_order(&mut self, cursor: S, bounds: &[usize], order: Order) {
        self.layout.set_bounds_and_order(bounds, order);
        self.data = cursor;
    }

    /// Bind a new buffer with new bounds, keeping the current order.
    ///
    /// Fails if the length of `data` does not equal the product of `bounds`,
    /// in which case the bounds, offsets and cursor are all unchanged.
    #[track_caller]
    pub fn update<D: IntoStorage<Output = S>>(
        &mut self,
        data: D,
        bounds: &[usize],
    ) -> Result<(), LengthError> {
        self.update_with_order(data, bounds, self.order())
    }

    /// Bind a new buffer with new bounds and order.
    ///
    /// Fails if the length of `data` does not equal the product of `bounds`,
    /// in which case the bounds, order, offsets and cursor are all unchanged.
    #[track_caller]
    pub fn update_with_order<D: IntoStorage<Output = S>>(
        &mut self,
        data: D,
        bounds: &[usize],
        order: Order,
    ) -> Result<(), LengthError> {
        let data = data.into_storage();
        let layout = FlexLayout::new(bounds, order);
        validate_len(data.len(), bounds)?;
        self.layout = layout;
        self.data = data;
        Ok(())
    }
}

impl<'a, T> FlexView<'a, T> {
    /// Variant of [`at`](AliasBase::at) which returns a reference with the
    /// lifetime of the buffer rather than the view.
    pub fn at_ref<I: AsIndex<FlexLayout>>(&self, index: I) -> Option<&'a T> {
        let offset = self.layout.try_offset(index.as_index()).ok()?;
        self.data.get(offset)
    }
}

impl<S: Storage, F: FixedShape<N>, const N: usize> From<AliasBase<S, FixedLayout<F, N>>>
    for AliasBase<S, FlexLayout>
{
    /// Convert a fixed-shape view into a flexible view of the same buffer,
    /// with the same bounds, order and offsets.
    fn from(view: AliasBase<S, FixedLayout<F, N>>) -> Self {
        AliasBase::from_parts(view.data, view.layout.into())
    }
}
