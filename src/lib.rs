//! matalias addresses flat, contiguous buffers as N-dimensional arrays,
//! without copying or reorganizing memory.
//!
//! A view binds a cursor into a caller-owned buffer to a set of _bounds_ (the
//! extent of each dimension) and an [Order], from which it derives the
//! _offsets_ (strides) used to map index tuples to linear positions in the
//! buffer. Views never allocate, copy or free element storage.
//!
//! There are two kinds of view, which share the same offset arithmetic and
//! therefore agree exactly for the same bounds and order:
//!
//! - Fixed-shape views ([FixedView], [FixedViewMut]) whose rank, bounds and
//!   order are part of the type. Shapes are declared with [fixed_shape!] and
//!   their offsets are computed once, at compile time.
//! - Flexible views ([FlexView], [FlexViewMut]) whose bounds and order are
//!   runtime values that can be changed after construction. Offsets are
//!   recomputed on every change.
//!
//! Binding a buffer checks that its length equals the product of the bounds.
//! Indexing with `[]` or [`at`](AliasBase::at) checks the index against the
//! bounds, while [`get_unchecked`](AliasBase::get_unchecked) skips the check.
//!
//! # Example
//!
//! ```
//! use matalias::prelude::*;
//! use matalias::{fixed_shape, FlexView, Order};
//!
//! fixed_shape!(Grid = [3, 4, 5]);
//!
//! let buffer: Vec<i16> = (0..60).collect();
//!
//! // Row-major: the last dimension is contiguous.
//! let view = Grid::view(&buffer).unwrap();
//! assert_eq!(view.offsets(), [20, 5, 1]);
//! assert_eq!(view[[1, 2, 3]], 33);
//!
//! // Column-major: the first dimension is contiguous.
//! let view = FlexView::from_data_with_order(&buffer, &[3, 4, 5], Order::ColumnMajor).unwrap();
//! assert_eq!(view.offsets(), &[1, 3, 12]);
//! assert_eq!(view[[1, 2, 3]], 43);
//!
//! // Buffers whose length doesn't match the bounds are rejected.
//! assert!(FlexView::from_data(&buffer[..59], &[3, 4, 5]).is_err());
//!
//! // So are indices outside the bounds.
//! assert!(view.at([3, 0, 0]).is_err());
//! ```
//!
//! # Serialization
//!
//! If the `serde` feature is enabled, [Order] and [FlexLayout] can be
//! serialized and deserialized using [serde](https://serde.rs). A layout is
//! represented by its bounds and order. Offsets are recomputed when it is
//! deserialized.

pub mod errors;
mod fixed;
mod flex;
mod index_iterator;
pub mod layout;
mod macros;
mod order;
pub mod storage;
mod validate;
mod view;

#[cfg(feature = "serde")]
mod impl_serialize;

// Re-exports for convenience.
pub use errors::{AliasError, IndexError, LengthError};
pub use fixed::{FixedLayout, FixedShape, FixedView, FixedViewMut};
pub use flex::{FlexLayout, FlexView, FlexViewMut};
pub use index_iterator::{DynIndex, DynIndices, Indices, NdIndices};
pub use layout::{
    check_bounds, compute_offsets, compute_offsets_into, dyn_offsets, to_linear, AsIndex, Layout,
};
pub use order::Order;
pub use storage::{Storage, StorageMut, ViewData, ViewMutData};
pub use validate::validate;
pub use view::AliasBase;

/// This module provides a convenient way to import the most common traits
/// from this library via a glob import.
pub mod prelude {
    pub use super::{FixedShape, Layout};
}
