/// Declare a zero-sized type implementing [`FixedShape`](crate::FixedShape).
///
/// The order defaults to row-major. To use column-major order, put
/// `ColumnMajor` before the bounds.
///
/// ```
/// use matalias::{fixed_shape, FixedShape, Layout};
///
/// fixed_shape!(pub Grid = [3, 4, 5]);
/// fixed_shape!(GridCol = ColumnMajor [3, 4, 5]);
///
/// let data: Vec<i16> = (0..60).collect();
/// let row = Grid::view(&data).unwrap();
/// let col = GridCol::view(&data).unwrap();
/// assert_eq!(row[[1, 2, 3]], 33);
/// assert_eq!(col[[1, 2, 3]], 43);
/// assert_eq!(col.layout().offsets(), [1, 3, 12]);
/// ```
///
/// Bounds that are empty or contain a zero fail to compile when a view with
/// the shape is created:
///
/// ```compile_fail
/// use matalias::{fixed_shape, FixedShape};
///
/// fixed_shape!(Empty = [4, 0]);
///
/// let data: [u8; 0] = [];
/// let _ = Empty::view(&data);
/// ```
#[macro_export]
macro_rules! fixed_shape {
    ($(#[$meta:meta])* $vis:vis $name:ident = [$($bound:expr),+ $(,)?]) => {
        $crate::fixed_shape!($(#[$meta])* $vis $name = RowMajor [$($bound),+]);
    };

    ($(#[$meta:meta])* $vis:vis $name:ident = $order:ident [$($bound:expr),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        $vis struct $name;

        impl $crate::FixedShape<{ <[usize]>::len(&[$($bound),+]) }> for $name {
            const BOUNDS: [usize; <[usize]>::len(&[$($bound),+])] = [$($bound),+];
            const ORDER: $crate::Order = $crate::Order::$order;
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{FixedLayout, FixedShape, Order};

    crate::fixed_shape!(
        /// Shape used to test that attributes are forwarded.
        Documented = [2, 3,]
    );
    crate::fixed_shape!(Col = ColumnMajor[4, 2]);
    crate::fixed_shape!(Row = RowMajor[4, 2]);

    #[test]
    fn test_fixed_shape() {
        assert_eq!(Documented::BOUNDS, [2, 3]);
        assert_eq!(Documented::ORDER, Order::RowMajor);
        assert_eq!(Col::ORDER, Order::ColumnMajor);
        assert_eq!(Row::ORDER, Order::RowMajor);
        assert_eq!(FixedLayout::<Col, 2>::OFFSETS, [1, 4]);
        assert_eq!(FixedLayout::<Row, 2>::OFFSETS, [2, 1]);
    }
}
