/// Specifies which dimension of an aliased buffer is contiguous in memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Order {
    /// The last dimension is contiguous (stride 1), as in C. Strides increase
    /// towards dimension 0.
    #[default]
    RowMajor,

    /// The first dimension is contiguous (stride 1), as in Fortran. Strides
    /// increase towards the last dimension.
    ColumnMajor,
}

impl Order {
    pub const fn is_row_major(self) -> bool {
        matches!(self, Order::RowMajor)
    }

    pub const fn is_column_major(self) -> bool {
        matches!(self, Order::ColumnMajor)
    }

    /// Return the other order.
    pub const fn toggled(self) -> Order {
        match self {
            Order::RowMajor => Order::ColumnMajor,
            Order::ColumnMajor => Order::RowMajor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Order;

    #[test]
    fn test_order() {
        assert_eq!(Order::default(), Order::RowMajor);
        assert!(Order::RowMajor.is_row_major());
        assert!(!Order::RowMajor.is_column_major());
        assert!(Order::ColumnMajor.is_column_major());
        assert_eq!(Order::RowMajor.toggled(), Order::ColumnMajor);
        assert_eq!(Order::RowMajor.toggled().toggled(), Order::RowMajor);
    }
}
