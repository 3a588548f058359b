//! Cursors into caller-owned contiguous buffers.
//!
//! A cursor is a pointer to the first element of a buffer plus the number of
//! elements that follow it. Cursors never allocate, copy or free element
//! storage. The lifetime parameter ties a cursor to the borrow of the buffer
//! it was created from.

use std::marker::PhantomData;

/// Trait for cursors that views read elements through.
///
/// Mutable views have cursors which also implement [StorageMut].
///
/// # Safety
///
/// Implementations must guarantee that `as_ptr()` is valid for reads of
/// `len()` consecutive elements for as long as the storage exists, and that
/// no other code can create a mutable reference to any of those elements
/// while a shared reference returned by [`get`](Storage::get) is alive.
pub unsafe trait Storage {
    /// The element type.
    type Elem;

    /// Return the number of elements the cursor can reach.
    fn len(&self) -> usize;

    /// Return true if `self.len() == 0`.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return a pointer to the first element.
    fn as_ptr(&self) -> *const Self::Elem;

    /// Return the element at `offset`, or None if `offset >= self.len()`.
    #[inline]
    fn get(&self, offset: usize) -> Option<&Self::Elem> {
        if offset < self.len() {
            // Safety: `offset` is in bounds.
            Some(unsafe { &*self.as_ptr().add(offset) })
        } else {
            None
        }
    }

    /// Return a reference to the element at `offset`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `offset < self.len()`.
    #[inline]
    unsafe fn get_unchecked(&self, offset: usize) -> &Self::Elem {
        debug_assert!(offset < self.len());
        unsafe { &*self.as_ptr().add(offset) }
    }

    /// Return a shared cursor over the same elements.
    fn view(&self) -> ViewData<'_, Self::Elem> {
        ViewData {
            ptr: self.as_ptr(),
            len: self.len(),
            _marker: PhantomData,
        }
    }

    /// Return the elements as a slice.
    fn as_slice(&self) -> &[Self::Elem] {
        // Safety: The trait contract guarantees `len` readable elements.
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.len()) }
    }
}

/// Trait for cursors that allow mutation of the elements they reach.
///
/// # Safety
///
/// In addition to the requirements of [Storage], `as_mut_ptr()` must be
/// valid for writes of `len()` elements and the storage must have exclusive
/// access to them.
pub unsafe trait StorageMut: Storage {
    /// Return a mutable pointer to the first element.
    fn as_mut_ptr(&mut self) -> *mut Self::Elem;

    /// Mutable version of [Storage::get].
    #[inline]
    fn get_mut(&mut self, offset: usize) -> Option<&mut Self::Elem> {
        if offset < self.len() {
            // Safety: `offset` is in bounds and `self` is borrowed mutably.
            Some(unsafe { &mut *self.as_mut_ptr().add(offset) })
        } else {
            None
        }
    }

    /// Mutable version of [Storage::get_unchecked].
    ///
    /// # Safety
    ///
    /// The caller must ensure that `offset < self.len()`.
    #[inline]
    unsafe fn get_unchecked_mut(&mut self, offset: usize) -> &mut Self::Elem {
        debug_assert!(offset < self.len());
        unsafe { &mut *self.as_mut_ptr().add(offset) }
    }

    /// Return the elements as a mutable slice.
    fn as_slice_mut(&mut self) -> &mut [Self::Elem] {
        // Safety: The trait contract guarantees `len` writable elements with
        // exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr(), self.len()) }
    }
}

/// Trait for converting borrowed buffers into their corresponding cursor
/// type.
///
/// This is used by the `from_data`, `set_data` and `update` methods of views,
/// which validate the buffer length before binding it.
pub trait IntoStorage {
    type Output: Storage;

    fn into_storage(self) -> Self::Output;
}

impl<'a, T> IntoStorage for &'a [T] {
    type Output = ViewData<'a, T>;

    fn into_storage(self) -> ViewData<'a, T> {
        ViewData::from_slice(self)
    }
}

impl<'a, T, const N: usize> IntoStorage for &'a [T; N] {
    type Output = ViewData<'a, T>;

    fn into_storage(self) -> ViewData<'a, T> {
        ViewData::from_slice(self.as_slice())
    }
}

impl<'a, T> IntoStorage for &'a Vec<T> {
    type Output = ViewData<'a, T>;

    fn into_storage(self) -> ViewData<'a, T> {
        ViewData::from_slice(self.as_slice())
    }
}

impl<'a, T> IntoStorage for &'a mut [T] {
    type Output = ViewMutData<'a, T>;

    fn into_storage(self) -> ViewMutData<'a, T> {
        ViewMutData::from_slice(self)
    }
}

impl<'a, T, const N: usize> IntoStorage for &'a mut [T; N] {
    type Output = ViewMutData<'a, T>;

    fn into_storage(self) -> ViewMutData<'a, T> {
        ViewMutData::from_slice(self.as_mut_slice())
    }
}

impl<'a, T> IntoStorage for &'a mut Vec<T> {
    type Output = ViewMutData<'a, T>;

    fn into_storage(self) -> ViewMutData<'a, T> {
        ViewMutData::from_slice(self.as_mut_slice())
    }
}

/// Shared cursor used by immutable views.
///
/// This has the same representation in memory as a slice: a pointer and a
/// length.
#[derive(Debug)]
pub struct ViewData<'a, T> {
    ptr: *const T,
    len: usize,
    _marker: PhantomData<&'a T>,
}

unsafe impl<T: Sync> Send for ViewData<'_, T> {}
unsafe impl<T: Sync> Sync for ViewData<'_, T> {}

impl<T> Clone for ViewData<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for ViewData<'_, T> {}

impl<'a, T> ViewData<'a, T> {
    /// Create a cursor over all elements of `data`.
    pub fn from_slice(data: &'a [T]) -> ViewData<'a, T> {
        ViewData {
            ptr: data.as_ptr(),
            len: data.len(),
            _marker: PhantomData,
        }
    }

    /// Create a cursor from a pointer and length.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `len` elements for the lifetime `'a`
    /// and the elements must not be mutated during that lifetime, as for
    /// [`std::slice::from_raw_parts`].
    pub unsafe fn from_raw_parts(ptr: *const T, len: usize) -> ViewData<'a, T> {
        ViewData {
            ptr,
            len,
            _marker: PhantomData,
        }
    }

    /// Variant of [Storage::get] which preserves the lifetime of the buffer.
    pub fn get(&self, offset: usize) -> Option<&'a T> {
        self.to_slice().get(offset)
    }

    /// Variant of [Storage::as_slice] which preserves the lifetime of the
    /// buffer.
    pub fn to_slice(&self) -> &'a [T] {
        // Safety: Guaranteed by the constructors.
        unsafe { std::slice::from_raw_parts(self.ptr, self.len) }
    }
}

unsafe impl<T> Storage for ViewData<'_, T> {
    type Elem = T;

    fn len(&self) -> usize {
        self.len
    }

    fn as_ptr(&self) -> *const T {
        self.ptr
    }
}

/// Exclusive cursor used by mutable views.
///
/// This has the same representation in memory as a mutable slice: a pointer
/// and a length.
#[derive(Debug)]
pub struct ViewMutData<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut T>,
}

unsafe impl<T: Send> Send for ViewMutData<'_, T> {}
unsafe impl<T: Sync> Sync for ViewMutData<'_, T> {}

impl<'a, T> ViewMutData<'a, T> {
    /// Create a cursor over all elements of `data`.
    pub fn from_slice(data: &'a mut [T]) -> ViewMutData<'a, T> {
        ViewMutData {
            ptr: data.as_mut_ptr(),
            len: data.len(),
            _marker: PhantomData,
        }
    }

    /// Create a cursor from a pointer and length.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` elements for the
    /// lifetime `'a`, and no other pointer may access the elements during
    /// that lifetime, as for [`std::slice::from_raw_parts_mut`].
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> ViewMutData<'a, T> {
        ViewMutData {
            ptr,
            len,
            _marker: PhantomData,
        }
    }
}

unsafe impl<T> Storage for ViewMutData<'_, T> {
    type Elem = T;

    fn len(&self) -> usize {
        self.len
    }

    fn as_ptr(&self) -> *const T {
        self.ptr
    }
}

unsafe impl<T> StorageMut for ViewMutData<'_, T> {
    fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }
}

#[cfg(test)]
mod tests {
    use super::{IntoStorage, Storage, StorageMut, ViewData, ViewMutData};

    #[test]
    fn test_view_data() {
        let data = [1, 2, 3];
        let cursor = (&data).into_storage();
        assert_eq!(cursor.len(), 3);
        assert_eq!(cursor.as_ptr(), data.as_ptr());
        assert_eq!(Storage::get(&cursor, 2), Some(&3));
        assert_eq!(Storage::get(&cursor, 3), None);

        // Lifetime-preserving accessor.
        let elem: &i32 = {
            let copy = cursor;
            copy.get(1).unwrap()
        };
        assert_eq!(*elem, 2);
    }

    #[test]
    fn test_view_mut_data() {
        let mut data = vec![0; 4];
        let mut cursor = ViewMutData::from_slice(&mut data);
        *cursor.get_mut(1).unwrap() = 5;
        assert!(cursor.get_mut(4).is_none());
        cursor.as_slice_mut()[3] = 7;
        assert_eq!(cursor.view().to_slice(), &[0, 5, 0, 7]);
        assert_eq!(data, [0, 5, 0, 7]);
    }

    #[test]
    fn test_from_raw_parts() {
        let data = [4, 5, 6, 7];
        // Safety: `data` outlives the cursor and the range is in bounds.
        let cursor = unsafe { ViewData::from_raw_parts(data.as_ptr().add(1), 2) };
        assert_eq!(cursor.to_slice(), &[5, 6]);
    }
}
