use std::{fmt, iter::FusedIterator, mem::ManuallyDrop, ptr::{self, NonNull}};

use super::{DynArr, allocation::deallocate};


/// An owning iterator over the elements of a [`DynArr`].
///
/// Created by [`DynArr::into_iter`]. Elements not yielded are dropped along
/// with the iterator.
pub struct IntoIter<T> {
    buf: NonNull<T>,
    cap: usize,
    // Slots `head..tail` still hold live elements.
    head: usize,
    tail: usize,
}

unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl <T> IntoIter<T> {
    #[inline]
    pub(super) fn new(arr: DynArr<T>) -> Self {
        let arr = ManuallyDrop::new(arr);
        Self { buf: arr.ptr, cap: arr.cap, head: 0, tail: arr.len }
    }

    /// Moves the element out of `slot`.
    ///
    /// # Safety
    ///
    /// `slot` must lie in `head..tail` and be excluded from that range
    /// right after.
    #[inline(always)]
    unsafe fn take(&self, slot: usize) -> T {
        unsafe { self.buf.as_ptr().add(slot).read() }
    }
}

#[cfg(not(tarpaulin_include))]
impl <T> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.len()).finish()
    }
}

impl <T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.head == self.tail { return None }
        let value = unsafe { Self::take(self, self.head) };
        self.head += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.tail - self.head;
        (len, Some(len))
    }
}

impl <T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.head == self.tail { return None }
        self.tail -= 1;
        Some(unsafe { Self::take(self, self.tail) })
    }
}

impl <T> ExactSizeIterator for IntoIter<T> {}

impl <T> FusedIterator for IntoIter<T> {}

impl <T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            unsafe { self.buf.as_ptr().add(self.head) },
            self.tail - self.head,
        );
        self.head = self.tail;

        unsafe {
            ptr::drop_in_place(remaining);
            deallocate(self.buf, self.cap);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn forward_and_back() {
        let arr = DynArr::from([1, 2, 3, 4]);
        let mut iter = arr.into_iter();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<Vec<_>>(), [2, 3]);
    }

    #[test]
    fn empty() {
        let mut iter = DynArr::<String>::new().into_iter();
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn zst() {
        let arr = DynArr::from([(), (), ()]);
        let mut iter = arr.into_iter();
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(()));
        assert_eq!(iter.next_back(), Some(()));
        assert_eq!(iter.next(), Some(()));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn reversed() {
        let arr: DynArr<String> = (0..20).map(|v| v.to_string()).collect();
        let back = arr.into_iter().rev().take(3).collect::<Vec<_>>();
        assert_eq!(back, ["19", "18", "17"]);
    }

    #[test]
    fn drops_remaining() {
        let counter = Rc::new(());
        let arr: DynArr<_> = (0..5).map(|_| Rc::clone(&counter)).collect();
        assert_eq!(Rc::strong_count(&counter), 6);

        let mut iter = arr.into_iter();
        let first = iter.next();
        let last = iter.next_back();
        drop(iter);

        assert_eq!(Rc::strong_count(&counter), 3);
        drop((first, last));
        assert_eq!(Rc::strong_count(&counter), 1);
    }
}
