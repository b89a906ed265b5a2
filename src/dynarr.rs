mod allocation;
mod into_iter;

use std::{fmt, marker::PhantomData, mem, ops::{Deref, DerefMut, Index, IndexMut}, ptr::{self, NonNull}, slice::{self, SliceIndex}};

use crate::errors::{AllocErr, OutOfRange};
use allocation::*;

pub use into_iter::IntoIter;

/// Slot count of an array constructed with [`DynArr::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Factor the capacity is multiplied by whenever an append runs out of room.
pub const GROWTH_FACTOR: usize = 2;

/// A contiguous growable array with validated index operations.
///
/// Elements live in a single heap buffer. When an append finds the buffer
/// full, the capacity is doubled, so a long run of appends costs amortized
/// *O*(1) each. The capacity never shrinks on its own.
///
/// # Examples
///
/// ```
/// use growarr::DynArr;
///
/// let mut arr = DynArr::new();
/// arr.add(3);
/// arr.add(7);
///
/// assert_eq!(arr.len(), 2);
/// assert_eq!(arr.capacity(), 16);
/// assert_eq!(arr.get(0), Ok(&3));
///
/// arr.insert_at(1, 5).unwrap();
/// assert_eq!(arr.to_string(), "[3, 5, 7]");
///
/// assert_eq!(arr.remove_at(0), Ok(3));
/// assert_eq!(arr, [5, 7]);
/// ```
///
/// You can build an array from an existing collection with [`From`] or by
/// collecting an iterator.
/// ```
/// use growarr::DynArr;
///
/// let names: DynArr<&str> = "Vasil,Deyan,Valentin".split(',').collect();
/// assert_eq!(names.get(2), Ok(&"Valentin"));
///
/// let nums = DynArr::from([5, 6]);
/// assert_eq!(nums.to_string(), "[5, 6]");
/// ```
///
/// # Indexing
///
/// Every index-taking operation checks its argument against the current
/// length before touching anything and reports a bad index with
/// [`OutOfRange`]. A failed call leaves the array unchanged.
///
/// ```
/// use growarr::{DynArr, OutOfRange};
///
/// let mut arr = DynArr::from([5, 6, 7, 8]);
/// assert_eq!(arr.get(4), Err(OutOfRange { index: 4, len: 4 }));
/// assert!(arr.exchange(0, 9).is_err());
/// assert_eq!(arr, [5, 6, 7, 8]);
/// ```
///
/// `DynArr` also dereferences to a slice, so the usual `arr[i]` syntax works
/// and panics on a bad index just like it does for slices.
/// ```should_panic
/// use growarr::DynArr;
///
/// let arr = DynArr::from([1, 2, 3]);
/// println!("{}", arr[3]); // Panics!
/// ```
///
/// # Capacity
///
/// An empty array starts with [`DEFAULT_CAPACITY`] slots. An array built
/// from `n` elements starts with the default capacity doubled until `n` fits.
/// Removing elements never releases memory.
///
/// ```
/// use growarr::DynArr;
///
/// let mut arr: DynArr<u32> = (0..17).collect();
/// assert_eq!(arr.capacity(), 32);
///
/// arr.clear();
/// assert_eq!(arr.capacity(), 32);
/// ```
pub struct DynArr<T> {
    ptr: NonNull<T>,
    len: usize,
    cap: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for DynArr<T> {}
unsafe impl<T: Sync> Sync for DynArr<T> {}

impl<T: PartialEq> PartialEq for DynArr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len &&
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArr<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynArr<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<&[T; N]> for DynArr<T> {
    fn eq(&self, other: &&[T; N]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq> PartialEq<[T]> for DynArr<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for DynArr<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for DynArr<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Clone> Clone for DynArr<T> {
    fn clone(&self) -> Self {
        let mut arr = Self::with_capacity(self.cap);
        self.iter().for_each(|v| arr.add(v.clone()));
        arr
    }
}

impl<T> Default for DynArr<T> {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl<T> Drop for DynArr<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
            deallocate(self.ptr, self.cap);
        }
    }
}

impl<T> Deref for DynArr<T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target { self.as_slice() }
}

impl<T> DerefMut for DynArr<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target { self.as_mut_slice() }
}

impl<T, I: SliceIndex<[T]>> Index<I> for DynArr<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for DynArr<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

/// Renders `[e0, e1, ...]`, recursing through nested arrays.
///
/// ```
/// use std::fmt::Display;
/// use growarr::DynArr;
///
/// let names = DynArr::from(["Ivan", "Deyan"]);
/// let nums = DynArr::from([10, 20]);
/// let empty = DynArr::<char>::new();
///
/// let nested = DynArr::<Box<dyn Display>>::from([
///     Box::new(names) as Box<dyn Display>,
///     Box::new(nums),
///     Box::new(empty),
/// ]);
/// assert_eq!(nested.to_string(), "[[Ivan, Deyan], [10, 20], []]");
/// ```
impl<T: fmt::Display> fmt::Display for DynArr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 { f.write_str(", ")?; }
            fmt::Display::fmt(value, f)?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a DynArr<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T> IntoIterator for &'a mut DynArr<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

impl<T> IntoIterator for DynArr<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the array, yielding its elements front to back.
    #[inline]
    fn into_iter(self) -> Self::IntoIter { IntoIter::new(self) }
}

impl<T> Extend<T> for DynArr<T> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.add_range(values)
    }
}

impl<T> FromIterator<T> for DynArr<T> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let values = values.into_iter();
        let mut arr = Self::sized_for(values.size_hint().0);
        arr.add_range(values);
        arr
    }
}

impl<T, const N: usize> From<[T; N]> for DynArr<T> {

    /// Create a new instance holding the array's elements in order.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let arr = DynArr::from([5, 6]);
    /// assert_eq!(arr.len(), 2);
    /// assert!(arr.capacity() > arr.len());
    /// ```
    fn from(values: [T; N]) -> Self {
        let values = mem::ManuallyDrop::new(values);
        let mut arr = Self::sized_for(N);

        unsafe { ptr::copy_nonoverlapping(
            values.as_ptr(),
            arr.ptr.as_ptr(),
            N
        )}
        arr.len = N;
        arr
    }
}

impl<T> From<Vec<T>> for DynArr<T> {

    /// Create a new instance holding the vec's elements in order.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let arr = DynArr::from(vec!["Vasil", "Ganka"]);
    /// assert_eq!(arr.to_string(), "[Vasil, Ganka]");
    /// ```
    fn from(mut vec: Vec<T>) -> Self {
        let len = vec.len();
        let mut arr = Self::sized_for(len);

        unsafe {
            ptr::copy_nonoverlapping(vec.as_ptr(), arr.ptr.as_ptr(), len);
            // Ownership of the elements moved into `arr`.
            vec.set_len(0);
        }
        arr.len = len;
        arr
    }
}

impl<T> From<DynArr<T>> for Vec<T> {
    fn from(arr: DynArr<T>) -> Self { arr.into_iter().collect() }
}

impl<T> DynArr<T> {

    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Constructs a new, empty `DynArr<T>` with [`DEFAULT_CAPACITY`] slots.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let arr = DynArr::<i32>::new();
    /// assert_eq!(arr.len(), 0);
    /// assert_eq!(arr.capacity(), 16);
    /// assert_eq!(arr.to_string(), "[]");
    /// ```
    #[inline]
    pub fn new() -> Self { Self::with_capacity(DEFAULT_CAPACITY) }

    /// Constructs a new, empty `DynArr<T>` with room for exactly `capacity`
    /// elements. A capacity of zero allocates nothing until the first append.
    ///
    /// # Panics
    ///
    /// Panics if the buffer size would exceed `isize::MAX` bytes.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let mut arr = DynArr::with_capacity(2);
    /// arr.add_range([1, 2]);
    /// assert_eq!(arr.capacity(), 2);
    ///
    /// arr.add(3);
    /// assert_eq!(arr.capacity(), 4);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ptr: infallible(allocate(capacity)),
            len: 0,
            cap: capacity,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn sized_for(len: usize) -> Self {
        Self::with_capacity(infallible(initial_capacity(len)))
    }

    /// Returns the number of elements in the array.
    #[inline(always)]
    pub const fn len(&self) -> usize { self.len }

    /// Alias of [`len`](Self::len).
    #[inline(always)]
    pub const fn count(&self) -> usize { self.len }

    /// Returns the number of elements the array can hold before it grows.
    ///
    /// Always at least [`len`](Self::len).
    #[inline(always)]
    pub const fn capacity(&self) -> usize { self.cap }

    /// Returns `true` if the array holds no elements.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    #[inline]
    fn check_index(&self, index: usize) -> Result<(), OutOfRange> {
        match index < self.len {
            true => Ok(()),
            false => Err(OutOfRange::new(index, self.len)),
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let arr = DynArr::from([5, 6, 7]);
    /// assert_eq!(arr.get(1), Ok(&6));
    /// assert!(arr.get(3).is_err());
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T, OutOfRange> {
        self.as_slice()
            .get(index)
            .ok_or(OutOfRange::new(index, self.len))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `index >= len`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange::new(index, len))
    }

    /// Overwrites the element at `index` and returns the previous one.
    ///
    /// Never resizes or shifts.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `index >= len`. The array is unchanged and `value`
    /// is dropped.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let mut arr = DynArr::from([5, 6, 7]);
    /// assert_eq!(arr.set(1, 666), Ok(6));
    /// assert_eq!(arr.to_string(), "[5, 666, 7]");
    /// ```
    #[inline]
    pub fn set(&mut self, index: usize, value: T) -> Result<T, OutOfRange> {
        self.get_mut(index).map(|slot| mem::replace(slot, value))
    }

    /// Appends an element to the back of the array, growing it first if
    /// it is full.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let mut arr = DynArr::from(["Vasil", "Ganka"]);
    /// arr.add("Georgi");
    /// assert_eq!(arr.to_string(), "[Vasil, Ganka, Georgi]");
    /// ```
    ///
    /// # Time Complexity
    ///
    /// Takes amortized *O*(1) time.
    #[inline]
    pub fn add(&mut self, value: T) {
        if self.len == self.cap { self.grow_one(); }
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Appends every value in order, exactly as repeated [`add`](Self::add)
    /// calls would. Growth happens lazily as the buffer fills up.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let mut arr = DynArr::new();
    /// arr.add_range(1000..3000);
    ///
    /// assert_eq!(arr.len(), 2000);
    /// assert_eq!(arr.capacity(), 2048);
    /// ```
    pub fn add_range<I: IntoIterator<Item = T>>(&mut self, values: I) {
        values.into_iter().for_each(|value| self.add(value));
    }

    /// Inserts an element at position `index`, shifting all elements after
    /// it to the right.
    ///
    /// `index == len` appends, `index == 0` prepends.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `index > len`. The array is unchanged and `value`
    /// is dropped.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let mut arr = DynArr::from([10, 12, 14]);
    /// arr.insert_at(0, 8).unwrap();
    /// arr.insert_at(4, 16).unwrap();
    ///
    /// assert_eq!(arr, [8, 10, 12, 14, 16]);
    /// assert!(arr.insert_at(6, 18).is_err());
    /// ```
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(`len - index`) time.
    pub fn insert_at(&mut self, index: usize, value: T) -> Result<(), OutOfRange> {
        if index > self.len { return Err(OutOfRange::new(index, self.len)) }
        if self.len == self.cap { self.grow_one(); }

        unsafe {
            let ptr = self.ptr.as_ptr().add(index);
            ptr::copy(ptr, ptr.add(1), self.len - index);
            ptr.write(value);
        }
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting all elements
    /// after it to the left. The capacity is unchanged.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let mut arr = DynArr::from(["Vasil", "Deyan", "Valentin"]);
    /// assert_eq!(arr.remove_at(1), Ok("Deyan"));
    /// assert_eq!(arr.to_string(), "[Vasil, Valentin]");
    /// ```
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(`len - index`) time.
    pub fn remove_at(&mut self, index: usize) -> Result<T, OutOfRange> {
        self.check_index(index)?;
        self.len -= 1;
        unsafe {
            let ptr = self.ptr.as_ptr().add(index);
            let removed = ptr.read();
            ptr::copy(ptr.add(1), ptr, self.len - index);
            Ok(removed)
        }
    }

    /// Swaps the elements at `a` and `b`.
    ///
    /// # Errors
    ///
    /// [`OutOfRange`] for the first index that is `>= len`. Nothing is
    /// swapped.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let mut arr = DynArr::from([10, 15, 20]);
    /// arr.exchange(0, 2).unwrap();
    /// assert_eq!(arr, [20, 15, 10]);
    /// ```
    pub fn exchange(&mut self, a: usize, b: usize) -> Result<(), OutOfRange> {
        self.check_index(a)?;
        self.check_index(b)?;
        self.as_mut_slice().swap(a, b);
        Ok(())
    }

    /// Removes the last element and returns it, or `None` if the array is
    /// empty.
    ///
    /// # Time Complexity
    ///
    /// Takes *O*(1) time.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        match self.len == 0 {
            true => None,
            false => unsafe {
                self.len -= 1;
                Some(self.ptr.as_ptr().add(self.len).read())
            }
        }
    }

    /// Drops every element. The capacity is kept.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let mut arr = DynArr::from([1, 5, 10, 15]);
    /// arr.clear();
    ///
    /// assert!(arr.is_empty());
    /// assert_eq!(arr.to_string(), "[]");
    /// ```
    pub fn clear(&mut self) {
        let elems: *mut [T] = self.as_mut_slice();
        self.len = 0;
        unsafe { ptr::drop_in_place(elems) }
    }

    /// Ensures room for at least `additional` more elements, growing with
    /// the same doubling policy appends use.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows.
    ///
    /// # Examples
    /// ```
    /// use growarr::DynArr;
    ///
    /// let mut arr = DynArr::<u8>::new();
    /// arr.reserve(20);
    /// assert_eq!(arr.capacity(), 32);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        infallible(self.try_reserve(additional))
    }

    /// Fallible form of [`reserve`](Self::reserve).
    ///
    /// # Errors
    ///
    /// [`AllocErr`] if the capacity overflows or the allocator fails. The
    /// array is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), AllocErr> {
        let required = self.len
            .checked_add(additional)
            .ok_or(AllocErr::Overflow)?;

        if required <= self.cap { return Ok(()) }
        try_grow(self, grown_capacity(self.cap, required)?)
    }

    #[cold]
    fn grow_one(&mut self) {
        debug_assert_eq!(self.len, self.cap);
        infallible(self.try_reserve(1));
    }

    /// Extracts a slice containing the entire array.
    #[inline]
    pub const fn as_slice(&self) -> &[T] {
        // We are tracking initialized values via len, ensuring the slice is not UB
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice containing the entire array.
    #[inline]
    pub const fn as_mut_slice(&mut self) -> &mut [T] {
        // We are tracking initialized values via len, ensuring the slice is not UB
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}
