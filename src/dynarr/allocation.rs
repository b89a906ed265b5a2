use std::{alloc::{self, alloc, realloc, Layout}, ptr::NonNull};

use tracing::trace;

use crate::errors::AllocErr;
use super::{DynArr, DEFAULT_CAPACITY, GROWTH_FACTOR};

#[inline]
pub(super) fn infallible<T>(result: Result<T, AllocErr>) -> T {
    match result {
        Ok(x) => x,
        Err(AllocErr::Layout) => panic!("invalid parameters to Layout::from_size_align"),
        Err(AllocErr::Overflow) => panic!("capacity overflow"),
        Err(AllocErr::Alloc { layout }) => alloc::handle_alloc_error(layout),
    }
}

/// Next capacity once `required` slots no longer fit in `cap`.
#[inline]
pub(super) fn grown_capacity(cap: usize, required: usize) -> Result<usize, AllocErr> {
    let scaled = cap.checked_mul(GROWTH_FACTOR).ok_or(AllocErr::Overflow)?;
    Ok(scaled.max(required).max(1))
}

/// Capacity for an array built from `len` initial elements: the default,
/// scaled until everything fits.
pub(super) fn initial_capacity(len: usize) -> Result<usize, AllocErr> {
    let mut cap = DEFAULT_CAPACITY;
    while cap < len {
        cap = cap.checked_mul(GROWTH_FACTOR).ok_or(AllocErr::Overflow)?;
    }
    Ok(cap)
}

#[inline]
pub(super) fn allocate<T>(cap: usize) -> Result<NonNull<T>, AllocErr> {
    if DynArr::<T>::IS_ZST || cap == 0 { return Ok(NonNull::dangling()) }

    let layout = Layout::array::<T>(cap).map_err(AllocErr::layout)?;
    debug_assert!(layout.size() > 0);

    NonNull::new(unsafe { alloc(layout) })
        .ok_or(AllocErr::alloc(layout))
        .map(NonNull::cast)
}

/// # Safety
///
/// `ptr` must come from [`allocate`] or [`try_grow`] with this same `cap`.
#[inline]
pub(super) unsafe fn deallocate<T>(ptr: NonNull<T>, cap: usize) {
    if DynArr::<T>::IS_ZST || cap == 0 { return }

    // The layout was validated when the block was allocated.
    let layout = unsafe { Layout::array::<T>(cap).unwrap_unchecked() };
    unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) };
}

/// Moves the live elements into a buffer of `new_cap` slots.
///
/// On failure the array is left exactly as it was.
pub(super) fn try_grow<T>(arr: &mut DynArr<T>, new_cap: usize) -> Result<(), AllocErr> {
    assert!(new_cap >= arr.len);
    if new_cap <= arr.cap { return Ok(()) }

    let ptr = if DynArr::<T>::IS_ZST {
        NonNull::dangling()
    } else if arr.cap == 0 {
        allocate(new_cap)?
    } else {
        let layout = Layout::array::<T>(new_cap).map_err(AllocErr::layout)?;
        let prev_layout = Layout::array::<T>(arr.cap).map_err(AllocErr::layout)?;
        let ptr = unsafe { realloc(arr.ptr.as_ptr().cast(), prev_layout, layout.size()) };

        NonNull::new(ptr)
            .ok_or(AllocErr::alloc(layout))?
            .cast()
    };

    trace!(from = arr.cap, to = new_cap, len = arr.len, "growing buffer");

    arr.ptr = ptr;
    arr.cap = new_cap;
    Ok(())
}
