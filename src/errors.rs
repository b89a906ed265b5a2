use std::alloc::{Layout, LayoutError};

use thiserror::Error;


/// An index argument fell outside the bound its operation accepts.
///
/// The bound is always relative to the array's length, never its capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of range for length {len}")]
pub struct OutOfRange {
    pub index: usize,
    pub len: usize,
}

impl OutOfRange {
    #[inline]
    pub(crate) const fn new(index: usize, len: usize) -> Self { Self { index, len } }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocErr {
    #[error("capacity overflow")]
    Overflow,
    #[error("invalid parameters to Layout::from_size_align")]
    Layout,
    #[error("memory allocation of {} bytes failed", .layout.size())]
    Alloc { layout: Layout }
}

impl AllocErr {
    #[inline]
    pub(crate) const fn layout(_err: LayoutError) -> Self { Self::Layout }

    #[inline]
    pub(crate) const fn alloc(layout: Layout) -> Self { Self::Alloc { layout } }
}
