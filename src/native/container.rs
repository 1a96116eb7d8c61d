// ============================================================================
// Value Container
// Reference-counted copy-on-write holder of a NativeHandle
// ============================================================================

use super::handle::{ExactRepr, FloatRepr, NativeHandle, NativeRepr};
use crate::numeric::Precision;
use std::sync::Arc;

/// Shared holder of one [`NativeHandle`].
///
/// Cloning a container shares the handle. Every mutation goes through
/// [`ValueContainer::ensure_unique`], which deep copies the handle first when
/// anyone else still references it. The uniqueness check and refcount
/// updates are atomic (`Arc::make_mut`), so two values that share storage
/// never observe each other's later mutation.
#[derive(Debug)]
pub(crate) struct ValueContainer<R: NativeRepr> {
    handle: Arc<NativeHandle<R>>,
}

impl<R: NativeRepr> Clone for ValueContainer<R> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            handle: Arc::clone(&self.handle),
        }
    }
}

impl<R: ExactRepr> ValueContainer<R> {
    pub(crate) fn new() -> Self {
        Self::from_handle(NativeHandle::new())
    }
}

impl<R: FloatRepr> ValueContainer<R> {
    pub(crate) fn with_precision(precision: Precision) -> Self {
        Self::from_handle(NativeHandle::with_precision(precision))
    }

    #[inline]
    pub(crate) fn precision(&self) -> Precision {
        self.handle.precision()
    }
}

impl<R: NativeRepr> ValueContainer<R> {
    #[inline]
    pub(crate) fn from_handle(handle: NativeHandle<R>) -> Self {
        Self {
            handle: Arc::new(handle),
        }
    }

    /// Read-only pointer to the shared struct.
    #[inline]
    pub(crate) fn as_ptr(&self) -> *const R {
        self.handle.as_ptr()
    }

    /// Detach from any other holder, then hand out the single pointer used
    /// for both reading and writing during an in-place mutation.
    pub(crate) fn ensure_unique(&mut self) -> *mut R {
        if Arc::strong_count(&self.handle) > 1 {
            tracing::trace!(kind = R::KIND, "copy-on-write detach");
        }
        Arc::make_mut(&mut self.handle).as_mut_ptr()
    }

    /// Swap in freshly computed storage.
    #[inline]
    pub(crate) fn replace(&mut self, handle: NativeHandle<R>) {
        self.handle = Arc::new(handle);
    }

    /// Independent container holding a deep copy of the current value.
    pub(crate) fn detached(&self) -> Self {
        Self::from_handle(NativeHandle::clone(&self.handle))
    }

    /// Whether `self` and `other` reference the same native struct.
    #[inline]
    pub(crate) fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handle, &other.handle)
    }

    #[inline]
    pub(crate) fn ref_count(&self) -> usize {
        Arc::strong_count(&self.handle)
    }
}
