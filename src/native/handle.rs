// ============================================================================
// Native Handle
// Owned lifecycle of exactly one engine struct (mpz_t, mpq_t, mpf_t, mpfr_t)
// ============================================================================

use crate::numeric::Precision;
use gmp_mpfr_sys::gmp::{self, mpf_t, mpq_t, mpz_t};
use gmp_mpfr_sys::mpfr::{self, mpfr_t};
use std::fmt;
use std::mem::MaybeUninit;

// ============================================================================
// Representation Traits
// ============================================================================

/// An engine struct whose lifecycle is managed by [`NativeHandle`].
///
/// # Safety
/// `init_copy` must fully initialize `dst` from an initialized `src`, and
/// `release` must free every allocation made by the init functions. Neither
/// may be called on an uninitialized struct.
pub(crate) unsafe trait NativeRepr: Sized {
    /// Short engine name used in log records
    const KIND: &'static str;

    unsafe fn init_copy(dst: *mut Self, src: *const Self);

    unsafe fn release(raw: *mut Self);
}

/// Engine structs that need no precision to initialize.
///
/// # Safety
/// `init` must leave `raw` initialized and holding zero.
pub(crate) unsafe trait ExactRepr: NativeRepr {
    unsafe fn init(raw: *mut Self);
}

/// Engine structs whose storage width is fixed at init time.
///
/// # Safety
/// `init_with_precision` must leave `raw` initialized and holding zero.
pub(crate) unsafe trait FloatRepr: NativeRepr {
    unsafe fn init_with_precision(raw: *mut Self, precision: Precision);

    unsafe fn precision(raw: *const Self) -> Precision;
}

unsafe impl NativeRepr for mpz_t {
    const KIND: &'static str = "mpz";

    unsafe fn init_copy(dst: *mut Self, src: *const Self) {
        gmp::mpz_init_set(dst, src);
    }

    unsafe fn release(raw: *mut Self) {
        gmp::mpz_clear(raw);
    }
}

unsafe impl ExactRepr for mpz_t {
    unsafe fn init(raw: *mut Self) {
        gmp::mpz_init(raw);
    }
}

unsafe impl NativeRepr for mpq_t {
    const KIND: &'static str = "mpq";

    unsafe fn init_copy(dst: *mut Self, src: *const Self) {
        gmp::mpq_init(dst);
        gmp::mpq_set(dst, src);
    }

    unsafe fn release(raw: *mut Self) {
        gmp::mpq_clear(raw);
    }
}

unsafe impl ExactRepr for mpq_t {
    unsafe fn init(raw: *mut Self) {
        // mpq_init yields the canonical zero 0/1
        gmp::mpq_init(raw);
    }
}

unsafe impl NativeRepr for mpf_t {
    const KIND: &'static str = "mpf";

    unsafe fn init_copy(dst: *mut Self, src: *const Self) {
        gmp::mpf_init2(dst, gmp::mpf_get_prec(src));
        gmp::mpf_set(dst, src);
    }

    unsafe fn release(raw: *mut Self) {
        gmp::mpf_clear(raw);
    }
}

unsafe impl FloatRepr for mpf_t {
    unsafe fn init_with_precision(raw: *mut Self, precision: Precision) {
        gmp::mpf_init2(raw, precision.bits() as gmp::bitcnt_t);
    }

    unsafe fn precision(raw: *const Self) -> Precision {
        Precision::from_engine(gmp::mpf_get_prec(raw) as u64)
    }
}

unsafe impl NativeRepr for mpfr_t {
    const KIND: &'static str = "mpfr";

    unsafe fn init_copy(dst: *mut Self, src: *const Self) {
        mpfr::init2(dst, mpfr::get_prec(src));
        // Same width on both sides, so this copy is exact
        mpfr::set(dst, src, mpfr::rnd_t::RNDN);
    }

    unsafe fn release(raw: *mut Self) {
        mpfr::clear(raw);
    }
}

unsafe impl FloatRepr for mpfr_t {
    unsafe fn init_with_precision(raw: *mut Self, precision: Precision) {
        mpfr::init2(raw, precision.bits() as mpfr::prec_t);
        mpfr::set_zero(raw, 1);
    }

    unsafe fn precision(raw: *const Self) -> Precision {
        Precision::from_engine(mpfr::get_prec(raw) as u64)
    }
}

// ============================================================================
// Native Handle
// ============================================================================

/// Owns one initialized engine struct for its whole lifetime.
///
/// The struct is initialized in the constructor and released in `Drop`,
/// so it is never observed uninitialized and released exactly once. Raw
/// pointers never leave the crate.
pub(crate) struct NativeHandle<R: NativeRepr> {
    raw: R,
}

// The engine structs hold raw limb pointers owned exclusively by the handle.
// Concurrent reads through `*const` are safe in GMP and MPFR.
unsafe impl<R: NativeRepr> Send for NativeHandle<R> {}
unsafe impl<R: NativeRepr> Sync for NativeHandle<R> {}

impl<R: ExactRepr> NativeHandle<R> {
    /// Allocate a zero-valued exact struct.
    pub(crate) fn new() -> Self {
        let mut raw = MaybeUninit::<R>::uninit();
        unsafe {
            R::init(raw.as_mut_ptr());
            Self {
                raw: raw.assume_init(),
            }
        }
    }
}

impl<R: FloatRepr> NativeHandle<R> {
    /// Allocate a zero-valued float struct at `precision`.
    pub(crate) fn with_precision(precision: Precision) -> Self {
        let mut raw = MaybeUninit::<R>::uninit();
        unsafe {
            R::init_with_precision(raw.as_mut_ptr(), precision);
            Self {
                raw: raw.assume_init(),
            }
        }
    }

    pub(crate) fn precision(&self) -> Precision {
        unsafe { R::precision(self.as_ptr()) }
    }
}

impl<R: NativeRepr> NativeHandle<R> {
    #[inline]
    pub(crate) fn as_ptr(&self) -> *const R {
        &self.raw
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut R {
        &mut self.raw
    }
}

impl<R: NativeRepr> Clone for NativeHandle<R> {
    /// Deep copy: fresh allocation holding the same value and precision.
    fn clone(&self) -> Self {
        let mut raw = MaybeUninit::<R>::uninit();
        unsafe {
            R::init_copy(raw.as_mut_ptr(), self.as_ptr());
            Self {
                raw: raw.assume_init(),
            }
        }
    }
}

impl<R: NativeRepr> Drop for NativeHandle<R> {
    fn drop(&mut self) {
        unsafe { R::release(&mut self.raw) }
    }
}

impl<R: NativeRepr> fmt::Debug for NativeHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeHandle<{}>({:p})", R::KIND, self.as_ptr())
    }
}
