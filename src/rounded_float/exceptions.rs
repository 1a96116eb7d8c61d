// ============================================================================
// Exception Tracking
// Sticky floating-point exception flags of the MPFR engine
// ============================================================================
//
// The engine keeps one set of sticky flags. Every rounding operation may
// raise some of them and nothing but an explicit clear lowers them.
//
// Concurrency hazard: depending on how the engine was built the register is
// either thread-local or shared by the whole process. Observations are only
// meaningful when no other thread touches the register in between; callers
// that need that guarantee hold `ExceptionTracker::serialize()`.

use crate::numeric::{NumericError, NumericResult};
use arrayvec::ArrayVec;
use gmp_mpfr_sys::mpfr;
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Set of floating-point exception flags.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExceptionFlags(u8);

impl ExceptionFlags {
    pub const EMPTY: Self = Self(0);
    pub const UNDERFLOW: Self = Self(1 << 0);
    pub const OVERFLOW: Self = Self(1 << 1);
    /// Invalid operation (NaN result) or out-of-range conversion
    pub const INVALID: Self = Self(1 << 2);
    pub const INEXACT: Self = Self(1 << 3);
    pub const DIVIDE_BY_ZERO: Self = Self(1 << 4);
    pub const ALL: Self = Self(0b1_1111);

    /// Everything but `INEXACT`, which almost every operation raises.
    pub const STRICT: Self = Self(
        Self::UNDERFLOW.0 | Self::OVERFLOW.0 | Self::INVALID.0 | Self::DIVIDE_BY_ZERO.0,
    );

    const NAMED: [(ExceptionFlags, &'static str); 5] = [
        (Self::UNDERFLOW, "underflow"),
        (Self::OVERFLOW, "overflow"),
        (Self::INVALID, "invalid"),
        (Self::INEXACT, "inexact"),
        (Self::DIVIDE_BY_ZERO, "divide-by-zero"),
    ];

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Keep only known flag bits.
    #[inline]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Names of the set flags, in declaration order.
    pub fn names(self) -> ArrayVec<&'static str, 5> {
        Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for ExceptionFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ExceptionFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ExceptionFlags {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for ExceptionFlags {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl fmt::Display for ExceptionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        f.write_str(&self.names().join(" | "))
    }
}

impl fmt::Debug for ExceptionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExceptionFlags({})", self)
    }
}

// ============================================================================
// Tracker
// ============================================================================

static REGISTER_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Guard returned by [`ExceptionTracker::serialize`].
pub type ExceptionGuard = MutexGuard<'static, ()>;

/// Stateless view over the engine's sticky exception register.
pub struct ExceptionTracker;

impl ExceptionTracker {
    /// Flags currently raised.
    pub fn snapshot() -> ExceptionFlags {
        let mut flags = ExceptionFlags::EMPTY;
        unsafe {
            if mpfr::underflow_p() != 0 {
                flags.insert(ExceptionFlags::UNDERFLOW);
            }
            if mpfr::overflow_p() != 0 {
                flags.insert(ExceptionFlags::OVERFLOW);
            }
            if mpfr::nanflag_p() != 0 || mpfr::erangeflag_p() != 0 {
                flags.insert(ExceptionFlags::INVALID);
            }
            if mpfr::inexflag_p() != 0 {
                flags.insert(ExceptionFlags::INEXACT);
            }
            if mpfr::divby0_p() != 0 {
                flags.insert(ExceptionFlags::DIVIDE_BY_ZERO);
            }
        }
        flags
    }

    /// Lower every flag in `mask`.
    pub fn clear(mask: ExceptionFlags) {
        unsafe {
            if mask.contains(ExceptionFlags::UNDERFLOW) {
                mpfr::clear_underflow();
            }
            if mask.contains(ExceptionFlags::OVERFLOW) {
                mpfr::clear_overflow();
            }
            if mask.contains(ExceptionFlags::INVALID) {
                mpfr::clear_nanflag();
                mpfr::clear_erangeflag();
            }
            if mask.contains(ExceptionFlags::INEXACT) {
                mpfr::clear_inexflag();
            }
            if mask.contains(ExceptionFlags::DIVIDE_BY_ZERO) {
                mpfr::clear_divby0();
            }
        }
    }

    /// Raise every flag in `mask`.
    pub fn raise(mask: ExceptionFlags) {
        unsafe {
            if mask.contains(ExceptionFlags::UNDERFLOW) {
                mpfr::set_underflow();
            }
            if mask.contains(ExceptionFlags::OVERFLOW) {
                mpfr::set_overflow();
            }
            if mask.contains(ExceptionFlags::INVALID) {
                mpfr::set_nanflag();
            }
            if mask.contains(ExceptionFlags::INEXACT) {
                mpfr::set_inexflag();
            }
            if mask.contains(ExceptionFlags::DIVIDE_BY_ZERO) {
                mpfr::set_divby0();
            }
        }
    }

    /// Whether any flag in `mask` is raised.
    #[inline]
    pub fn test(mask: ExceptionFlags) -> bool {
        Self::snapshot().intersects(mask)
    }

    /// Run `op` and report which flags in `mask` it raised.
    ///
    /// Flags in `mask` are lowered first so earlier operations cannot leak
    /// into the report. Afterwards every flag that was raised before the call
    /// is raised again, so the register stays sticky for the caller.
    pub fn observe<T, F: FnOnce() -> T>(mask: ExceptionFlags, op: F) -> (T, ExceptionFlags) {
        let saved = Self::snapshot();
        Self::clear(mask);
        let out = op();
        let raised = Self::snapshot() & mask;
        Self::raise(saved);
        (out, raised)
    }

    /// Run `op`, failing if it raised any flag in `mask`.
    ///
    /// # Errors
    /// Returns `FloatingPoint` with the raised subset of `mask`.
    pub fn strict<T, F: FnOnce() -> T>(mask: ExceptionFlags, op: F) -> NumericResult<T> {
        let (out, raised) = Self::observe(mask, op);
        if raised.is_empty() {
            Ok(out)
        } else {
            tracing::debug!(flags = %raised, "floating-point exception in strict operation");
            Err(NumericError::FloatingPoint(raised))
        }
    }

    /// Process-wide lock for callers that must observe the register without
    /// interference from other threads of this crate's users.
    pub fn serialize() -> ExceptionGuard {
        REGISTER_LOCK.lock()
    }
}
