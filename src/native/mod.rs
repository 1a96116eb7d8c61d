// ============================================================================
// Native Module
// Ownership and copy-on-write protocol over the engine's mutable structs
// ============================================================================
//
// This module provides:
// - NativeHandle<R>: owns one engine struct, released exactly once
// - ValueContainer<R>: Arc-shared handle with clone-before-mutate
// - String marshaling helpers shared by every value type
//
// Everything here is crate-private; value types never expose raw pointers.

mod container;
mod handle;
mod strings;

pub(crate) use container::ValueContainer;
pub(crate) use handle::NativeHandle;
pub(crate) use strings::{buffer_to_string, to_c_string};
