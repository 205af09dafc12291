//! Request handlers, one module per resource.
//!
//! Handlers validate, call the repositories, and wrap results in the
//! envelopes from [`crate::response`]. They hold no business state.

pub mod furniture;
pub mod room;
