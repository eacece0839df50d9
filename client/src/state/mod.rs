//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The editing model itself is owned by the `extras` crate. State here only
//! wraps it with what the views need on top: the last blocking notice and
//! the last rejected command.

pub mod extras;
