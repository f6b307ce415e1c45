//! Per-type field layouts.
//!
//! Each routine consumes exactly the bytes one serializer layer writes. A
//! type's layers run base first, in the order [`crate::dispatch`] calls them.

mod array;
mod geometry;
mod image;
mod node;
mod object;
mod state;
