//! Request middleware for lifecycle concerns that span every route.

pub mod trace;

pub use trace::Trace;
