//! Chat session streaming primitives.

pub mod stream;

pub use stream::StreamEvent;
