/// Fixed bit-width definitions shared by navigation and literal packing.
pub mod sizes;

pub use sizes::*;
