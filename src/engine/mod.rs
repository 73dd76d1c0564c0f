// Conversion engine - independent of UI

pub mod core;
pub mod worker;

pub use core::*;
