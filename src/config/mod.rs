pub mod definitions;
mod structs;

pub use structs::*;
