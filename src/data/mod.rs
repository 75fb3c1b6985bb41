//! Data module: patch-local field storage.

pub mod field;
pub mod storage;

pub use field::Field;
pub use storage::{Storage, VecStorage};
