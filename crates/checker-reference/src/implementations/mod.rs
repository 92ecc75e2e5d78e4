pub mod carbon;
pub mod memory;
