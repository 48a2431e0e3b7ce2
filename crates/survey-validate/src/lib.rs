pub mod inspector;

pub use inspector::Inspector;
