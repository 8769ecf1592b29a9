//! Transport index readers.

pub mod static_provider;

pub use static_provider::StaticTransportIndex;
