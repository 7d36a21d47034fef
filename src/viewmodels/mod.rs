pub mod address_resolver;
pub mod map_initializer;
pub mod marker_content;

#[cfg(test)]
pub(crate) mod test_support;

pub use address_resolver::{AddressResolver, ResolutionStrategy};
pub use map_initializer::{InitReport, InitSettings, MapInitializer};
