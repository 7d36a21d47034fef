pub mod shop;
pub mod coordinates;
pub mod resolution;

pub use shop::ShopRecord;
pub use coordinates::Coordinates;
pub use resolution::{ResolutionOutcome, ResolutionTier};
