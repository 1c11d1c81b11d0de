pub mod bird;
pub mod store;

pub use bird::{Bird, BirdRef, Region};
pub use store::{load_regions, Catalog, CatalogError, SubregionMap};
