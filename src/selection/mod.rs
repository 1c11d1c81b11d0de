pub mod sampler;
pub mod selector;

pub use sampler::{choose_subregion, subregion_seed, SubregionPick};
pub use selector::{BirdSelector, Fallbacks, Selection};
