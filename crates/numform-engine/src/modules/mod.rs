//! Built-in compute modules.

pub mod chain;
pub mod digit_groups;
pub mod exclude;
pub mod pairs;
pub mod preset;

pub use chain::Chain;
pub use digit_groups::DigitGroups;
pub use exclude::ExcludeEdges;
pub use pairs::PairPermutations;
pub use preset::StaticPreset;
