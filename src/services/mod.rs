pub mod aggregator;
pub mod assembler;
pub mod catalog;
pub mod classifier;
pub mod diagnostics;
pub mod enrichment;
pub mod filter;
pub mod location;
pub mod providers;
pub mod recommendations;
