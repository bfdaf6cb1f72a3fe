// Analyzer module: aggregates submodules for each stage of the analysis.

pub mod assembler;
pub mod defaults;
pub mod report;
pub mod statistics;
pub mod trends;

// Re-export the orchestrator for ease of use.
pub use assembler::MarketAnalysisAssembler;
