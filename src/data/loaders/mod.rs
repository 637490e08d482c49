// mod.rs - Allele table loaders

pub mod delimited;

pub use delimited::delimiter_for;
