pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod matcher;
pub mod normalizer;
pub mod parser;

pub use grammar::{Grammar, Rule, Symbol, FAKE_START};
pub use matcher::{derivable, Matcher};
pub use normalizer::{normalize, NormalizeError};
