//! Earley chart parsing of natural language sentences against weighted
//! context-free grammars, producing ranked and annotated derivation trees.

pub mod chart;
pub mod cli;
pub mod earley;
pub mod error;
pub mod grammar;
pub mod logger;
pub mod output;
pub mod parser;
pub mod rules;
pub mod sentence;
pub mod structs;
pub mod validator;


pub use earley::{CancelHandle, EarleyParser};
pub use error::{CliError, GrammarError, LoadError};
pub use grammar::{load_grammar, parse_grammar, Grammar, GrammarBuilder, Symbol};
pub use sentence::{Sentence, SimpleSentence};
pub use structs::SemanticNode;
