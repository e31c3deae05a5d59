use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::grammar::Symbol;

/// A grammar that cannot be parsed with. Raised once, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("couldn't find rule for symbol {symbol} (AKA {name})")]
    MissingSymbol { symbol: Symbol, name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("'{name}' is already a {existing} symbol")]
    KindConflict { name: String, existing: &'static str },
    #[error("too many terminal categories (at most {limit})")]
    TooManyTerminals { limit: u32 },
    #[error("too many phrase categories")]
    TooManyPhrases,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read grammar {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("syntax error on line {line}, column {column}: unexpected {found:?}")]
    Syntax { line: usize, column: usize, found: String },
    #[error("line {line}: {source}")]
    Symbol {
        line: usize,
        #[source]
        source: SymbolError,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid grammar: {0}")]
    Grammar(#[from] GrammarError),
    #[error("cannot read sentences {path:?}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
    #[error("cannot initialize logging: {0}")]
    Logging(String),
}
