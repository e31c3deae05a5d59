use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{LoadError, SymbolError};
use crate::parser::{parse_lines, GrammarLine};
use crate::rules::Rule;

// --- Symbols ---

/// Grammar symbol id. Ids below [`PHRASE_LOWER_LIMIT`] are terminal
/// (lexical) categories, ids at or above it are phrase categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub u32);

pub const PHRASE_LOWER_LIMIT: u32 = 1 << 20;

/// Matches zero input tokens.
pub const EMPTY: Symbol = Symbol(0);
/// Matches any single input token.
pub const UNKNOWN: Symbol = Symbol(1);
pub const PARSE_ROOT: Symbol = Symbol(PHRASE_LOWER_LIMIT);

pub const EMPTY_NAME: &str = "EMPTY";
pub const UNKNOWN_NAME: &str = "UNKNOWN";
pub const ROOT_NAME: &str = "ROOT";

const FIRST_TERMINAL: u32 = 2;

impl Symbol {
    pub fn is_phrase(self) -> bool {
        self.0 >= PHRASE_LOWER_LIMIT
    }

    pub fn is_terminal(self) -> bool {
        !self.is_phrase()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// --- Grammar Structures ---

#[derive(Debug, Clone)]
pub struct Grammar {
    rules_by_head: HashMap<Symbol, Vec<Rule>>,
    names: HashMap<Symbol, String>,
    symbols_by_name: HashMap<String, Symbol>,
    terminals_by_word: HashMap<String, Symbol>,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// All rules producing `symbol`, in definition order. Empty for symbols
    /// without rules.
    pub fn rules_with_head(&self, symbol: Symbol) -> &[Rule] {
        self.rules_by_head.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn category_name(&self, symbol: Symbol) -> &str {
        self.names.get(&symbol).map_or("?", String::as_str)
    }

    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        self.symbols_by_name.get(name).copied()
    }

    /// Terminal category of `word`, or [`UNKNOWN`] for unlisted words.
    pub fn terminal_category(&self, word: &str) -> Symbol {
        self.terminals_by_word.get(word).copied().unwrap_or(UNKNOWN)
    }

    pub fn is_phrase(&self, symbol: Symbol) -> bool {
        symbol.is_phrase()
    }

    pub fn is_terminal(&self, symbol: Symbol) -> bool {
        symbol.is_terminal()
    }

    pub fn rule_count(&self) -> usize {
        self.rules_by_head.values().map(Vec::len).sum()
    }

    pub fn word_count(&self) -> usize {
        self.terminals_by_word.len()
    }
}

// --- Building ---

/// Incremental construction of a [`Grammar`]. Symbol ids are handed out per
/// range in registration order.
#[derive(Debug)]
pub struct GrammarBuilder {
    grammar: Grammar,
    next_terminal: u32,
    next_phrase: u32,
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        GrammarBuilder::new()
    }
}

impl GrammarBuilder {
    pub fn new() -> Self {
        let mut builder = GrammarBuilder {
            grammar: Grammar {
                rules_by_head: HashMap::new(),
                names: HashMap::new(),
                symbols_by_name: HashMap::new(),
                terminals_by_word: HashMap::new(),
            },
            next_terminal: FIRST_TERMINAL,
            next_phrase: PHRASE_LOWER_LIMIT + 1,
        };
        builder.name(EMPTY, EMPTY_NAME);
        builder.name(UNKNOWN, UNKNOWN_NAME);
        builder.name(PARSE_ROOT, ROOT_NAME);
        builder
    }

    fn name(&mut self, symbol: Symbol, name: &str) {
        self.grammar.names.insert(symbol, name.to_string());
        self.grammar.symbols_by_name.insert(name.to_string(), symbol);
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.grammar.symbol(name)
    }

    /// Returns the terminal category called `name`, registering it if needed.
    pub fn terminal(&mut self, name: &str) -> Result<Symbol, SymbolError> {
        if let Some(symbol) = self.lookup(name) {
            return if symbol.is_terminal() {
                Ok(symbol)
            } else {
                Err(SymbolError::KindConflict { name: name.to_string(), existing: "phrase" })
            };
        }
        if self.next_terminal >= PHRASE_LOWER_LIMIT {
            return Err(SymbolError::TooManyTerminals { limit: PHRASE_LOWER_LIMIT - FIRST_TERMINAL });
        }
        let symbol = Symbol(self.next_terminal);
        self.next_terminal += 1;
        self.name(symbol, name);
        Ok(symbol)
    }

    /// Returns the phrase category called `name`, registering it if needed.
    pub fn phrase(&mut self, name: &str) -> Result<Symbol, SymbolError> {
        if let Some(symbol) = self.lookup(name) {
            return if symbol.is_phrase() {
                Ok(symbol)
            } else {
                Err(SymbolError::KindConflict { name: name.to_string(), existing: "terminal" })
            };
        }
        let symbol = Symbol(self.next_phrase);
        self.next_phrase = self.next_phrase.checked_add(1).ok_or(SymbolError::TooManyPhrases)?;
        self.name(symbol, name);
        Ok(symbol)
    }

    /// Classifies `word` as `category`, returning the category it replaced.
    pub fn word(&mut self, word: &str, category: Symbol) -> Option<Symbol> {
        self.grammar.terminals_by_word.insert(word.to_string(), category)
    }

    pub fn rule(&mut self, head: Symbol, body: Vec<Symbol>, weight: i32, annotation: &str) -> &mut Self {
        self.grammar
            .rules_by_head
            .entry(head)
            .or_default()
            .push(Rule::phrase(head, body, weight, annotation));
        self
    }

    pub fn build(self) -> Grammar {
        self.grammar
    }
}

// --- Loading Grammar ---

pub fn load_grammar(path: &Path) -> Result<Grammar, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grammar = parse_grammar(&text)?;
    info!(
        "Loaded grammar {:?}: {} rules, {} words",
        path,
        grammar.rule_count(),
        grammar.word_count()
    );
    Ok(grammar)
}

/// Builds a grammar from its textual form.
///
/// Lexicon categories are registered first so that a body symbol can be
/// classified no matter where its lexicon line appears. Every body symbol
/// that is neither a lexicon category nor a reserved terminal is a phrase
/// symbol; undefined ones are left for the validator to report.
pub fn parse_grammar(text: &str) -> Result<Grammar, LoadError> {
    let lines = parse_lines(text)?;
    let mut builder = GrammarBuilder::new();
    let at = |line: usize| move |source: SymbolError| LoadError::Symbol { line, source };

    for (line, parsed) in &lines {
        if let GrammarLine::Lexicon { category, .. } = parsed {
            builder.terminal(category).map_err(at(*line))?;
        }
    }
    for (line, parsed) in &lines {
        if let GrammarLine::Rule { head, .. } = parsed {
            builder.phrase(head).map_err(at(*line))?;
        }
    }

    for (line, parsed) in lines {
        match parsed {
            GrammarLine::Lexicon { category, words } => {
                let symbol = builder.terminal(category).map_err(at(line))?;
                for word in words {
                    if let Some(previous) = builder.word(word, symbol) {
                        if previous != symbol {
                            warn!(
                                "Line {}: word '{}' reclassified from {} to {}",
                                line,
                                word,
                                builder.grammar.category_name(previous),
                                category
                            );
                        }
                    }
                }
            }
            GrammarLine::Rule { head, alternatives } => {
                let head = builder.phrase(head).map_err(at(line))?;
                for alternative in alternatives {
                    let mut body = Vec::with_capacity(alternative.symbols.len());
                    for name in alternative.symbols {
                        let symbol = match builder.lookup(name) {
                            Some(symbol) => symbol,
                            None => {
                                debug!("Line {}: '{}' has no rules or words yet", line, name);
                                builder.phrase(name).map_err(at(line))?
                            }
                        };
                        body.push(symbol);
                    }
                    builder.rule(
                        head,
                        body,
                        alternative.weight.unwrap_or(crate::rules::DEFAULT_WEIGHT),
                        alternative.annotation.unwrap_or(""),
                    );
                }
            }
        }
    }

    Ok(builder.build())
}
