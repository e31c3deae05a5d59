use clap::Parser;
use std::cmp::Ordering;
use std::path::PathBuf;
use std::vec::Vec;
// --- Data Structures ---

/// A node of a derivation tree. Internal nodes are labelled with their phrase
/// category, leaves with the word they matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticNode {
    pub label: String,
    /// Category of the rule head; for a leaf, its terminal category.
    pub category: String,
    pub weight: i32,
    pub annotation: String,
    pub children: Vec<SemanticNode>,
}

impl SemanticNode {
    pub fn new(label: impl Into<String>, category: impl Into<String>, weight: i32, annotation: impl Into<String>) -> Self {
        SemanticNode {
            label: label.into(),
            category: category.into(),
            weight,
            annotation: annotation.into(),
            children: Vec::new(),
        }
    }

    pub fn add_child(&mut self, child: SemanticNode) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Matched words, left to right. Empty matches contribute nothing.
    pub fn words(&self) -> Vec<&str> {
        let mut words = Vec::new();
        self.collect_words(&mut words);
        words
    }

    fn collect_words<'a>(&'a self, words: &mut Vec<&'a str>) {
        if self.is_leaf() {
            if !self.label.is_empty() {
                words.push(&self.label);
            }
            return;
        }
        for child in &self.children {
            child.collect_words(words);
        }
    }

    /// Ranking of competing full-sentence trees: higher root weight first.
    pub fn rank(&self, other: &SemanticNode) -> Ordering {
        other.weight.cmp(&self.weight)
    }
}

// --- Command Line ---

#[derive(Parser, Debug)]
#[command(name = "pen_tool", about = "Earley chart parsing of natural language sentences with weighted grammars", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level for the stderr (and file) logger.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub loglevel: LogLevel,

    /// Also write log records to this file.
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Parse every line of a sentence file.
    Parse(ParseArgs),
    /// Only load and validate a grammar.
    Validate(ValidateArgs),
}

#[derive(clap::Args, Debug)]
pub struct ParseArgs {
    #[arg()]
    pub grammar: PathBuf,
    #[arg()]
    pub sentences: PathBuf,
    #[arg(long, value_enum, default_value_t = TreeFormat::Bracketed)]
    pub format: TreeFormat,
    /// Print only the best ranked tree of each sentence.
    #[arg(long)]
    pub best: bool,
    /// Print the parse time of each sentence.
    #[arg(long)]
    pub timing: bool,
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    #[arg()]
    pub grammar: PathBuf,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    /// `(ROOT (NP (DET the) ...))` on one line.
    Bracketed,
    /// One node per line, indented by depth, with weights and annotations.
    Indented,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
