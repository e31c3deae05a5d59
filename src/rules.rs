use crate::grammar::{Symbol, PARSE_ROOT};

pub const DEFAULT_WEIGHT: i32 = 0;

// --- Rule Structures ---

/// The production-specific part of a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// `HEAD -> B1 B2 ... Bn`
    Phrase { body: Vec<Symbol> },
    /// A single scanned word. Built by the scanner, never stored in a grammar.
    Terminal { word: String },
    /// The synthetic rule anchoring chart 0. It expects the parse root once.
    Seed,
}

/// A grammar production. Head, weight and annotation are shared by every kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub head: Symbol,
    pub weight: i32,
    pub annotation: String,
    pub kind: RuleKind,
}

impl Rule {
    pub fn phrase(head: Symbol, body: Vec<Symbol>, weight: i32, annotation: impl Into<String>) -> Rule {
        Rule {
            head,
            weight,
            annotation: annotation.into(),
            kind: RuleKind::Phrase { body },
        }
    }

    pub fn terminal(head: Symbol, word: impl Into<String>) -> Rule {
        Rule {
            head,
            weight: DEFAULT_WEIGHT,
            annotation: String::new(),
            kind: RuleKind::Terminal { word: word.into() },
        }
    }

    pub(crate) fn seed() -> Rule {
        Rule {
            head: PARSE_ROOT,
            weight: DEFAULT_WEIGHT,
            annotation: String::new(),
            kind: RuleKind::Seed,
        }
    }

    pub fn is_phrase(&self) -> bool {
        matches!(self.kind, RuleKind::Phrase { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, RuleKind::Terminal { .. })
    }

    pub fn is_seed(&self) -> bool {
        matches!(self.kind, RuleKind::Seed)
    }

    /// Body symbols of a phrase rule; empty for the other kinds.
    pub fn body(&self) -> &[Symbol] {
        match &self.kind {
            RuleKind::Phrase { body } => body,
            _ => &[],
        }
    }

    pub fn word(&self) -> Option<&str> {
        match &self.kind {
            RuleKind::Terminal { word } => Some(word),
            _ => None,
        }
    }

    /// Number of dot positions a row of this rule can advance through.
    /// A terminal counts its word as one matched constituent.
    pub fn arity(&self) -> usize {
        match &self.kind {
            RuleKind::Phrase { body } => body.len(),
            RuleKind::Terminal { .. } | RuleKind::Seed => 1,
        }
    }

    /// The symbol expected after `dot`, if any.
    pub fn symbol_at(&self, dot: usize) -> Option<Symbol> {
        match &self.kind {
            RuleKind::Phrase { body } => body.get(dot).copied(),
            RuleKind::Seed if dot == 0 => Some(PARSE_ROOT),
            _ => None,
        }
    }
}
