use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write;

use crate::grammar::{Grammar, Symbol, PARSE_ROOT};
use crate::rules::{Rule, RuleKind};

/// Sentence-wide row id; an index into the row arena of [`Charts`].
pub type StateId = usize;

/// The operation that created a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Process {
    Seed,
    Predict,
    Scan,
    Complete,
}

impl Process {
    pub fn as_str(self) -> &'static str {
        match self {
            Process::Seed => "seed",
            Process::Predict => "predict",
            Process::Scan => "scan",
            Process::Complete => "complete",
        }
    }
}

// --- Chart Rows ---

/// An Earley item: a rule, how much of it has been matched, and the span it
/// covers. Grammar rules are borrowed; scanned terminal rules are owned.
#[derive(Debug, Clone)]
pub struct ChartRow<'g> {
    rule: Cow<'g, Rule>,
    dot: usize,
    start: usize,
    end: usize,
    state: StateId,
    parents: Vec<StateId>,
    process: Process,
}

impl<'g> ChartRow<'g> {
    pub fn new(rule: Cow<'g, Rule>, start: usize, end: usize, process: Process) -> Self {
        ChartRow {
            rule,
            dot: 0,
            start,
            end,
            state: 0,
            parents: Vec::new(),
            process,
        }
    }

    /// A matched word (or empty match). Terminals have no inner dot progression.
    pub fn scanned(rule: Rule, start: usize, end: usize) -> Self {
        ChartRow {
            dot: 1,
            ..ChartRow::new(Cow::Owned(rule), start, end, Process::Scan)
        }
    }

    /// This row with the dot moved over the constituent completed by `child`,
    /// which ends at `end`. The newest parent goes first.
    pub fn advance(&self, end: usize, child: StateId) -> Self {
        let mut parents = Vec::with_capacity(self.parents.len() + 1);
        parents.push(child);
        parents.extend_from_slice(&self.parents);
        ChartRow {
            rule: self.rule.clone(),
            dot: self.dot + 1,
            start: self.start,
            end,
            state: 0,
            parents,
            process: Process::Complete,
        }
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn dot(&self) -> usize {
        self.dot
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    pub fn parents(&self) -> &[StateId] {
        &self.parents
    }

    pub fn process(&self) -> Process {
        self.process
    }

    pub fn is_complete(&self) -> bool {
        self.dot >= self.rule.arity()
    }

    pub fn next_constituent(&self) -> Option<Symbol> {
        self.rule.symbol_at(self.dot)
    }

    /// Dedup equality: rule, dot and span. Parents do not take part.
    pub fn same_item(&self, other: &ChartRow) -> bool {
        self.dot == other.dot
            && self.start == other.start
            && self.end == other.end
            && (std::ptr::eq(self.rule(), other.rule()) || self.rule() == other.rule())
    }

    /// `HEAD -> A . B [start,end] #id (process) <- parents`
    pub fn describe(&self, grammar: &Grammar) -> String {
        let mut text = format!("{} ->", grammar.category_name(self.rule.head));
        match &self.rule.kind {
            RuleKind::Phrase { body } => {
                for (i, symbol) in body.iter().enumerate() {
                    if i == self.dot {
                        text.push_str(" .");
                    }
                    let _ = write!(text, " {}", grammar.category_name(*symbol));
                }
            }
            RuleKind::Terminal { word } => {
                let _ = write!(text, " {:?}", word);
            }
            RuleKind::Seed => {
                if self.dot == 0 {
                    text.push_str(" .");
                }
                let _ = write!(text, " {}", grammar.category_name(PARSE_ROOT));
            }
        }
        if self.is_complete() {
            text.push_str(" .");
        }
        let _ = write!(
            text,
            " [{},{}] #{} ({})",
            self.start,
            self.end,
            self.state,
            self.process.as_str()
        );
        if !self.parents.is_empty() {
            let _ = write!(text, " <- {:?}", self.parents);
        }
        text
    }
}

// --- Charts ---

/// The rows of one sentence position, in insertion order.
#[derive(Debug, Default)]
struct Chart {
    states: Vec<StateId>,
    index: HashMap<(usize, usize, usize), Vec<StateId>>,
}

/// The n+1 charts of one sentence together with the arena that owns every
/// row. Charts only hold ids, so a row can be found from any chart.
#[derive(Debug)]
pub struct Charts<'g> {
    rows: Vec<ChartRow<'g>>,
    charts: Vec<Chart>,
}

impl<'g> Charts<'g> {
    pub fn new(positions: usize) -> Self {
        Charts {
            rows: Vec::new(),
            charts: (0..positions).map(|_| Chart::default()).collect(),
        }
    }

    /// Number of charts.
    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Appends `row` to `chart`, assigning it the next sentence-wide id.
    pub fn add(&mut self, chart: usize, mut row: ChartRow<'g>) -> StateId {
        let state = self.rows.len();
        row.state = state;
        let key = (row.start, row.end, row.dot);
        let target = &mut self.charts[chart];
        target.states.push(state);
        target.index.entry(key).or_default().push(state);
        self.rows.push(row);
        state
    }

    pub fn exists(&self, chart: usize, row: &ChartRow) -> bool {
        self.charts[chart]
            .index
            .get(&(row.start, row.end, row.dot))
            .map_or(false, |states| states.iter().any(|&state| self.rows[state].same_item(row)))
    }

    pub fn size(&self, chart: usize) -> usize {
        self.charts[chart].states.len()
    }

    pub fn row_at(&self, chart: usize, index: usize) -> &ChartRow<'g> {
        &self.rows[self.charts[chart].states[index]]
    }

    pub fn row_by_id(&self, state: StateId) -> &ChartRow<'g> {
        &self.rows[state]
    }

    /// Total number of rows over all charts.
    pub fn state_count(&self) -> usize {
        self.rows.len()
    }

    /// Complete parse-root rows of `chart` that start at position 0.
    pub fn roots_spanning_all(&self, chart: usize) -> Vec<&ChartRow<'g>> {
        self.charts[chart]
            .states
            .iter()
            .map(|&state| &self.rows[state])
            .filter(|row| {
                row.rule.is_phrase()
                    && row.rule.head == PARSE_ROOT
                    && row.is_complete()
                    && row.start == 0
                    && row.end == chart
            })
            .collect()
    }

    pub fn dump(&self, grammar: &Grammar) -> String {
        let mut text = String::new();
        for (i, chart) in self.charts.iter().enumerate() {
            let _ = writeln!(text, "Chart {}", i);
            for &state in &chart.states {
                let _ = writeln!(text, "  {}", self.rows[state].describe(grammar));
            }
        }
        text
    }
}
