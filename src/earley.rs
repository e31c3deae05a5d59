use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::{debug, log_enabled, trace, Level};

use crate::chart::{ChartRow, Charts, Process, StateId};
use crate::error::GrammarError;
use crate::grammar::{Grammar, EMPTY, UNKNOWN};
use crate::rules::{Rule, RuleKind};
use crate::sentence::Sentence;
use crate::structs::SemanticNode;
use crate::validator::validate;

/// Requests cancellation of the parse currently running on an
/// [`EarleyParser`]. Cheap to clone and usable from any thread.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    stop: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
struct Session {
    last_parse_time: Option<Duration>,
}

/// Earley chart parser over a validated grammar.
///
/// One sentence is parsed at a time; concurrent callers of
/// [`parse_sentence`](EarleyParser::parse_sentence) queue on an internal lock.
#[derive(Debug)]
pub struct EarleyParser {
    grammar: Grammar,
    seed: Rule,
    stop: Arc<AtomicBool>,
    session: Mutex<Session>,
}

impl EarleyParser {
    /// Validates `grammar` and wraps it in a parser.
    pub fn new(grammar: Grammar) -> Result<Self, GrammarError> {
        validate(&grammar)?;
        Ok(EarleyParser {
            grammar,
            seed: Rule::seed(),
            stop: Arc::new(AtomicBool::new(false)),
            session: Mutex::new(Session::default()),
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle { stop: Arc::clone(&self.stop) }
    }

    pub fn stop_parsing(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Wall time of the last parse that ran to the end.
    pub fn last_parse_time(&self) -> Option<Duration> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner).last_parse_time
    }

    /// Parses `sentence`, returning its trees best first.
    ///
    /// `None` means the parse was cancelled; `Some` with no trees means the
    /// sentence has no analysis.
    pub fn parse_sentence<S: Sentence + ?Sized>(&self, sentence: &S) -> Option<Vec<SemanticNode>> {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        self.stop.store(false, Ordering::SeqCst);
        let begin = Instant::now();

        let mut run = ChartParse {
            grammar: &self.grammar,
            sentence,
            stop: &self.stop,
            charts: Charts::new(sentence.len() + 1),
        };
        run.charts
            .add(0, ChartRow::new(Cow::Borrowed(&self.seed), 0, 0, Process::Seed));

        if !run.fill() {
            debug!("Parse of {} words cancelled", sentence.len());
            return None;
        }
        if log_enabled!(Level::Trace) {
            trace!("{}", run.charts.dump(&self.grammar));
        }

        let trees = run.trees();
        let elapsed = begin.elapsed();
        session.last_parse_time = Some(elapsed);
        debug!(
            "Parsed {} words: {} states, {} trees in {:?}",
            sentence.len(),
            run.charts.state_count(),
            trees.len(),
            elapsed
        );
        Some(trees)
    }
}

// --- Chart Construction ---

struct ChartParse<'g, 's, S: Sentence + ?Sized> {
    grammar: &'g Grammar,
    sentence: &'s S,
    stop: &'g AtomicBool,
    charts: Charts<'g>,
}

impl<'g, 's, S: Sentence + ?Sized> ChartParse<'g, 's, S> {
    fn cancelled(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    /// Runs predictor, scanner and completer over every row of every chart.
    /// Rows appended to the chart being walked are visited in the same pass.
    /// Returns false when cancelled.
    fn fill(&mut self) -> bool {
        for i in 0..self.charts.len() {
            if self.cancelled() {
                return false;
            }
            let mut j = 0;
            while j < self.charts.size(i) {
                if self.cancelled() {
                    return false;
                }
                let row = self.charts.row_at(i, j);
                let state = row.state();
                match row.next_constituent() {
                    Some(next) if next.is_phrase() => self.predictor(state),
                    Some(_) => self.scanner(state),
                    None => self.completer(state),
                }
                j += 1;
            }
        }
        true
    }

    /// Every rule of the expected phrase becomes a zero-width hypothesis at
    /// the point where it is expected.
    fn predictor(&mut self, state: StateId) {
        let row = self.charts.row_by_id(state);
        let (next, end) = match row.next_constituent() {
            Some(next) => (next, row.end()),
            None => return,
        };
        let grammar = self.grammar;
        for rule in grammar.rules_with_head(next) {
            self.enqueue(ChartRow::new(Cow::Borrowed(rule), end, end, Process::Predict), end);
        }
    }

    fn scanner(&mut self, state: StateId) {
        let row = self.charts.row_by_id(state);
        let (next, position) = match row.next_constituent() {
            Some(next) => (next, row.end()),
            None => return,
        };

        if position >= self.sentence.len() {
            if next == EMPTY {
                self.enqueue(ChartRow::scanned(Rule::terminal(EMPTY, ""), position, position), position);
            }
            return;
        }

        let word = self.sentence.word_at(position);
        if self.grammar.terminal_category(word) == next || next == UNKNOWN {
            let matched = ChartRow::scanned(Rule::terminal(next, word), position, position + 1);
            self.enqueue(matched, position + 1);
        }
        if next == EMPTY {
            self.enqueue(ChartRow::scanned(Rule::terminal(EMPTY, ""), position, position), position);
        }
    }

    /// Advances every row of chart `start` that was waiting for the head of
    /// the completed row.
    fn completer(&mut self, state: StateId) {
        let row = self.charts.row_by_id(state);
        if row.rule().is_seed() {
            return;
        }
        let (head, start, end) = (row.rule().head, row.start(), row.end());

        let mut i = 0;
        while i < self.charts.size(start) {
            let waiting = self.charts.row_at(start, i);
            if waiting.end() == start && waiting.next_constituent() == Some(head) {
                let advanced = waiting.advance(end, state);
                self.enqueue(advanced, end);
            }
            i += 1;
        }
    }

    fn enqueue(&mut self, row: ChartRow<'g>, chart: usize) {
        if !self.charts.exists(chart, &row) {
            self.charts.add(chart, row);
        }
    }

    // --- Tree Reconstruction ---

    fn trees(&self) -> Vec<SemanticNode> {
        let last = self.charts.len() - 1;
        let mut trees: Vec<SemanticNode> = self
            .charts
            .roots_spanning_all(last)
            .into_iter()
            .map(|row| self.build(row))
            .collect();
        trees.sort_by(SemanticNode::rank);
        trees
    }

    /// Parents are stored newest first, so they are walked from the back to
    /// get children in production order.
    fn build(&self, row: &ChartRow) -> SemanticNode {
        let rule = row.rule();
        let category = self.grammar.category_name(rule.head);
        let label = match &rule.kind {
            RuleKind::Terminal { word } => word.as_str(),
            _ => category,
        };
        let mut node = SemanticNode::new(label, category, rule.weight, rule.annotation.as_str());
        for &parent in row.parents().iter().rev() {
            node.add_child(self.build(self.charts.row_by_id(parent)));
        }
        node
    }
}
