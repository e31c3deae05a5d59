use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_till1, take_while1},
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::error::LoadError;

// --- Grammar Line Structures ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarLine<'a> {
    /// `HEAD -> A B [weight] {annotation} | C ...`
    Rule { head: &'a str, alternatives: Vec<Alternative<'a>> },
    /// `CATEGORY : word word ...`
    Lexicon { category: &'a str, words: Vec<&'a str> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative<'a> {
    pub symbols: Vec<&'a str>,
    pub weight: Option<i32>,
    pub annotation: Option<&'a str>,
}

// --- Line Parsing ---

/// Parses every non-blank, non-comment line of a grammar text, keeping the
/// 1-based line number of each.
pub fn parse_lines(text: &str) -> Result<Vec<(usize, GrammarLine)>, LoadError> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line_num = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match grammar_line(trimmed) {
            Ok((_, parsed)) => lines.push((line_num, parsed)),
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                return Err(LoadError::Syntax {
                    line: line_num,
                    column: trimmed.len() - e.input.len() + 1,
                    found: e.input.chars().take(16).collect(),
                });
            }
            Err(nom::Err::Incomplete(_)) => {
                return Err(LoadError::Syntax {
                    line: line_num,
                    column: trimmed.len() + 1,
                    found: String::new(),
                });
            }
        }
    }
    Ok(lines)
}

pub fn grammar_line(input: &str) -> IResult<&str, GrammarLine> {
    all_consuming(terminated(alt((lexicon_line, rule_line)), space0))(input)
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || "_-$.,'`&*+/".contains(c)
}

fn symbol(input: &str) -> IResult<&str, &str> {
    take_while1(is_symbol_char)(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace())(input)
}

fn weight(input: &str) -> IResult<&str, i32> {
    delimited(
        pair(char('['), space0),
        map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i32>),
        pair(space0, char(']')),
    )(input)
}

fn annotation(input: &str) -> IResult<&str, &str> {
    delimited(char('{'), take_till(|c| c == '}'), char('}'))(input)
}

fn alternative(input: &str) -> IResult<&str, Alternative> {
    map(
        tuple((
            separated_list1(space1, symbol),
            opt(preceded(space0, weight)),
            opt(preceded(space0, annotation)),
        )),
        |(symbols, weight, annotation)| Alternative { symbols, weight, annotation },
    )(input)
}

fn rule_line(input: &str) -> IResult<&str, GrammarLine> {
    map(
        tuple((
            symbol,
            delimited(space0, tag("->"), space0),
            separated_list1(delimited(space0, char('|'), space0), alternative),
        )),
        |(head, _, alternatives)| GrammarLine::Rule { head, alternatives },
    )(input)
}

fn lexicon_line(input: &str) -> IResult<&str, GrammarLine> {
    map(
        tuple((
            symbol,
            delimited(space0, char(':'), space0),
            separated_list0(space1, word),
        )),
        |(category, _, words)| GrammarLine::Lexicon { category, words },
    )(input)
}
