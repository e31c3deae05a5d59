use std::fs;
use std::io::Write;
use std::path::Path;

use log::{info, warn};

use crate::earley::EarleyParser;
use crate::error::CliError;
use crate::grammar::load_grammar;
use crate::output::{no_parse, write_tree};
use crate::sentence::SimpleSentence;
use crate::structs::{Cli, Commands, ParseArgs, ValidateArgs};

pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), CliError> {
    match &cli.command {
        Commands::Parse(args) => parse_sentences(args, out),
        Commands::Validate(args) => validate_grammar(args, out),
    }
}

fn load_parser(path: &Path) -> Result<EarleyParser, CliError> {
    let grammar = load_grammar(path)?;
    let parser = EarleyParser::new(grammar)?;
    info!("Grammar {:?} is valid", path);
    Ok(parser)
}

fn validate_grammar<W: Write>(args: &ValidateArgs, out: &mut W) -> Result<(), CliError> {
    let parser = load_parser(&args.grammar)?;
    writeln!(
        out,
        "{}: ok ({} rules, {} words)",
        args.grammar.display(),
        parser.grammar().rule_count(),
        parser.grammar().word_count()
    )?;
    Ok(())
}

/// Parses every non-blank line of the sentence file. The grammar is validated
/// and the whole input read before the first sentence is parsed.
fn parse_sentences<W: Write>(args: &ParseArgs, out: &mut W) -> Result<(), CliError> {
    let parser = load_parser(&args.grammar)?;
    let input = fs::read_to_string(&args.sentences).map_err(|source| CliError::Input {
        path: args.sentences.clone(),
        source,
    })?;

    for (line_num, line) in input.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let sentence = SimpleSentence::new(line);
        writeln!(out, "# {}", sentence)?;

        let trees = match parser.parse_sentence(&sentence) {
            Some(trees) => trees,
            None => {
                warn!("Parse of line {} was cancelled", line_num + 1);
                continue;
            }
        };
        if args.timing {
            if let Some(elapsed) = parser.last_parse_time() {
                writeln!(out, "# parsed in {:?}", elapsed)?;
            }
        }

        if trees.is_empty() {
            writeln!(out, "{}", no_parse(sentence.words()))?;
            continue;
        }
        let shown = if args.best { &trees[..1] } else { &trees[..] };
        for tree in shown {
            write_tree(out, tree, args.format)?;
        }
    }

    out.flush()?;
    Ok(())
}
