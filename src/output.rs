use std::fmt;
use std::io::{self, Write};

use crate::rules::DEFAULT_WEIGHT;
use crate::structs::{SemanticNode, TreeFormat};

// --- Tree Writing ---

/// `(ROOT (NP (DET the) (NOUN dog)) (VP (VERB barks)))`
pub fn bracketed(node: &SemanticNode) -> String {
    let mut text = String::new();
    push_bracketed(&mut text, node);
    text
}

fn push_bracketed(text: &mut String, node: &SemanticNode) {
    text.push('(');
    if node.is_leaf() {
        // a leaf is a matched word under its terminal category
        text.push_str(&node.category);
        if !node.label.is_empty() {
            text.push(' ');
            text.push_str(&node.label);
        }
    } else {
        text.push_str(&node.label);
        for child in &node.children {
            text.push(' ');
            push_bracketed(text, child);
        }
    }
    text.push(')');
}

impl fmt::Display for SemanticNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", bracketed(self))
    }
}

pub fn write_tree<W: Write>(writer: &mut W, node: &SemanticNode, format: TreeFormat) -> io::Result<()> {
    match format {
        TreeFormat::Bracketed => writeln!(writer, "{}", bracketed(node)),
        TreeFormat::Indented => write_indented(writer, node, 0),
    }
}

pub fn write_trees<W: Write>(writer: &mut W, trees: &[SemanticNode], format: TreeFormat) -> io::Result<()> {
    for tree in trees {
        write_tree(writer, tree, format)?;
    }
    Ok(())
}

// CATEGORY word [weight] {annotation}
fn write_indented<W: Write>(writer: &mut W, node: &SemanticNode, depth: usize) -> io::Result<()> {
    let mut line = format!("{:indent$}", "", indent = depth * 2);
    if node.is_leaf() {
        line.push_str(&node.category);
        if !node.label.is_empty() {
            line.push(' ');
            line.push_str(&node.label);
        }
    } else {
        line.push_str(&node.label);
    }
    if node.weight != DEFAULT_WEIGHT {
        line.push_str(&format!(" [{}]", node.weight));
    }
    if !node.annotation.is_empty() {
        line.push_str(&format!(" {{{}}}", node.annotation));
    }
    writeln!(writer, "{}", line)?;

    for child in &node.children {
        write_indented(writer, child, depth + 1)?;
    }
    Ok(())
}

/// Output for a sentence without any analysis.
pub fn no_parse(words: &[String]) -> String {
    if words.is_empty() {
        "(NOPARSE)".to_string()
    } else {
        format!("(NOPARSE {})", words.join(" "))
    }
}
