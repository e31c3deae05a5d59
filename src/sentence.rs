use std::fmt;

/// A tokenized sentence as seen by the parser.
pub trait Sentence {
    fn word_at(&self, index: usize) -> &str;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: AsRef<str>> Sentence for [T] {
    fn word_at(&self, index: usize) -> &str {
        self[index].as_ref()
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T: AsRef<str>> Sentence for Vec<T> {
    fn word_at(&self, index: usize) -> &str {
        self[index].as_ref()
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

const PUNCTUATION: &[char] = &[',', '.', ';', ':', '!', '?', '"', '(', ')'];

/// Whitespace tokenization with punctuation split into separate tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleSentence {
    words: Vec<String>,
}

impl SimpleSentence {
    pub fn new(text: &str) -> Self {
        let mut words = Vec::new();
        for chunk in text.split_whitespace() {
            let mut current = String::new();
            for c in chunk.chars() {
                if PUNCTUATION.contains(&c) {
                    if !current.is_empty() {
                        words.push(std::mem::take(&mut current));
                    }
                    words.push(c.to_string());
                } else {
                    current.push(c);
                }
            }
            if !current.is_empty() {
                words.push(current);
            }
        }
        SimpleSentence { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl Sentence for SimpleSentence {
    fn word_at(&self, index: usize) -> &str {
        &self.words[index]
    }

    fn len(&self) -> usize {
        self.words.len()
    }
}

impl fmt::Display for SimpleSentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.words.join(" "))
    }
}
