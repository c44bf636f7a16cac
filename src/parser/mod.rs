/*
    This module reads a grammar and the words to test against it
*/

mod lexer;
mod verifier;

use std::collections::{HashSet, VecDeque};
use std::fmt::Display;
use std::io::Read;
use std::path::Path;

use itertools::Itertools;

use crate::grammar::*;
use crate::error_handling::*;
use lexer::Token;
use verifier::{verify_rules, RuleLine};

#[derive(Debug)]
pub enum ReadErrorType {
    // The input ended where a count was expected
    MissingCount,
    // A count is not a non-negative number
    InvalidCount(String),
    // A declared nonterminal is not a single uppercase letter
    InvalidNonterminal(String),
    // A declared terminal is not a single terminal character
    InvalidTerminal(String),
    // The input ended before every declared rule was read
    MissingRules,
    // A rule line does not start with a nonterminal
    MissingNonterminal,
    // A rule line has no ` -> ` after its nonterminal
    MissingSeparator,
    // A rule body contains a character that is neither kind of symbol
    UnknownCharacter(char),
    // A rule uses a symbol missing from the declared alphabets
    UndeclaredSymbol(char),
    // The input ended before the start symbol
    MissingStart,
    // The start symbol is not a declared nonterminal
    UndeclaredStart(String),
    // The input ended before every declared word was read
    MissingWords,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for ReadErrorType {}

impl PartialEq for ReadErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ReadErrorType::FileError(a), ReadErrorType::FileError(b)) => a.kind() == b.kind(),
            (ReadErrorType::InvalidCount(a), ReadErrorType::InvalidCount(b))
            | (ReadErrorType::InvalidNonterminal(a), ReadErrorType::InvalidNonterminal(b))
            | (ReadErrorType::InvalidTerminal(a), ReadErrorType::InvalidTerminal(b))
            | (ReadErrorType::UndeclaredStart(a), ReadErrorType::UndeclaredStart(b)) => a == b,
            (ReadErrorType::UnknownCharacter(a), ReadErrorType::UnknownCharacter(b))
            | (ReadErrorType::UndeclaredSymbol(a), ReadErrorType::UndeclaredSymbol(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }
}

impl Display for ReadErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadErrorType::MissingCount => write!(f, "Expected a count"),
            ReadErrorType::InvalidCount(token) => write!(f, "`{}` is not a count", token),
            ReadErrorType::InvalidNonterminal(token) => write!(f, "`{}` is not a nonterminal", token),
            ReadErrorType::InvalidTerminal(token) => write!(f, "`{}` is not a terminal", token),
            ReadErrorType::MissingRules => write!(f, "Input ended before every rule was read"),
            ReadErrorType::MissingNonterminal => write!(f, "Rule does not start with a nonterminal"),
            ReadErrorType::MissingSeparator => write!(f, "Expected ` -> ` after nonterminal"),
            ReadErrorType::UnknownCharacter(c) => write!(f, "`{}` is neither a terminal nor a nonterminal", c),
            ReadErrorType::UndeclaredSymbol(c) => write!(f, "`{}` was not declared", c),
            ReadErrorType::MissingStart => write!(f, "Expected a start symbol"),
            ReadErrorType::UndeclaredStart(token) => write!(f, "Start symbol `{}` was not declared", token),
            ReadErrorType::MissingWords => write!(f, "Input ended before every word was read"),
            ReadErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type ReadError = Error<ReadErrorType>;
pub type ReadErrors = Errors<ReadErrorType>;

pub type Result<T> = std::result::Result<T, ReadErrorType>;
pub type LineResult<T> = std::result::Result<T, ReadError>;
pub type FileResult<T> = std::result::Result<T, ReadErrors>;

/// Everything the input describes: the grammar and the words to test.
#[derive(Debug, PartialEq)]
pub struct Input {
    pub grammar: Grammar,
    pub words: Vec<String>,
}

// Hands out whitespace separated tokens or whole lines, tracking line numbers
struct Scanner<'a> {
    lines: Vec<&'a str>,
    next_line: usize,
    pending: VecDeque<&'a str>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Scanner {
            lines: text.lines().collect(),
            next_line: 0,
            pending: VecDeque::new(),
        }
    }

    // 1-based number of the line last handed out
    fn line_number(&self) -> usize {
        self.next_line
    }

    fn token(&mut self) -> Option<&'a str> {
        while self.pending.is_empty() {
            let line = *self.lines.get(self.next_line)?;
            self.next_line += 1;
            self.pending.extend(line.split_whitespace());
        }
        self.pending.pop_front()
    }

    // The next whole line after the current one, dropping its unread tokens
    fn line(&mut self) -> Option<&'a str> {
        self.pending.clear();
        let line = *self.lines.get(self.next_line)?;
        self.next_line += 1;
        Some(line)
    }
}

struct Reader<'a> {
    scanner: Scanner<'a>,
    path: &'a Path,
}

impl<'a> Reader<'a> {
    fn error(&self, error: ReadErrorType) -> ReadError {
        ReadError::new(Location::at(self.path, self.scanner.line_number()), error)
    }

    fn count(&mut self) -> LineResult<usize> {
        let token = self.scanner.token().ok_or_else(|| self.error(ReadErrorType::MissingCount))?;
        token.parse().map_err(|_| self.error(ReadErrorType::InvalidCount(token.to_owned())))
    }

    fn symbol(&mut self, missing: ReadErrorType, invalid: fn(String) -> ReadErrorType, valid: impl Fn(char) -> bool) -> LineResult<char> {
        let token = self.scanner.token().ok_or_else(|| self.error(missing))?;
        match token.chars().exactly_one() {
            Ok(c) if valid(c) => Ok(c),
            _ => Err(self.error(invalid(token.to_owned())))
        }
    }

    fn alphabet(&mut self, count: usize, invalid: fn(String) -> ReadErrorType, valid: fn(char) -> bool) -> LineResult<HashSet<char>> {
        (0..count).map(|_| self.symbol(ReadErrorType::MissingCount, invalid, valid)).collect()
    }

    // Blank lines and `;` comments between rules are skipped
    fn rule_lines(&mut self, count: usize) -> LineResult<Vec<(usize, &'a str)>> {
        let mut lines = Vec::with_capacity(count);
        while lines.len() < count {
            let line = self.scanner.line().ok_or_else(|| self.error(ReadErrorType::MissingRules))?;
            if !line.trim().is_empty() && !line.starts_with(';') {
                lines.push((self.scanner.line_number(), line));
            }
        }
        Ok(lines)
    }

    fn words(&mut self) -> LineResult<Vec<String>> {
        let count = self.count()?;
        (0..count)
            .map(|_| {
                self.scanner.token()
                    .map(str::to_owned)
                    .ok_or_else(|| self.error(ReadErrorType::MissingWords))
            })
            .collect()
    }
}

fn parse_rule_line(line: &str, location: Location) -> LineResult<RuleLine> {
    lexer::lex_line(line)
        .map(|(nonterminal, body)| RuleLine { nonterminal, body, location: location.clone() })
        .map_err(|error| ReadError { location, error })
}

fn rule_from_line(line: RuleLine) -> Rule {
    let product = line.body.iter().map(|token| match token {
        Token::Nonterminal(c) => Symbol::nonterminal(c.to_string()),
        Token::Terminal(c) => Symbol::Terminal(*c),
    }).collect();
    Rule::new(line.nonterminal.to_string(), product)
}

/// Reads an input in the form
///
/// ```text
/// <#nonterminals> <#terminals> <#rules>
/// <nonterminals>
/// <terminals>
/// <one rule per line, e.g. `S -> aSb`>
/// <start>
/// <#words> <words>
/// ```
///
/// Every broken rule line is reported, other errors stop at the first one.
pub fn parse_str(text: &str, path: &Path) -> FileResult<Input> {
    let mut reader = Reader { scanner: Scanner::new(text), path };

    let header = (|| -> LineResult<_> {
        let nonterminal_count = reader.count()?;
        let terminal_count = reader.count()?;
        let rule_count = reader.count()?;
        let nonterminals = reader.alphabet(nonterminal_count, ReadErrorType::InvalidNonterminal, is_nonterminal)?;
        let terminals = reader.alphabet(terminal_count, ReadErrorType::InvalidTerminal, is_terminal)?;
        let lines = reader.rule_lines(rule_count)?;
        Ok((nonterminals, terminals, lines))
    })();
    let (nonterminals, terminals, lines) = header.map_err(|error| vec![error])?;

    let (rule_lines, mut errors): (Vec<_>, Vec<_>) = lines.into_iter()
        .map(|(number, line)| parse_rule_line(line, Location::at(path, number)))
        .partition_result();
    if let Err(undeclared) = verify_rules(&rule_lines, &nonterminals, &terminals) {
        errors.extend(undeclared);
    }
    if errors.len() > 0 {
        return Err(errors);
    }

    let start = reader
        .symbol(ReadErrorType::MissingStart, ReadErrorType::UndeclaredStart, |c| nonterminals.contains(&c))
        .map_err(|error| vec![error])?;
    let words = reader.words().map_err(|error| vec![error])?;

    let rules = rule_lines.into_iter().map(rule_from_line).collect();
    Ok(Input {
        grammar: Grammar::new(start, nonterminals, terminals, rules),
        words,
    })
}

pub fn parse_file(path: &Path) -> FileResult<Input> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| vec![ReadError::new(Location::whole(path), ReadErrorType::FileError(e))])?;
    parse_str(&text, path)
}

pub fn parse_stdin() -> FileResult<Input> {
    let path = Path::new("<stdin>");
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| vec![ReadError::new(Location::whole(path), ReadErrorType::FileError(e))])?;
    parse_str(&text, path)
}
