use crate::grammar::{is_nonterminal, is_terminal};

use super::{ReadErrorType, Result};

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Token {
    Nonterminal(char),
    Terminal(char)
}

impl Token {
    pub fn symbol(&self) -> char {
        match self {
            Token::Nonterminal(c) | Token::Terminal(c) => *c
        }
    }
}

pub fn lex_symbol(c: char) -> Result<Token> {
    if is_nonterminal(c) {
        Ok(Token::Nonterminal(c))
    } else if is_terminal(c) {
        Ok(Token::Terminal(c))
    } else {
        Err(ReadErrorType::UnknownCharacter(c))
    }
}

// Returns the rest of the line after ` -> `. A bare ` ->` at the end of the
// line separates an empty body.
fn lex_separator(rest: &str) -> Result<&str> {
    match rest.strip_prefix(" ->") {
        Some("") => Ok(""),
        Some(body) => body.strip_prefix(' ').ok_or(ReadErrorType::MissingSeparator),
        None => Err(ReadErrorType::MissingSeparator)
    }
}

// Lexes `X -> body` into the defined nonterminal and one token per body char
pub fn lex_line(line: &str) -> Result<(char, Vec<Token>)> {
    let line = line.trim_end();

    let nonterminal = match line.chars().next() {
        Some(c) if is_nonterminal(c) => c,
        _ => return Err(ReadErrorType::MissingNonterminal)
    };

    let body = lex_separator(&line[nonterminal.len_utf8()..])?;
    let tokens = body.chars().map(lex_symbol).collect::<Result<Vec<_>>>()?;

    Ok((nonterminal, tokens))
}
