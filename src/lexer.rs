//! Tokenizer for the restricted statement language.
//!
//! Mirrors the teacher's `parser::lexer` split between scanning and
//! parsing: this module only produces a flat token stream (with
//! Python-style `Indent`/`Dedent`/`Newline` markers resolved from
//! leading whitespace), and `crate::parser` turns that into an AST.

use crate::error::{ParseError, Span};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Def,
    Return,
    For,
    In,
    While,
    Name(String),
    Number(i64),
    Plus,
    Minus,
    Star,
    Slash,
    Lt,
    Le,
    Gt,
    Ge,
    EqEq,
    NotEq,
    Assign,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    LParen,
    RParen,
    Comma,
    Colon,
    Newline,
    Indent,
    Dedent,
    Eof,
}

#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

pub fn tokenize(source: &str) -> Result<Vec<SpannedToken>, ParseError> {
    let mut out = Vec::new();
    let mut indent_stack = vec![0usize];
    let mut first_line = true;

    for (line_idx, raw_line) in source.lines().enumerate() {
        let lineno = line_idx + 1;
        let without_comment = strip_comment(raw_line);
        let trimmed = without_comment.trim_end();
        if trimmed.trim().is_empty() {
            continue;
        }

        let indent = leading_spaces(trimmed, lineno)?;
        let content = &trimmed[indent..];

        if !first_line {
            out.push(SpannedToken { token: Token::Newline, span: Span::new(lineno, 0) });
        }
        first_line = false;

        if indent > *indent_stack.last().unwrap_or(&0) {
            indent_stack.push(indent);
            out.push(SpannedToken { token: Token::Indent, span: Span::new(lineno, 0) });
        } else {
            while indent < *indent_stack.last().unwrap_or(&0) {
                indent_stack.pop();
                out.push(SpannedToken { token: Token::Dedent, span: Span::new(lineno, 0) });
            }
            if indent != *indent_stack.last().unwrap_or(&0) {
                return Err(ParseError::InvalidIndentation { span: Span::new(lineno, indent) });
            }
        }

        tokenize_line(content, lineno, indent, &mut out)?;
    }

    while indent_stack.len() > 1 {
        indent_stack.pop();
        out.push(SpannedToken { token: Token::Dedent, span: Span::unknown() });
    }
    out.push(SpannedToken { token: Token::Eof, span: Span::unknown() });
    Ok(out)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Count leading spaces; a leading tab is an indentation error since this
/// tool never needs to interoperate with externally authored files.
fn leading_spaces(line: &str, lineno: usize) -> Result<usize, ParseError> {
    let mut count = 0;
    for ch in line.chars() {
        match ch {
            ' ' => count += 1,
            '\t' => return Err(ParseError::InvalidIndentation { span: Span::new(lineno, count) }),
            _ => break,
        }
    }
    Ok(count)
}

fn tokenize_line(content: &str, lineno: usize, base_col: usize, out: &mut Vec<SpannedToken>) -> Result<(), ParseError> {
    let chars: Vec<char> = content.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let col = base_col + i;
        let ch = chars[i];
        match ch {
            ' ' => {
                i += 1;
            }
            '(' => {
                out.push(tok(Token::LParen, lineno, col));
                i += 1;
            }
            ')' => {
                out.push(tok(Token::RParen, lineno, col));
                i += 1;
            }
            ',' => {
                out.push(tok(Token::Comma, lineno, col));
                i += 1;
            }
            ':' => {
                out.push(tok(Token::Colon, lineno, col));
                i += 1;
            }
            '+' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    out.push(tok(Token::PlusEq, lineno, col));
                    i += 1;
                } else {
                    out.push(tok(Token::Plus, lineno, col));
                }
            }
            '-' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    out.push(tok(Token::MinusEq, lineno, col));
                    i += 1;
                } else {
                    out.push(tok(Token::Minus, lineno, col));
                }
            }
            '*' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    out.push(tok(Token::StarEq, lineno, col));
                    i += 1;
                } else {
                    out.push(tok(Token::Star, lineno, col));
                }
            }
            '/' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    out.push(tok(Token::SlashEq, lineno, col));
                    i += 1;
                } else {
                    out.push(tok(Token::Slash, lineno, col));
                }
            }
            '<' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    out.push(tok(Token::Le, lineno, col));
                    i += 1;
                } else {
                    out.push(tok(Token::Lt, lineno, col));
                }
            }
            '>' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    out.push(tok(Token::Ge, lineno, col));
                    i += 1;
                } else {
                    out.push(tok(Token::Gt, lineno, col));
                }
            }
            '=' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    out.push(tok(Token::EqEq, lineno, col));
                    i += 1;
                } else {
                    out.push(tok(Token::Assign, lineno, col));
                }
            }
            '!' => {
                i += 1;
                if chars.get(i) == Some(&'=') {
                    out.push(tok(Token::NotEq, lineno, col));
                    i += 1;
                } else {
                    return Err(ParseError::UnexpectedChar { ch: '!', span: Span::new(lineno, col) });
                }
            }
            c if c.is_ascii_digit() => {
                let start = i;
                while chars.get(i).is_some_and(char::is_ascii_digit) {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let n = text.parse::<i64>().map_err(|_| ParseError::InvalidNumber {
                    text: text.clone(),
                    span: Span::new(lineno, base_col + start),
                })?;
                out.push(tok(Token::Number(n), lineno, base_col + start));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while chars.get(i).is_some_and(|c| c.is_alphanumeric() || *c == '_') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let token = match text.as_str() {
                    "def" => Token::Def,
                    "return" => Token::Return,
                    "for" => Token::For,
                    "in" => Token::In,
                    "while" => Token::While,
                    _ => Token::Name(text),
                };
                out.push(tok(token, lineno, base_col + start));
            }
            other => {
                return Err(ParseError::UnexpectedChar { ch: other, span: Span::new(lineno, col) });
            }
        }
    }
    Ok(())
}

fn tok(token: Token, lineno: usize, col: usize) -> SpannedToken {
    SpannedToken { token, span: Span::new(lineno, col) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_a_simple_header() {
        let tokens = tokenize("def f(n):\n    return n\n").unwrap();
        let kinds: Vec<&Token> = tokens.iter().map(|t| &t.token).collect();
        assert_eq!(
            kinds,
            vec![
                &Token::Def,
                &Token::Name("f".to_string()),
                &Token::LParen,
                &Token::Name("n".to_string()),
                &Token::RParen,
                &Token::Colon,
                &Token::Newline,
                &Token::Indent,
                &Token::Return,
                &Token::Name("n".to_string()),
                &Token::Dedent,
                &Token::Eof,
            ]
        );
    }

    #[test]
    fn dedent_to_an_unknown_level_is_an_error() {
        let result = tokenize("def f(n):\n    return n\n  return n\n");
        assert!(result.is_err());
    }

    #[test]
    fn augmented_assignment_operators() {
        let tokens = tokenize("x += 1\n").unwrap();
        assert_eq!(tokens[0].token, Token::Name("x".to_string()));
        assert_eq!(tokens[1].token, Token::PlusEq);
    }
}
