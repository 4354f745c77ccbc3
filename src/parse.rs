//! Parser from regex patterns to a parse tree

use crate::ir::Node;
use std::fmt;

/// The concatenation marker inserted by the preprocessor.
/// It can never collide with a literal: `chr` only accepts alphanumerics.
const CONCAT: char = '.';

/// Represents an error encountered during regex compilation.
/// The text contains a human-readable error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// Human-readable error message.
    pub text: String,

    /// The offending character, or None if the input ended prematurely.
    pub found: Option<char>,

    /// 0-based position in the preprocessed pattern.
    pub position: usize,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::error::Error for Error {}

fn error<S, T>(text: S, found: Option<char>, position: usize) -> Result<T, Error>
where
    S: ToString,
{
    Err(Error {
        text: text.to_string(),
        found,
        position,
    })
}

/// Insert an explicit concatenation marker between adjacent atoms, so the
/// grammar has no implicit operator.
/// The decision is a local, single-pass rewrite over each adjacent pair:
/// a marker goes after `c` if `c` is alphanumeric, `)`, `*` or `?`, and the
/// next character is none of `)`, `|`, `*`, `?`.
pub fn preprocess(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if let Some(&next) = chars.peek() {
            let joins_left = c.is_ascii_alphanumeric() || c == ')' || c == '*' || c == '?';
            let joins_right = !matches!(next, ')' | '|' | '*' | '?');
            if joins_left && joins_right {
                out.push(CONCAT);
            }
        }
    }
    out
}

/// Represents the state used to parse a regex.
/// A shared cursor over the preprocessed pattern; one method per nonterminal.
struct Parser {
    /// The preprocessed pattern.
    input: Vec<char>,

    /// Index of the next unconsumed character.
    next: usize,
}

impl Parser {
    /// Peek at the next unconsumed character, or None at end of input.
    fn peek(&self) -> Option<char> {
        self.input.get(self.next).copied()
    }

    /// Consume the next character, returning it.
    fn pop(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.next += 1;
        }
        c
    }

    fn try_parse(&mut self) -> Result<Node, Error> {
        // Parse an alternation. If we consume everything, it's success.
        // Anything left over (for example an excess closing paren) is an error.
        let body = self.expr()?;
        match self.peek() {
            None => Ok(body),
            Some(c) => error(
                format!("Unexpected char: '{}' at position {}", c, self.next),
                Some(c),
                self.next,
            ),
        }
    }

    /// expr ::= concat '|' expr | concat
    fn expr(&mut self) -> Result<Node, Error> {
        let left = self.concat()?;
        if self.peek() == Some('|') {
            self.pop();
            let right = self.expr()?;
            Ok(Node::Alt(Box::new(left), Box::new(right)))
        } else {
            Ok(left)
        }
    }

    /// concat ::= rep '.' concat | rep
    fn concat(&mut self) -> Result<Node, Error> {
        let left = self.rep()?;
        if self.peek() == Some(CONCAT) {
            self.pop();
            let right = self.concat()?;
            Ok(Node::Cat(Box::new(left), Box::new(right)))
        } else {
            Ok(left)
        }
    }

    /// rep ::= atom '*' | atom '?' | atom
    fn rep(&mut self) -> Result<Node, Error> {
        let atom = self.atom()?;
        match self.peek() {
            Some('*') => {
                self.pop();
                Ok(Node::Star(Box::new(atom)))
            }
            Some('?') => {
                self.pop();
                Ok(Node::Question(Box::new(atom)))
            }
            _ => Ok(atom),
        }
    }

    /// atom ::= chr | '(' expr ')'
    fn atom(&mut self) -> Result<Node, Error> {
        if self.peek() != Some('(') {
            return self.chr();
        }
        self.pop();
        let node = self.expr()?;
        match self.pop() {
            Some(')') => Ok(node),
            Some(c) => error(
                format!("Unbalanced parenthesis: got '{}' at position {}", c, self.next - 1),
                Some(c),
                self.next - 1,
            ),
            None => error(
                format!("Unbalanced parenthesis at position {}", self.next),
                None,
                self.next,
            ),
        }
    }

    /// chr ::= alphanumeric
    fn chr(&mut self) -> Result<Node, Error> {
        match self.peek() {
            Some(c) if c.is_ascii_alphanumeric() => {
                self.pop();
                Ok(Node::Char(c))
            }
            // End of input parses as the empty expression, so a pattern like
            // "a|" is an alternation with epsilon.
            None => Ok(Node::Empty),
            Some(c) => error(
                format!("Expected alphanumeric, got '{}' at position {}", c, self.next),
                Some(c),
                self.next,
            ),
        }
    }
}

/// Try parsing a given pattern.
/// Return the resulting parse tree, or an error.
pub fn try_parse(pattern: &str) -> Result<Node, Error> {
    let mut p = Parser {
        input: preprocess(pattern).chars().collect(),
        next: 0,
    };
    p.try_parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_inserts_markers() {
        assert_eq!(preprocess("ab"), "a.b");
        assert_eq!(preprocess("a*b"), "a*.b");
        assert_eq!(preprocess("a|b"), "a|b");
        assert_eq!(preprocess("(a)*b"), "(a)*.b");
        assert_eq!(preprocess("a(b)"), "a.(b)");
        assert_eq!(preprocess("a?b"), "a?.b");
    }

    #[test]
    fn preprocess_short_inputs_unchanged() {
        assert_eq!(preprocess(""), "");
        assert_eq!(preprocess("a"), "a");
        assert_eq!(preprocess("("), "(");
    }

    #[test]
    fn parse_precedence() {
        // Star binds tighter than concatenation, which binds tighter than
        // alternation: ab*|c is (a(b*))|c.
        let tree = try_parse("ab*|c").unwrap();
        assert_eq!(
            tree,
            Node::Alt(
                Box::new(Node::Cat(
                    Box::new(Node::Char('a')),
                    Box::new(Node::Star(Box::new(Node::Char('b')))),
                )),
                Box::new(Node::Char('c')),
            )
        );
    }

    #[test]
    fn parse_right_associative() {
        // abc is a.(b.c) by construction.
        let tree = try_parse("abc").unwrap();
        assert_eq!(
            tree,
            Node::Cat(
                Box::new(Node::Char('a')),
                Box::new(Node::Cat(
                    Box::new(Node::Char('b')),
                    Box::new(Node::Char('c')),
                )),
            )
        );
    }

    #[test]
    fn parse_trailing_alternation_is_epsilon() {
        let tree = try_parse("a|").unwrap();
        assert_eq!(
            tree,
            Node::Alt(Box::new(Node::Char('a')), Box::new(Node::Empty))
        );
    }

    #[test]
    fn parse_unbalanced_paren_reports_end_position() {
        // "(a|b" preprocesses to itself; the error is at end of input.
        let err = try_parse("(a|b").unwrap_err();
        assert_eq!(err.found, None);
        assert_eq!(err.position, 4);
    }

    #[test]
    fn parse_bad_char_reports_offender() {
        // "a|+" has '+' where an atom is required.
        let err = try_parse("a|+").unwrap_err();
        assert_eq!(err.found, Some('+'));
        assert_eq!(err.position, 2);
    }
}
