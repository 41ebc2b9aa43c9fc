use std::fmt::Debug;
use std::iter::Peekable;

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum LexerError {
    #[fail(display = "unexpected character {:?} on line {}", c, line)]
    UnexpectedChar { line: usize, c: String },
}

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum ParseError {
    #[fail(display = "unexpected token at {}: {}", _0, _1)]
    UnexpectedToken(usize, String),
    #[fail(display = "unknown statement {:?} at {}", _1, _0)]
    UnknownStatement(usize, String),
}

pub fn must_match<Token: PartialEq + Debug + Clone>(i: &mut usize, tokens: &[Token], tok: Token) -> Result<(), ParseError> {
    if matches(i, tokens, tok) {
        Ok(())
    } else {
        Err(ParseError::UnexpectedToken(*i, format!("{:?}", tokens[*i].clone())))
    }
}

pub fn matches<Token: PartialEq + Debug + Clone>(i: &mut usize, tokens: &[Token], tok: Token) -> bool {
    let r = tokens[*i] == tok;
    if r {
        *i += 1;
    }
    r
}

pub fn consume_while<I, F>(it: &mut Peekable<I>, x: F) -> Vec<char>
    where I: Iterator<Item = char>,
          F: Fn(char) -> bool
{
    let mut v: Vec<char> = vec![];

    while let Some(&ch) = it.peek() {
        if x(ch) {
            it.next();
            v.push(ch);
        } else {
            break;
        }
    }

    v
}
