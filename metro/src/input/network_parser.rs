use std::collections::HashMap;

use super::network::*;
use super::parser_utils::*;
use crate::railway::line::{Direction, Line, Route};

// PARSER
//
//

enum Statement {
    Segment(String),
    Connection(Connection),
    Station(Station),
    Line(Line),
}

pub fn parse(t: &[Token]) -> Result<Network, ParseError> {
    let mut i = 0;
    let mut network = Network::default();
    while t[i] != Token::EOF {
        match parse_statement(&mut i, t)? {
            Statement::Segment(name) => network.map.add_segment(&name),
            Statement::Connection(c) => network.map.connections.push(c),
            Statement::Station(s) => network.stations.push(s),
            Statement::Line(l) => network.lines.push(l),
        }
    }
    Ok(network)
}

fn parse_statement(i: &mut usize, t: &[Token]) -> Result<Statement, ParseError> {
    let start = *i;
    match identifier(i, t)?.as_str() {
        "segment" => Ok(Statement::Segment(identifier(i, t)?)),
        "connection" => {
            let incoming = list(i, t, identifier)?;
            must_match(i, t, Token::Arrow)?;
            let outgoing = list(i, t, identifier)?;
            Ok(Statement::Connection(Connection::new(incoming, outgoing)))
        }
        "station" => {
            let name = identifier(i, t)?;
            must_match(i, t, Token::BraceOpen)?;
            let mut platforms = Vec::new();
            while matches(i, t, Token::Identifier("platform".to_string())) {
                let name = identifier(i, t)?;
                let segment = identifier(i, t)?;
                platforms.push(Platform { name, segment });
            }
            must_match(i, t, Token::BraceClose)?;
            Ok(Statement::Station(Station { name, platforms }))
        }
        "line" => {
            let name = identifier(i, t)?;
            let station_names = list(i, t, identifier)?;
            let routes = parse_routes(i, t)?;
            Ok(Statement::Line(Line { name, station_names, routes }))
        }
        other => Err(ParseError::UnknownStatement(start, other.to_string())),
    }
}

fn parse_routes(i: &mut usize, t: &[Token]) -> Result<HashMap<Direction, Route>, ParseError> {
    must_match(i, t, Token::BraceOpen)?;
    let mut routes = HashMap::new();
    loop {
        let direction = if matches(i, t, Token::Identifier("outbound".to_string())) {
            Direction::Outbound
        } else if matches(i, t, Token::Identifier("inbound".to_string())) {
            Direction::Inbound
        } else {
            break;
        };
        routes.insert(direction, list(i, t, identifier)?);
    }
    must_match(i, t, Token::BraceClose)?;
    Ok(routes)
}

pub fn list<F, O>(i: &mut usize, t: &[Token], f: F) -> Result<Vec<O>, ParseError>
    where F: Fn(&mut usize, &[Token]) -> Result<O, ParseError>
{
    must_match(i, t, Token::ListOpen)?;
    let mut v = Vec::new();
    if matches(i, t, Token::ListClose) {
        return Ok(v);
    }
    loop {
        v.push(f(i, t)?);
        if !matches(i, t, Token::ListSep) {
            break;
        }
    }
    must_match(i, t, Token::ListClose)?;
    Ok(v)
}

pub fn identifier(i: &mut usize, tokens: &[Token]) -> Result<String, ParseError> {
    let r = match tokens[*i] {
        Token::Identifier(ref s) => s.clone(),
        ref x => return Err(ParseError::UnexpectedToken(*i, format!("{:?}", x))),
    };
    *i += 1;
    Ok(r)
}

// LEXER
//
//
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    BraceOpen,
    BraceClose,
    ListOpen,
    ListClose,
    ListSep,
    Arrow,
    Identifier(String),
    EOF,
}

pub fn lexer(x: &mut dyn Iterator<Item = char>) -> Result<Vec<Token>, LexerError> {
    let mut tokens = Vec::new();
    let mut input = x.peekable();
    let mut line = 1;
    while let Some(&ch) = input.peek() {
        match ch {
            x if x.is_alphanumeric() || x == '_' => {
                let s: String = consume_while(&mut input, |a| a == '_' || a.is_alphanumeric())
                    .into_iter()
                    .collect();
                tokens.push(Token::Identifier(s));
            }
            '#' => {
                consume_while(&mut input, |a| a != '\n');
            }
            '-' => {
                input.next();
                if input.peek() != Some(&'>') {
                    return Err(LexerError::UnexpectedChar { line, c: "-".to_string() });
                }
                input.next();
                tokens.push(Token::Arrow);
            }
            '[' => {
                input.next();
                tokens.push(Token::ListOpen);
            }
            ']' => {
                input.next();
                tokens.push(Token::ListClose);
            }
            ',' => {
                input.next();
                tokens.push(Token::ListSep);
            }
            '{' => {
                input.next();
                tokens.push(Token::BraceOpen);
            }
            '}' => {
                input.next();
                tokens.push(Token::BraceClose);
            }
            ' ' | '\r' | '\t' => {
                input.next();
            }
            '\n' => {
                input.next();
                line += 1;
            }
            c => {
                return Err(LexerError::UnexpectedChar {
                    line,
                    c: c.to_string(),
                });
            }
        }
    }
    tokens.push(Token::EOF);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(s: &str) -> Result<Network, ParseError> {
        let tokens = lexer(&mut s.chars()).unwrap();
        parse(&tokens)
    }

    #[test]
    fn test_lexer() {
        let tokens = lexer(&mut "connection [a, b] -> [c] # merge\n".chars()).unwrap();
        assert_eq!(tokens, vec![
            Token::Identifier("connection".to_string()),
            Token::ListOpen,
            Token::Identifier("a".to_string()),
            Token::ListSep,
            Token::Identifier("b".to_string()),
            Token::ListClose,
            Token::Arrow,
            Token::ListOpen,
            Token::Identifier("c".to_string()),
            Token::ListClose,
            Token::EOF,
        ]);
    }

    #[test]
    fn test_lexer_bad_char() {
        assert_eq!(lexer(&mut "segment a\nsegment b;".chars()),
                   Err(LexerError::UnexpectedChar { line: 2, c: ";".to_string() }));
        assert_eq!(lexer(&mut "[a] - [b]".chars()),
                   Err(LexerError::UnexpectedChar { line: 1, c: "-".to_string() }));
    }

    #[test]
    fn test_parse_network() {
        let network = parse_str("
            # two stations, one line
            segment s0 segment s1
            segment s2
            connection [s0] -> [s1]
            connection [s1] -> [s2, s0]
            station north {
                platform n1 s0
                platform n2 s2
            }
            station south { }
            line red [north, south] {
                outbound [s0, s1]
                inbound [s2]
            }
            line empty [] { }
        ").unwrap();

        assert_eq!(network.map.segments.len(), 3);
        assert!(network.map.segment("s2").is_some());
        assert_eq!(network.map.connections, vec![
            Connection::one_to_one("s0", "s1"),
            Connection::split("s1", "s2", "s0"),
        ]);
        assert_eq!(network.stations.len(), 2);
        assert_eq!(network.stations[0].platforms[1],
                   Platform { name: "n2".to_string(), segment: "s2".to_string() });
        assert!(network.stations[1].platforms.is_empty());

        let red = &network.lines[0];
        assert_eq!(red.name, "red");
        assert_eq!(red.station_names, vec!["north".to_string(), "south".to_string()]);
        assert_eq!(red.route(Direction::Outbound), &["s0".to_string(), "s1".to_string()][..]);
        assert_eq!(red.route(Direction::Inbound), &["s2".to_string()][..]);
        assert!(network.lines[1].routes.is_empty());
    }

    #[test]
    fn test_parse_error() {
        assert_eq!(parse_str("segment").err(),
                   Some(ParseError::UnexpectedToken(1, "EOF".to_string())));
        assert_eq!(parse_str("connection [a] [b]").err(),
                   Some(ParseError::UnexpectedToken(4, "ListOpen".to_string())));
        assert!(parse_str("line red [a] { sideways [s0] }").is_err());
    }

    #[test]
    fn test_unknown_statement() {
        assert_eq!(parse_str("segment s0\ntunnel t0").err(),
                   Some(ParseError::UnknownStatement(2, "tunnel".to_string())));
        assert_eq!(parse_str("[a]").err(),
                   Some(ParseError::UnexpectedToken(0, "ListOpen".to_string())));
    }
}
