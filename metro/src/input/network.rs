use smallvec::SmallVec;

use std::collections::HashMap;

use crate::railway::line::Line;
use crate::railway::metro::Metro;
use crate::railway::train::Train;

pub type SegmentName = String;

/// Endpoint list of a connection. Never more than two entries.
pub type Endpoints = SmallVec<[SegmentName; 2]>;

/// Topology together with the lines running on it, as read from a network file.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub map: NetworkMap,
    pub stations: Vec<Station>,
    pub lines: Vec<Line>,
}

impl Network {
    pub fn into_metro(self, trains: Vec<Train>) -> Result<Metro, NetworkError> {
        Metro::new(self.map, self.stations, self.lines, trains)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NetworkMap {
    pub segments: HashMap<SegmentName, Segment>,
    pub connections: Vec<Connection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: SegmentName,
}

/// A junction between track segments.
///
/// The following must hold:
///
///  1. 1 <= incoming.len() <= 2
///  2. 1 <= outgoing.len() <= 2
///  3. 2 <= incoming.len() + outgoing.len() <= 3
///
/// This allows simple links, merges and splits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub incoming: Endpoints,
    pub outgoing: Endpoints,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub name: String,
    pub segment: SegmentName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub name: String,
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum NetworkError {
    #[fail(display = "connection {} has invalid arity ({} in, {} out)", index, incoming, outgoing)]
    ConnectionArity {
        index: usize,
        incoming: usize,
        outgoing: usize,
    },
}

impl NetworkMap {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_segment(&mut self, name: &str) {
        self.segments.insert(name.to_string(), Segment { name: name.to_string() });
    }

    pub fn segment(&self, name: &str) -> Option<&Segment> {
        self.segments.get(name)
    }

    /// Check every connection against the arity rules, reporting the first
    /// offending one.
    pub fn check_connections(&self) -> Result<(), NetworkError> {
        for (index, c) in self.connections.iter().enumerate() {
            c.check_arity(index)?;
        }
        Ok(())
    }
}

impl Connection {
    pub fn new<I, O>(incoming: I, outgoing: O) -> Self
        where I: IntoIterator<Item = SegmentName>,
              O: IntoIterator<Item = SegmentName>
    {
        Connection {
            incoming: incoming.into_iter().collect(),
            outgoing: outgoing.into_iter().collect(),
        }
    }

    pub fn one_to_one(a: &str, b: &str) -> Self {
        Connection::new(vec![a.to_string()], vec![b.to_string()])
    }

    /// Two incoming segments joining into one.
    pub fn merge(a: &str, b: &str, out: &str) -> Self {
        Connection::new(vec![a.to_string(), b.to_string()], vec![out.to_string()])
    }

    /// One incoming segment branching into two.
    pub fn split(input: &str, a: &str, b: &str) -> Self {
        Connection::new(vec![input.to_string()], vec![a.to_string(), b.to_string()])
    }

    pub fn has_valid_arity(&self) -> bool {
        let (i, o) = (self.incoming.len(), self.outgoing.len());
        (1..=2).contains(&i) && (1..=2).contains(&o) && i + o <= 3
    }

    /// Like `has_valid_arity`, reporting the connection as number `index`.
    pub fn check_arity(&self, index: usize) -> Result<(), NetworkError> {
        if self.has_valid_arity() {
            Ok(())
        } else {
            Err(NetworkError::ConnectionArity {
                index,
                incoming: self.incoming.len(),
                outgoing: self.outgoing.len(),
            })
        }
    }
}

impl Station {
    pub fn platform_on(&self, segment: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.segment == segment)
    }
}
