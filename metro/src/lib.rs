//! Metro -- discrete-time movement of trains along rail lines.
//!
//! A rail network is a directed graph of track segments joined by
//! connections. A line is an ordered list of segments for each direction of
//! travel, running between stations. Trains belong to a line and advance one
//! segment per tick, reversing at the end of the route.

extern crate smallvec;
extern crate regex;
extern crate failure;
#[macro_use] extern crate failure_derive;
#[macro_use] extern crate log;

pub mod input;
pub mod output;
pub mod railway;
pub mod ticker;


use std::path::Path;

use input::fleet;
use input::network::Network;
use railway::train::Train;

pub type AppResult<T> = Result<T, failure::Error>;

pub fn read_file(f: &Path) -> AppResult<String> {
    use std::fs::File;
    use std::io::prelude::*;
    use std::io::BufReader;

    let file = File::open(f)?;
    let mut file = BufReader::new(&file);
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

pub fn get_network(s: &Path) -> AppResult<Network> {
    let contents = read_file(s)?;
    get_network_string(&contents)
}

pub fn get_network_string(s: &str) -> AppResult<Network> {
    use input::network_parser::{lexer, parse};
    let lex = lexer(&mut s.chars())?;
    let network = parse(&lex)?;
    Ok(network)
}

pub fn get_fleet(s: &Path) -> AppResult<Vec<Train>> {
    let contents = read_file(s)?;
    let trains = fleet::parse_fleet(&contents)?;
    Ok(trains)
}
