pub mod network;
pub mod parser_utils;
pub mod network_parser;
pub mod fleet;
pub mod demo;
