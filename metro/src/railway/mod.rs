//! Lines, trains and the aggregate that moves them.

pub mod line;
pub mod train;
pub mod metro;
