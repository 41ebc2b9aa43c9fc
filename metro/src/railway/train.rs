use crate::input::network::SegmentName;
use super::line::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub name: String,
    pub line_name: String,
    pub segment: SegmentName,
    pub direction: Direction,
}

impl Train {
    pub fn new(name: &str, line_name: &str, segment: &str, direction: Direction) -> Self {
        Train {
            name: name.to_string(),
            line_name: line_name.to_string(),
            segment: segment.to_string(),
            direction,
        }
    }
}
