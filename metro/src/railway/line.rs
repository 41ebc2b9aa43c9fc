use std::collections::HashMap;

use crate::input::network::SegmentName;
use super::train::Train;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Outbound,
    Inbound,
}

impl Direction {
    /// The direction taken after reaching the end of a route.
    pub fn next(self) -> Direction {
        match self {
            Direction::Outbound => Direction::Inbound,
            Direction::Inbound => Direction::Outbound,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Outbound => "outbound",
            Direction::Inbound => "inbound",
        }
    }
}

#[derive(Debug, Fail, Copy, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[fail(display = "not found")]
    NotFound,
    #[fail(display = "wrong line")]
    WrongLine,
    #[fail(display = "invalid route")]
    InvalidRoute,
}

pub type Route = Vec<SegmentName>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub name: String,
    /// Stations served by the line. Not used for traversal.
    pub station_names: Vec<String>,
    pub routes: HashMap<Direction, Route>,
}

impl Line {
    pub fn new(name: &str) -> Self {
        Line {
            name: name.to_string(),
            station_names: Vec::new(),
            routes: HashMap::new(),
        }
    }

    pub fn route(&self, direction: Direction) -> &[SegmentName] {
        self.routes.get(&direction).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Segments appearing more than once in the route for `direction`.
    pub fn repeated_segments(&self, direction: Direction) -> Vec<&str> {
        let route = self.route(direction);
        let mut repeated: Vec<&str> = Vec::new();
        for (i, s) in route.iter().enumerate() {
            if route[..i].contains(s) && !repeated.contains(&s.as_str()) {
                repeated.push(s.as_str());
            }
        }
        repeated
    }

    /// Compute where `train` goes next on this line.
    ///
    /// The train moves one step along the route for its current direction.
    /// At the end of the route it reverses and continues from the first
    /// segment of the opposite route. If the current segment occurs several
    /// times in the route, the last occurrence is used.
    pub fn next_segment(&self, train: &Train) -> Result<Train, RouteError> {
        if train.line_name != self.name {
            return Err(RouteError::WrongLine);
        }

        let route = self.route(train.direction);
        let mut current = None;
        for (idx, segment) in route.iter().enumerate() {
            if *segment == train.segment {
                current = Some(idx);
            }
        }
        let mut next_idx = current.ok_or(RouteError::NotFound)? + 1;

        let mut next = train.clone();
        if next_idx >= route.len() {
            next.direction = train.direction.next();
            next_idx = 0;
        }

        let segment = self.route(next.direction).get(next_idx).ok_or(RouteError::InvalidRoute)?;
        next.segment = segment.clone();
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    fn segments(names: &[&str]) -> Route {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn shuttle() -> Line {
        Line {
            name: "L".to_string(),
            station_names: vec!["a".to_string(), "b".to_string()],
            routes: hashmap! {
                Direction::Outbound => segments(&["s0", "s1", "s2"]),
                Direction::Inbound => segments(&["s5", "s4", "s3"]),
            },
        }
    }

    #[test]
    fn test_direction_next() {
        assert_eq!(Direction::Outbound.next(), Direction::Inbound);
        assert_eq!(Direction::Inbound.next(), Direction::Outbound);
        assert_eq!(Direction::Outbound.next().next(), Direction::Outbound);
    }

    #[test]
    fn test_step_forward() {
        let line = shuttle();
        let train = Train::new("t", "L", "s1", Direction::Outbound);
        let next = line.next_segment(&train).unwrap();
        assert_eq!(next.segment, "s2");
        assert_eq!(next.direction, Direction::Outbound);
        assert_eq!(next.name, "t");
        assert_eq!(next.line_name, "L");
    }

    #[test]
    fn test_reverse_at_terminus() {
        let line = shuttle();
        let train = Train::new("t", "L", "s2", Direction::Outbound);
        let next = line.next_segment(&train).unwrap();
        assert_eq!(next.segment, "s5");
        assert_eq!(next.direction, Direction::Inbound);

        let train = Train::new("t", "L", "s3", Direction::Inbound);
        let next = line.next_segment(&train).unwrap();
        assert_eq!(next.segment, "s0");
        assert_eq!(next.direction, Direction::Outbound);
    }

    #[test]
    fn test_wrong_line() {
        let line = shuttle();
        let train = Train::new("t", "M", "s0", Direction::Outbound);
        assert_eq!(line.next_segment(&train), Err(RouteError::WrongLine));
        assert_eq!(train.segment, "s0");
    }

    #[test]
    fn test_segment_not_on_route() {
        let line = shuttle();
        // s4 exists on the line, but only in the inbound direction.
        let train = Train::new("t", "L", "s4", Direction::Outbound);
        assert_eq!(line.next_segment(&train), Err(RouteError::NotFound));
    }

    #[test]
    fn test_empty_return_route() {
        let mut line = shuttle();
        line.routes.insert(Direction::Inbound, Vec::new());
        let train = Train::new("t", "L", "s2", Direction::Outbound);
        assert_eq!(line.next_segment(&train), Err(RouteError::InvalidRoute));

        line.routes.remove(&Direction::Inbound);
        assert_eq!(line.next_segment(&train), Err(RouteError::InvalidRoute));

        // Not at the terminus yet, so the missing route does not matter.
        let train = Train::new("t", "L", "s0", Direction::Outbound);
        assert_eq!(line.next_segment(&train).unwrap().segment, "s1");
    }

    #[test]
    fn test_missing_route_for_current_direction() {
        let mut line = shuttle();
        line.routes.remove(&Direction::Outbound);
        let train = Train::new("t", "L", "s0", Direction::Outbound);
        assert_eq!(line.next_segment(&train), Err(RouteError::NotFound));
    }

    #[test]
    fn test_last_match_wins() {
        let line = Line {
            name: "L".to_string(),
            station_names: vec![],
            routes: hashmap! {
                Direction::Outbound => segments(&["a", "b", "a", "c"]),
                Direction::Inbound => segments(&["c", "a"]),
            },
        };
        let train = Train::new("t", "L", "a", Direction::Outbound);
        // First occurrence would lead to "b".
        assert_eq!(line.next_segment(&train).unwrap().segment, "c");
        assert_eq!(line.repeated_segments(Direction::Outbound), vec!["a"]);
        assert!(line.repeated_segments(Direction::Inbound).is_empty());
    }

    #[test]
    fn test_two_segment_loop() {
        let line = Line {
            name: "L".to_string(),
            station_names: vec![],
            routes: hashmap! {
                Direction::Outbound => segments(&["A", "B"]),
                Direction::Inbound => segments(&["B", "A"]),
            },
        };
        let mut train = Train::new("t", "L", "A", Direction::Outbound);
        let mut visited = Vec::new();
        for _ in 0..4 {
            train = line.next_segment(&train).unwrap();
            visited.push((train.segment.clone(), train.direction));
        }
        assert_eq!(visited, vec![
            ("B".to_string(), Direction::Outbound),
            ("B".to_string(), Direction::Inbound),
            ("A".to_string(), Direction::Inbound),
            ("A".to_string(), Direction::Outbound),
        ]);
    }
}
