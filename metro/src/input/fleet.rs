use crate::railway::line::Direction;
use crate::railway::train::Train;
use regex::Regex;

#[derive(Debug, Fail)]
pub enum FleetError {
    #[fail(display = "error in regular expression: {}", _0)]
    RegexError(String),
    #[fail(display = "unrecognized fleet entry: {}", _0)]
    Unrecognized(String),
}

/// Parses the fleet format, one train per line:
///
/// * train t1 red s0 outbound
///
/// Blank lines and lines starting with `#` are skipped.
pub fn parse_fleet(input: &str) -> Result<Vec<Train>, FleetError> {
    let mut trains = Vec::new();
    let skip_re = Regex::new(r"^\s*(#.*)?$")
        .map_err(|e| FleetError::RegexError(format!("{:?}", e)))?;
    let train_re = Regex::new(r"(?x) ^ \s* train \s+ (?P<name>\w+) \s+
            (?P<line>\w+) \s+
            (?P<segment>\w+) \s+
            (?P<dir>outbound|inbound) \s*
            $").map_err(|e| FleetError::RegexError(format!("{:?}", e)))?;
    for line in input.lines() {
        if skip_re.is_match(line) {
            continue;
        }
        if let Some(groups) = train_re.captures(line) {
            let direction = match &groups["dir"] {
                "outbound" => Direction::Outbound,
                _ => Direction::Inbound,
            };
            trains.push(Train::new(&groups["name"], &groups["line"], &groups["segment"], direction));
            continue;
        }
        return Err(FleetError::Unrecognized(line.to_string()));
    }

    Ok(trains)
}

#[test]
fn test_parse_fleet() {
    let trains = parse_fleet("
        # morning service
        train t0 red s0 outbound
          train t1 red s4 inbound   \n").unwrap();
    assert_eq!(trains, vec![Train::new("t0", "red", "s0", Direction::Outbound),
                            Train::new("t1", "red", "s4", Direction::Inbound)]);
}

#[test]
fn test_parse_fleet_unrecognized() {
    match parse_fleet("train t0 red s0 sideways") {
        Err(FleetError::Unrecognized(l)) => assert_eq!(l, "train t0 red s0 sideways"),
        x => panic!("unexpected result {:?}", x),
    }
    assert!(parse_fleet("train t0 red").is_err());
}
