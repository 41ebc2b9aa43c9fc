use failure::Error;
use super::history::{History, TrainLogEvent};

use std::io;

pub fn javascript_history<W: io::Write>(history: &History, f: &mut W) -> Result<(), Error> {
    write!(f, "var data = ")?;
    json_history(history, f)?;
    write!(f, ";")?;
    Ok(())
}

pub fn json_history<W: io::Write>(history: &History, f: &mut W) -> Result<(), Error> {
    write!(f, "{{ \"ticks\": {},\n", history.ticks)?;
    write!(f, "\"trains\":[")?;
    let mut first_train = true;
    for &(ref name, ref events) in &history.trains {
        if first_train { first_train = false; } else { write!(f, ",")?; }
        write!(f, "\n{{ \"name\": \"{}\", \"events\": [", name)?;
        let mut first = true;
        for ev in events {
            if first { first = false; } else { write!(f, ", ")?; }
            match *ev {
                TrainLogEvent::Start { ref segment, direction } => write!(f,
                    "{{ \"tick\": 0, \"event\": \"start\", \"segment\": \"{}\", \"direction\": \"{}\" }}",
                    segment, direction.name())?,
                TrainLogEvent::Segment { tick, ref segment } => write!(f,
                    "{{ \"tick\": {}, \"event\": \"segment\", \"segment\": \"{}\" }}",
                    tick, segment)?,
                TrainLogEvent::Reverse { tick, direction } => write!(f,
                    "{{ \"tick\": {}, \"event\": \"reverse\", \"direction\": \"{}\" }}",
                    tick, direction.name())?,
            }
        }
        write!(f, "] }}")?;
    }
    write!(f, "]\n}}")?;
    Ok(())
}

#[test]
fn test_json_history() {
    use crate::railway::line::Direction;
    let h = History {
        ticks: 1,
        trains: vec![("t0".to_string(), vec![
            TrainLogEvent::Start { segment: "a".to_string(), direction: Direction::Outbound },
            TrainLogEvent::Reverse { tick: 1, direction: Direction::Inbound },
            TrainLogEvent::Segment { tick: 1, segment: "b".to_string() },
        ])],
    };
    let mut out = Vec::new();
    javascript_history(&h, &mut out).unwrap();
    let s = String::from_utf8(out).unwrap();
    assert_eq!(s, "var data = { \"ticks\": 1,\n\"trains\":[\n{ \"name\": \"t0\", \"events\": [\
{ \"tick\": 0, \"event\": \"start\", \"segment\": \"a\", \"direction\": \"outbound\" }, \
{ \"tick\": 1, \"event\": \"reverse\", \"direction\": \"inbound\" }, \
{ \"tick\": 1, \"event\": \"segment\", \"segment\": \"b\" }] }]\n};");
}
