use crate::railway::line::Direction;
use crate::railway::train::Train;
use std::fmt;

pub type Tick = u64;

/// Movement log of a fleet. `trains` is in fleet order, one entry per train,
/// so trains sharing a name are still kept apart.
#[derive(Debug, Default)]
pub struct History {
    pub ticks: Tick,
    pub trains: Vec<(String, Vec<TrainLogEvent>)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainLogEvent {
    Start { segment: String, direction: Direction },
    Segment { tick: Tick, segment: String },
    Reverse { tick: Tick, direction: Direction },
}

impl History {
    pub fn new(fleet: &[Train]) -> History {
        History {
            ticks: 0,
            trains: fleet.iter()
                .map(|t| (t.name.clone(), vec![TrainLogEvent::Start {
                    segment: t.segment.clone(),
                    direction: t.direction,
                }]))
                .collect(),
        }
    }

    /// Record the fleet after a tick. The fleet must be in the same order as
    /// the one the history was created with.
    pub fn record(&mut self, fleet: &[Train]) {
        self.ticks += 1;
        let tick = self.ticks;
        for (idx, train) in fleet.iter().enumerate() {
            if idx >= self.trains.len() {
                self.trains.push((train.name.clone(), Vec::new()));
            }
            let events = &mut self.trains[idx].1;
            let (reversed, moved) = {
                let (segment, direction) = last_position(events);
                let reversed = direction != Some(train.direction);
                (reversed, reversed || segment != Some(train.segment.as_str()))
            };
            if reversed {
                events.push(TrainLogEvent::Reverse { tick, direction: train.direction });
            }
            if moved {
                events.push(TrainLogEvent::Segment { tick, segment: train.segment.clone() });
            }
        }
    }
}

fn last_position(events: &[TrainLogEvent]) -> (Option<&str>, Option<Direction>) {
    let mut segment = None;
    let mut direction = None;
    for ev in events {
        match *ev {
            TrainLogEvent::Start { segment: ref s, direction: d } => {
                segment = Some(s.as_str());
                direction = Some(d);
            }
            TrainLogEvent::Segment { segment: ref s, .. } => segment = Some(s.as_str()),
            TrainLogEvent::Reverse { direction: d, .. } => direction = Some(d),
        }
    }
    (segment, direction)
}

/// Print one segment visit per line on the following format:
/// `trainname tick segmentname`.
pub fn visits(h: &History) -> Result<String, fmt::Error> {
    use std::fmt::Write;
    let mut s = String::new();
    for &(ref train_name, ref events) in &h.trains {
        for ev in events {
            match *ev {
                TrainLogEvent::Start { ref segment, .. } => writeln!(s, "{} 0 {}", train_name, segment)?,
                TrainLogEvent::Segment { tick, ref segment } => writeln!(s, "{} {} {}", train_name, tick, segment)?,
                TrainLogEvent::Reverse { .. } => {},
            }
        }
    }
    Ok(s)
}
