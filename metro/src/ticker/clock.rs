use std::thread;
use std::time::{Duration, Instant};

use crate::output::history::History;
#[cfg(test)]
use crate::output::history;
use crate::railway::metro::{Metro, TickError};
use super::cancel::CancelToken;

/// Longest uninterrupted sleep while waiting for the next tick.
const POLL_SLICE: Duration = Duration::from_millis(50);

/// Periodic driver for a `Metro`.
#[derive(Debug, Clone)]
pub struct Clock {
    pub interval: Duration,
    /// Stop after this many ticks. Runs until cancelled if `None`.
    pub limit: Option<u64>,
}

impl Clock {
    pub fn new(interval: Duration) -> Self {
        Clock { interval, limit: None }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Tick `metro` once per interval, recording each tick in `history`.
    /// A tick stopped part way is recorded too if any train moved.
    /// Returns the number of completed ticks when stopped by the token or
    /// the limit, and the tick error otherwise.
    pub fn run(&self, metro: &Metro, cancel: &CancelToken, history: &mut History) -> Result<u64, TickError> {
        let mut ticks = 0;
        loop {
            if self.limit.map(|l| ticks >= l).unwrap_or(false) {
                info!("tick limit {} reached", ticks);
                return Ok(ticks);
            }

            if !wait(self.interval, cancel) {
                info!("stopping after {} ticks", ticks);
                return Ok(ticks);
            }

            let before = metro.trains();
            let result = metro.tick(cancel);
            let trains = metro.trains();
            // An interrupted tick may still have moved the first trains of the batch.
            if result.is_ok() || trains != before {
                history.record(&trains);
            }

            match result {
                Ok(()) => {},
                Err(ref e) if e.is_cancelled() => {
                    info!("tick cancelled, stopping after {} ticks", ticks);
                    return Ok(ticks);
                }
                Err(e) => return Err(e),
            }
            ticks += 1;

            for train in &trains {
                info!("tick {}: train {:?} at {:?} ({})", ticks, train.name, train.segment, train.direction.name());
            }
        }
    }
}

/// Sleep for `interval` in short slices. Returns false if cancelled meanwhile.
fn wait(interval: Duration, cancel: &CancelToken) -> bool {
    let deadline = Instant::now() + interval;
    loop {
        if cancel.is_cancelled() {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep(std::cmp::min(deadline - now, POLL_SLICE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::network::NetworkMap;
    use crate::railway::line::{Direction, Line, RouteError};
    use crate::railway::train::Train;
    use maplit::hashmap;

    fn shuttle(trains: Vec<Train>) -> Metro {
        let line = Line {
            name: "L".to_string(),
            station_names: vec![],
            routes: hashmap! {
                Direction::Outbound => vec!["a".to_string(), "b".to_string()],
                Direction::Inbound => vec!["b".to_string(), "a".to_string()],
            },
        };
        Metro::new(NetworkMap::new(), vec![], vec![line], trains).unwrap()
    }

    #[test]
    fn test_runs_until_limit() {
        let metro = shuttle(vec![Train::new("t", "L", "a", Direction::Outbound)]);
        let mut history = History::new(&metro.trains());
        let ticks = Clock::new(Duration::from_millis(0)).with_limit(4)
            .run(&metro, &CancelToken::new(), &mut history).unwrap();
        assert_eq!(ticks, 4);
        assert_eq!(history.ticks, 4);
        assert_eq!(metro.trains()[0], Train::new("t", "L", "a", Direction::Outbound));
    }

    #[test]
    fn test_stops_when_cancelled() {
        let metro = shuttle(vec![Train::new("t", "L", "a", Direction::Outbound)]);
        let mut history = History::new(&metro.trains());
        let cancel = CancelToken::new();
        cancel.cancel();
        let ticks = Clock::new(Duration::from_millis(10))
            .run(&metro, &cancel, &mut history).unwrap();
        assert_eq!(ticks, 0);
        assert_eq!(metro.trains()[0].segment, "a");
    }

    #[test]
    fn test_cancel_from_other_thread() {
        let metro = shuttle(vec![Train::new("t", "L", "a", Direction::Outbound)]);
        let mut history = History::new(&metro.trains());
        let cancel = CancelToken::new();
        let remote = cancel.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            remote.cancel();
        });
        // Without cancellation this would wait for an hour.
        let ticks = Clock::new(Duration::from_secs(3600))
            .run(&metro, &cancel, &mut history).unwrap();
        handle.join().unwrap();
        assert_eq!(ticks, 0);
    }

    #[test]
    fn test_records_trains_moved_before_cancel() {
        let metro = shuttle(vec![Train::new("t0", "L", "a", Direction::Outbound),
                                 Train::new("t1", "L", "b", Direction::Inbound)]);
        let mut history = History::new(&metro.trains());
        // One check while waiting, one before t0, then cancelled before t1.
        let cancel = CancelToken::cancel_after_checks(2);
        let ticks = Clock::new(Duration::from_millis(0))
            .run(&metro, &cancel, &mut history).unwrap();
        assert_eq!(ticks, 0);

        let trains = metro.trains();
        assert_eq!(trains[0].segment, "b");
        assert_eq!(trains[1].segment, "b");
        assert_eq!(history::visits(&history).unwrap(), "t0 0 a\nt0 1 b\nt1 0 b\n");
    }

    #[test]
    fn test_records_trains_moved_before_error() {
        let metro = shuttle(vec![Train::new("t0", "L", "a", Direction::Outbound),
                                 Train::new("t1", "L", "c", Direction::Outbound)]);
        let mut history = History::new(&metro.trains());
        let err = Clock::new(Duration::from_millis(0))
            .run(&metro, &CancelToken::new(), &mut history).unwrap_err();
        assert_eq!(err.route_error(), Some(RouteError::NotFound));
        assert_eq!(history::visits(&history).unwrap(), "t0 0 a\nt0 1 b\nt1 0 c\n");
    }

    #[test]
    fn test_returns_tick_error() {
        let metro = shuttle(vec![Train::new("t", "L", "c", Direction::Outbound)]);
        let mut history = History::new(&metro.trains());
        let err = Clock::new(Duration::from_millis(0)).with_limit(3)
            .run(&metro, &CancelToken::new(), &mut history).unwrap_err();
        assert_eq!(err.route_error(), Some(RouteError::NotFound));
        assert_eq!(history.ticks, 0);
    }
}
