use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::input::network::{NetworkMap, NetworkError, Station};
use crate::ticker::CancelToken;
use super::line::{Direction, Line, RouteError};
use super::train::Train;

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum TickError {
    #[fail(display = "getting line {:?} for train {:?}: {}", line, train, cause)]
    LineLookup {
        line: String,
        train: String,
        #[fail(cause)]
        cause: RouteError,
    },
    #[fail(display = "traversing line {:?} for train {:?}: {}", line, train, cause)]
    Traversal {
        line: String,
        train: String,
        #[fail(cause)]
        cause: RouteError,
    },
    #[fail(display = "tick cancelled")]
    Cancelled,
}

impl TickError {
    pub fn route_error(&self) -> Option<RouteError> {
        match *self {
            TickError::LineLookup { cause, .. } | TickError::Traversal { cause, .. } => Some(cause),
            TickError::Cancelled => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self == TickError::Cancelled
    }
}

/// Everything the aggregate owns. Only mutated by `Metro::tick`.
#[derive(Debug, Clone)]
pub struct MetroState {
    pub map: NetworkMap,
    pub stations: Vec<Station>,
    pub lines: Vec<Line>,
    pub trains: Vec<Train>,
}

impl MetroState {
    pub fn line(&self, name: &str) -> Result<&Line, RouteError> {
        self.lines.iter().find(|l| l.name == name).ok_or(RouteError::NotFound)
    }
}

/// Rail network and fleet behind a single lock.
#[derive(Debug)]
pub struct Metro {
    state: RwLock<MetroState>,
}

impl Metro {
    pub fn new(map: NetworkMap,
               stations: Vec<Station>,
               lines: Vec<Line>,
               trains: Vec<Train>)
               -> Result<Metro, NetworkError> {
        map.check_connections()?;

        for line in &lines {
            for &direction in &[Direction::Outbound, Direction::Inbound] {
                for segment in line.repeated_segments(direction) {
                    warn!("line {:?} visits segment {:?} more than once going {}; the last visit decides the next segment",
                          line.name, segment, direction.name());
                }
            }
        }

        debug!("metro with {} segments, {} connections, {} stations, {} lines, {} trains",
               map.segments.len(), map.connections.len(), stations.len(), lines.len(), trains.len());

        Ok(Metro {
            state: RwLock::new(MetroState { map, stations, lines, trains }),
        })
    }

    /// Advance every train one segment along its line.
    ///
    /// The write lock is held for the whole batch. The first failure stops the
    /// batch: trains already moved keep their new position, the rest are left
    /// untouched. Cancellation is checked before each train.
    pub fn tick(&self, cancel: &CancelToken) -> Result<(), TickError> {
        let mut guard = self.write();
        let state = &mut *guard;

        for idx in 0..state.trains.len() {
            if cancel.is_cancelled() {
                return Err(TickError::Cancelled);
            }

            let train = &state.trains[idx];
            let line = state.line(&train.line_name).map_err(|cause| TickError::LineLookup {
                line: train.line_name.clone(),
                train: train.name.clone(),
                cause,
            })?;

            let next = line.next_segment(train).map_err(|cause| TickError::Traversal {
                line: line.name.clone(),
                train: train.name.clone(),
                cause,
            })?;

            if next.direction != train.direction {
                debug!("train {:?} reverses to {} at {:?}", next.name, next.direction.name(), next.segment);
            }
            state.trains[idx] = next;
        }

        Ok(())
    }

    /// Copy of the current fleet.
    pub fn trains(&self) -> Vec<Train> {
        self.read(|s| s.trains.clone())
    }

    pub fn snapshot(&self) -> MetroState {
        self.read(|s| s.clone())
    }

    pub fn read<F, R>(&self, f: F) -> R
        where F: FnOnce(&MetroState) -> R
    {
        f(&self.read_guard())
    }

    // Poisoning is ignored: trains are only ever replaced whole.
    fn read_guard(&self) -> RwLockReadGuard<MetroState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<MetroState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
