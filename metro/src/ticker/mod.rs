//! Driving the network forward in time.

pub mod cancel;
pub mod clock;

pub use self::cancel::CancelToken;
pub use self::clock::Clock;
