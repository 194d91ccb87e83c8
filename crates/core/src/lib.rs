#![forbid(unsafe_code)]

pub mod gesture;
pub mod model;
pub mod time;

pub use time::Clock;
