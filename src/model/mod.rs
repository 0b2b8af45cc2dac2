mod poll;
mod schedule;
mod scoreboard;
mod team;

pub use poll::*;
pub use schedule::*;
pub use scoreboard::*;
pub use team::*;
