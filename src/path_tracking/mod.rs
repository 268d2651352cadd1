// Path tracking module

pub mod trajectory_follower;

pub use trajectory_follower::*;
