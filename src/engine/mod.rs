pub mod board;
pub mod tracker;
