pub mod game_ranking;

pub use game_ranking::*;
