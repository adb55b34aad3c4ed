pub mod game_type;

pub use game_type::*;
