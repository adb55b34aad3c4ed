pub mod ranking_repo;

pub use ranking_repo::GameRankingRepository;
