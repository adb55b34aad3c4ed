use std::sync::Arc;

use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use singleton_macro::repository;

use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::rankings::GameRanking;
use crate::domain::models::game::GameType;

#[repository(name = "gameranking", collection = "game_rankings")]
pub struct GameRankingRepository {
    db: Arc<Database>,
}

impl GameRankingRepository {
    async fn find_sorted(&self, filter: Document) -> AppResult<Vec<GameRanking>> {
        let rankings = self
            .collection::<GameRanking>()
            .find(filter)
            .sort(doc! { "game_type": 1, "ranking_score": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(rankings)
    }

    pub async fn find_all(&self) -> AppResult<Vec<GameRanking>> {
        self.find_sorted(doc! {}).await
    }

    pub async fn find_by_game_type(&self, game_type: GameType) -> AppResult<Vec<GameRanking>> {
        self.find_sorted(doc! { "game_type": game_type.as_str() }).await
    }

    pub async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<GameRanking>> {
        Ok(self.collection::<GameRanking>().find_one(doc! { "_id": *id }).await?)
    }

    pub async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<GameRanking>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.find_sorted(doc! { "_id": { "$in": ids.to_vec() } }).await
    }

    pub async fn create(&self, mut ranking: GameRanking) -> AppResult<GameRanking> {
        let result = self.collection::<GameRanking>().insert_one(&ranking).await?;
        ranking.id = Some(
            result
                .inserted_id
                .as_object_id()
                .ok_or_else(|| AppError::InternalError("inserted_id is not an ObjectId".to_string()))?,
        );
        Ok(ranking)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let by_game = IndexModel::builder()
            .keys(doc! { "game_type": 1, "ranking_score": 1 })
            .options(IndexOptions::builder().name("game_score".to_string()).build())
            .build();

        self.collection::<GameRanking>().create_indexes([by_game]).await?;
        Ok(())
    }
}
