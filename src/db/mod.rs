//! MongoDB 연결
//!
//! 부팅 시 한 번 연결(ping 확인)한 뒤 `ServiceLocator::set`으로 등록하며,
//! `#[repository]` 매크로가 `db` 필드에 주입합니다.

use log::info;
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, options::ClientOptions};

use crate::config::DatabaseConfig;

/// MongoDB duplicate key 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    pub async fn new() -> Result<Self, mongodb::error::Error> {
        let database_name = DatabaseConfig::name();

        let mut client_options = ClientOptions::parse(DatabaseConfig::uri()).await?;
        client_options.app_name = Some("game_social_backend".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("MongoDB 연결 성공: {}", database_name);

        Ok(Self { client, database_name })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }
}

/// unique 인덱스 위반(E11000) 여부
///
/// 이메일 중복, 팔로우 쌍 중복처럼 동시 요청 경쟁을 저장소 제약으로 막는 곳에서 사용합니다.
pub fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
