//! 게임 분류와 랭킹 표기 방식

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;

/// 게시글/랭킹이 속한 게임
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameType {
    #[default]
    General,
    LeagueOfLegends,
    Valorant,
}

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::General => "GENERAL",
            GameType::LeagueOfLegends => "LEAGUE_OF_LEGENDS",
            GameType::Valorant => "VALORANT",
        }
    }
}

impl FromStr for GameType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "GENERAL" => Ok(GameType::General),
            "LEAGUE_OF_LEGENDS" | "LOL" => Ok(GameType::LeagueOfLegends),
            "VALORANT" => Ok(GameType::Valorant),
            _ => Err(AppError::ValidationError(format!("unknown game type: {}", s))),
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 랭킹 값이 점수인지 티어인지
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankingType {
    Score,
    Tier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_path_values() {
        assert_eq!("VALORANT".parse::<GameType>().unwrap(), GameType::Valorant);
        assert_eq!("league_of_legends".parse::<GameType>().unwrap(), GameType::LeagueOfLegends);
        assert_eq!("lol".parse::<GameType>().unwrap(), GameType::LeagueOfLegends);
        assert!(matches!("chess".parse::<GameType>(), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        assert_eq!(serde_json::to_string(&GameType::LeagueOfLegends).unwrap(), "\"LEAGUE_OF_LEGENDS\"");
        assert_eq!(serde_json::to_string(&RankingType::Tier).unwrap(), "\"TIER\"");
        assert_eq!(GameType::default(), GameType::General);
    }
}
