//! 공통 유틸리티
//!
//! - [`string_utils`]: 이메일/선택 문자열 정규화, 공백 검증
//! - [`time_utils`]: API 응답용 시각 포맷
//! - [`display_terminal`]: 부팅 진행 출력

pub mod display_terminal;
pub mod string_utils;
pub mod time_utils;
