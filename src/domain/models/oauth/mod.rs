//! OAuth 연동 모델
//!
//! - [`google_id_token`]: Google이 서명한 ID 토큰의 클레임 (검증 전 원본)
//! - [`oauth_identity`]: 검증을 통과한 뒤 로컬 계정과 연결하는 데 쓰는 신원

pub mod google_id_token;
pub mod oauth_identity;

pub use google_id_token::*;
pub use oauth_identity::*;
