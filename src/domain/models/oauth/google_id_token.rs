//! Google ID 토큰 클레임
//!
//! <https://developers.google.com/identity/openid-connect/openid-connect#an-id-tokens-payload>

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleIdTokenClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Google은 bool 또는 "true" 문자열로 보낸다
    #[serde(default, deserialize_with = "bool_or_string")]
    pub email_verified: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Text(text) => text.eq_ignore_ascii_case("true"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_email_verified_encodings() {
        let claims: GoogleIdTokenClaims =
            serde_json::from_str(r#"{"sub":"1","email":"a@x.com","email_verified":"true"}"#).unwrap();
        assert!(claims.email_verified);

        let claims: GoogleIdTokenClaims = serde_json::from_str(r#"{"sub":"1","email_verified":false}"#).unwrap();
        assert!(!claims.email_verified);
        assert!(claims.email.is_none());
    }
}
