use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FollowersCountResponse {
    pub followers: u64,
}

#[derive(Debug, Serialize)]
pub struct FollowingCountResponse {
    pub following: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IsFollowingResponse {
    pub is_following: bool,
}
