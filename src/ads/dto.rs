use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ads::repo::Ad;

#[derive(Debug, Deserialize)]
pub struct CreateAdRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Body for PUT /ads/{id}; absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateAdRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub owner_id: i64,
}

impl From<Ad> for AdResponse {
    fn from(ad: Ad) -> Self {
        Self {
            id: ad.id,
            title: ad.title,
            description: ad.description,
            created_at: ad.created_at,
            owner_id: ad.owner_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_fields_default_to_absent() {
        let req: UpdateAdRequest = serde_json::from_str("{}").expect("valid body");
        assert!(req.title.is_none());
        assert!(req.description.is_none());

        let req: UpdateAdRequest = serde_json::from_str(r#"{"title":"New"}"#).expect("valid body");
        assert_eq!(req.title.as_deref(), Some("New"));
        assert!(req.description.is_none());
    }

    #[test]
    fn ad_response_uses_rfc3339_timestamps() {
        let ad = Ad {
            id: 1,
            title: "T".into(),
            description: "D".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            owner_id: 1,
        };
        let json = serde_json::to_string(&AdResponse::from(ad)).unwrap();
        assert!(json.contains("1970-01-01T00:00:00Z"));
        assert!(json.contains(r#""owner_id":1"#));
    }
}
