use serde::{Deserialize, Serialize};

use super::repo::{User, UserSummary};

/// User shape returned by the kiosk endpoints (no image key, no timestamp).
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub career: String,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.clone(),
            name: u.name.clone(),
            gender: u.gender.clone(),
            career: u.career.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CedRequest {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct CedResponse {
    pub success: bool,
    pub exists: bool,
    pub message: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub success: bool,
    pub count: usize,
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct SummariesResponse {
    pub success: bool,
    pub count: usize,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_users: i64,
    pub users_per_page: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

#[derive(Debug, Serialize)]
pub struct PaginatedResponse {
    pub success: bool,
    pub pagination: Pagination,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Serialize)]
pub struct CareerUsersResponse {
    pub success: bool,
    pub career: String,
    pub count: usize,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Deserialize)]
pub struct FilterQuery {
    pub career: Option<String>,
    pub gender: Option<String>,
    pub limit: Option<i64>,
}

/// Echo of the applied filters; absent ones render as "all" / "no limit".
#[derive(Debug, Serialize)]
pub struct FilterEcho {
    pub career: String,
    pub gender: String,
    pub limit: String,
}

#[derive(Debug, Serialize)]
pub struct FilteredResponse {
    pub success: bool,
    pub filters: FilterEcho,
    pub count: usize,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Serialize)]
pub struct CareersResponse {
    pub success: bool,
    pub count: usize,
    pub careers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_serializes_camel_case() {
        let p = Pagination {
            current_page: 2,
            total_pages: 5,
            total_users: 42,
            users_per_page: 10,
            has_next_page: true,
            has_prev_page: true,
        };
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalUsers"], 42);
        assert_eq!(json["hasNextPage"], true);
    }

    #[test]
    fn test_public_user_from_row() {
        let user = User {
            id: "1019762841".into(),
            name: "Ana Gómez".into(),
            gender: "female".into(),
            career: "Ingeniería Civil".into(),
            image: Some("ana.png".into()),
            created_at: time::OffsetDateTime::now_utc(),
        };
        let public = PublicUser::from(&user);
        let json = serde_json::to_value(&public).unwrap();
        assert_eq!(json["id"], "1019762841");
        assert!(json.get("image").is_none());
        assert!(json.get("createdAt").is_none());
    }
}
