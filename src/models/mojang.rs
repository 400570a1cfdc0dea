use serde::Deserialize;

/// `GET /users/profiles/minecraft/{username}`
#[derive(Debug, Clone, Deserialize)]
pub struct MojangProfile {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct MojangErrorBody {
    #[serde(rename = "errorMessage")]
    pub error_message: Option<String>,
}
