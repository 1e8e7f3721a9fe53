use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile data of a user provisioned by the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

impl User {
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            firstname: self.firstname.clone(),
            lastname: self.lastname.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
}
