use std::{sync::Arc, time::Duration};

use attendance_api::{build_router, ApiState};
use attendance_core::{
    calendar::Calendar,
    models::user::User,
    services::{ServiceContext, Services},
    store::Stores,
};
use attendance_db::MemoryStore;
use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use fake::{
    Fake,
    faker::{
        internet::en::SafeEmail,
        name::en::{FirstName, LastName},
    },
};
use serde_json::{json, Value};
use uuid::Uuid;

pub const OFFICE_IP: &str = "10.0.0.1";

pub struct TestContext {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let ctx = ServiceContext::new(
            Stores::from_backend(store.clone()),
            Calendar::default(),
            Duration::from_secs(1),
        );
        let state = Arc::new(ApiState {
            services: Services::new(ctx),
            trust_forwarded_for: true,
        });
        let server = TestServer::new(build_router(state)).unwrap();

        Self { server, store }
    }

    pub async fn user(&self) -> User {
        let user = User {
            id: Uuid::new_v4(),
            firstname: FirstName().fake(),
            lastname: LastName().fake(),
            email: SafeEmail().fake(),
        };
        self.store.insert_user(user.clone()).await;
        user
    }

    /// Creates a room owned by `owner` whose check-in address is [`OFFICE_IP`].
    pub async fn room(&self, owner: &User, time: Value) -> Uuid {
        let response = as_user(self.server.post("/room/create"), owner.id, OFFICE_IP)
            .json(&json!({ "name": "Main office", "time": time }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body: Value = response.json();
        body["data"]["id"].as_str().unwrap().parse().unwrap()
    }

    pub async fn add_member(&self, owner: &User, room_id: Uuid, member: &User) {
        as_user(
            self.server.post(&format!("/room/add-member/{room_id}")),
            owner.id,
            OFFICE_IP,
        )
        .json(&json!({ "email": member.email }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
    }
}

/// Attaches the forwarded identity and client address headers.
pub fn as_user(request: TestRequest, user_id: Uuid, ip: &str) -> TestRequest {
    request
        .add_header(
            HeaderName::from_static("x-user-id"),
            HeaderValue::from_str(&user_id.to_string()).unwrap(),
        )
        .add_header(
            HeaderName::from_static("x-forwarded-for"),
            HeaderValue::from_str(&format!("{ip}, 172.16.0.1")).unwrap(),
        )
}

pub fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> Value {
    json!({ "start_time": start, "end_time": end })
}

/// A window covering nearly all of the current UTC day.
pub fn today() -> Value {
    let start = Calendar::default().start_of_day(Utc::now().date_naive());
    window(
        start + ChronoDuration::minutes(1),
        start + ChronoDuration::hours(23) + ChronoDuration::minutes(59),
    )
}
