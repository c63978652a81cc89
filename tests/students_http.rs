use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use reqwest::StatusCode;
use schoolapi::{
    api,
    students::{Student, StudentService},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

struct TestApp {
    base_url: String,
    service: Arc<StudentService>,
    client: reqwest::Client,
}

impl TestApp {
    async fn spawn(students: Vec<Student>) -> Self {
        let service = Arc::new(StudentService::with_store(students.into_iter().collect()));
        let app = api::create_router(service.clone());
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind test listener");
        let addr: SocketAddr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                eprintln!("server error: {err}");
            }
        });

        Self {
            base_url: format!("http://{}:{}/students", addr.ip(), addr.port()),
            service,
            client: reqwest::Client::new(),
        }
    }

    async fn seeded() -> Self {
        Self::spawn(vec![
            Student::new(1, "Miguel"),
            Student::new(2, "Marcio"),
            Student::new(3, "Carla"),
            Student::new(4, "Caroline"),
        ])
        .await
    }

    fn url(&self, suffix: &str) -> String {
        format!("{}{}", self.base_url, suffix)
    }

    async fn size(&self) -> usize {
        self.service.len().await
    }
}

#[tokio::test]
async fn list_all_returns_every_record() {
    let app = TestApp::seeded().await;
    let initial = app.size().await;

    let response = app.client.get(app.url("")).send().await.expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Student> = response.json().await.expect("json body");

    assert_eq!(body.len(), initial);
    assert_eq!(app.size().await, initial);
}

#[tokio::test]
async fn list_on_empty_store_returns_empty_array() {
    let app = TestApp::spawn(Vec::new()).await;

    let response = app.client.get(app.url("")).send().await.expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("json body");

    assert_eq!(body, json!([]));
    assert!(app.service.is_empty().await);
}

#[tokio::test]
async fn list_by_prefix_counts() {
    let app = TestApp::seeded().await;
    let cases = [(Some("Ren"), 0), (Some("Mar"), 1), (Some("Car"), 2), (None, 4)];

    for (prefix, expected) in cases {
        let url = match prefix {
            Some(prefix) => app.url(&format!("?prefix={prefix}")),
            None => app.url(""),
        };
        let response = app.client.get(url).send().await.expect("request");
        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<Student> = response.json().await.expect("json body");
        assert_eq!(body.len(), expected, "prefix {prefix:?}");
        assert!(
            body.iter()
                .all(|student| prefix.is_none_or(|p| student.name.starts_with(p)))
        );
    }
    assert_eq!(app.size().await, 4);
}

#[tokio::test]
async fn get_by_id_returns_first_record() {
    let app = TestApp::seeded().await;

    let response = app.client.get(app.url("/1")).send().await.expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Student = response.json().await.expect("json body");

    assert_eq!(body, Student::new(1, "Miguel"));
    assert_eq!(app.size().await, 4);
}

#[tokio::test]
async fn get_by_unknown_id_is_not_found() {
    let app = TestApp::seeded().await;

    let response = app.client.get(app.url("/999")).send().await.expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.size().await, 4);
}

#[tokio::test]
async fn save_inserts_new_record() {
    let app = TestApp::seeded().await;
    let new_student = Student::new(9999, "nome");

    let response = app
        .client
        .post(app.url(""))
        .json(&json!({ "id": 9999, "name": "nome" }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Student = response.json().await.expect("json body");

    assert_eq!(body, new_student);
    assert_eq!(app.size().await, 5);
}

#[tokio::test]
async fn save_existing_id_conflicts() {
    let app = TestApp::seeded().await;

    let response = app
        .client
        .post(app.url(""))
        .json(&json!({ "id": 1, "name": "Miguel" }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(response.bytes().await.expect("body").is_empty());
    assert_eq!(app.size().await, 4);
}

#[tokio::test]
async fn update_replaces_record() {
    let app = TestApp::seeded().await;
    let updated = Student::new(1, "novo nome");

    let response = app
        .client
        .put(app.url("/1"))
        .json(&json!({ "id": 1, "name": "novo nome" }))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Student = response.json().await.expect("json body");

    assert_eq!(body, updated);
    assert_eq!(app.size().await, 4);
}

#[tokio::test]
async fn update_with_empty_body_is_not_found() {
    let app = TestApp::seeded().await;

    let response = app
        .client
        .put(app.url("/999"))
        .json(&json!({}))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.size().await, 4);
}

#[tokio::test]
async fn delete_removes_record() {
    let app = TestApp::seeded().await;

    let response = app
        .client
        .delete(app.url("/2"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.bytes().await.expect("body").is_empty());
    assert_eq!(app.size().await, 3);
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let app = TestApp::seeded().await;

    let response = app
        .client
        .delete(app.url("/999"))
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.size().await, 4);
}
