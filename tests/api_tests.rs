//! Black-box tests over real HTTP: the production router served on an
//! ephemeral port, driven with reqwest and real HS256 tokens.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::json;

use product_api::{app, state::AppState};

const JWT_SECRET: &str = "black-box-test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = app::build_app(AppState::with_secret(JWT_SECRET));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    roles: Option<Vec<String>>,
}

fn mint_jwt(roles: &[&str], exp_offset: Duration) -> String {
    let claims = TestClaims {
        sub: "test-user".to_string(),
        exp: (Utc::now() + exp_offset).timestamp(),
        roles: if roles.is_empty() {
            None
        } else {
            Some(roles.iter().map(|r| r.to_string()).collect())
        },
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn admin_token() -> String {
    mint_jwt(&["ADMIN"], Duration::minutes(10))
}

async fn create_product(
    client: &reqwest::Client,
    srv: &TestServer,
    name: &str,
) -> serde_json::Value {
    let res = client
        .post(srv.url("/products"))
        .bearer_auth(admin_token())
        .json(&json!({"name": name, "price": 9.90, "unit": "kg"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(srv.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

// Scenario A: listing is public, no credentials needed.
#[tokio::test]
async fn listing_products_requires_no_credentials() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/products")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.is_array());
}

// Scenario B: mutation without credentials is a uniform 403.
#[tokio::test]
async fn creating_without_credentials_is_forbidden() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/products"))
        .json(&json!({"name": "rice", "price": 9.90, "unit": "kg"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

// Scenario C: an ADMIN token creates, with a Location pointing at the new id.
#[tokio::test]
async fn admin_can_create_and_location_points_at_the_product() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/products"))
        .bearer_auth(admin_token())
        .json(&json!({"name": "rice", "price": 9.90, "unit": "kg"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res
        .headers()
        .get("location")
        .expect("created response carries a Location header")
        .to_str()
        .unwrap()
        .to_string();

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(location, format!("/products/{}", body["id"].as_str().unwrap()));
    assert_eq!(body["name"], "rice");

    // The Location must resolve (publicly, since reads are open)
    let res = reqwest::get(srv.url(&location)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

// Scenario D: a valid ADMIN update of an unknown id is 404, not 403.
#[tokio::test]
async fn updating_an_unknown_id_is_not_found_even_for_admin() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .put(srv.url(&format!("/products/{}", uuid::Uuid::new_v4())))
        .bearer_auth(admin_token())
        .json(&json!({"name": "rice", "price": 9.90, "unit": "kg"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

// Scenario E: valid token without ADMIN cannot delete, and nothing is deleted.
#[tokio::test]
async fn non_admin_delete_is_forbidden_and_leaves_the_product() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_product(&client, &srv, "rice").await;
    let id = created["id"].as_str().unwrap();

    let res = client
        .delete(srv.url(&format!("/products/{}", id)))
        .bearer_auth(mint_jwt(&["AUDIT"], Duration::minutes(10)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Still there
    let res = reqwest::get(srv.url(&format!("/products/{}", id))).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn admin_can_update_and_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_product(&client, &srv, "rice").await;
    let id = created["id"].as_str().unwrap();

    let res = client
        .put(srv.url(&format!("/products/{}", id)))
        .bearer_auth(admin_token())
        .json(&json!({"name": "brown rice", "price": 12.50, "unit": "kg"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["name"], "brown rice");
    assert_eq!(body["id"].as_str().unwrap(), id);

    let res = client
        .delete(srv.url(&format!("/products/{}", id)))
        .bearer_auth(admin_token())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = reqwest::get(srv.url(&format!("/products/{}", id))).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn a_garbage_token_still_reaches_public_routes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/products"))
        .bearer_auth("definitely.not.a-jwt")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn an_expired_admin_token_cannot_mutate() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/products"))
        .bearer_auth(mint_jwt(&["ADMIN"], Duration::minutes(-10)))
        .json(&json!({"name": "rice", "price": 9.90, "unit": "kg"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn a_tampered_signature_cannot_mutate() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let token = admin_token();
    let (prefix, sig) = token.rsplit_once('.').unwrap();
    let mut sig_bytes = URL_SAFE_NO_PAD.decode(sig).unwrap();
    sig_bytes[0] ^= 0x01;
    let tampered = format!("{}.{}", prefix, URL_SAFE_NO_PAD.encode(&sig_bytes));

    let res = client
        .post(srv.url("/products"))
        .bearer_auth(tampered)
        .json(&json!({"name": "rice", "price": 9.90, "unit": "kg"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn a_lowercase_bearer_prefix_counts_as_no_credentials() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/products"))
        .header("Authorization", format!("bearer {}", admin_token()))
        .json(&json!({"name": "rice", "price": 9.90, "unit": "kg"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn an_invalid_body_from_an_admin_is_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/products"))
        .bearer_auth(admin_token())
        .json(&json!({"name": "", "price": -1.0, "unit": "kg"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
