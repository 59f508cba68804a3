//! In-memory stand-in for the travel backend.
//!
//! It reproduces the backend's inconsistencies on purpose: articles come in
//! a paginated `{success, data: {results}}` envelope with Indonesian keys,
//! packages as a bare array, bookings under a `data` array. One dashboard
//! widget always fails, so partial refreshes can be observed.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

pub const DEMO_EMAIL: &str = "sari@example.com";
pub const DEMO_PASSWORD: &str = "rahasia";

#[derive(Debug, Default)]
pub struct Store {
    articles: Vec<Value>,
    packages: Vec<Value>,
    bookings: Vec<Value>,
    wishlist: Vec<Value>,
    /// Issued tokens and the user each one belongs to.
    sessions: HashMap<String, Value>,
}

impl Store {
    pub fn seeded() -> Self {
        Self {
            articles: vec![
                json!({"id": 1, "judul": "Pesona Bromo", "tanggal": "2025-12-20", "status": "Selesai",
                       "konten": "Matahari terbit di Penanjakan.", "kategori": "Destinasi"}),
                json!({"id": 2, "title": "Draf Raja Ampat", "status": "Draft"}),
            ],
            packages: vec![
                json!({"id": 1, "nama": "Bromo Sunrise", "harga": "1500000", "lokasi": "Jawa Timur",
                       "durasi": "2H1M", "gambar": "/media/bromo.jpg", "is_active": true}),
                json!({"_id": "2", "name": "Ubud Retreat", "price": 2750000, "location": "Bali"}),
            ],
            bookings: vec![json!({"id": 1, "package": {"id": 1, "nama": "Bromo Sunrise"},
                                  "nama_pemesan": "Budi", "jumlah_peserta": "2", "status": "pending",
                                  "tanggal_keberangkatan": "2026-01-10"})],
            wishlist: vec![json!({"id": 1, "paket": {"id": 2, "name": "Ubud Retreat", "harga": 2750000}})],
            sessions: HashMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/articles/", get(list_articles).post(create_article))
        .route("/api/articles/{id}/", get(get_article).delete(delete_article))
        .route("/api/packages/", get(list_packages).post(create_package))
        .route("/api/packages/{id}/", get(get_package))
        .route("/api/bookings/", get(list_bookings).post(create_booking))
        .route("/api/bookings/my/", get(list_bookings))
        .route("/api/wishlist/", get(list_wishlist).post(add_wishlist))
        .route("/api/auth/login/", post(login))
        .route("/api/auth/logout/", post(logout))
        .route("/api/auth/profile/", get(profile))
        .route("/api/dashboard/stats/", get(dashboard_stats))
        .route("/api/dashboard/popular-packages/", get(popular_packages))
        .route("/api/dashboard/recent-buyers/", get(recent_buyers))
        .route("/api/dashboard/booking-status/", get(booking_status))
        .route("/api/dashboard/upcoming-trips/", get(upcoming_trips))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn failure(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

fn next_id(records: &[Value]) -> u64 {
    records.len() as u64 + 1
}

/// The user behind the request's bearer token.
fn caller(store: &Store, headers: &HeaderMap) -> Option<Value> {
    let token = headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    store.sessions.get(token).cloned()
}

fn find<'a>(records: &'a [Value], id: &str) -> Option<&'a Value> {
    records.iter().find(|record| {
        ["id", "_id"]
            .iter()
            .filter_map(|key| record.get(*key))
            .any(|value| match value {
                Value::String(text) => text == id,
                other => other.to_string() == id,
            })
    })
}

// --- articles ---

async fn list_articles(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    Json(json!({
        "success": true,
        "data": {"count": store.articles.len(), "next": null, "results": store.articles},
    }))
}

async fn create_article(State(db): State<Db>, Json(mut input): Json<Value>) -> Response {
    let mut store = db.write().await;
    if input.get("judul").and_then(Value::as_str).map_or(true, str::is_empty) {
        return (StatusCode::BAD_REQUEST, Json(json!({"errors": {"judul": ["Judul wajib diisi"]}}))).into_response();
    }
    input["id"] = json!(next_id(&store.articles));
    store.articles.push(input.clone());
    info!(id = %input["id"], "article created");
    (StatusCode::CREATED, Json(json!({"success": true, "data": input}))).into_response()
}

async fn get_article(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let store = db.read().await;
    match find(&store.articles, &id) {
        Some(article) => Json(json!({"success": true, "data": article})).into_response(),
        None => failure(StatusCode::NOT_FOUND, "Artikel tidak ditemukan"),
    }
}

async fn delete_article(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let mut store = db.write().await;
    let before = store.articles.len();
    store.articles.retain(|article| find(std::slice::from_ref(article), &id).is_none());
    if store.articles.len() == before {
        return failure(StatusCode::NOT_FOUND, "Artikel tidak ditemukan");
    }
    StatusCode::NO_CONTENT.into_response()
}

// --- packages ---

async fn list_packages(State(db): State<Db>) -> Json<Value> {
    Json(Value::Array(db.read().await.packages.clone()))
}

async fn get_package(State(db): State<Db>, Path(id): Path<String>) -> Response {
    let store = db.read().await;
    match find(&store.packages, &id) {
        Some(package) => Json(package.clone()).into_response(),
        None => failure(StatusCode::NOT_FOUND, "Paket tidak ditemukan"),
    }
}

/// Accepts multipart only. The created record lists the part names it got
/// under `received_fields`.
async fn create_package(State(db): State<Db>, mut multipart: Multipart) -> Response {
    let mut record = serde_json::Map::new();
    let mut received = Vec::new();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "rejected package upload");
                return failure(StatusCode::BAD_REQUEST, "Form tidak valid");
            }
        };
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        received.push(json!(name));
        if let Some(file_name) = field.file_name().map(str::to_string) {
            record.insert(name, json!(format!("/media/{file_name}")));
            continue;
        }
        match field.text().await {
            Ok(text) => {
                record.insert(name, json!(text));
            }
            Err(_) => return failure(StatusCode::BAD_REQUEST, "Form tidak valid"),
        }
    }

    let mut store = db.write().await;
    record.insert("id".into(), json!(next_id(&store.packages)));
    record.insert("received_fields".into(), Value::Array(received));
    let record = Value::Object(record);
    store.packages.push(record.clone());
    info!(id = %record["id"], "package created");
    (StatusCode::CREATED, Json(record)).into_response()
}

// --- bookings ---

async fn list_bookings(State(db): State<Db>) -> Json<Value> {
    Json(json!({ "data": db.read().await.bookings }))
}

/// Echoes the request body back as the created booking.
async fn create_booking(State(db): State<Db>, headers: HeaderMap, Json(mut input): Json<Value>) -> Response {
    let mut store = db.write().await;
    if caller(&store, &headers).is_none() {
        return failure(StatusCode::UNAUTHORIZED, "Autentikasi diperlukan");
    }
    if !input.is_object() {
        return failure(StatusCode::BAD_REQUEST, "Data pemesanan tidak valid");
    }
    input["id"] = json!(next_id(&store.bookings));
    input["status"] = json!("pending");
    store.bookings.push(input.clone());
    (StatusCode::CREATED, Json(json!({ "data": input }))).into_response()
}

// --- wishlist ---

async fn list_wishlist(State(db): State<Db>) -> Json<Value> {
    Json(Value::Array(db.read().await.wishlist.clone()))
}

#[derive(Deserialize)]
struct WishlistEntry {
    package_id: String,
}

async fn add_wishlist(State(db): State<Db>, Json(input): Json<WishlistEntry>) -> Response {
    let mut store = db.write().await;
    let Some(package) = find(&store.packages, &input.package_id).cloned() else {
        return failure(StatusCode::NOT_FOUND, "Paket tidak ditemukan");
    };
    let item = json!({"id": next_id(&store.wishlist), "package": package});
    store.wishlist.push(item.clone());
    (StatusCode::CREATED, Json(item)).into_response()
}

// --- auth ---

#[derive(Deserialize)]
struct Login {
    email: String,
    password: String,
}

async fn login(State(db): State<Db>, Json(input): Json<Login>) -> Response {
    if input.email != DEMO_EMAIL || input.password != DEMO_PASSWORD {
        return failure(StatusCode::UNAUTHORIZED, "Email atau password salah");
    }
    let token = Uuid::new_v4().simple().to_string();
    let user = json!({"id": 7, "full_name": "Sari Wulandari", "email": input.email, "role": "admin", "no_hp": "0812"});
    db.write().await.sessions.insert(token.clone(), user.clone());
    info!(email = %input.email, "login");
    Json(json!({"success": true, "data": {"access_token": token, "user": user}})).into_response()
}

async fn logout(State(db): State<Db>, headers: HeaderMap) -> StatusCode {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);
    if let Some(token) = token {
        db.write().await.sessions.remove(&token);
    }
    StatusCode::NO_CONTENT
}

async fn profile(State(db): State<Db>, headers: HeaderMap) -> Response {
    match caller(&*db.read().await, &headers) {
        Some(user) => Json(json!({ "data": user })).into_response(),
        None => failure(StatusCode::UNAUTHORIZED, "Autentikasi diperlukan"),
    }
}

// --- dashboard ---

async fn dashboard_stats(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    Json(json!({"data": {
        "total_bookings": store.bookings.len(),
        "total_revenue": "3000000",
        "total_packages": store.packages.len(),
        "totalUsers": 1,
    }}))
}

async fn popular_packages() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "Statistik paket belum tersedia"})),
    )
        .into_response()
}

async fn recent_buyers() -> Json<Value> {
    Json(json!({"results": [{"id": 3, "nama": "Budi", "total_belanja": 3000000, "booking_count": 1}]}))
}

async fn booking_status(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    let pending = store
        .bookings
        .iter()
        .filter(|booking| booking["status"] == "pending")
        .count();
    Json(json!([{"status": "pending", "count": pending}, {"status": "Selesai", "jumlah": 4}]))
}

async fn upcoming_trips(State(db): State<Db>) -> Json<Value> {
    Json(json!({ "data": db.read().await.bookings }))
}
