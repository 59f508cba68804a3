//! End-to-end run against the live mock backend.
//!
//! # Design
//! Starts the mock server on a random port, then drives the domain API over
//! real HTTP through `UreqExecutor`. Validates that envelopes, aliases,
//! renames, multipart uploads and the session all line up with an actual
//! server.

use pretty_assertions::assert_eq;
use travel_core::entities::{
    ArticleInput, BookingInput, Credentials, DashboardStats, Normalize, PackageInput, PackageStat,
};
use travel_core::{ApiError, Attachment, ClientConfig, Session, TravelApi};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

fn demo_credentials() -> Credentials {
    Credentials {
        email: mock_server::DEMO_EMAIL.to_string(),
        password: mock_server::DEMO_PASSWORD.to_string(),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn travel_backend_lifecycle() {
    let base_url = start_server().await;
    let api = TravelApi::connect(&ClientConfig::new(&base_url, "/api"), Session::new());

    // Paginated envelope with Indonesian keys.
    let articles = api.fetch_articles().await;
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Pesona Bromo");
    assert_eq!(articles[0].display_date, "20 Desember 2025");
    assert_eq!(articles[0].category, "Destinasi");
    assert_eq!(api.fetch_published_articles().await.len(), 1);
    assert_eq!(api.fetch_article("1").await.map(|a| a.id), Some("1".to_string()));
    assert!(api.fetch_article("99").await.is_none());

    // Validation errors surface the first field message.
    let err = api.create_article(&ArticleInput::default(), None).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::ServerRejected {
            status: 400,
            message: "Judul wajib diisi".into()
        }
    );

    // Bare array with mixed spellings.
    let packages = api.fetch_packages().await;
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0].price, 1_500_000.0);
    assert_eq!(packages[1].id, "2");
    assert_eq!(packages[1].location, "Bali");

    // Multipart upload.
    let input = PackageInput {
        name: Some("Komodo".into()),
        price: Some(4_000_000.0),
        ..Default::default()
    };
    let image = Attachment::new("komodo.jpg", "image/jpeg", b"JPG".to_vec());
    let created = api.create_package(&input, Some(image)).await.unwrap();
    assert_eq!(created.name, "Komodo");
    assert_eq!(created.price, 4_000_000.0);
    assert_eq!(created.image, "/media/komodo.jpg");

    // Anonymous writes are rejected with the server's message.
    let booking = BookingInput {
        package_id: Some("abc123".into()),
        participants: Some(2),
        ..Default::default()
    };
    let err = api.create_booking(&booking).await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Autentikasi diperlukan");

    // Sign in; the token rides on every later request.
    let user = api.login(&demo_credentials()).await.unwrap();
    assert_eq!(user.name, "Sari Wulandari");
    assert!(user.is_admin());
    assert!(api.session().is_authenticated());

    let created = api.create_booking(&booking).await.unwrap();
    assert_eq!(created.package_id, "abc123");
    assert_eq!(created.participants, 2);
    assert_eq!(created.status, "pending");

    let bookings = api.fetch_my_bookings().await;
    assert_eq!(bookings.len(), 2);
    assert_eq!(bookings[0].package_name, "Bromo Sunrise");
    assert_eq!(bookings[0].customer_name, "Budi");

    let profile = api.fetch_profile().await.unwrap();
    assert_eq!(profile.phone, "0812");

    // Wishlist rows embed the package.
    let item = api.add_to_wishlist("2").await.unwrap();
    assert_eq!(item.package_name, "Ubud Retreat");
    assert_eq!(item.price, 2_750_000.0);
    assert_eq!(api.fetch_wishlist().await.len(), 2);

    // One widget fails; it keeps its previous value.
    let prior = DashboardStats {
        popular_packages: vec![PackageStat::from_value(&serde_json::json!({"id": 1, "nama": "Bromo Sunrise"}))],
        ..Default::default()
    };
    let stats = api.refresh_dashboard(prior.clone()).await;
    assert_eq!(stats.popular_packages, prior.popular_packages);
    assert_eq!(stats.total_bookings, 2);
    assert_eq!(stats.total_revenue, 3_000_000.0);
    assert_eq!(stats.total_users, 1);
    assert_eq!(stats.status_breakdown.pending, 2);
    assert_eq!(stats.status_breakdown.completed, 4);
    assert_eq!(stats.recent_buyers[0].name, "Budi");
    assert_eq!(stats.upcoming_trips.len(), 2);

    api.logout().await;
    assert!(!api.session().is_authenticated());
    assert!(api.fetch_profile().await.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_is_rejected() {
    let base_url = start_server().await;
    let api = TravelApi::connect(&ClientConfig::new(&base_url, "/api"), Session::new());
    let credentials = Credentials {
        password: "salah".into(),
        ..demo_credentials()
    };
    let err = api.login(&credentials).await.unwrap_err();
    assert_eq!(err.to_string(), "Email atau password salah");
    assert!(!api.session().is_authenticated());
}

#[tokio::test(flavor = "multi_thread")]
async fn closed_port_reads_as_unreachable() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let api = TravelApi::connect(&ClientConfig::new(&format!("http://127.0.0.1:{port}"), "/api"), Session::new());

    assert!(api.fetch_packages().await.is_empty());
    let err = api.login(&demo_credentials()).await.unwrap_err();
    assert_eq!(err, ApiError::Unreachable);
    assert_eq!(err.to_string(), "Tidak dapat terhubung ke server");
}

/// Serves one canned HTTP response on a plain socket and returns its address.
fn canned_server(response: &'static [u8]) -> String {
    use std::io::{Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&chunk[..n]),
            }
        }
        stream.write_all(response).unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test(flavor = "multi_thread")]
async fn error_page_in_unknown_charset_is_still_a_rejection() {
    let base_url = canned_server(
        b"HTTP/1.1 500 Internal Server Error\r\nContent-Length: 17\r\nConnection: close\r\n\r\n<h1>Erreur \xe9</h1>",
    );
    let api = TravelApi::connect(&ClientConfig::new(&base_url, "/api"), Session::new());

    let err = api.delete_article("1").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::ServerRejected {
            status: 500,
            message: "Permintaan gagal (status 500)".into()
        }
    );
}
