//! Server-rendered page, sample buttons and spiral routes.

mod common;

use std::sync::Arc;

use common::{client, TestServer};
use fibex::adapters::InMemoryStore;
use fibex::config::ServerConfig;
use fibex::models::{Car, Folder};
use fibex::spiral::{PerspectiveCamera, Scene, SpiralInput, Viewport};
use fibex::ui::{EMPTY_CARS, EMPTY_FOLDERS};

async fn folders(server: &TestServer) -> Vec<Folder> {
    client()
        .get(server.url("/api/folders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

/// Pixel position of the first node in a spiral `width` pixels wide.
fn first_node_pixel(inputs: &[SpiralInput], width: f64) -> (f64, f64) {
    let scene = Scene::build(inputs);
    let viewport = Viewport::with_width(width);
    let camera = PerspectiveCamera::new(viewport.aspect());
    let projection = camera.project(scene.nodes()[0].position).unwrap();
    viewport.from_ndc(projection.ndc_x, projection.ndc_y)
}

#[tokio::test]
async fn test_page_renders_empty_catalog() {
    let (server, _) = TestServer::start().await;

    let response = client().get(server.url("/")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let html = response.text().await.unwrap();
    assert!(html.starts_with("<!doctype html>"));
    assert!(html.contains("<title>Fibonacci Car Explorer</title>"));
    assert!(html.contains(EMPTY_FOLDERS));
    assert!(html.contains(EMPTY_CARS));
    assert!(!html.contains("(Loading...)"));
}

#[tokio::test]
async fn test_any_non_api_path_renders_the_page() {
    let (server, _) = TestServer::start().await;
    let response = client().get(server.url("/some/deep/link")).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("Car Collection"));
}

#[tokio::test]
async fn test_failed_folders_do_not_hide_cars() {
    let (server, store) = TestServer::start().await;
    client()
        .post(server.url("/samples/car"))
        .send()
        .await
        .unwrap();

    // Folders are requested first when the page loads.
    store.fail_next(1);
    let html = client()
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("Failed to load folders"));
    assert!(html.contains("car-card"));
}

#[tokio::test]
async fn test_sample_folder_button() {
    let (server, _) = TestServer::start().await;

    for _ in 0..2 {
        let response = client()
            .post(server.url("/samples/folder"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 303);
        assert_eq!(response.headers()["location"], "/");
    }

    let folders = folders(&server).await;
    let names: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Folder 1", "Folder 2"]);
    assert_eq!(folders[1].url.as_deref(), Some("https://example.com/folder-2"));
    assert!(!folders[1].is_private);
}

#[tokio::test]
async fn test_sample_car_button() {
    let (server, _) = TestServer::start().await;
    let response = client()
        .post(server.url("/samples/car"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);

    let cars: Vec<Car> = client()
        .get(server.url("/api/cars"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0].year, 2023);
    assert_eq!(cars[0].features.len(), 3);
}

#[tokio::test]
async fn test_page_links_spiral_image() {
    let (server, _) = TestServer::start().await;
    client()
        .post(server.url("/samples/folder"))
        .send()
        .await
        .unwrap();

    let html = client()
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"action="/spiral/open""#));
    assert!(html.contains(r#"src="/spiral.svg?width="#));

    let svg = client()
        .get(server.url("/spiral.svg?width=640"))
        .send()
        .await
        .unwrap();
    assert_eq!(svg.headers()["content-type"], "image/svg+xml");
    let body = svg.text().await.unwrap();
    assert!(body.contains(r#"width="640" height="600""#));
    assert_eq!(body.matches("<circle").count(), 1);
}

#[tokio::test]
async fn test_page_width_sizes_the_clickable_spiral() {
    let (server, _) = TestServer::start().await;
    client()
        .post(server.url("/samples/folder"))
        .send()
        .await
        .unwrap();

    let html = client()
        .get(server.url("/?width=640"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(r#"<input type="hidden" name="width" value="640">"#));
    assert!(html.contains(r#"src="/spiral.svg?width=640" width="640" height="600""#));

    // Clicks come back in the coordinates of the 640px image.
    let listed = folders(&server).await;
    let inputs: Vec<SpiralInput> = listed.iter().map(SpiralInput::from).collect();
    let (x, y) = first_node_pixel(&inputs, 640.0);
    let response = client()
        .get(server.url(&format!("/spiral/open?x={}&y={}&width=640", x, y)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);

    let fallback = client()
        .get(server.url("/?width=wide"))
        .send()
        .await
        .unwrap();
    assert_eq!(fallback.status(), 200);
    assert!(fallback
        .text()
        .await
        .unwrap()
        .contains(r#"src="/spiral.svg?width=1136""#));
}

#[tokio::test]
async fn test_spiral_click_opens_folder_and_counts_a_view() {
    let (server, _) = TestServer::start().await;
    for _ in 0..3 {
        client()
            .post(server.url("/samples/folder"))
            .send()
            .await
            .unwrap();
    }

    let listed = folders(&server).await;
    let inputs: Vec<SpiralInput> = listed.iter().map(SpiralInput::from).collect();
    let (x, y) = first_node_pixel(&inputs, 800.0);

    let response = client()
        .get(server.url(&format!("/spiral/open?x={}&y={}&width=800", x, y)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "https://example.com/folder-1");

    let after = folders(&server).await;
    assert_eq!(after[0].views, 1);
    assert_eq!(after[1].views, 0);
}

#[tokio::test]
async fn test_spiral_click_on_unredirectable_link_is_204_without_a_view() {
    let (server, _) = TestServer::start().await;
    let created = client()
        .post(server.url("/api/folders"))
        .json(&serde_json::json!({"name": "Bad", "url": "https://example.com/a\nb"}))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), 201);

    let listed = folders(&server).await;
    let inputs: Vec<SpiralInput> = listed.iter().map(SpiralInput::from).collect();
    let (x, y) = first_node_pixel(&inputs, 800.0);

    let response = client()
        .get(server.url(&format!("/spiral/open?x={}&y={}&width=800", x, y)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
    assert!(response.headers().get("location").is_none());

    // The server keeps answering and nothing was counted.
    assert_eq!(folders(&server).await[0].views, 0);
}

#[tokio::test]
async fn test_spiral_click_on_empty_space_is_204() {
    let (server, _) = TestServer::start().await;
    client()
        .post(server.url("/samples/folder"))
        .send()
        .await
        .unwrap();

    let response = client()
        .get(server.url("/spiral/open?x=2&y=2&width=800"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 204);
    assert_eq!(folders(&server).await[0].views, 0);
}

#[tokio::test]
async fn test_base_path_prefixes_every_route() {
    let store = InMemoryStore::new();
    let config = ServerConfig::new().with_base("/app/");
    let server = TestServer::start_with(Arc::new(store), config).await;

    let page = client().get(server.url("/app/")).send().await.unwrap();
    assert_eq!(page.status(), 200);
    let html = page.text().await.unwrap();
    assert!(html.contains(r#"action="/app/samples/folder""#));

    let redirect = client()
        .post(server.url("/app/samples/folder"))
        .send()
        .await
        .unwrap();
    assert_eq!(redirect.status(), 303);
    assert_eq!(redirect.headers()["location"], "/app/");

    let api = client()
        .get(server.url("/app/api/folders"))
        .send()
        .await
        .unwrap();
    assert_eq!(api.status(), 200);
}
