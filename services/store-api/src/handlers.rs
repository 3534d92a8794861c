//! HTTP handlers for the storefront.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};

use crate::catalog::Catalog;

/// Number of albums featured on the home page.
const FEATURED_ALBUMS: usize = 6;

pub async fn home_handler(Extension(catalog): Extension<Arc<Catalog>>) -> impl IntoResponse {
    let mut body = String::from(
        "<!DOCTYPE html>\n<html>\n<head><title>Home Page - Music Store</title></head>\n<body>\n<h1>Fresh off the grill</h1>\n<ul>\n",
    );
    for album in catalog.top_selling(FEATURED_ALBUMS) {
        body.push_str(&format!(
            "<li><a href=\"/api/albums#{}\">{}</a> by {} (${}.{:02})</li>\n",
            album.id,
            album.title,
            album.artist,
            album.price_cents / 100,
            album.price_cents % 100
        ));
    }
    body.push_str("</ul>\n</body>\n</html>\n");
    Html(body)
}

pub async fn albums_handler(Extension(catalog): Extension<Arc<Catalog>>) -> impl IntoResponse {
    Json(catalog.albums().to_vec())
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
