// Test Server - Local HTTP server for WebDriver integration tests
//
// Serves small pages whose nodes carry `data-qa-id` attributes, so the
// browser-backed tests run offline and deterministically.

// Note: Functions appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Response, StatusCode},
    routing::get,
};
use std::net::SocketAddr;
use tokio::task::JoinHandle;

/// Test server handle
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start the test server on a random available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/", get(index_page))
            .route("/login.html", get(login_page))
            .route("/users.html", get(users_page))
            .route("/select.html", get(select_page));

        // Bind to port 0 to get any available port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");

        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server failed");
        });

        TestServer { addr, handle }
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shutdown the test server
    pub fn shutdown(self) {
        self.handle.abort();
    }
}

fn html(body: &'static str) -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html")
        .body(Body::from(body))
        .unwrap()
}

// Test HTML pages

async fn index_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Test Index</title></head>
<body>
  <nav data-qa-id="main-nav">
    <a data-qa-id="main-nav-home" class="active" href="/">Home</a>
    <a data-qa-id="main-nav-login" href="/login.html">Login</a>
    <a data-qa-id="main-nav-users" href="/users.html">Users</a>
  </nav>
</body>
</html>"#,
    )
}

async fn login_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Login</title></head>
<body>
  <form data-qa-id="login" onsubmit="event.preventDefault(); document.getElementById('status').textContent = 'Welcome ' + this.username.value;">
    <input type="text" name="username" data-qa-id="login-username">
    <input type="password" name="password" data-qa-id="login-password">
    <input type="checkbox" id="remember" data-qa-id="login-remember">
    <label for="remember">Remember me</label>
    <button type="submit" data-qa-id="login-submit">Sign in</button>
    <button type="button" data-qa-id="login-cancel" onclick="this.form.reset()">Cancel</button>
  </form>
  <p id="status" data-qa-id="status"></p>
</body>
</html>"#,
    )
}

async fn users_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Users</title></head>
<body>
  <ul data-qa-id="users">
    <li><span data-qa-id="users-name[0]">Jane</span> <button data-qa-id="users-edit[0]" onclick="document.getElementById('editing').textContent='Jane'">Edit</button></li>
    <li><span data-qa-id="users-name[1]">John</span> <button data-qa-id="users-edit[1]" onclick="document.getElementById('editing').textContent='John'">Edit</button></li>
  </ul>
  <p id="editing"></p>
</body>
</html>"#,
    )
}

async fn select_page() -> Response<Body> {
    html(
        r#"<!DOCTYPE html>
<html>
<head><title>Select</title></head>
<body>
  <select name="country" data-qa-id="country">
    <option value="us" selected>United States</option>
    <option value="ca">Canada</option>
    <option value="mx">Mexico</option>
  </select>
  <select name="tags" data-qa-id="tags" multiple>
    <option value="red" selected>Red</option>
    <option value="green">Green</option>
  </select>
</body>
</html>"#,
    )
}
