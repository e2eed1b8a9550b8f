// Browser-backed integration tests
//
// These need a running WebDriver endpoint (geckodriver or chromedriver) at
// `WEBDRIVER_URL`, so they are ignored by default:
//
//     geckodriver --port 4444 &
//     cargo test -p sda-rs --test webdriver_test -- --ignored

#![cfg(feature = "webdriver")]

mod test_server;

use sda::{
    Clickable, Locator, Page, SelectField, Selective, Settings, Site, TextBearing,
    WebDriverSession, expect,
};
use std::sync::Arc;
use test_server::TestServer;

async fn session() -> (Arc<WebDriverSession>, Page, Site) {
    let settings = Settings::from_env().expect("settings from environment");
    let session = Arc::new(
        WebDriverSession::connect(&settings)
            .await
            .expect("WebDriver endpoint reachable"),
    );
    let page = Page::new(session.clone(), Arc::new(settings));
    let site = Site::new(session.clone());
    (session, page, site)
}

#[tokio::test]
#[ignore = "requires a WebDriver endpoint"]
async fn test_login_form_round_trip() {
    let server = TestServer::start().await;
    let (session, page, site) = session().await;

    site.goto(&format!("{}/login.html", server.url()))
        .await
        .unwrap();
    let page = page.with_validation(r"/login\.html$").unwrap();
    assert!(page.in_view().await.unwrap());
    assert_eq!(page.title().await.unwrap(), "Login");
    assert_eq!(site.base_url().await.unwrap(), "127.0.0.1");

    let login = page.form(Locator::xpath(r#"//form[@data-qa-id="login"]"#));
    login.set("username", "jlane").await.unwrap();
    login.set("password", "secret").await.unwrap();
    login.set("remember", true).await.unwrap();
    assert_eq!(login.get("username").await.unwrap(), "jlane");

    let remember = page.checkbox(Locator::id("remember"));
    assert!(remember.selected().await.unwrap());
    assert_eq!(remember.label().await.unwrap(), "Remember me");

    assert!(login.submit().await.unwrap());
    let status = page.text(Locator::id("status"));
    expect(&status).to_have_text("Welcome jlane").await.unwrap();

    session.close().await.unwrap();
    server.shutdown();
}

#[tokio::test]
#[ignore = "requires a WebDriver endpoint"]
async fn test_list_rows_and_navigation() {
    let server = TestServer::start().await;
    let (session, page, site) = session().await;

    site.goto(&format!("{}/", server.url())).await.unwrap();
    let nav = page.tab_navigation(Locator::xpath(r#"//nav[@data-qa-id="main-nav"]"#));
    assert_eq!(nav.selected().await.unwrap(), vec!["main-nav-home"]);
    assert!(nav.select("users").await.unwrap());

    let users = page.list(Locator::css(r#"ul[data-qa-id="users"]"#));
    expect(&users).to_be_visible().await.unwrap();
    assert_eq!(users.len().await.unwrap(), 2);
    assert!(users.click_where("john", "edit").await.unwrap());
    assert_eq!(
        page.text(Locator::id("editing")).text().await.unwrap(),
        "John"
    );

    session.close().await.unwrap();
    server.shutdown();
}

#[tokio::test]
#[ignore = "requires a WebDriver endpoint"]
async fn test_select_options() {
    let server = TestServer::start().await;
    let (session, page, site) = session().await;

    site.goto(&format!("{}/select.html", server.url()))
        .await
        .unwrap();

    let country = page.select(Locator::name("country"));
    assert_eq!(
        country.options().await.unwrap(),
        vec!["United States", "Canada", "Mexico"]
    );
    assert!(country.choose("Canada").await.unwrap());
    assert_eq!(
        country.selected_first().await.unwrap().as_deref(),
        Some("Canada")
    );
    assert!(!country.deselect_all().await.unwrap());

    let tags = page.select(Locator::name("tags"));
    assert!(tags.is_multiple().await.unwrap());
    assert!(tags.choose("green").await.unwrap());
    assert_eq!(tags.selected_options().await.unwrap(), vec!["Red", "Green"]);

    let missing = page.button(Locator::id("nope"));
    assert!(!missing.click().await.unwrap());

    session.close().await.unwrap();
    server.shutdown();
}
