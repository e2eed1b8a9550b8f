// Login page example - a page object built from tagged nodes
//
// Shows: settings from the environment, a Page with URL validation, a form
// filled by field name, and polling expectations.
//
// Needs a WebDriver endpoint (e.g. `geckodriver --port 4444`):
//
//     RUST_LOG=sda=debug cargo run -p sda-rs --example login_page -- https://example.com/login

use sda::{
    Clickable, Form, Locator, LocatorSet, Page, Settings, Site, Text, WebDriverSession, expect,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Page object for a login screen
struct LoginPage {
    page: Page,
    form: Form,
    banner: Text,
}

impl LoginPage {
    fn new(page: Page, locators: &LocatorSet) -> sda::Result<Self> {
        let form = page.named(locators, "LOGIN_FORM")?;
        let banner = page.named(locators, "BANNER")?;
        Ok(Self { page, form, banner })
    }

    async fn sign_in(&self, user: &str, password: &str) -> sda::Result<()> {
        self.form.set("username", user).await?;
        self.form.set("password", password).await?;
        self.form.set("remember", true).await?;
        self.form.submit().await?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let target = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://example.com/login".to_string());

    let settings = Settings::from_env()?;
    let session = Arc::new(WebDriverSession::connect(&settings).await?);
    let site = Site::new(session.clone());
    site.goto(&target).await?;

    let locators = LocatorSet::from_json(
        r#"{
            "LOGIN_FORM": ["xpath", "//form[@data-qa-id=\"login\"]"],
            "BANNER": ["css selector", ".banner"],
            "LOGOUT": ["link text", "Sign out"]
        }"#,
    )?;

    let page = Page::new(session.clone(), Arc::new(settings)).with_validation(r"/login")?;
    if !page.in_view().await? {
        println!("{} is not a login page", page.url().await?);
        session.close().await?;
        return Ok(());
    }

    let login = LoginPage::new(page, &locators)?;
    println!("Signing in on {} ({})", site.base_url().await?, login.page.title().await?);
    login.sign_in("jlane", "secret").await?;

    expect(&login.banner).to_contain_text("Welcome").await?;

    let logout: sda::Link = login.page.named(&locators, "LOGOUT")?;
    logout.click().await?;

    session.close().await?;
    Ok(())
}
