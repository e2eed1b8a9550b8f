// Integration tests for lists, tables, dropdown menus, search and navigation
//
// Tests cover:
// - row grouping from `<kind>[<index>]` identifiers
// - clicking inside rows by position and by text
// - table headers, sort detection and the sort click cycle
// - select-all checkbox
// - dropdown menu items, search clear and results collapse
// - tab navigation


use fake_driver::{FakeDriver, Node, State};
use sda::{
    Error, Expandable, Input, List, Locator, Page, Settings, SortOrder, Table, Text, TextBearing,
};
use std::sync::Arc;

fn page(driver: &Arc<FakeDriver>) -> Page {
    Page::new(driver.clone(), Arc::new(Settings::default()))
}

fn users(driver: &Arc<FakeDriver>) -> List {
    let list = page(driver).list(Locator::id("users"));
    driver.add("users", Node::new("ul"));
    driver.add("n0", Node::new("span").qa("users-name[0]").text("Jane"));
    driver.add("e0", Node::new("button").qa("users-edit[0]").text("Edit"));
    driver.add("n1", Node::new("span").qa("users-name[1]").text(" John "));
    driver.add("e1", Node::new("button").qa("users-edit[1]").text("Edit"));
    driver.add("n3", Node::new("span").qa("users-name[3]").text("Ann"));
    driver.add("caption", Node::new("h2").qa("users-title"));
    driver.on(list.expression(), &["users"]);
    driver.on(
        list.items().expression(),
        &["n0", "e0", "caption", "n1", "e1", "n3"],
    );
    list
}

#[tokio::test]
async fn test_list_rows_group_by_index() {
    let driver = FakeDriver::new();
    let list = users(&driver);

    let rows = list.rows().await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["edit", "name"]);
    assert_eq!(rows[2].keys().collect::<Vec<_>>(), vec!["name"]);

    let last = Text::from(rows[2]["name"].clone());
    assert_eq!(last.text().await.unwrap(), "Ann");

    assert_eq!(list.len().await.unwrap(), 3);
    assert!(!list.is_empty().await.unwrap());
    assert!(list.row(5).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_click_in_row() {
    let driver = FakeDriver::new();
    let list = users(&driver);

    assert!(list.click_in_row(0, "edit").await.unwrap());
    assert!(!list.click_in_row(0, "delete").await.unwrap());
    assert!(!list.click_in_row(9, "edit").await.unwrap());
    assert_eq!(driver.clicks(), vec!["e0"]);
}

#[tokio::test]
async fn test_list_click_where_matches_text() {
    let driver = FakeDriver::new();
    let list = users(&driver);

    assert!(list.click_where("  JOHN ", "edit").await.unwrap());
    assert!(!list.click_where("Ann", "edit").await.unwrap());
    assert!(!list.click_where("nobody", "edit").await.unwrap());
    assert_eq!(driver.clicks(), vec!["e1"]);
}

#[tokio::test]
async fn test_empty_list() {
    let driver = FakeDriver::new();
    let list = page(&driver).list(Locator::id("nothing"));

    assert!(list.is_empty().await.unwrap());
    assert!(!list.click_where("x", "edit").await.unwrap());
}

/// Orders table: `total` cycles none -> asc -> desc -> none when its button
/// is clicked; `name` has no sort control at all.
fn orders(driver: &Arc<FakeDriver>) -> Table {
    let table = page(driver).table(Locator::id("orders"));
    let root = table.expression();

    driver.add("orders", Node::new("table"));
    driver.add("th-name", Node::new("th").qa("orders-name").text("Name"));
    driver.add("th-total", Node::new("th").qa("orders-total").text(" Total "));
    driver.add("total-btn", Node::new("button"));
    driver.add("total-asc", Node::new("i").qa("orders-total-asc").hidden());
    driver.add("total-desc", Node::new("i").qa("orders-total-desc").hidden());

    driver.on(root.clone(), &["orders"]);
    driver.on(format!("{root}//th[@data-qa-id]"), &["th-name", "th-total"]);
    driver.on(
        format!(r#"{root}//th[contains(@data-qa-id, "total")]"#),
        &["th-total"],
    );
    driver.on(
        format!(r#"{root}//th[contains(@data-qa-id, "name")]"#),
        &["th-name"],
    );
    driver.on_matching(|xpath| xpath.contains("//th//*["), &["total-asc", "total-desc"]);
    driver.on_matching(|xpath| xpath.contains("//th[@data-qa-id and .//*["), &["th-total"]);
    driver.on_relative("total-asc", "./ancestor::th", &["th-total"]);
    driver.on_relative("total-desc", "./ancestor::th", &["th-total"]);
    driver.on_relative(
        "th-total",
        ".//*[self::button or self::a or self::input or @ng-click]",
        &["total-btn"],
    );
    driver.on_click("total-btn", cycle_total);

    table
}

fn cycle_total(state: &mut State) {
    let shown = |state: &State, id: &str| state.nodes.get(id).is_some_and(|node| node.displayed);
    let (asc, desc) = match (shown(state, "total-asc"), shown(state, "total-desc")) {
        (false, false) => (true, false),
        (true, _) => (false, true),
        _ => (false, false),
    };
    for (id, displayed) in [("total-asc", asc), ("total-desc", desc)] {
        if let Some(node) = state.nodes.get_mut(id) {
            node.displayed = displayed;
        }
    }
}

#[tokio::test]
async fn test_table_headers_and_sortable_columns() {
    let driver = FakeDriver::new();
    let table = orders(&driver);

    assert_eq!(table.headers().await.unwrap(), vec!["Name", "Total"]);
    assert_eq!(table.sorts().await.unwrap(), vec!["orders-total"]);
    assert!(table.sort().await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_sort_clicks_through_the_cycle() {
    let driver = FakeDriver::new();
    let table = orders(&driver);

    assert!(table.set_sort("total", SortOrder::Descending).await.unwrap());
    assert_eq!(driver.clicks(), vec!["total-btn", "total-btn"]);

    let state = table.sort().await.unwrap().expect("table is sorted");
    assert_eq!(state.column, "orders-total");
    assert_eq!(state.order, SortOrder::Descending);

    // already there: no further clicks
    assert!(table.set_sort("total", SortOrder::Descending).await.unwrap());
    assert_eq!(driver.clicks().len(), 2);

    assert!(table.set_sort("total", SortOrder::Ascending).await.unwrap());
    assert_eq!(driver.clicks().len(), 4);
}

#[tokio::test]
async fn test_set_sort_gives_up_after_one_cycle() {
    let driver = FakeDriver::new();
    let table = orders(&driver);

    assert!(!table.set_sort("name", SortOrder::Ascending).await.unwrap());
    assert_eq!(driver.clicks(), vec!["th-name", "th-name", "th-name"]);
}

#[tokio::test]
async fn test_set_sort_rejects_bad_requests() {
    let driver = FakeDriver::new();
    let table = orders(&driver);

    let err = table.set_sort("total", SortOrder::None).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let err = table
        .set_sort("discount", SortOrder::Ascending)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ElementNotFound(_)));
    assert!(driver.clicks().is_empty());
}

#[tokio::test]
async fn test_table_rows_come_from_tbody() {
    let driver = FakeDriver::new();
    let table = orders(&driver);
    driver.add("c0", Node::new("td").qa("orders-total[0]").text("12.50"));
    driver.add("c1", Node::new("td").qa("orders-total[1]").text("3.00"));
    driver.on(table.body().items().expression(), &["c0", "c1"]);

    assert_eq!(
        table.body().items().expression(),
        r#"/descendant-or-self::*[@id="orders"]//tbody//*[@data-qa-id]"#
    );
    assert_eq!(table.len().await.unwrap(), 2);
    let second = table.row(1).await.unwrap().expect("two rows");
    assert_eq!(Text::from(second["total"].clone()).text().await.unwrap(), "3.00");
}

#[tokio::test]
async fn test_select_all() {
    let driver = FakeDriver::new();
    let table = orders(&driver);
    driver.add("all", Node::new("input").attr("type", "checkbox").toggles());
    driver.on(
        format!(
            r#"{}//th[contains(@data-qa-id, "select-all")]//input"#,
            table.expression()
        ),
        &["all"],
    );

    assert!(table.select_all().await.unwrap());
    assert!(driver.node("all").selected);

    let missing = page(&driver).table(Locator::id("invoices"));
    let err = missing.select_all().await.unwrap_err();
    assert!(matches!(err, Error::ElementNotFound(_)));
}

#[tokio::test]
async fn test_dropdown_menu_select() {
    let driver = FakeDriver::new();
    let menu = page(&driver).dropdown_menu(Locator::id("actions"));

    driver.add("trigger", Node::new("button"));
    driver.add("menu", Node::new("ul").hidden());
    driver.add("archive", Node::new("li").qa("actions-archive"));
    driver.on(menu.expression(), &["trigger"]);
    driver.on(menu.container().expression(), &["menu"]);
    driver.on(
        format!(
            r#"{}//*[contains(@data-qa-id, "archive")]"#,
            menu.container().expression()
        ),
        &["archive"],
    );
    driver.on_click("trigger", |state| {
        if let Some(menu) = state.nodes.get_mut("menu") {
            menu.displayed = true;
        }
    });

    assert!(menu.select("archive").await.unwrap());
    assert_eq!(driver.clicks(), vec!["trigger", "archive"]);

    let err = menu.select("delete").await.unwrap_err();
    assert!(matches!(err, Error::ElementNotFound(_)));
}

#[tokio::test]
async fn test_dropdown_menu_without_container() {
    let driver = FakeDriver::new();
    let menu = page(&driver).dropdown_menu(Locator::id("actions"));
    driver.add("trigger", Node::new("button"));
    driver.on(menu.expression(), &["trigger"]);

    assert!(!menu.select("archive").await.unwrap());
    assert!(driver.clicks().is_empty());
}

#[tokio::test]
async fn test_search_and_clear() {
    let driver = FakeDriver::new();
    let search = page(&driver).search(Locator::id("q"));
    driver.add("q", Node::new("input").prop("value", "old"));
    driver.add("q-clear", Node::new("button").qa("search-clear"));
    driver.on(search.expression(), &["q"]);
    driver.on(search.clear_button().expression(), &["q-clear"]);
    driver.on_click("q-clear", |state| {
        if let Some(input) = state.nodes.get_mut("q") {
            input.properties.insert("value".to_string(), String::new());
        }
    });

    assert_eq!(
        search.clear_button().expression(),
        r#"/descendant-or-self::*[@id="q"]/following-sibling::*[contains(@data-qa-id, "clear")]"#
    );

    assert!(search.search("rust").await.unwrap());
    assert_eq!(search.value().await.unwrap(), "rust");

    assert!(search.clear().await.unwrap());
    assert_eq!(search.value().await.unwrap(), "");
}

#[tokio::test]
async fn test_search_box_results() {
    let driver = FakeDriver::new();
    let search = page(&driver).search_box(Locator::id("q"));
    driver.add("q", Node::new("input"));
    driver.add("results", Node::new("ul").hidden());
    driver.on(search.expression(), &["q"]);
    driver.on(search.container().expression(), &["results"]);
    driver.on_click("q", |state| {
        if let Some(results) = state.nodes.get_mut("results") {
            results.displayed = true;
        }
    });

    search.expand().await.unwrap();
    assert_eq!(driver.clicks(), vec!["q"]);

    search.collapse().await.unwrap();
    assert_eq!(
        driver.scripts(),
        vec![(Some("q".to_string()), "arguments[0].blur();".to_string())]
    );
    assert_eq!(driver.clicks().len(), 1);
}

#[tokio::test]
async fn test_tab_navigation() {
    let driver = FakeDriver::new();
    let nav = page(&driver).tab_navigation(Locator::id("main-nav"));
    let root = nav.expression();

    driver.add("main-nav", Node::new("nav"));
    driver.add("home", Node::new("a").qa("main-nav-home").attr("class", "tab active"));
    driver.add("reports", Node::new("a").qa("main-nav-reports").attr("class", "tab"));
    driver.on(root.clone(), &["main-nav"]);
    driver.on(format!(r#"{root}//*[contains(@data-qa-id, "home")]"#), &["home"]);
    driver.on(format!(r#"{root}//*[contains(@data-qa-id, "reports")]"#), &["reports"]);
    driver.on_matching(|xpath| xpath.contains("' active '"), &["home"]);

    assert!(nav.select("home").await.unwrap());
    assert!(driver.clicks().is_empty());

    assert!(nav.select("reports").await.unwrap());
    assert_eq!(driver.clicks(), vec!["reports"]);

    assert_eq!(nav.selected().await.unwrap(), vec!["main-nav-home"]);

    let err = nav.select("admin").await.unwrap_err();
    assert!(matches!(err, Error::ElementNotFound(ref msg) if msg.contains("'admin'")));

    let missing = page(&driver).tab_navigation(Locator::id("side-nav"));
    assert!(matches!(
        missing.select("home").await.unwrap_err(),
        Error::ElementNotFound(_)
    ));
}
