// Benchmarks for locator normalization
//
// Every element lookup normalizes its locator and joins it with its parents,
// so these run once per driver call:
// - normalization per strategy
// - CSS to XPath translation
// - joining nested locators

use criterion::{Criterion, criterion_group, criterion_main};
use sda::{Locator, LocatorSet, join, join_values, locator::css};
use serde_json::json;
use std::hint::black_box;

fn benchmark_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    let cases = [
        ("id", Locator::id("username")),
        ("name", Locator::name("email")),
        ("class_name", Locator::class_name("btn-primary")),
        ("tag_name", Locator::tag_name("table")),
        ("link_text", Locator::link_text("Sign out")),
        ("xpath", Locator::xpath(r#"//form[@data-qa-id="login"]"#)),
    ];

    for (name, locator) in cases {
        group.bench_function(name, |b| {
            b.iter(|| black_box(locator.normalize()));
        });
    }

    group.finish();
}

fn benchmark_css_translation(c: &mut Criterion) {
    let mut group = c.benchmark_group("css_translation");

    for (name, selector) in [
        ("simple", "button.save"),
        ("attribute", r#"form[data-qa-id="login"] input[type="text"]"#),
        ("combinators", "nav > ul li + li ~ li a:first-child"),
        ("group", "h1, h2.title, p:first-child"),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(css::to_xpath(black_box(selector))));
        });
    }

    group.finish();
}

fn benchmark_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("join");

    // Depth of a typical page object: page > table > tbody > row cell
    let chain = vec![
        Locator::id("orders"),
        Locator::tag_name("tbody"),
        Locator::css("tr.selected"),
        Locator::xpath(r#"//*[contains(@data-qa-id, "total")]"#),
    ];

    group.bench_function("four_levels", |b| {
        b.iter(|| black_box(join(&chain)));
    });

    let values = vec![
        json!(["id", "orders"]),
        json!(["tag name", "tbody"]),
        json!(["css selector", "tr.selected"]),
    ];
    group.bench_function("from_json_pairs", |b| {
        b.iter(|| black_box(join_values(&values)));
    });

    group.finish();
}

fn benchmark_locator_set(c: &mut Criterion) {
    let document = json!({
        "USER_NAME": ["id", "username"],
        "PASSWORD": ["id", "password"],
        "REMEMBER": ["name", "remember"],
        "SUBMIT": ["css selector", "form button[type=submit]"],
        "BROKEN": ["id"],
    })
    .to_string();

    c.bench_function("locator_set_from_json", |b| {
        b.iter(|| black_box(LocatorSet::from_json(black_box(&document))));
    });
}

criterion_group!(
    benches,
    benchmark_normalize,
    benchmark_css_translation,
    benchmark_join,
    benchmark_locator_set
);
criterion_main!(benches);
