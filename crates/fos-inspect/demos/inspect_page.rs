//! Scripted inspection session over a small page
//!
//! Run with `cargo run -p fos-inspect --example inspect_page`. Set
//! `FOS_INSPECT_CONFIG` to a JSON config (for example
//! `{"useNthChild": true}`) and `RUST_LOG=debug` to see session events.

use anyhow::{Context, Result};
use fos_inspect::{CollectSink, InspectorConfig, Page, ESCAPE_KEY};
use tracing_subscriber::EnvFilter;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Inspector demo</title></head>
<body class="home">
  <nav id="top"><a href="/">Home</a><a href="/docs">Docs</a></nav>
  <main>
    <ul class="menu">
      <li class="item">One</li>
      <li class="item">Two</li>
      <li class="item active">Three</li>
    </ul>
    <p>First</p>
    <p>Second</p>
  </main>
</body>
</html>"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("FOS_INSPECT_CONFIG") {
        Ok(json) => InspectorConfig::from_json(&json).context("FOS_INSPECT_CONFIG")?,
        Err(_) => InspectorConfig::default(),
    };
    tracing::info!("Config: {:?}", config);

    let document = fos_html::parse(PAGE);
    let targets = ["nav#top a", "li.active", "main p"]
        .into_iter()
        .map(|selector| {
            let nodes = fos_css::query_selector_all(&document, selector)?;
            nodes
                .last()
                .copied()
                .with_context(|| format!("no element matches {selector}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut page = Page::with_sink(document, config, CollectSink::new());
    page.start();

    for &target in &targets {
        page.hover(target);
        let outcome = page.click(target);
        page.leave(target);
        tracing::debug!("Dispatch outcome: {:?}", outcome);
    }

    page.press_key(ESCAPE_KEY);
    // Session is over; this click is ignored
    page.click(targets[0]);

    for selector in page.sink().selectors() {
        println!("{selector}");
    }
    Ok(())
}
