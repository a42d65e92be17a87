//! Basic Slicing
//!
//! The minimal example: pull a few values out of a response without parsing it.
//!
//! ```bash
//! cargo run --example 01_basic_slicing
//! ```

use tagslice::{tags, Mode, Slicer};

fn main() -> tagslice::Result<()> {
    let response = r#"<?xml version="1.0" encoding="UTF-8"?>
        <response status="ok" count="3">
          <order id="7">
            <item sku="t-1">tea</item>
            <item sku="m-2">milk</item>
            <item sku="h-3"/>
          </order>
        </response>"#;

    let doc = Slicer::cut(response);

    // One attribute, parsed
    let count = doc.get_attribute_i64("response", "count")?.unwrap_or(0);
    println!("status: {}", doc.get_attribute("response", "status").unwrap_or("?"));
    println!("count:  {count}");

    // A nested path; a missing step just yields nothing
    let order = doc.get("response").get_tag("order");
    println!("order:  {}", order.attribute("id").unwrap_or("?"));
    println!("gift:   {:?}", doc.get("response").get("gift").get("note").value());

    // Every item, in document order
    for (i, item) in tags(response, "item", Mode::Markup).enumerate() {
        let markup = item.text.unwrap_or_default();
        let sku = Slicer::cut(markup).attribute("sku").unwrap_or("?");
        let name = Slicer::cut(markup).get("item").value().unwrap_or("(empty)");
        println!("[{i}] {sku} at {}..{}: {name}", item.start, item.end);
    }

    Ok(())
}
