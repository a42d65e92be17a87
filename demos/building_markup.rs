//! Building Markup
//!
//! Writes the same document twice: into a string with pretty-printing, and
//! straight to stdout in ISO-8859-1. Then reads a value back.
//!
//! ```bash
//! cargo run --example building_markup
//! ```

use std::io;

use tagslice::{Builder, BuilderConfig, Output, Slicer, StreamOutput};

const BIRDS: [(&str, &str); 3] = [("pigeon", "city"), ("crow", "field"), ("kingfisher", "river")];

fn write_birds<O: Output>(xml: &mut Builder<O>) -> tagslice::Result<()> {
    xml.declare_xml()?.open_tag("birds")?;
    for (name, habitat) in BIRDS {
        xml.open_tag("bird")?
            .with_attribute("habitat", habitat)?
            .with_attribute_if(name == "kingfisher", "rare", true)?
            .with_value(name)?
            .close_tag()?;
    }
    xml.open_tag("note")?
        .with_cdata("counted <before> noon, café closed")?
        .close_all_tags()?;
    Ok(())
}

fn main() -> tagslice::Result<()> {
    // In memory, indented
    let mut pretty = Builder::with_config(
        BuilderConfig::new().with_pretty(true).with_encoding("UTF-8"),
    );
    write_birds(&mut pretty)?;
    let doc = pretty.render(false)?;
    println!("{doc}\n");

    let habitats: Vec<_> = Slicer::cut(&doc)
        .get_tags("bird")
        .iter()
        .filter_map(|b| b.attribute("habitat"))
        .collect();
    println!("habitats: {habitats:?}\n");

    // Streamed, compact, encoded on the way out
    let out = StreamOutput::new(io::stdout().lock(), "ISO-8859-1")?;
    let mut streamed = Builder::with_output(out, BuilderConfig::new().with_encoding("ISO-8859-1"));
    write_birds(&mut streamed)?;
    let out = streamed.finish()?;
    println!("\n\n{out}");

    Ok(())
}
