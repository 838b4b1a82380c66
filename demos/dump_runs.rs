//! Command-line tool that decodes an RTF file and prints its text and runs.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example dump_runs -- input.rtf
//! RUST_LOG=rtfkit=trace cargo run --example dump_runs -- input.rtf --no-pictures
//! ```

use clap::Parser;
use rtfkit::DecodeOptions;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Decode an RTF document and dump its runs
#[derive(Parser, Debug)]
#[command(name = "dump_runs", version)]
struct Args {
    /// RTF file to decode
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Maximum group nesting depth
    #[arg(long, default_value_t = 1024)]
    max_depth: usize,

    /// Code page used until the document declares one
    #[arg(long, default_value_t = 1252)]
    code_page: u32,

    /// Skip picture payloads
    #[arg(long)]
    no_pictures: bool,

    /// Print the decode options before decoding
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_level(true))
            .with(EnvFilter::from_default_env())
            .init();
    }

    let options = DecodeOptions::new()
        .with_max_depth(args.max_depth)
        .with_default_code_page(args.code_page)
        .with_collect_pictures(!args.no_pictures);
    if args.verbose {
        println!("{options:?}");
    }

    let reader = BufReader::new(File::open(&args.input)?);
    let doc = rtfkit::decode_reader(reader, &options)?;

    println!("Text ({} chars):", doc.char_len());
    println!("{}", doc.text);

    println!("\nFonts:");
    for font in doc.font_table.fonts() {
        println!("  f{} {:?} {:?} charset={}", font.index, font.name, font.family, font.charset);
    }

    println!("\nFont runs:");
    for run in &doc.font_runs {
        let style = &run.style;
        println!(
            "  [{}, {}) f{} {}pt{}{}{} {:?}",
            run.start(),
            run.end(),
            style.font_index,
            style.font_size,
            if style.is_bold { " bold" } else { "" },
            if style.is_italic { " italic" } else { "" },
            if style.is_underline { " underline" } else { "" },
            doc.text_of(run.range),
        );
    }

    println!("\nParagraph runs:");
    for run in &doc.paragraph_runs {
        let style = &run.style;
        println!(
            "  [{}, {}) {:?} li={} ri={} fi={}",
            run.start(),
            run.end(),
            style.justification,
            style.indent_left,
            style.indent_right,
            style.indent_first,
        );
    }

    println!("\nColor runs:");
    for run in &doc.color_runs {
        let color = doc.color_table.get(run.style.color_index);
        println!("  [{}, {}) cf{} {:?}", run.start(), run.end(), run.style.color_index, color);
    }

    if !doc.pictures.is_empty() {
        println!("\nPictures:");
        for picture in &doc.pictures {
            println!(
                "  at {} {:?} {} bytes, {:?}x{:?} twips",
                picture.position,
                picture.image_type,
                picture.data.len(),
                picture.computed_width(),
                picture.computed_height(),
            );
        }
    }

    Ok(())
}
