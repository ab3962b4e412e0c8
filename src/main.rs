//! # dashprint CLI
//!
//! Usage:
//!   dashprint dashboard.json -o dashboard.png
//!   echo '{ ... }' | dashprint -o dashboard.png
//!   dashprint --example > dashboard.json

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use dashprint::font::{FaceClass, FontContext};
use dashprint::DashError;

#[derive(Parser, Debug)]
#[command(version, about = "Render a JSON dashboard description to PNG")]
struct Args {
    /// Document to render. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Where to write the PNG.
    #[arg(short, long, default_value = "dashboard.png")]
    output: PathBuf,

    /// Regular font file to use for Latin text.
    #[arg(long = "font", value_name = "PATH")]
    fonts: Vec<PathBuf>,

    /// Bold font file to use for Latin text.
    #[arg(long, value_name = "PATH")]
    bold_font: Option<PathBuf>,

    /// Don't look up system fonts.
    #[arg(long, default_value_t = false)]
    no_system_fonts: bool,

    /// Print an example document and exit.
    #[arg(long, default_value_t = false)]
    example: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.example {
        print!("{}", example_dashboard_json());
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), DashError> {
    let input = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let document = dashprint::parse(&input)?;

    let mut fonts = if args.no_system_fonts {
        FontContext::new()
    } else {
        FontContext::with_system_fonts(document.canvas.font_family.as_deref())
    };
    for path in &args.fonts {
        fonts.register(FaceClass::Default, false, &fs::read(path)?)?;
    }
    if let Some(path) = &args.bold_font {
        fonts.register(FaceClass::Default, true, &fs::read(path)?)?;
    }
    dashprint::register_document_fonts(&document, &mut fonts);
    if !fonts.has_faces() {
        log::warn!("no fonts loaded; text is measured but not drawn");
    }

    let image = dashprint::render(&document, &fonts);
    image.save_with_format(&args.output, image::ImageFormat::Png)?;
    eprintln!(
        "✓ Written {}x{} image to {}",
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}

fn example_dashboard_json() -> &'static str {
    r##"{
  "canvas": {
    "width": 1920,
    "scale": 1.5,
    "height": "auto",
    "max_height": 2400
  },
  "data": {
    "header": { "title": "Weekly Sales Report", "date_note": "Week 42, 2026" },
    "kpis": [
      { "title": "Revenue", "value": "$1.24M", "delta": 12.3, "delta_label": "vs last week" },
      { "title": "Orders", "value": 18204, "delta": -2.1, "delta_label": "vs last week" },
      { "title": "Conversion", "value": "3.8%", "delta": 0 }
    ],
    "regions": [
      ["Region", "Revenue", "Orders", "Share"],
      ["North", "$412K", 6120, "33%"],
      ["South", "$298K", 4410, "24%"],
      ["East", "$305K", 4532, "25%"],
      ["West", "$225K", 3142, "18%"]
    ],
    "summary": "Revenue grew for the third week in a row, driven by the North region. Orders dipped slightly after last week's promotion ended."
  },
  "components": [
    { "type": "title", "data_ref": "$.header" },
    {
      "type": "row",
      "properties": { "gap": 24 },
      "children": [
        { "type": "kpi_card", "data_ref": "$.kpis[0]" },
        { "type": "kpi_card", "data_ref": "$.kpis[1]" },
        { "type": "kpi_card", "data_ref": "$.kpis[2]" }
      ]
    },
    {
      "type": "row",
      "properties": { "gap": 24 },
      "children": [
        {
          "type": "table",
          "data_ref": "$.regions",
          "properties": { "width_ratio": 2, "fit": "truncate" }
        },
        {
          "type": "column",
          "properties": { "width_ratio": 1, "padding": 24, "bg_fill": "#f8fafc", "bg_outline": "#e2e8f0" },
          "children": [
            { "type": "text", "text": "Summary", "properties": { "font": "heading" } },
            { "type": "text", "data_ref": "$.summary", "properties": { "wrap": true, "font": "body" } }
          ]
        }
      ]
    }
  ]
}
"##
}
