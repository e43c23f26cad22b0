use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use labelgrid::{Margins, Orientation, PageSize, SheetSettings, parse_dimensions};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PageSizeArg {
    A4,
    Letter,
    Legal,
    Custom,
}

/// Tile label images across a printable page and write one PDF per image.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Label images (PNG or JPEG)
    #[arg(required = true)]
    images: Vec<PathBuf>,

    #[arg(long, value_enum, default_value = "a4")]
    page_size: PageSizeArg,

    /// Page width in mm (custom page size only)
    #[arg(long, required_if_eq("page_size", "custom"))]
    page_width_mm: Option<f32>,

    /// Page height in mm (custom page size only)
    #[arg(long, required_if_eq("page_size", "custom"))]
    page_height_mm: Option<f32>,

    #[arg(long)]
    landscape: bool,

    /// Top margin in mm
    #[arg(long, default_value_t = 0.0)]
    margin_top: f32,

    /// Bottom margin in mm
    #[arg(long, default_value_t = 0.0)]
    margin_bottom: f32,

    /// Left margin in mm
    #[arg(long, default_value_t = 0.0)]
    margin_left: f32,

    /// Right margin in mm
    #[arg(long, default_value_t = 0.0)]
    margin_right: f32,

    #[arg(long, default_value_t = 1)]
    rows: u32,

    #[arg(long, default_value_t = 1)]
    columns: u32,

    /// Label size as "W x H" in mm; derived from the grid when omitted
    #[arg(long)]
    label_size: Option<String>,

    /// Directory the PDFs are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn settings_from_args(args: &Args) -> Result<SheetSettings, labelgrid::Error> {
    let page_size = match args.page_size {
        PageSizeArg::A4 => PageSize::A4,
        PageSizeArg::Letter => PageSize::Letter,
        PageSizeArg::Legal => PageSize::Legal,
        PageSizeArg::Custom => PageSize::Custom {
            width_mm: args.page_width_mm.unwrap_or_default(),
            height_mm: args.page_height_mm.unwrap_or_default(),
        },
    };
    let label_size_mm = match args.label_size.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(parse_dimensions(s)?),
    };
    let settings = SheetSettings {
        page_size,
        orientation: if args.landscape {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        },
        margins_mm: Margins {
            top: args.margin_top,
            bottom: args.margin_bottom,
            left: args.margin_left,
            right: args.margin_right,
        },
        rows: args.rows,
        columns: args.columns,
        label_size_mm,
    };
    // Surface bad page/grid settings once instead of once per image.
    settings.geometry()?;
    settings.grid_request()?;
    Ok(settings)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = match settings_from_args(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&args.output_dir) {
        eprintln!("Error: {}: {e}", args.output_dir.display());
        return ExitCode::FAILURE;
    }

    let report = labelgrid::generate_label_sheets(&args.images, &settings, &args.output_dir);
    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(sheet) => {
                let size = sheet.layout.cell_size_mm();
                println!(
                    "ok: {} ({:.1}x{:.1}mm labels)",
                    args.output_dir.join(&sheet.file_name).display(),
                    size.width,
                    size.height
                );
            }
            Err(e) => eprintln!("error: {}: {e}", outcome.name),
        }
    }

    if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
