use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;

use barscan::image::decode;
use barscan::{BarcodeFormats, ImageInfo, ReaderOptions};

#[derive(Parser)]
#[command(name = "barscan")]
#[command(about = "Read barcodes from an image file", long_about = None)]
#[command(version)]
struct Args {
    /// Input image (PNG, JPEG, ...)
    #[arg(value_name = "IMAGE")]
    input: PathBuf,

    /// Formats to look for, separated by `,` or `|` (default: all)
    #[arg(value_name = "FORMATS")]
    formats: Option<String>,

    /// Also try the color-inverted image (light-on-dark symbols)
    #[arg(long, default_value_t)]
    try_invert: bool,

    /// Skip the slower, more thorough search
    #[arg(long, default_value_t)]
    fast: bool,

    /// The image holds exactly one unrotated symbol and nothing else
    #[arg(long, default_value_t)]
    pure: bool,

    /// Stop after this many symbols (1-255)
    #[arg(long, value_name = "COUNT", default_value_t = 255)]
    max_symbols: u16,

    /// Print results as JSON
    #[arg(long, default_value_t)]
    json: bool,

    /// Verbose output
    #[arg(short, long, default_value_t)]
    verbose: bool,

    /// Quiet mode (minimal output)
    #[arg(short, long, default_value_t)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.verbose, args.quiet);

    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let options = build_options(args)?;

    let img = decode::open(&args.input)?;
    let info = ImageInfo::of(&img);

    let barcodes = barscan::read_image(&img, &options).context("Failed to read barcodes")?;
    drop(img);

    if args.json {
        let json = serde_json::to_string_pretty(&barcodes).context("Failed to encode results")?;
        println!("{json}");
        return Ok(());
    }

    println!("{}: {info}", args.input.display());

    for barcode in &barcodes {
        println!("{barcode}");
        if args.verbose {
            log::debug!(
                "{} at {:?}, symbology identifier {:?}, inverted: {}",
                barcode.format,
                barcode.points,
                barcode.symbology_identifier,
                barcode.inverted
            );
        }
    }

    if barcodes.is_empty() && !args.quiet {
        log::info!("No barcode found");
    }

    Ok(())
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn build_options(args: &Args) -> Result<ReaderOptions> {
    // Validate symbol limit
    if args.max_symbols == 0 || args.max_symbols > 255 {
        anyhow::bail!("Max symbols must be between 1 and 255");
    }

    let formats = match &args.formats {
        Some(list) => list
            .parse::<BarcodeFormats>()
            .context("Failed to parse format list")?,
        None => BarcodeFormats::all(),
    };

    Ok(ReaderOptions::default()
        .with_formats(formats)
        .with_try_invert(args.try_invert)
        .with_try_harder(!args.fast)
        .with_is_pure(args.pure)
        .with_max_number_of_symbols(args.max_symbols as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::image::{GrayImage, Luma};

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("barscan").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn invert_detection_is_off_unless_asked() {
        let options = build_options(&args(&["code.png"])).unwrap();
        assert!(!options.try_invert);
        assert!(options.formats.is_empty());

        let options = build_options(&args(&["code.png", "--try-invert"])).unwrap();
        assert!(options.try_invert);
    }

    #[test]
    fn format_list_is_positional() {
        let options = build_options(&args(&["code.png", "QRCode|EAN-13"])).unwrap();
        assert_eq!(options.formats.to_string(), "EAN-13|QRCode");
    }

    #[test]
    fn unknown_format_fails() {
        let err = build_options(&args(&["code.png", "QRCode,NotAFormat"])).unwrap_err();
        let source = err.downcast_ref::<barscan::Error>().unwrap();
        assert!(source.is_configuration());
    }

    #[test]
    fn missing_image_fails_with_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        let err = run(&args(&[missing.to_str().unwrap()])).unwrap_err();
        let source = err.downcast_ref::<barscan::Error>().unwrap();
        assert!(source.is_decode());
    }

    #[test]
    fn image_without_barcode_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        for (name, side) in [("blank.png", 64), ("dot.png", 1)] {
            let path = dir.path().join(name);
            GrayImage::from_pixel(side, side, Luma([255])).save(&path).unwrap();
            assert!(run(&args(&[path.to_str().unwrap()])).is_ok());
            assert!(run(&args(&[path.to_str().unwrap(), "--json", "--try-invert"])).is_ok());
        }
    }

    #[test]
    fn symbol_limit_is_checked() {
        assert!(build_options(&args(&["code.png", "--max-symbols", "0"])).is_err());
        assert!(build_options(&args(&["code.png", "--max-symbols", "300"])).is_err());
        let options = build_options(&args(&["code.png", "--max-symbols", "2", "--fast"])).unwrap();
        assert_eq!(options.max_number_of_symbols, 2);
        assert!(!options.try_harder);
    }
}
