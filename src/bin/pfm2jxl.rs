//! Convert a grayscale PFM image into `lossy.jxl` and `lossless.jxl`.

use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use log::{error, info, warn};
use zenpfm::jxl::{EncodeOptions, EncodeRequest, LibJxlBackend};
use zenpfm::{DecodeRequest, NonFiniteKind, PixelLayout, RasterImage, Unstoppable};

/// Lossy output distance.
const LOSSY_DISTANCE: f32 = 1.0;

#[derive(FromArgs, Debug)]
/// Compress a grayscale PFM image to lossy and lossless JPEG XL
struct Args {
    /// input PFM file
    #[argh(positional)]
    input: Option<PathBuf>,
}

fn report_non_finite(image: &RasterImage) {
    for bad in image.non_finite() {
        match bad.kind {
            NonFiniteKind::Nan => warn!("Found a NaN at ({}, {})", bad.x, bad.y),
            NonFiniteKind::Infinite => warn!("Found an Inf at ({}, {})", bad.x, bad.y),
        }
    }
}

fn encode_variant(
    image: &RasterImage,
    options: EncodeOptions,
    path: &str,
) -> Result<(), zenpfm::PfmError> {
    let backend = LibJxlBackend::new()?;
    let written = EncodeRequest::new(options).encode_to_file(image, path, backend, Unstoppable)?;
    info!("Wrote {path} ({written} bytes)");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    let Some(input) = args.input else {
        println!("Usage:");
        println!("------");
        println!("pfm2jxl <pfm file>");
        return ExitCode::SUCCESS;
    };

    let image = match DecodeRequest::new().decode_file(&input, Unstoppable) {
        Ok(image) => image,
        Err(err) => {
            error!("Error while reading input image file {}: {err}", input.display());
            return ExitCode::FAILURE;
        }
    };

    if image.layout != PixelLayout::GrayF32 {
        error!(
            "This program expects grayscale images, got {} channels",
            image.channel_count()
        );
        return ExitCode::FAILURE;
    }

    report_non_finite(&image);

    info!("Lossy");
    if let Err(err) = encode_variant(&image, EncodeOptions::lossy(LOSSY_DISTANCE), "lossy.jxl") {
        error!("Lossy encode failed: {err}");
        return ExitCode::FAILURE;
    }

    info!("Lossless");
    if let Err(err) = encode_variant(&image, EncodeOptions::lossless(), "lossless.jxl") {
        error!("Lossless encode failed: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
