use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use imageops_kernel::{
    box_blur, down_scale, gaussian_blur, laplacian, load_image, save_image, up_scale,
    ApplyKernel, Kernel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KernelChoice {
    Box,
    Gaussian,
    Laplacian,
}

/// Apply a convolution kernel to an image.
#[derive(Parser, Debug)]
#[command(name = "apply_filter", version)]
struct Args {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Output image; the extension selects the format (.png, .jpg, .jpeg)
    output: PathBuf,

    #[arg(long, value_enum, default_value_t = KernelChoice::Box)]
    kernel: KernelChoice,

    /// Kernel side length (odd for gaussian)
    #[arg(long, default_value_t = 3)]
    size: u32,

    /// Gaussian standard deviation
    #[arg(long, default_value_t = 1.0)]
    sigma: f64,

    /// Resize to WIDTHxHEIGHT before filtering, keeping the aspect ratio
    #[arg(long, value_parser = parse_dimensions)]
    resize: Option<(u32, u32)>,
}

fn parse_dimensions(text: &str) -> Result<(u32, u32), String> {
    let (width, height) = text
        .split_once('x')
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {text}"))?;
    let width = width.parse().map_err(|e| format!("invalid width: {e}"))?;
    let height = height.parse().map_err(|e| format!("invalid height: {e}"))?;
    Ok((width, height))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut image = load_image(&args.input)?;
    println!(
        "Loaded {}: {}x{}",
        args.input.display(),
        image.width(),
        image.height()
    );

    if let Some((width, height)) = args.resize {
        let scale_up = u64::from(width) * u64::from(height)
            > u64::from(image.width()) * u64::from(image.height());
        image = if scale_up {
            up_scale(&image, width, height, true)?
        } else {
            down_scale(&image, width, height, true)?
        };
    }

    let kernel: Kernel = match args.kernel {
        KernelChoice::Box => box_blur(args.size)?,
        KernelChoice::Gaussian => gaussian_blur(args.size, args.sigma)?,
        KernelChoice::Laplacian => laplacian(),
    };

    let output = image.apply_kernel(&kernel)?;
    save_image(&output, &args.output)?;

    println!("{:?} kernel applied successfully!", args.kernel);
    println!("Output saved to: {}", args.output.display());

    Ok(())
}
