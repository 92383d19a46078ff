use argh::FromArgs;
use std::path::{Path, PathBuf};

use rasterkit::{
    image::PixelBuffer,
    imgproc::{self, parallel::ExecutionStrategy},
    io::ppm,
};

#[derive(FromArgs)]
/// Apply a single transform to a binary PPM image
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Invert(InvertArgs),
    Mirror(MirrorArgs),
    Blur(BlurArgs),
}

#[derive(FromArgs)]
/// Invert every channel of the image
#[argh(subcommand, name = "invert")]
struct InvertArgs {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: PathBuf,
}

#[derive(FromArgs)]
/// Mirror every row of the image
#[argh(subcommand, name = "mirror")]
struct MirrorArgs {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: PathBuf,
}

#[derive(FromArgs)]
/// Blur the interior of the image with a gaussian kernel
#[argh(subcommand, name = "blur")]
struct BlurArgs {
    /// path to the input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image
    #[argh(option, short = 'o')]
    output: PathBuf,

    /// the kernel radius
    #[argh(option, short = 'r', default = "1")]
    radius: usize,

    /// the sigma of the gaussian kernel
    #[argh(option, short = 's', default = "1.0")]
    sigma: f64,

    /// number of worker threads, 0 uses the global pool
    #[argh(option, short = 't')]
    threads: Option<usize>,
}

impl BlurArgs {
    fn strategy(&self) -> ExecutionStrategy {
        match self.threads {
            None => ExecutionStrategy::Serial,
            Some(0) => ExecutionStrategy::ParallelRows,
            Some(n) => ExecutionStrategy::Fixed(n),
        }
    }
}

fn run(
    input: &Path,
    output: &Path,
    transform: impl FnOnce(&PixelBuffer) -> Result<PixelBuffer, Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let image = ppm::read_image_ppm(input)?;
    log::info!(
        "loaded {} with max color value {}",
        image.size(),
        image.max_color_val()
    );

    let start = std::time::Instant::now();
    let result = transform(&image)?;
    log::info!("transform took {:?}", start.elapsed());

    ppm::write_image_ppm(output, &result)?;
    log::info!("wrote {}", output.display());

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    match args.command {
        Command::Invert(args) => run(&args.input, &args.output, |image| {
            Ok(imgproc::invert::invert(image))
        }),
        Command::Mirror(args) => run(&args.input, &args.output, |image| {
            Ok(imgproc::flip::horizontal_flip(image))
        }),
        Command::Blur(args) => {
            let strategy = args.strategy();
            run(&args.input, &args.output, |image| {
                Ok(imgproc::filter::gaussian_blur_with(
                    image,
                    args.radius,
                    args.sigma,
                    strategy,
                )?)
            })
        }
    }
}
