use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image::{ImageReader, RgbImage};
use log::{info, warn};
use pic_laplace::{AcceleratedBackend, Backend, ImageStore, LaplaceFilter, ThreadCount};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum BackendArg {
    /// SIMD kernels
    Accelerated,
    /// Portable scalar kernel
    Native,
}

impl From<BackendArg> for Backend {
    fn from(value: BackendArg) -> Self {
        match value {
            BackendArg::Accelerated => Backend::Accelerated,
            BackendArg::Native => Backend::Native,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Emphasizes edges of an image with a 3x3 Laplace filter
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Image to filter, any format the `image` crate decodes
    input: PathBuf,
    /// Where to save the result, format follows the extension
    #[arg(short, long, default_value = "converted.bmp")]
    output: PathBuf,
    /// Worker count, snapped to the closest of 1, 2, 4, 8, 16, 32, 64
    #[arg(short, long, default_value_t = 1)]
    threads: usize,
    #[arg(short, long, value_enum, default_value_t = BackendArg::Accelerated)]
    backend: BackendArg,
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

/// Rows of 24-bit bitmaps are aligned to 4 bytes
fn aligned_stride(width: usize) -> usize {
    (width * 3 + 3) & !3
}

fn main() -> Result<()> {
    let args = Args::parse();
    TermLogger::init(
        args.log_level.into(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let threads = ThreadCount::nearest(args.threads);
    if threads.count() != args.threads {
        warn!(
            "{} threads are not supported, using {}",
            args.threads,
            threads.count()
        );
    }

    let img = ImageReader::open(&args.input)
        .with_context(|| format!("Cannot open {}", args.input.display()))?
        .decode()
        .with_context(|| format!("Cannot decode {}", args.input.display()))?
        .to_rgb8();
    let (width, height) = (img.width() as usize, img.height() as usize);

    let stride = aligned_stride(width);
    let mut padded = vec![0u8; stride * height];
    // Empty images are left to the filter to reject
    if width != 0 {
        for (dst, src) in padded
            .chunks_exact_mut(stride)
            .zip(img.as_raw().chunks_exact(width * 3))
        {
            dst[..width * 3].copy_from_slice(src);
        }
    }
    let store = ImageStore::from_slice(&padded, width, height, stride)?;

    let backend: Backend = args.backend.into();
    if backend == Backend::Accelerated {
        info!("Accelerated backend runs on {}", AcceleratedBackend.extension());
    }
    let mut filter = LaplaceFilter::new(backend);
    filter.set_thread_count(threads);

    let start_time = Instant::now();
    let filtered = filter.apply(&store).map_err(|e| {
        if e.is_invalid_image() {
            anyhow::Error::new(e).context(format!("{} is not a usable image", args.input.display()))
        } else {
            e.into()
        }
    })?;
    let elapsed_time = start_time.elapsed();
    println!(
        "Processing time: {:.2?} ({:?}, {} threads)",
        elapsed_time,
        backend,
        threads.count()
    );

    let mut dst = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        dst.extend_from_slice(filtered.row(y));
    }
    let result = RgbImage::from_raw(width as u32, height as u32, dst)
        .context("Filtered image does not fit its dimensions")?;
    result
        .save(&args.output)
        .with_context(|| format!("Cannot save {}", args.output.display()))?;
    info!("Image has been saved to {}", args.output.display());
    Ok(())
}
