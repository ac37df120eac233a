use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use log::debug;

use term_mandelbrot::{colour, escape, term, ColourScheme, Palette, Size, Viewport};

/// Draw the Mandelbrot set in the terminal.
///
/// Examples:
///   term-mandelbrot
///   term-mandelbrot --center-x -0.75 --zoom 2 --max-iterations 200
///   term-mandelbrot --center-x -1 --center-y 0.3 --zoom 20 --max-iterations 500
#[derive(Parser, Debug)]
#[command(version, verbatim_doc_comment)]
struct Options {
    /// Real coordinate of the view centre.
    #[arg(long, default_value_t = -0.5, allow_negative_numbers = true)]
    center_x: f64,

    /// Imaginary coordinate of the view centre.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    center_y: f64,

    /// Magnification; larger values show a smaller region.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    zoom: f64,

    /// Updates to run before a pixel is taken to never diverge.
    #[arg(long, default_value_t = escape::DEFAULT_MAX_ITERATIONS)]
    max_iterations: u32,

    /// Image width in pixels. Defaults to the terminal width.
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels. Defaults to two per usable terminal row.
    #[arg(long)]
    height: Option<u32>,

    /// How divergence times are spread over the palette.
    #[arg(long, value_enum, default_value_t = SchemeOption::Linear)]
    scheme: SchemeOption,

    /// Colour ramp.
    #[arg(long, value_enum, default_value_t = PaletteOption::Magma)]
    palette: PaletteOption,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemeOption {
    Linear,
    Histogram,
}

impl From<SchemeOption> for ColourScheme {
    fn from(option: SchemeOption) -> Self {
        match option {
            SchemeOption::Linear => ColourScheme::Linear,
            SchemeOption::Histogram => ColourScheme::Histogram,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaletteOption {
    Magma,
    Grayscale,
}

impl From<PaletteOption> for Palette {
    fn from(option: PaletteOption) -> Self {
        match option {
            PaletteOption::Magma => Palette::Magma,
            PaletteOption::Grayscale => Palette::Grayscale,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Options::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let workers = num_cpus::get_physical();
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build_global()?;
    debug!("colouring with {} worker threads", workers);

    let size = match (options.width, options.height) {
        (Some(width), Some(height)) => Size::new(width, height),
        (width, height) => {
            let auto = term::auto_size();
            Size::new(width.unwrap_or(auto.width), height.unwrap_or(auto.height))
        }
    };
    let viewport = Viewport::new(options.center_x, options.center_y, options.zoom);

    let started = Instant::now();
    let grid = escape::compute(size, viewport, options.max_iterations)?;
    debug!("computed divergence times in {:?}", started.elapsed());

    let started = Instant::now();
    let image = colour::render(&grid, options.scheme.into(), options.palette.into());
    debug!("coloured image in {:?}", started.elapsed());

    let mut stdout = io::stdout().lock();
    term::present(&mut stdout, &image)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Options::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_reference_view() {
        let options = Options::parse_from(["term-mandelbrot"]);
        assert_eq!(options.center_x, -0.5);
        assert_eq!(options.center_y, 0.0);
        assert_eq!(options.zoom, 1.0);
        assert_eq!(options.max_iterations, escape::DEFAULT_MAX_ITERATIONS);
        assert!(options.width.is_none());
        assert!(options.height.is_none());
    }

    #[test]
    fn negative_coordinates_parse_without_equals_signs() {
        let options = Options::parse_from([
            "term-mandelbrot",
            "--center-x",
            "-1",
            "--center-y",
            "0.3",
            "--zoom",
            "20",
            "--max-iterations",
            "500",
        ]);
        assert_eq!(options.center_x, -1.0);
        assert_eq!(options.center_y, 0.3);
        assert_eq!(options.zoom, 20.0);
        assert_eq!(options.max_iterations, 500);
    }
}
