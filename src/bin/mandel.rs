use clap::{value_t, App, Arg, ArgMatches};
use env_logger::Env;
use log::info;
use num::Complex;
use std::num::NonZeroU32;
use std::str::FromStr;

use mandelsrv::png::write_png;
use mandelsrv::{
    ChannelOverflow, ColorScheme, HueNarrowing, Raster, Region, RenderConfig, Renderer,
};

/// Splits `s` at the first `separator` and parses both halves.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let index = s.find(separator)?;
    let left = s[..index].parse::<T>().ok()?;
    let right = s[index + 1..].parse::<T>().ok()?;
    Some((left, right))
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    parse_pair::<T>(s, separator)
        .map(|_| ())
        .ok_or_else(|| err.to_string())
}

fn validate_threads(s: &str, max_threads: usize) -> Result<(), String> {
    match s.parse::<usize>() {
        Ok(n) if n >= 1 && n <= max_threads => Ok(()),
        Ok(_) => Err(format!("Thread count must be between 1 and {}", max_threads)),
        Err(_) => Err("Could not parse thread count".to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const SCHEME: &str = "scheme";
const THREADS: &str = "threads";
const CLAMP: &str = "clamp";
const SCALE_HUES: &str = "scale-hues";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Mandelbrot set renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output PNG file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1200x800")
                .validator(|s| validate_pair::<NonZeroU32>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2,-1")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("xmin,ymin of the complex plane"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("1,1")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("xmax,ymax of the complex plane"),
        )
        .arg(
            Arg::with_name(SCHEME)
                .required(false)
                .long(SCHEME)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("2")
                .validator(|s| {
                    i64::from_str(&s)
                        .map(|_| ())
                        .map_err(|_| "Could not parse color scheme".to_string())
                })
                .help("0 mono, 1 gray, 2 multi-hue, 3 red, 4 green, 5 blue"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| validate_threads(&s, max_threads))
                .help("Number of threads to use in the renderer (default: all)"),
        )
        .arg(
            Arg::with_name(CLAMP)
                .long(CLAMP)
                .help("Saturate the gray ramp at black instead of wrapping"),
        )
        .arg(
            Arg::with_name(SCALE_HUES)
                .long(SCALE_HUES)
                .help("Scale multi-hue channels down to 8 bits instead of keeping the low byte"),
        )
        .get_matches()
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_module_path(false)
        .init();

    let matches = args();
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair::<NonZeroU32>(s, 'x'))
        .map(|(w, h)| (w.get(), h.get()))
        .unwrap_or_else(|| fail("Error parsing image dimensions"));
    let leftlower = matches
        .value_of(LEFTLOWER)
        .and_then(parse_complex)
        .unwrap_or_else(|| fail("Error parsing left lower point"));
    let rightupper = matches
        .value_of(RIGHTUPPER)
        .and_then(parse_complex)
        .unwrap_or_else(|| fail("Error parsing right upper point"));
    let scheme = value_t!(matches, SCHEME, i64).unwrap_or_else(|e| e.exit());
    let threads = if matches.is_present(THREADS) {
        value_t!(matches, THREADS, usize).unwrap_or_else(|e| e.exit())
    } else {
        num_cpus::get()
    };
    let config = RenderConfig {
        overflow: if matches.is_present(CLAMP) {
            ChannelOverflow::Clamp
        } else {
            ChannelOverflow::Wrap
        },
        narrowing: if matches.is_present(SCALE_HUES) {
            HueNarrowing::Scale
        } else {
            HueNarrowing::Truncate
        },
        ..RenderConfig::default()
    };

    let renderer = Renderer::new(
        Raster(width, height),
        Region::from_corners(leftlower, rightupper),
        ColorScheme::from_selector(scheme),
        config,
    );
    let image = renderer.render(threads);

    let output = matches.value_of(OUTPUT).unwrap_or_else(|| fail("No output file given"));
    match write_png(output, &image) {
        Ok(()) => info!("Wrote {}x{} image to {}", width, height, output),
        Err(e) => fail(&format!("Render failure: {}", e)),
    }
}
