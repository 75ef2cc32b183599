use clap::{value_t, App, Arg, ArgMatches, ErrorKind};
use env_logger::Env;
use log::debug;
use std::io;
use std::process;

use mandelsrv::server::{self, ServerState};

const PORT: &str = "port";
const DEFAULT_PORT: &str = "8080";

fn validate_port(s: &str) -> Result<(), String> {
    match s.parse::<u16>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!("'{}' is not a valid port number.", s)),
    }
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("mandelsrv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Mandelbrot Set Image Server")
        .long_about(
            "Launches a web server that replies to requests for Mandelbrot set \
             images in PNG format.",
        )
        .after_help(
            "The image is described by the query parameters of the request:\n\
             width, height (1024x1024), xmin, ymin, xmax, ymax (-2, -2, 2, 2) and\n\
             colorScheme (0 mono, 1 gray, 2 multi-hue, 3 red, 4 green, 5 blue; default 2).",
        )
        .arg(
            Arg::with_name(PORT)
                .required(false)
                .index(1)
                .default_value(DEFAULT_PORT)
                .validator(|s| validate_port(&s))
                .help("Port number the web server will be listening at"),
        )
}

// A rejected port gets the usage block too, like any other command line
// error.
fn args<'a>() -> ArgMatches<'a> {
    let mut app = app();
    match app.clone().get_matches_safe() {
        Ok(matches) => matches,
        Err(ref e) if e.kind == ErrorKind::ValueValidation => {
            eprintln!("{}", e.message);
            eprintln!();
            let _ = app.write_help(&mut io::stderr());
            eprintln!();
            process::exit(1);
        }
        Err(e) => e.exit(),
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_module_path(false)
        .init();

    let matches = args();
    let port = value_t!(matches, PORT, u16).unwrap_or_else(|e| e.exit());
    debug!("mandelsrv starting");

    println!();
    println!("mandelsrv - Mandelbrot Set Image Server on port {}...", port);
    println!();
    println!("Press <Ctrl> + <C> to stop the server.");

    if let Err(e) = server::serve(port, ServerState::default()).await {
        eprintln!("{}", e);
        process::exit(1);
    }
}
