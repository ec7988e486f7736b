//! Host-side helper.
//!
//! `cargo run -- snapshot` renders frames headlessly and writes an SVG;
//! `cargo run -- serve` builds the wasm package and serves the demo page.

use std::env;
use std::fs;
use std::process::{self, Command};
use std::rc::Rc;

use aurora_waves::headless::{ManualObserver, ManualScheduler};
use aurora_waves::svg::SvgSurface;
use aurora_waves::{AuroraError, AuroraWaves, Extent, Palette};

const HELP_TEXT: &str = "\
aurora_waves: aurora background developer tool

USAGE:
    aurora_waves [snapshot|serve] [OPTIONS]

COMMANDS:
    snapshot   Render frames without a browser and write an SVG (default)
    serve      Build the wasm package into static/pkg and serve static/ on :8000

SNAPSHOT OPTIONS:
    --width=N     Container width in CSS px (default: 1280)
    --height=N    Container height in CSS px (default: 560)
    --ratio=F     Device pixel ratio (default: 1)
    --frames=N    Frames to render before writing (default: 120)
    --seed=N      Palette seed (default: 1)
    --out=PATH    Output file (default: aurora.svg)
    --help, -h    Show this help message

ENVIRONMENT VARIABLES:
    AURORA_SEED     Override --seed default
    AURORA_FRAMES   Override --frames default";

#[derive(Debug, PartialEq)]
enum Mode {
    Snapshot,
    Serve,
}

#[derive(Debug, PartialEq)]
struct Opts {
    mode: Mode,
    width: f64,
    height: f64,
    ratio: f64,
    frames: usize,
    seed: u64,
    out: String,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            mode: Mode::Snapshot,
            width: 1280.0,
            height: 560.0,
            ratio: 1.0,
            frames: 120,
            seed: 1,
            out: "aurora.svg".into(),
        }
    }
}

impl Opts {
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut opts = Self::default();
        if let Some(n) = env::var("AURORA_SEED").ok().and_then(|v| v.parse().ok()) {
            opts.seed = n;
        }
        if let Some(n) = env::var("AURORA_FRAMES").ok().and_then(|v| v.parse().ok()) {
            opts.frames = n;
        }

        for arg in args {
            match arg.as_str() {
                "snapshot" => opts.mode = Mode::Snapshot,
                "serve" => opts.mode = Mode::Serve,
                other => {
                    if let Some(val) = other.strip_prefix("--width=") {
                        opts.width = parse_flag("--width", val)?;
                    } else if let Some(val) = other.strip_prefix("--height=") {
                        opts.height = parse_flag("--height", val)?;
                    } else if let Some(val) = other.strip_prefix("--ratio=") {
                        opts.ratio = parse_flag("--ratio", val)?;
                    } else if let Some(val) = other.strip_prefix("--frames=") {
                        opts.frames = parse_flag("--frames", val)?;
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = parse_flag("--seed", val)?;
                    } else if let Some(val) = other.strip_prefix("--out=") {
                        opts.out = val.to_string();
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }
        Ok(opts)
    }
}

fn parse_flag<T: std::str::FromStr>(name: &str, val: &str) -> Result<T, String> {
    val.parse()
        .map_err(|_| format!("Invalid {name} value: {val}"))
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("{HELP_TEXT}");
        return;
    }
    let opts = match Opts::parse(&args) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("Run with --help for usage information.");
            process::exit(2);
        }
    };

    let result = match opts.mode {
        Mode::Snapshot => snapshot(&opts),
        Mode::Serve => serve(),
    };
    if let Err(err) = result {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn snapshot(opts: &Opts) -> Result<(), AuroraError> {
    let scheduler = Rc::new(ManualScheduler::default());
    let observer = ManualObserver::new(Extent::new(opts.width, opts.height), opts.ratio);
    let mut aurora = AuroraWaves::mount(
        SvgSurface::new(),
        scheduler.clone(),
        observer,
        Palette::from_seed(opts.seed),
    )?;
    scheduler.run_frames(opts.frames);

    let document = aurora.surface().to_document();
    fs::write(&opts.out, document)?;
    let viewport = aurora.viewport();
    println!(
        "wrote {} ({}x{}, frame {}, base hue {:.1})",
        opts.out,
        viewport.width(),
        viewport.height(),
        aurora.frame_count(),
        aurora.base_hue()
    );
    aurora.unmount();
    Ok(())
}

fn serve() -> Result<(), AuroraError> {
    println!("Building WASM pkg ...");
    let status = Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()?;
    if !status.success() {
        return Err(AuroraError::Io(std::io::Error::other(
            "wasm-pack build failed",
        )));
    }

    println!("Serving static/ at http://127.0.0.1:8000 ...");
    let mut server = Command::new("python3")
        .args(["-m", "http.server", "8000", "--directory", "static"])
        .spawn()?;
    server.wait()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_snapshot_flags() {
        let opts = Opts::parse(&args(&["snapshot", "--width=800", "--ratio=2", "--out=x.svg"])).unwrap();
        assert_eq!(opts.mode, Mode::Snapshot);
        assert_eq!(opts.width, 800.0);
        assert_eq!(opts.ratio, 2.0);
        assert_eq!(opts.out, "x.svg");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Opts::parse(&args(&["--frames=lots"])).is_err());
        assert!(Opts::parse(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn serve_mode() {
        assert_eq!(Opts::parse(&args(&["serve"])).unwrap().mode, Mode::Serve);
    }
}
