//! geoarc headless simulator
//!
//! Feeds random events between a fixed set of cities into a globe context,
//! steps it at a fixed frame interval, and writes the final scene as JSON.
//!
//! # Usage
//!
//! ```bash
//! # One simulated minute at 60 fps, scene printed to stdout
//! geoarc_sim
//!
//! # Custom run, scene written to a file
//! geoarc_sim --frames 18000 --seed 7 --config globe.json --out scene.json
//!
//! # Per-frame logging
//! RUST_LOG=trace geoarc_sim --frames 120
//! ```

use std::ops::Range;
use std::path::PathBuf;
use std::process;

use geoarc_core::GeoArcError;
use geoarc_engine::{
    EventKind, Filter, FrameSink, GeoPoint, GlobeConfig, GlobeContext, NewEvent, SceneSnapshot,
};
use rand::prelude::*;
use tracing::{info, trace};
use tracing_subscriber::EnvFilter;

/// Gap between synthetic events, in milliseconds.
const EVENT_DELAY_MS: Range<f64> = 500.0..5500.0;

/// (name, lat, lng)
const CITIES: &[(&str, f64, f64)] = &[
    ("San Francisco", 37.62, -122.38),
    ("Seattle", 47.45, -122.31),
    ("Denver", 39.86, -104.67),
    ("Chicago", 41.98, -87.90),
    ("New York", 40.64, -73.78),
    ("Miami", 25.79, -80.29),
    ("Mexico City", 19.44, -99.07),
    ("Sao Paulo", -23.43, -46.47),
    ("London", 51.47, -0.45),
    ("Paris", 49.01, 2.55),
    ("Cairo", 30.12, 31.41),
    ("Nairobi", -1.32, 36.93),
    ("Dubai", 25.25, 55.36),
    ("Mumbai", 19.09, 72.87),
    ("Singapore", 1.36, 103.99),
    ("Tokyo", 35.55, 139.78),
    ("Sydney", -33.94, 151.18),
    ("Auckland", -37.01, 174.79),
];

struct Options {
    frames: u64,
    frame_ms: f64,
    seed: u64,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    filter: Filter,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            frames: 3600,
            frame_ms: 1000.0 / 60.0,
            seed: 42,
            config: None,
            out: None,
            filter: Filter::All,
        }
    }
}

fn print_usage() {
    eprintln!(
        r#"geoarc headless simulator

USAGE:
    geoarc_sim [OPTIONS]

OPTIONS:
    --frames <N>        Number of frames to simulate (default 3600)
    --frame-ms <MS>     Frame interval in milliseconds (default 16.67)
    --seed <N>          Random seed for the event stream (default 42)
    --config <PATH>     JSON globe configuration
    --filter <KIND>     Only show misc, file, approval or alert events
    --out <PATH>        Write the final scene JSON here instead of stdout
    --help              Show this help message
"#
    );
}

fn fail(msg: &str) -> ! {
    eprintln!("Error: {msg}\n");
    print_usage();
    process::exit(1);
}

fn parse_kind(s: &str) -> Option<EventKind> {
    EventKind::ALL.into_iter().find(|k| k.as_str() == s)
}

fn parse_args() -> Options {
    let mut opts = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .unwrap_or_else(|| fail(&format!("{flag} requires a value")))
        };
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--frames" => {
                opts.frames = value("--frames")
                    .parse()
                    .unwrap_or_else(|_| fail("--frames expects an integer"));
            }
            "--frame-ms" => {
                opts.frame_ms = value("--frame-ms")
                    .parse()
                    .unwrap_or_else(|_| fail("--frame-ms expects a number"));
            }
            "--seed" => {
                opts.seed = value("--seed")
                    .parse()
                    .unwrap_or_else(|_| fail("--seed expects an integer"));
            }
            "--config" => opts.config = Some(PathBuf::from(value("--config"))),
            "--out" => opts.out = Some(PathBuf::from(value("--out"))),
            "--filter" => {
                let kind = value("--filter");
                opts.filter = match parse_kind(&kind) {
                    Some(k) => Filter::Only(k),
                    None => fail(&format!("unknown event kind '{kind}'")),
                };
            }
            other => fail(&format!("unknown argument '{other}'")),
        }
    }
    opts
}

/// Random events between two distinct cities, spaced by a random delay.
struct EventSource {
    rng: StdRng,
    next_in_ms: f64,
    emitted: u64,
}

impl EventSource {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_in_ms: 0.0,
            emitted: 0,
        }
    }

    fn poll(&mut self, dt_ms: f64) -> Option<NewEvent> {
        self.next_in_ms -= dt_ms;
        if self.next_in_ms > 0.0 {
            return None;
        }
        self.next_in_ms = self.rng.gen_range(EVENT_DELAY_MS);
        self.emitted += 1;

        let picked: Vec<_> = CITIES.choose_multiple(&mut self.rng, 2).collect();
        let (from, to) = (picked[0], picked[1]);
        let kind = EventKind::ALL[self.rng.gen_range(0..EventKind::ALL.len())];
        Some(
            NewEvent::new(kind, GeoPoint::new(from.1, from.2), GeoPoint::new(to.1, to.2))
                .with_message(format!("{kind}: {} -> {}", from.0, to.0)),
        )
    }
}

/// Frame sink that tracks what a renderer would have drawn.
#[derive(Default)]
struct FrameStats {
    frames: u64,
    peak_groups: usize,
    peak_markers: usize,
}

impl FrameSink for FrameStats {
    fn present(&mut self, frame: &SceneSnapshot) {
        self.frames += 1;
        self.peak_groups = self.peak_groups.max(frame.groups.len());
        self.peak_markers = self.peak_markers.max(frame.marker_count());
        trace!(
            frame = self.frames,
            groups = frame.groups.len(),
            visible = frame.visible_groups().count(),
            markers = frame.marker_count(),
            "present"
        );
    }
}

fn run(opts: &Options) -> Result<(), GeoArcError> {
    let config = match &opts.config {
        Some(path) => GlobeConfig::load(path)?,
        None => GlobeConfig::default(),
    };
    let mut ctx = GlobeContext::new(config)?;
    ctx.set_filter(opts.filter);

    let mut source = EventSource::new(opts.seed);
    let mut stats = FrameStats::default();
    for _ in 0..opts.frames {
        if let Some(event) = source.poll(opts.frame_ms) {
            ctx.add_event(event);
        }
        ctx.render(opts.frame_ms, &mut stats);
    }

    info!(
        frames = stats.frames,
        events = source.emitted,
        live_events = ctx.events().len(),
        groups = ctx.registry().group_count(),
        peak_groups = stats.peak_groups,
        peak_markers = stats.peak_markers,
        "simulation finished"
    );

    let json = serde_json::to_string_pretty(&ctx.snapshot())?;
    match &opts.out {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path.display(), "scene written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = parse_args();
    if let Err(e) = run(&opts) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
