extern crate metro;
extern crate failure;
extern crate structopt;
#[macro_use] extern crate log;

use metro::*;
use metro::input::demo;
use metro::output::history::{self, History};
use metro::ticker::{CancelToken, Clock};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use structopt::StructOpt;

/// Metro -- tick trains along their lines
#[derive(StructOpt, Debug)]
#[structopt(name="metro")]
struct Opt {
    /// Verbose mode (-v, -vv)
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: u8,

    /// Network file with segments, connections, stations and lines.
    /// The built-in demo network is used if omitted.
    #[structopt(parse(from_os_str), requires = "fleet")]
    network: Option<PathBuf>,

    /// Fleet file with one train per line
    #[structopt(short = "f", long = "fleet", parse(from_os_str))]
    fleet: Option<PathBuf>,

    /// Milliseconds between ticks
    #[structopt(short = "i", long = "interval", default_value = "1000")]
    interval: u64,

    /// Stop after this many ticks
    #[structopt(short = "n", long = "ticks")]
    ticks: Option<u64>,

    /// Output segment visits to file
    #[structopt(long = "visits", parse(from_os_str))]
    visits: Option<PathBuf>,

    /// Output JSON history file
    #[structopt(short = "j", long = "json", parse(from_os_str))]
    json: Option<PathBuf>,

    /// Output JSON history as JavaScript
    #[structopt(short = "J", long = "javascript", parse(from_os_str))]
    javascript: Option<PathBuf>,
}

fn run(opt: &Opt) -> AppResult<()> {
    let start = Instant::now();

    let network = match opt.network {
        Some(ref network) => get_network(network)?,
        None => demo::demo_network(),
    };
    let trains = match opt.fleet {
        Some(ref fleet) => get_fleet(fleet)?,
        None => demo::demo_fleet(),
    };
    debug!("network: {:?}", network);
    debug!("fleet: {:?}", trains);

    let metro = network.into_metro(trains)?;
    let mut history = History::new(&metro.trains());

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .map_err(|e| failure::format_err!("setting interrupt handler: {}", e))?;

    info!("starting engine, use ctrl+c to exit");
    let mut clock = Clock::new(Duration::from_millis(opt.interval));
    clock.limit = opt.ticks;
    let result = clock.run(&metro, &cancel, &mut history);

    write_outputs(opt, &history)?;
    info!("execution complete in {:?}", start.elapsed());
    result?;
    Ok(())
}

fn write_outputs(opt: &Opt, history: &History) -> AppResult<()> {
    use std::fs::File;
    use std::io::{BufWriter, Write};

    if let Some(ref json) = opt.json {
        let file = File::create(json)?;
        let mut writer = BufWriter::new(&file);
        metro::output::json::json_history(history, &mut writer)?;
    }

    if let Some(ref javascript) = opt.javascript {
        let file = File::create(javascript)?;
        let mut writer = BufWriter::new(&file);
        metro::output::json::javascript_history(history, &mut writer)?;
    }

    if let Some(ref visits) = opt.visits {
        let string = history::visits(history)?;
        let file = File::create(visits)?;
        let mut writer = BufWriter::new(&file);
        write!(writer, "{}", string)?;
    }

    Ok(())
}

pub fn main() {
    let opt = Opt::from_args();
    let level = match opt.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&opt) {
        Ok(()) => {},
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        },
    }
}
