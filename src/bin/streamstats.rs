use std::env;
use std::fs;
use std::io::{self, BufRead};
use std::process;
use std::sync::mpsc;
use std::thread;

use log::{info, warn};
use streamstats::engine::{EngineConfig, Snapshot, StatsEngine};

fn eprint_usage_and_exit() -> ! {
    let program_name = env::args().next().unwrap_or_else(|| "streamstats".to_string());
    eprintln!("usage: {} [config_path] < numbers.txt", program_name);
    process::exit(1);
}

fn load_config() -> Result<EngineConfig, String> {
    let mut args = env::args();
    args.next(); // program name

    match args.next() {
        Some(path) => {
            let contents =
                fs::read_to_string(&path).map_err(|e| format!("could not open {}: {}", path, e))?;
            EngineConfig::from_yaml(&contents).map_err(|e| format!("{}: {}", path, e))
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Parse whitespace-separated numbers from stdin and forward them
fn produce(sender: mpsc::Sender<f64>) {
    let stdin = io::stdin();
    for (line_no, line) in stdin.lock().lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stopped reading stdin: {}", e);
                return;
            }
        };
        for token in line.split_whitespace() {
            match token.parse::<f64>() {
                Ok(value) => {
                    if sender.send(value).is_err() {
                        return;
                    }
                }
                Err(_) => warn!("line {}: skipping {:?}", line_no + 1, token),
            }
        }
    }
}

fn report(snapshot: &Snapshot) {
    println!("Count: {}", snapshot.count);
    println!("Mean: {:.2}", snapshot.mean);
    println!("Min: {:.2}", snapshot.min);
    println!("Max: {:.2}", snapshot.max);
    println!("Median: {:.2}", snapshot.median);
    for (rank, value) in &snapshot.percentiles {
        println!("p{}: {:.2}", rank, value);
    }
}

fn main() {
    env_logger::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprint_usage_and_exit();
        }
    };
    let engine = match StatsEngine::with_config(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}", e);
            eprint_usage_and_exit();
        }
    };

    let (sender, receiver) = mpsc::channel();
    let producer = thread::spawn(move || produce(sender));

    let mut rejected = 0u64;
    for value in receiver {
        if let Err(e) = engine.record(value) {
            warn!("{}", e);
            rejected += 1;
        }
    }
    if producer.join().is_err() {
        warn!("producer thread panicked");
    }

    info!("recorded {} observations, rejected {}", engine.count(), rejected);
    report(&engine.cached_snapshot());
}
