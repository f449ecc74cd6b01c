use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use clap::Parser;
use session::{ClickOutcome, Session};
use tracing::debug;

mod grid;

#[derive(Parser, Debug)]
#[command(name = "sortgrid", about = "Generate random numbers and watch them quicksort")]
struct Args {
    /// Seed for the random generator; drawn from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Delay between rendered swap frames, in milliseconds
    #[arg(long, default_value_t = 300)]
    delay_ms: u64,

    /// Generate this many numbers immediately instead of prompting
    #[arg(long)]
    count: Option<usize>,
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let args = Args::parse();
    let session = match args.seed {
        Some(seed) => Session::with_seed(seed),
        None => Session::new(),
    };

    run(session, args);
}

fn run(mut session: Session, args: Args) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut pending_count = args.count;
    let delay = Duration::from_millis(args.delay_ms);

    loop {
        if session.values().is_empty() {
            let count = match pending_count.take() {
                Some(count) => count,
                None => match prompt_count(&mut lines) {
                    Some(count) => count,
                    None => return,
                },
            };
            if let Err(err) = session.generate(count) {
                println!("{err}");
                continue;
            }
        }

        grid::print_grid(session.values(), None);
        println!(
            "commands: sort ({}) | click <index> | reset | quit",
            session.next_direction().label()
        );
        print!("> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => return,
        };

        match line.trim() {
            "sort" => run_sort(&mut session, delay),
            "reset" => {
                if let Err(err) = session.reset() {
                    println!("{err}");
                }
            }
            "quit" | "exit" => return,
            "" => {}
            command => {
                if let Some(rest) = command.strip_prefix("click ") {
                    handle_click(&mut session, rest.trim());
                } else {
                    println!("unknown command: {command}");
                }
            }
        }
    }
}

fn prompt_count(lines: &mut impl Iterator<Item = io::Result<String>>) -> Option<usize> {
    loop {
        print!("How many numbers to display: ");
        let _ = io::stdout().flush();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => return None,
        };
        match line.trim().parse::<usize>() {
            Ok(count) => return Some(count),
            Err(_) => println!("Please enter a valid number."),
        }
    }
}

fn handle_click(session: &mut Session, arg: &str) {
    let index = match arg.parse::<usize>() {
        Ok(index) => index,
        Err(_) => {
            println!("click needs a cell index, e.g. `click 0`");
            return;
        }
    };

    match session.click(index) {
        Ok(ClickOutcome::Regenerated) => {}
        Ok(ClickOutcome::AboveThreshold(threshold)) => {
            println!("Please select a value smaller or equal to {threshold}.");
        }
        Err(err) => println!("{err}"),
    }
}

/// Runs the sort on the session's worker thread and animates every swap:
/// mark the two active cells, wait the display delay, show the post-swap
/// state. The local frame mirrors the worker's slice swap by swap.
fn run_sort(session: &mut Session, delay: Duration) {
    let mut frame = session.values().to_vec();
    let worker = match session.start_sort() {
        Ok(worker) => worker,
        Err(err) => {
            println!("{err}");
            return;
        }
    };

    for event in worker.events() {
        frame.swap(event.a, event.b);
        grid::print_grid(&frame, Some((event.a, event.b)));
        thread::sleep(delay);
    }

    match worker.wait() {
        Ok(finished) => {
            debug!(swaps = finished.swap_count, "animation done");
            session.finish_sort(finished);
            println!("sorted {}; next run sorts {}", frame.len(), session.next_direction().label());
        }
        Err(err) => println!("{err}"),
    }
}
