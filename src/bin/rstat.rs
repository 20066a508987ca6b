extern crate rstat;

use std::process;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

use rstat::{Client, Stats};

/// Print kernel counters reported by an rstat daemon
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Host running rstatd, empty means this machine
    #[clap(long, default_value = "")]
    host: String,

    /// Port of rstatd, looked up through rpcbind when left out
    #[clap(short, long)]
    port: Option<u16>,

    /// Give up waiting for a reply after this many milliseconds
    #[clap(short, long)]
    timeout_ms: Option<u64>,

    /// Print the stats as JSON
    #[clap(long)]
    json: bool,
}

fn unix_secs(t: SystemTime) -> f64 {
    t.duration_since(UNIX_EPOCH).map(|d| d.as_secs_f64()).unwrap_or(0.0)
}

fn print_summary(stats: &Stats) {
    println!("cpu       user {} nice {} sys {} idle {}", stats.cpu_user, stats.cpu_nice, stats.cpu_sys, stats.cpu_idle);
    println!("disk      {:?}", stats.disk_transfers);
    println!("paging    in {} out {}, swaps in {} out {}", stats.pages_in, stats.pages_out, stats.page_swaps_in, stats.page_swaps_out);
    println!("system    interrupts {} context switches {}", stats.interrupts, stats.context_switches);
    println!("net in    packets {} errors {}", stats.net_in_packets, stats.net_in_errors);
    println!("net out   packets {} errors {} collisions {}", stats.net_out_packets, stats.net_out_errors, stats.net_collisions);
    println!("load      {} {} {}", stats.load_average[0], stats.load_average[1], stats.load_average[2]);
    println!("boot time {:.6}", unix_secs(stats.boot_time));
    println!("curr time {:.6}", unix_secs(stats.curr_time));
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut client = Client::new(&args.host);
    client.port = args.port;
    client.timeout = args.timeout_ms.map(Duration::from_millis);

    let stats = match client.read_stats() {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("rstat: failed to serialize stats: {}", e);
                process::exit(1);
            }
        }
    } else {
        print_summary(&stats);
    }
}
