use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::time::Instant;

use uartsim::RunOptions;
use uartsim_uart::UartConfig;

fn parse_value<T: FromStr>(flag: &str, value: Option<String>) -> T {
    match value.as_deref().map(str::parse) {
        Some(Ok(parsed)) => parsed,
        _ => {
            eprintln!("{flag} expects a number");
            process::exit(2);
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut uart = UartConfig::default();
    let mut options = RunOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--vcd" => match args.next() {
                Some(path) => options.vcd = Some(PathBuf::from(path)),
                None => {
                    eprintln!("unknown argument \"{arg}\"");
                    process::exit(2);
                }
            },
            "--clock-hz" => uart.clock_hz = parse_value(&arg, args.next()),
            "--baud" => uart.baud = parse_value(&arg, args.next()),
            "--max-cycles" => options.max_cycles = parse_value(&arg, args.next()),
            other => {
                eprintln!("unknown argument \"{other}\"");
                process::exit(2);
            }
        }
    }
    options.uart = uart;

    let start = Instant::now();
    let outcome = match uartsim::run(options) {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("error: {err:#}");
            process::exit(1);
        }
    };
    let elapsed = start.elapsed().as_nanos();
    let cycles = outcome.report.cycles;

    if let Some(code) = outcome.exit_code {
        log::info!("Program returned {code}");
    }
    println!("finished on cycle {cycles}, rc={}", outcome.rc());
    println!(
        "took {elapsed}ns = {}ns/cyc",
        elapsed / u128::from(cycles.max(1))
    );

    process::exit(outcome.rc());
}
