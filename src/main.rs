mod logger;

use rps_ping_sweep::{SweepBuilder, SweepReport, Strategy, parse_targets};
use std::io::Read;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = logger::init() {
        eprintln!("failed to install logger: {e}");
    }

    let mut targets: Vec<String> = std::env::args().skip(1).collect();
    if targets.is_empty() {
        let mut text = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut text) {
            eprintln!("failed to read targets from stdin: {e}");
            return ExitCode::FAILURE;
        }
        targets = parse_targets(&text);
    }

    let mut builder = SweepBuilder::default();
    match Strategy::probe(&builder.transport_options()) {
        Ok(strategy) => builder.set_strategy(strategy),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }

    let reports = match builder.build().and_then(|sweep| sweep.run(&targets)) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{:30} {:>5} {:>8} {:>8} {:>8}", "addr", "loss", "mint", "maxt", "avgt");
    for report in &reports {
        print_report(report);
    }
    ExitCode::SUCCESS
}

fn print_report(report: &SweepReport) {
    let ms = |t: Option<f64>| t.map_or_else(|| "-".to_string(), |t| format!("{t:.3}"));
    println!(
        "{:30} {:>5.2} {:>8} {:>8} {:>8}",
        report.addr,
        report.loss,
        ms(report.mint),
        ms(report.maxt),
        ms(report.avgt)
    );
}
