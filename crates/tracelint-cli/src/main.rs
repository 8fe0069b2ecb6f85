use clap::Parser;
use tracelint::{Cli, run};

fn main() {
    // Missing or malformed arguments print usage and exit 1; callers
    // distinguish validation failures (1 with a report on stdout) from
    // infrastructure failures (2) by the presence of the report.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    }
}
