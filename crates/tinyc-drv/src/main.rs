use clap::Parser as _;
use tinyc_drv::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = tinyc_drv::run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
