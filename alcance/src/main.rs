use alcance::app::cli::AlcanceApp;
use clap::Parser;

fn main() {
    env_logger::init();
    log::debug!("cwd: {:?}", std::env::current_dir());
    let args = AlcanceApp::parse();
    if let Err(e) = args.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
