//! offline pre-processing of a GTFS snapshot into the stop adjacency table read
//! by the alcance isochrone engine at request time.
use alcance_gtfs::schedule::app::GtfsApp;
use clap::Parser;

fn main() {
    env_logger::init();
    let args = GtfsApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
