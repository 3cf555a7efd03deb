extern crate clap;

use crate::clap::Parser;
use indexed_pq::cli::*;

pub fn main() {
    if let Err(error) = Cli::parse().run() {
        eprintln!("[error] {error}");
        std::process::exit(1);
    }
}
