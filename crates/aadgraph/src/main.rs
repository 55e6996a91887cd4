//! `aadgraph` executable.

fn main() {
    aadgraph_cli::init_tracing();
    let code = aadgraph_cli::run_cli(std::env::args().collect());
    std::process::exit(code);
}
