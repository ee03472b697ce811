use sporkart::{run, Config};

fn main() {
    env_logger::init();

    let config = Config::new();

    if let Err(e) = run(&config) {
        eprintln!("sporkart: {}", e);
        std::process::exit(1);
    }
}
