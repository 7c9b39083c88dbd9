fn main() {
    if let Err(e) = chopper_lib::run() {
        eprintln!("chopper: {e}");
        std::process::exit(1);
    }
}
