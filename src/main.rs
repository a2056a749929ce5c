fn main() {
    if let Err(err) = mill_intake::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
