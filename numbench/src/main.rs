fn main() {
    if let Err(e) = numbench::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
