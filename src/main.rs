fn main() {
    match flavour_fusion_lib::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Flavour Fusion failed to start: {}", e);
            std::process::exit(1);
        }
    }
}
