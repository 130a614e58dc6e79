fn main() {
    if let Err(e) = healthassist::cli::main() {
        eprintln!("❌ {e}");
        std::process::exit(1);
    }
}
