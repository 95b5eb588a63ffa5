use doxystub::cli;

fn main() -> anyhow::Result<()> {
    if let Err(e) = cli::run() {
        let msg = e.to_string();
        // The missing-tool banner has already been printed to stderr; avoid
        // repeating it as an error object.
        if msg.contains("doxygen is not installed") {
            std::process::exit(1);
        }
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
    Ok(())
}
