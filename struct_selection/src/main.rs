use std::io;
use struct_selection::{cli, input};

fn main() {
    if let Err(e) = run() {
        log::error!("{}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            log::error!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let Some(config) = cli::initialize()? else {
        return Ok(()); // An early-exit argument was passed.
    };
    let stdout = io::stdout().lock();
    let summary = match &config.input {
        Some(path) => {
            log::info!("Reading traces from {}", path.display());
            input::run(input::open_input(path)?, stdout, config.flush_each_case)?
        }
        None => input::run(io::stdin().lock(), stdout, config.flush_each_case)?,
    };
    log::info!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
