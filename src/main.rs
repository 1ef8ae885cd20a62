use anyhow::Result;
use flashwords_server::{bootstrap, config::Config, server::FlashWordsServer};
use std::process::exit;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::get();

    bootstrap::ensure_word_lists(&config.root)?;

    let server = FlashWordsServer::bind(&config)?;

    println!("FlashWords server started on http://{}", server.addr());
    println!("Serving {}", server.root().display());
    println!("Open http://{} in your browser", server.addr());
    println!("Press Ctrl-C to stop");

    let stop = server.stop_handle();
    ctrlc::set_handler(move || {
        println!("\nStopping server...");
        stop.stop();
    })?;

    server.serve()?;

    println!("Server stopped");

    Ok(())
}
