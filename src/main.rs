fn main() {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    mtwatch::app::logging::init();
    if let Err(err) = mtwatch::app::cli::run() {
        eprintln!("error: {}", err.message);
        std::process::exit(1);
    }
}
