use clap::Parser;
use dotenv::dotenv;
use init_settings::InitSettings;
use jamf_init::args::Args;
use jamf_init::init::run_initialization;
use jamf_init::logging::set_logging;
use std::process;
use tracing::info;

const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();
    let args = Args::parse();
    let (settings, generated_password) = args.to_settings();
    let exit_code = run(settings, generated_password).await;
    process::exit(exit_code);
}

// The logging guard must drop before process::exit so file logs are flushed.
async fn run(settings: InitSettings, generated_password: Option<String>) -> i32 {
    let _guard = match set_logging(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error setting up logging - {}", e);
            return 1;
        }
    };

    if let Some(password) = &generated_password {
        info!(
            func = "run",
            package = PACKAGE_NAME,
            "generated a random admin password, save it in a secure location"
        );
        println!("\nGenerated Password: {}\n", password);
    }

    let outcome = run_initialization(settings).await;
    outcome.exit_code()
}
