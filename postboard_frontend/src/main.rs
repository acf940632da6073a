use anyhow::Result;
use clap::Parser;
use postboard_frontend::config::FrontendConfig;
use postboard_frontend::routes::Route;

#[derive(Parser)]
#[command(author, version, about = "Postboard desktop client")]
struct Args {
    /// Route to open on start, e.g. `/` or `/profile/<id>`
    #[arg(long, default_value = "/")]
    route: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Refuse to open a window without identity configuration.
    let config = FrontendConfig::from_env()?;
    postboard_frontend::run_frontend(&config, Route::parse(&args.route))
}
