use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::rc::Rc;

use webmail_client::api::http::HttpApi;
use webmail_client::config::{load_config, resolve_session_path};
use webmail_client::session;
use webmail_client::store::file::FileStore;
use webmail_client::terminal::run_tui;
use webmail_client::terminal::state::App;
use webmail_client::terminal::worker::Worker;

#[derive(Parser)]
#[command(name = "webmail")]
#[command(about = "Terminal client for the webmail REST API", long_about = None)]
struct Cli {
    /// Override `base_url` from the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the mail client (default)
    Tui,

    /// Show the stored session marker
    Status,

    /// Drop the stored session marker
    Forget,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
    let store = Rc::new(FileStore::open(resolve_session_path(&cfg)?)?);

    match cli.cmd.unwrap_or(Command::Tui) {
        Command::Status => {
            match session::load(store.as_ref())? {
                Some(m) => println!(
                    "Signed in as {} (logged in: {})",
                    m.user_email, m.logged_in
                ),
                None => println!("No stored session"),
            }
            Ok(())
        }

        Command::Forget => {
            session::clear(store.as_ref())?;
            println!("Stored session cleared");
            Ok(())
        }

        Command::Tui => {
            let base_url = cli.base_url.unwrap_or_else(|| cfg.base_url.clone());
            let api = HttpApi::new(&base_url, cfg.request_timeout())?;
            let worker = Worker::spawn(Box::new(api))?;
            let app = App::new(store, cfg.demo_accounts.clone(), worker)?;
            run_tui(app)
        }
    }
}
