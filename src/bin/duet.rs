#[path = "duet/app.rs"]
mod app;
#[path = "duet/args.rs"]
mod args;
#[path = "duet/config/mod.rs"]
mod config;
#[path = "duet/logging.rs"]
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::run().await
}
