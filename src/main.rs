use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    stepcapture_cli::cli::app::run().await
}
