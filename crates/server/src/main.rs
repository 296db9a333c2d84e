#[tokio::main]
async fn main() -> anyhow::Result<()> {
    textsum_server::start().await
}
