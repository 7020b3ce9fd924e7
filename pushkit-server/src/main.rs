#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pushkit_server::start_server().await
}
