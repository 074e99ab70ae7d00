#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dictation_backend::run().await
}
