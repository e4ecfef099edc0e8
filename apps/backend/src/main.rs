#[tokio::main]
async fn main() -> anyhow::Result<()> {
    language_quiz_backend::run().await
}
