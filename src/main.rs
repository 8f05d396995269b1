#[tokio::main]
async fn main() {
    encore_backend::run().await;
}
