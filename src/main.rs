//! Editor Portfolio - binary entry point
//! Delegates to the library for all app logic.

#[tokio::main]
async fn main() {
    editor_portfolio::run().await;
}
