/*
 * Responsibility
 * - tokio runtime startup
 * - hand off to app::run() (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    auth_gates::app::run().await
}
