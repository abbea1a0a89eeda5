mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use afib_cdss::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
