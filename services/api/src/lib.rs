mod assess;
mod cli;
mod infra;
mod routes;
mod server;
mod session;

use postcovid::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
