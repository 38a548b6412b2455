use crate::infra::cli_config;
use clap::Args;
use postcovid::error::AppError;
use postcovid::session::{FileSessionStore, MockAuthenticator, SessionStore};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct LoginArgs {
    /// NHS email address (@nhs.uk or @nhs.net)
    #[arg(short, long)]
    email: String,
    /// Password (any non-empty value is accepted)
    #[arg(short, long)]
    password: String,
}

pub(crate) async fn run_login(args: LoginArgs) -> Result<(), AppError> {
    let config = cli_config()?;
    let authenticator = MockAuthenticator::new(config.session.login_latency);
    let user = authenticator.login(&args.email, &args.password).await?;

    let store = FileSessionStore::new(&config.session.store_dir);
    store.save(&user)?;
    info!(user_id = %user.id, path = %store.path().display(), "session stored");

    println!("Signed in as {} <{}> ({:?})", user.name, user.email, user.role);
    Ok(())
}

pub(crate) fn run_logout() -> Result<(), AppError> {
    let config = cli_config()?;
    FileSessionStore::new(&config.session.store_dir).clear()?;
    println!("Signed out");
    Ok(())
}

pub(crate) fn run_whoami() -> Result<(), AppError> {
    let config = cli_config()?;
    match FileSessionStore::new(&config.session.store_dir).load()? {
        Some(user) => println!(
            "{} <{}> ({:?}, id {})",
            user.name, user.email, user.role, user.id
        ),
        None => println!("Not signed in; assessments are attributed to the anonymous clinician"),
    }
    Ok(())
}
