// Entrypoint for the CLI application.
// - Keeps `main` small: open the store and hand it to the UI loop.
// - The pool is closed exactly once, after the loop returns — whether the
//   user picked Exit or a prompt error ended the session.

use staffdesk_cli::{db::Store, ui::main_menu};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Open the store configured by environment variable `DATABASE_URL`
    // or default to a SQLite file in the user data directory. See
    // `db::Store::from_env`.
    let store = Store::from_env().await?;

    // Start the interactive menu. This call blocks until the user exits.
    let outcome = main_menu(&store).await;
    store.close().await;
    outcome
}
