// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive record
// manager.
//
// Module responsibilities:
// - `db`: Encapsulates the database boundary (connection bootstrap,
//   migrations, one method per SQL statement).
// - `table`: Renders query results as fixed-column text tables.
// - `ui`: Implements the menu loop and prompt flows and delegates every
//   read and write to `db`.
//
// Keeping this separation makes it possible to test the store and the
// rendering without a terminal attached.
pub mod db;
pub mod table;
pub mod ui;
