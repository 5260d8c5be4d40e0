// Server module
// Listener setup, connection handling, the accept loop and shutdown signals

pub mod connection;
pub mod listener;
pub mod server_loop;
pub mod shutdown;

pub use listener::create_listener;
pub use server_loop::run_server_loop;
pub use shutdown::start_signal_handler;
