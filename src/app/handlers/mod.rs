pub mod session;

pub use session::SessionHandler;
