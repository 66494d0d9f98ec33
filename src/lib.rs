pub mod arguments;
pub mod bumper;
pub mod error;
pub mod git;
pub mod logging;
pub mod server;
pub mod version;
