pub mod admin;
pub mod platform;
pub mod trade;
pub mod profits;

pub use admin::*;
pub use platform::*;
pub use trade::*;
pub use profits::*;
