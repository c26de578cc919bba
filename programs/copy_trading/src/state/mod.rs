pub mod balance;
pub mod protocol;
pub mod platform;
pub mod trader_account;

pub use balance::*;
pub use protocol::*;
pub use platform::*;
pub use trader_account::*;
