pub mod account;
pub mod intent;
pub mod money;
pub mod payload;
pub mod ports;
pub mod transaction;
