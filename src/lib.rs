pub mod auction;
pub mod auction_system;
pub mod clock;
pub mod config;
pub mod shell;

pub use self::auction_system::{AuctionSystem, SharedAuctionSystem};
