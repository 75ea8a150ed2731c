pub mod auction;

pub use auction::IAuctionHouse;
