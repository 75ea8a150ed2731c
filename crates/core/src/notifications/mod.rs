pub mod event;
pub mod listener;

pub use event::{AuctionEvent, AuctionNotification};
pub use listener::{BoxLogStream, NotificationListener};
