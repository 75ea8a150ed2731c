use super::primitives::Price;

/// Price range used whenever the keeper (re)opens an auction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuctionDefaults {
    pub start_price: Price,
    pub end_price: Price,
}

impl AuctionDefaults {
    pub fn new(start_price: Price, end_price: Price) -> Self {
        Self {
            start_price,
            end_price,
        }
    }
}
