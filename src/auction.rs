use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::time::SystemTime;
use thiserror::Error;
use tracing::debug;

pub type ItemId = String;
pub type ItemIdRef<'s> = &'s str;
pub type Username = String;
pub type UsernameRef<'s> = &'s str;
pub type Amount = f64;

/// Why a bid was not accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BidError {
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),
    #[error("unknown user: {0}")]
    UnknownUser(Username),
    #[error("auction already closed")]
    AuctionClosed,
    #[error("bid is too low")]
    TooLow,
}

/// Derived status of an item relative to some point in time
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ItemState {
    Active,
    Ended,
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ItemState::Active => "Active",
            ItemState::Ended => "Ended",
        })
    }
}

/// A single auction lot
///
/// `current_price` only ever moves up, and only through an accepted bid.
/// `highest_bidder` is set exactly when some bid has been accepted.
#[derive(Clone, Debug)]
pub struct Item {
    id: ItemId,
    name: String,
    starting_price: Amount,
    current_price: Amount,
    end_time: SystemTime,
    bids: BTreeMap<Username, Amount>,
    highest_bidder: Option<Username>,
}

impl Item {
    pub fn new(id: ItemId, name: String, starting_price: Amount, end_time: SystemTime) -> Self {
        Self {
            id,
            name,
            starting_price,
            current_price: starting_price,
            end_time,
            bids: BTreeMap::new(),
            highest_bidder: None,
        }
    }

    pub fn id(&self) -> ItemIdRef {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn starting_price(&self) -> Amount {
        self.starting_price
    }

    pub fn current_price(&self) -> Amount {
        self.current_price
    }

    pub fn end_time(&self) -> SystemTime {
        self.end_time
    }

    pub fn highest_bidder(&self) -> Option<UsernameRef> {
        self.highest_bidder.as_deref()
    }

    /// Most recent accepted amount from `bidder`, if any
    pub fn bid_of(&self, bidder: UsernameRef) -> Option<Amount> {
        self.bids.get(bidder).copied()
    }

    pub fn bids(&self) -> &BTreeMap<Username, Amount> {
        &self.bids
    }

    pub fn is_open_at(&self, now: SystemTime) -> bool {
        now < self.end_time
    }

    pub fn state_at(&self, now: SystemTime) -> ItemState {
        if self.is_open_at(now) {
            ItemState::Active
        } else {
            ItemState::Ended
        }
    }

    pub fn place_bid(&mut self, bidder: UsernameRef, amount: Amount, now: SystemTime) -> bool {
        self.try_place_bid(bidder, amount, now).is_ok()
    }

    pub fn try_place_bid(
        &mut self,
        bidder: UsernameRef,
        amount: Amount,
        now: SystemTime,
    ) -> Result<(), BidError> {
        self.ensure_valid_bid(amount, now)?;

        self.bids.insert(bidder.to_owned(), amount);
        self.current_price = amount;
        self.highest_bidder = Some(bidder.to_owned());
        debug!(item_id = %self.id, %bidder, amount, "bid accepted");
        Ok(())
    }

    fn ensure_valid_bid(&self, amount: Amount, now: SystemTime) -> Result<(), BidError> {
        use BidError::*;

        if !self.is_open_at(now) {
            return Err(AuctionClosed);
        }
        // NaN compares as `None`, so it never counts as an improvement
        if amount.partial_cmp(&self.current_price) != Some(Ordering::Greater) {
            return Err(TooLow);
        }
        Ok(())
    }
}
