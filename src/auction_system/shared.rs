use super::*;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// Thread-safe handle to a single [`AuctionSystem`]
///
/// All operations go through one lock, so a bid always compares against
/// the price left by the previous accepted bid, and registrations and
/// listings can't interleave with it. Clones share the same registry.
#[derive(Clone)]
pub struct SharedAuctionSystem {
    inner: Arc<Mutex<AuctionSystem>>,
}

impl SharedAuctionSystem {
    pub fn new(system: AuctionSystem) -> Self {
        Self {
            inner: Arc::new(Mutex::new(system)),
        }
    }

    /// Direct access for callers that need several operations to be atomic
    pub fn lock(&self) -> MutexGuard<'_, AuctionSystem> {
        self.inner.lock()
    }

    pub fn register_user(&self, username: UsernameRef) -> bool {
        self.lock().register_user(username)
    }

    pub fn add_item(&self, name: &str, starting_price: Amount, duration_hours: f64) -> ItemId {
        self.lock().add_item(name, starting_price, duration_hours)
    }

    pub fn place_bid(&self, item_id: ItemIdRef, username: UsernameRef, amount: Amount) -> bool {
        self.lock().place_bid(item_id, username, amount)
    }

    pub fn try_place_bid(
        &self,
        item_id: ItemIdRef,
        username: UsernameRef,
        amount: Amount,
    ) -> Result<(), BidError> {
        self.lock().try_place_bid(item_id, username, amount)
    }

    pub fn get_item_status(&self, item_id: ItemIdRef) -> Option<ItemStatus> {
        self.lock().get_item_status(item_id)
    }

    pub fn get_all_items(&self) -> Vec<ItemId> {
        self.lock().get_all_items()
    }
}

impl From<AuctionSystem> for SharedAuctionSystem {
    fn from(system: AuctionSystem) -> Self {
        Self::new(system)
    }
}
