//! Auction registry
//!
//! Owns every listed [`Item`] and the set of registered users, and checks
//! that both exist before handing a bid over to the item itself.
mod shared;

pub use self::shared::*;

use crate::auction::{
    Amount, BidError, Item, ItemId, ItemIdRef, ItemState, Username, UsernameRef,
};
use crate::clock::{SharedClock, SystemClock};
use serde::{Serialize, Serializer};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Printed by the shell when a status lookup misses
pub const ITEM_NOT_FOUND: &str = "Item not found";

/// Longest listing duration we can represent; longer ones are capped to it
pub const MAX_LISTING_HOURS: f64 = 100.0 * 365.0 * 24.0;

const SECS_PER_HOUR: f64 = 3600.0;

pub struct AuctionSystem {
    items: HashMap<ItemId, Item>,
    item_order: Vec<ItemId>,
    users: BTreeSet<Username>,
    clock: SharedClock,
}

impl AuctionSystem {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            items: HashMap::new(),
            item_order: Vec::new(),
            users: BTreeSet::new(),
            clock,
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(SystemClock::new_shared())
    }

    pub fn register_user(&mut self, username: UsernameRef) -> bool {
        if self.users.contains(username) {
            debug!(%username, "username already registered");
            return false;
        }
        self.users.insert(username.to_owned());
        info!(%username, "user registered");
        true
    }

    pub fn is_registered(&self, username: UsernameRef) -> bool {
        self.users.contains(username)
    }

    pub fn add_item(&mut self, name: &str, starting_price: Amount, duration_hours: f64) -> ItemId {
        let id = uuid::Uuid::new_v4().to_string();
        let end_time = offset_by_hours(self.clock.now(), duration_hours);

        info!(item_id = %id, %name, starting_price, duration_hours, "item listed");
        self.items.insert(
            id.clone(),
            Item::new(id.clone(), name.to_owned(), starting_price, end_time),
        );
        self.item_order.push(id.clone());
        id
    }

    pub fn place_bid(&mut self, item_id: ItemIdRef, username: UsernameRef, amount: Amount) -> bool {
        self.try_place_bid(item_id, username, amount).is_ok()
    }

    pub fn try_place_bid(
        &mut self,
        item_id: ItemIdRef,
        username: UsernameRef,
        amount: Amount,
    ) -> Result<(), BidError> {
        let now = self.clock.now();
        let res = self.place_bid_at(item_id, username, amount, now);
        if let Err(ref reason) = res {
            debug!(%item_id, %username, amount, %reason, "bid rejected");
        }
        res
    }

    fn place_bid_at(
        &mut self,
        item_id: ItemIdRef,
        username: UsernameRef,
        amount: Amount,
        now: SystemTime,
    ) -> Result<(), BidError> {
        let item = self
            .items
            .get_mut(item_id)
            .ok_or_else(|| BidError::UnknownItem(item_id.to_owned()))?;
        if !self.users.contains(username) {
            return Err(BidError::UnknownUser(username.to_owned()));
        }
        item.try_place_bid(username, amount, now)
    }

    /// Snapshot of an item's state, computed against the current time
    pub fn get_item_status(&self, item_id: ItemIdRef) -> Option<ItemStatus> {
        let now = self.clock.now();
        self.items.get(item_id).map(|item| ItemStatus::of(item, now))
    }

    /// Ids of all listed items, in listing order
    pub fn get_all_items(&self) -> Vec<ItemId> {
        self.item_order.clone()
    }

    pub fn item(&self, item_id: ItemIdRef) -> Option<&Item> {
        self.items.get(item_id)
    }

    pub fn len(&self) -> usize {
        self.item_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_order.is_empty()
    }
}

/// `now` shifted by a (possibly fractional or negative) number of hours
///
/// Never fails: NaN counts as zero, positive offsets are capped at
/// `MAX_LISTING_HOURS`, and the result is never before the Unix epoch.
pub fn offset_by_hours(now: SystemTime, hours: f64) -> SystemTime {
    if hours.is_nan() {
        return now.max(UNIX_EPOCH);
    }
    let hours = hours.min(MAX_LISTING_HOURS);
    let offset = Duration::try_from_secs_f64(hours.abs() * SECS_PER_HOUR).unwrap_or(Duration::MAX);

    let shifted = if hours >= 0.0 {
        now.checked_add(offset).unwrap_or(now)
    } else {
        now.checked_sub(offset).unwrap_or(UNIX_EPOCH)
    };
    shifted.max(UNIX_EPOCH)
}

/// Point-in-time report on one item
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemStatus {
    pub item_id: ItemId,
    pub name: String,
    pub current_price: Amount,
    #[serde(serialize_with = "serialize_rfc3339")]
    pub end_time: SystemTime,
    pub highest_bidder: Option<Username>,
    pub status: ItemState,
}

impl ItemStatus {
    fn of(item: &Item, now: SystemTime) -> Self {
        Self {
            item_id: item.id().to_owned(),
            name: item.name().to_owned(),
            current_price: item.current_price(),
            end_time: item.end_time(),
            highest_bidder: item.highest_bidder().map(ToOwned::to_owned),
            status: item.state_at(now),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Item: {}", self.name)?;
        writeln!(f, "Current Price: ${:.2}", self.current_price)?;
        writeln!(
            f,
            "End Time: {}",
            humantime::format_rfc3339_seconds(self.end_time)
        )?;
        writeln!(
            f,
            "Highest Bidder: {}",
            self.highest_bidder
                .as_deref()
                .filter(|bidder| !bidder.is_empty())
                .unwrap_or("None")
        )?;
        write!(f, "Status: {}", self.status)
    }
}

fn serialize_rfc3339<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&humantime::format_rfc3339_seconds(*time))
}
