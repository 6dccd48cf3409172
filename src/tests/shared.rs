use super::*;
use crate::{auction::BidError, AuctionSystem, SharedAuctionSystem};
use anyhow::{format_err, Result};
use std::thread;

#[test]
fn racing_bids_keep_the_highest_amount() -> Result<()> {
    let system = SharedAuctionSystem::new(AuctionSystem::new(manual_clock()));
    let id = system.add_item("Guitar", 1.0, 1.0);

    let bidders: Vec<String> = (0..8).map(|i| format!("bidder-{i}")).collect();
    for bidder in &bidders {
        assert!(system.register_user(bidder));
    }

    let handles: Vec<_> = bidders
        .iter()
        .enumerate()
        .map(|(i, bidder)| {
            let system = system.clone();
            let id = id.clone();
            let bidder = bidder.clone();
            thread::spawn(move || {
                for step in 0..100u32 {
                    // every amount is distinct across threads
                    let amount = f64::from(step * 8 + u32::try_from(i).expect("small") + 2);
                    system.place_bid(&id, &bidder, amount);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().map_err(|_| format_err!("bidder thread panicked"))?;
    }

    let guard = system.lock();
    let item = guard.item(&id).ok_or_else(|| format_err!("item missing"))?;
    assert_eq!(item.current_price(), 801.0);
    assert_eq!(item.highest_bidder(), Some("bidder-7"));
    // every recorded bid is at most the current price
    assert!(item.bids().values().all(|amount| *amount <= item.current_price()));
    Ok(())
}

#[test]
fn clones_share_one_registry() {
    let first = SharedAuctionSystem::from(AuctionSystem::new(manual_clock()));
    let second = first.clone();

    assert!(first.register_user("alice"));
    assert!(!second.register_user("alice"));

    let id = second.add_item("Vase", 10.0, 1.0);
    assert_eq!(first.get_all_items(), vec![id.clone()]);
    assert!(first.place_bid(&id, "alice", 11.0));
    assert_eq!(
        second.get_item_status(&id).and_then(|s| s.highest_bidder),
        Some("alice".to_owned())
    );
}

#[test]
fn try_place_bid_reports_the_reason() {
    let system = SharedAuctionSystem::new(AuctionSystem::new(manual_clock()));
    system.register_user("alice");
    let id = system.add_item("Vase", 10.0, 1.0);

    assert_eq!(
        system.try_place_bid(&id, "mallory", 20.0),
        Err(BidError::UnknownUser("mallory".to_owned()))
    );
    assert_eq!(system.try_place_bid(&id, "alice", 10.0), Err(BidError::TooLow));
    assert_eq!(system.try_place_bid(&id, "alice", 10.5), Ok(()));
    assert_eq!(
        system.get_item_status(&id).map(|s| s.current_price),
        Some(10.5)
    );
}
