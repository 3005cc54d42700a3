//! Transport seams for networked play.
//!
//! Two services are assumed from the hosting layer: a shared key-value
//! room store both peers can read and write, and a best-effort
//! point-to-point message channel. Neither is assumed reliable.
//!
//! `MemoryRoom` is an in-process implementation of both, with hooks to
//! drop writes and messages so handoff recovery can be exercised.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::debug;
use rustc_hash::FxHashMap;

use crate::core::{PlayerId, PlayerMap};

/// Room key holding the encoded `TurnHandoff`.
pub const TURN_KEY: &str = "turn";

/// Shared, eventually consistent key-value room state.
pub trait RoomStore {
    /// Latest value for `key` as this peer currently sees it.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Write `value`. Writes may be lost.
    fn set(&mut self, key: &str, value: Vec<u8>);
}

/// Best-effort messages to the other peer.
pub trait MessageChannel {
    /// Send `payload`. Delivery is not guaranteed.
    fn send(&mut self, payload: Vec<u8>);

    /// Next payload received, if any.
    fn receive(&mut self) -> Option<Vec<u8>>;
}

#[derive(Default)]
struct RoomInner {
    store: FxHashMap<String, Vec<u8>>,
    inboxes: PlayerMap<VecDeque<Vec<u8>>>,
    drop_writes: u32,
    drop_messages: u32,
    held: bool,
}

/// An in-process room shared by two peers.
#[derive(Clone, Default)]
pub struct MemoryRoom {
    inner: Rc<RefCell<RoomInner>>,
}

impl MemoryRoom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle for `player`, usable as both store and channel.
    #[must_use]
    pub fn endpoint(&self, player: PlayerId) -> MemoryEndpoint {
        MemoryEndpoint {
            player,
            inner: Rc::clone(&self.inner),
        }
    }

    /// Silently lose the next `count` store writes.
    pub fn drop_next_writes(&self, count: u32) {
        self.inner.borrow_mut().drop_writes = count;
    }

    /// Silently lose the next `count` messages, from either peer.
    pub fn drop_next_messages(&self, count: u32) {
        self.inner.borrow_mut().drop_messages = count;
    }

    /// While held, queued messages are not handed to receivers.
    pub fn hold_messages(&self, held: bool) {
        self.inner.borrow_mut().held = held;
    }

    /// Raw store contents, for inspection.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.borrow().store.get(key).cloned()
    }
}

/// One peer's view of a `MemoryRoom`.
pub struct MemoryEndpoint {
    player: PlayerId,
    inner: Rc<RefCell<RoomInner>>,
}

impl RoomStore for MemoryEndpoint {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.borrow().store.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Vec<u8>) {
        let mut inner = self.inner.borrow_mut();
        if inner.drop_writes > 0 {
            inner.drop_writes -= 1;
            debug!("{}: room write to {:?} lost", self.player, key);
            return;
        }
        inner.store.insert(key.to_owned(), value);
    }
}

impl MessageChannel for MemoryEndpoint {
    fn send(&mut self, payload: Vec<u8>) {
        let mut inner = self.inner.borrow_mut();
        if inner.drop_messages > 0 {
            inner.drop_messages -= 1;
            debug!("{}: message lost", self.player);
            return;
        }
        inner.inboxes[self.player.opponent()].push_back(payload);
    }

    fn receive(&mut self) -> Option<Vec<u8>> {
        let mut inner = self.inner.borrow_mut();
        if inner.held {
            return None;
        }
        inner.inboxes[self.player].pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_shared() {
        let room = MemoryRoom::new();
        let mut a = room.endpoint(PlayerId::FIRST);
        let b = room.endpoint(PlayerId::SECOND);

        a.set(TURN_KEY, vec![1, 2]);
        assert_eq!(b.get(TURN_KEY), Some(vec![1, 2]));
    }

    #[test]
    fn test_messages_reach_the_other_peer() {
        let room = MemoryRoom::new();
        let mut a = room.endpoint(PlayerId::FIRST);
        let mut b = room.endpoint(PlayerId::SECOND);

        a.send(vec![7]);
        assert_eq!(a.receive(), None);
        assert_eq!(b.receive(), Some(vec![7]));
        assert_eq!(b.receive(), None);
    }

    #[test]
    fn test_loss_injection() {
        let room = MemoryRoom::new();
        let mut a = room.endpoint(PlayerId::FIRST);
        let mut b = room.endpoint(PlayerId::SECOND);

        room.drop_next_writes(1);
        a.set(TURN_KEY, vec![1]);
        assert_eq!(room.peek(TURN_KEY), None);
        a.set(TURN_KEY, vec![2]);
        assert_eq!(room.peek(TURN_KEY), Some(vec![2]));

        room.drop_next_messages(1);
        a.send(vec![1]);
        a.send(vec![2]);
        assert_eq!(b.receive(), Some(vec![2]));
    }

    #[test]
    fn test_held_messages_arrive_later() {
        let room = MemoryRoom::new();
        let mut a = room.endpoint(PlayerId::FIRST);
        let mut b = room.endpoint(PlayerId::SECOND);

        room.hold_messages(true);
        a.send(vec![3]);
        assert_eq!(b.receive(), None);
        room.hold_messages(false);
        assert_eq!(b.receive(), Some(vec![3]));
    }
}
