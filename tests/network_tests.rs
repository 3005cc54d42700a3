//! Networked play integration tests.
//!
//! Two `NetworkedGame` peers share an in-process `MemoryRoom`. The room
//! can lose store writes and messages, which drives the recovery paths.

use compound_ccg::core::{ActionRejected, GameConfig, PlayerId};
use compound_ccg::games::standard;
use compound_ccg::ledger::LedgerSnapshot;
use compound_ccg::net::message::{encode, PeerMessage, TurnHandoff};
use compound_ccg::net::{
    MemoryEndpoint, MemoryRoom, MessageChannel, NetworkedGame, PeerEvent, RoomStore, TURN_KEY,
};
use compound_ccg::rules::first_available_compound;
use compound_ccg::turn::{GameStatus, TurnOwner, TurnToken};

type Peer = NetworkedGame<MemoryEndpoint>;

const TIMEOUT: u32 = 5;

fn config() -> GameConfig {
    GameConfig::default()
        .with_seed(17)
        .with_recovery_timeout(TIMEOUT)
}

fn setup(config: GameConfig) -> (MemoryRoom, Peer, Peer) {
    let room = MemoryRoom::new();
    let a = NetworkedGame::new(
        PlayerId::FIRST,
        standard::catalog(),
        config.clone(),
        room.endpoint(PlayerId::FIRST),
    )
    .unwrap();
    let b = NetworkedGame::new(
        PlayerId::SECOND,
        standard::catalog(),
        config,
        room.endpoint(PlayerId::SECOND),
    )
    .unwrap();
    (room, a, b)
}

/// Tick both peers `rounds` times, collecting their events.
fn run(a: &mut Peer, b: &mut Peer, rounds: usize) -> (Vec<PeerEvent>, Vec<PeerEvent>) {
    let (mut ea, mut eb) = (Vec::new(), Vec::new());
    for _ in 0..rounds {
        ea.extend(a.tick());
        eb.extend(b.tick());
    }
    (ea, eb)
}

/// Started game with `FIRST` to move.
fn started() -> (MemoryRoom, Peer, Peer) {
    let (room, mut a, mut b) = setup(config());
    a.start(PlayerId::FIRST);
    run(&mut a, &mut b, 2);
    (room, a, b)
}

fn assert_steady(a: &Peer, b: &Peer) {
    assert_eq!(a.turn().token(), b.turn().token());
    assert_eq!(a.owner().flipped(), b.owner());
    assert_ne!(a.owner(), TurnOwner::Unassigned);
    assert!(!a.handoff_pending());
    assert!(!b.handoff_pending());
}

// =============================================================================
// Handoff
// =============================================================================

#[test]
fn test_handoff_round_trip() {
    let (_room, mut a, mut b) = started();
    assert_steady(&a, &b);
    assert_eq!(a.owner(), TurnOwner::Local);

    assert_eq!(a.end_turn(), Ok(TurnToken(2)));
    let (_, eb) = run(&mut a, &mut b, 2);

    assert!(eb.contains(&PeerEvent::TurnStarted(TurnToken(2))));
    assert_eq!(b.owner(), TurnOwner::Local);
    assert_eq!(b.ledger().hand().len(), 5);
    assert_steady(&a, &b);
}

#[test]
fn test_stale_handoff_is_ignored() {
    let (room, mut a, mut b) = started();
    a.end_turn().unwrap();
    run(&mut a, &mut b, 2);

    // A late write of the first handoff lands after the second.
    let mut late = room.endpoint(PlayerId::FIRST);
    let stale = TurnHandoff {
        turn_owner: PlayerId::FIRST,
        turn_token: TurnToken(1),
    };
    late.set(TURN_KEY, encode(&stale).unwrap());
    late.send(encode(&PeerMessage::Handoff(stale)).unwrap());
    run(&mut a, &mut b, 3);

    assert_eq!(a.owner(), TurnOwner::Remote);
    assert_eq!(b.owner(), TurnOwner::Local);
    assert_eq!(b.turn().token(), TurnToken(2));
}

#[test]
fn test_ownership_stays_exclusive_over_many_turns() {
    let (_room, mut a, mut b) = started();

    for turn in 0..12 {
        assert_steady(&a, &b);
        let acting = if a.owner() == TurnOwner::Local { &mut a } else { &mut b };
        assert_eq!(acting.end_turn(), Ok(TurnToken(turn + 2)));
        run(&mut a, &mut b, 2);
    }
    assert_steady(&a, &b);
    assert_eq!(a.turn().token(), TurnToken(13));
}

#[test]
fn test_only_the_owner_may_act() {
    let (_room, mut a, mut b) = started();
    let hand = b.ledger().hand().to_vec();

    assert_eq!(b.end_turn(), Err(ActionRejected::NotYourTurn));
    assert_eq!(b.discard_and_redraw(&hand), Err(ActionRejected::NotYourTurn));

    a.end_turn().unwrap();
    // Ended but not yet acknowledged: neither side may act.
    assert_eq!(a.end_turn(), Err(ActionRejected::NotYourTurn));
    assert_eq!(b.end_turn(), Err(ActionRejected::NotYourTurn));
}

// =============================================================================
// Recovery
// =============================================================================

#[test]
fn test_lost_store_write_recovers() {
    let (room, mut a, mut b) = started();
    room.drop_next_writes(1);
    a.end_turn().unwrap();

    let (ea, _) = run(&mut a, &mut b, TIMEOUT as usize + 3);

    assert!(ea.contains(&PeerEvent::Recovered {
        owner: TurnOwner::Remote,
        token: TurnToken(2),
    }));
    assert_eq!(b.owner(), TurnOwner::Local);
    assert_steady(&a, &b);
}

#[test]
fn test_lost_write_and_hint_recover() {
    let (room, mut a, mut b) = started();
    room.drop_next_writes(1);
    room.drop_next_messages(1);
    a.end_turn().unwrap();

    // B has heard nothing before the timeout.
    run(&mut a, &mut b, TIMEOUT as usize - 1);
    assert_eq!(b.owner(), TurnOwner::Remote);

    run(&mut a, &mut b, 4);
    assert_eq!(b.owner(), TurnOwner::Local);
    assert_steady(&a, &b);
}

#[test]
fn test_receiver_takes_turn_when_store_stays_silent() {
    let (room, mut a, mut b) = started();
    // The end-of-turn write and the sender's first rewrite are both lost.
    room.drop_next_writes(2);
    a.end_turn().unwrap();

    let (_, eb) = run(&mut a, &mut b, TIMEOUT as usize + 4);

    assert!(eb.contains(&PeerEvent::Recovered {
        owner: TurnOwner::Local,
        token: TurnToken(2),
    }));
    assert_eq!(b.owner(), TurnOwner::Local);
    assert_steady(&a, &b);
}

#[test]
fn test_lost_opening_write_recovers() {
    let (room, mut a, mut b) = setup(config());
    room.drop_next_writes(1);
    a.start(PlayerId::SECOND);

    run(&mut a, &mut b, TIMEOUT as usize + 3);
    assert_eq!(b.owner(), TurnOwner::Local);
    assert_steady(&a, &b);
}

#[test]
fn test_handoff_to_unknown_seat_is_ignored() {
    let (room, mut a, mut b) = started();

    let mut rogue = room.endpoint(PlayerId::SECOND);
    let bogus = TurnHandoff {
        turn_owner: PlayerId(7),
        turn_token: TurnToken(9),
    };
    rogue.set(TURN_KEY, encode(&bogus).unwrap());
    rogue.send(encode(&PeerMessage::Handoff(bogus)).unwrap());
    rogue.send(encode(&PeerMessage::GameOutcome { winner: PlayerId(7) }).unwrap());

    let (ea, eb) = run(&mut a, &mut b, TIMEOUT as usize * 4);
    assert!(ea.is_empty());
    assert!(eb.is_empty());
    assert_eq!(a.owner(), TurnOwner::Local);
    assert_eq!(a.turn().token(), TurnToken(1));
    assert_eq!(a.status(), GameStatus::InProgress);
    assert_steady(&a, &b);

    // The next real handoff overwrites the bad value and play continues.
    a.end_turn().unwrap();
    run(&mut a, &mut b, 2);
    assert_eq!(b.owner(), TurnOwner::Local);
    assert_steady(&a, &b);
}

// =============================================================================
// Snapshots
// =============================================================================

#[test]
fn test_snapshot_shows_counts_only() {
    let (_room, mut a, mut b) = started();
    a.end_turn().unwrap();
    run(&mut a, &mut b, 2);

    let view = a.opponent_view();
    assert_eq!(view.hand_count as usize, b.ledger().hand().len());
    assert_eq!(view.compound_count(), b.ledger().compound_count());
}

#[test]
fn test_stale_snapshot_is_ignored() {
    let (room, mut a, mut b) = started();
    a.end_turn().unwrap();
    run(&mut a, &mut b, 2);
    let before = a.opponent_view().clone();

    let mut forged = room.endpoint(PlayerId::SECOND);
    let old = PeerMessage::Snapshot {
        sequence: 1,
        turn_token: TurnToken(2),
        snapshot: LedgerSnapshot {
            hand_count: 99,
            owned_formulas: Vec::new(),
        },
    };
    forged.send(encode(&old).unwrap());
    let (ea, _) = run(&mut a, &mut b, 1);

    assert!(!ea.contains(&PeerEvent::OpponentUpdated));
    assert_eq!(a.opponent_view(), &before);
}

#[test]
fn test_malformed_message_is_dropped() {
    let (room, mut a, mut b) = started();
    room.endpoint(PlayerId::SECOND).send(vec![0xde, 0xad]);

    let (ea, _) = run(&mut a, &mut b, 1);
    assert!(ea.is_empty());
    assert_steady(&a, &b);
}

// =============================================================================
// End-to-End
// =============================================================================

fn play_turn(peer: &mut Peer) {
    while let Some(found) = first_available_compound(peer.ledger().hand(), peer.catalog()) {
        if peer.create_compound(&found.consumed).is_err() || peer.turn().is_game_over() {
            return;
        }
    }
    let hand = peer.ledger().hand().to_vec();
    if hand.len() >= 8 {
        peer.discard_and_redraw(&hand).unwrap();
    } else {
        peer.end_turn().unwrap();
    }
}

#[test]
fn test_networked_game_reaches_agreed_outcome() {
    let (_room, mut a, mut b) = setup(config().with_win_condition(4));
    a.start(PlayerId::FIRST);

    for _ in 0..2000 {
        run(&mut a, &mut b, 1);
        if a.turn().is_game_over() && b.turn().is_game_over() {
            break;
        }
        for peer in [&mut a, &mut b] {
            if peer.turn().ensure_can_act().is_ok() {
                play_turn(peer);
            }
        }
    }

    let GameStatus::GameOver { winner } = a.status() else {
        panic!("no winner");
    };
    assert_eq!(b.status(), a.status());
    let (win, lose) = if winner == a.me() { (&a, &b) } else { (&b, &a) };
    assert_eq!(win.ledger().compound_count(), 4);
    assert!(lose.ledger().compound_count() < 4);
}
