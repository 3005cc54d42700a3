//! Wire types exchanged between peers.
//!
//! Everything is bincode-encoded. A payload that fails to decode is
//! reported as `NetError::Decode`, and one naming a seat that is not at
//! the table as `NetError::UnknownSeat`; the peer logs either and carries
//! on.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::core::{NetError, PlayerId};
use crate::ledger::LedgerSnapshot;
use crate::turn::TurnToken;

/// The authoritative turn assignment kept in the room store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnHandoff {
    pub turn_owner: PlayerId,
    pub turn_token: TurnToken,
}

/// Point-to-point messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeerMessage {
    /// The sender's public state. `sequence` increases per sender;
    /// `turn_token` is the turn the sender had committed when it sent.
    Snapshot {
        sequence: u64,
        turn_token: TurnToken,
        snapshot: LedgerSnapshot,
    },
    /// Copy of a handoff just written to the room store. Only a hint:
    /// the store stays authoritative.
    Handoff(TurnHandoff),
    /// The sender reached the win condition.
    GameOutcome { winner: PlayerId },
}

impl TurnHandoff {
    /// Reject a handoff to a seat that is not at the table.
    pub fn checked(self) -> Result<Self, NetError> {
        check_seat(self.turn_owner)?;
        Ok(self)
    }
}

impl PeerMessage {
    /// Reject a message naming a seat that is not at the table.
    pub fn checked(self) -> Result<Self, NetError> {
        match &self {
            PeerMessage::Handoff(handoff) => check_seat(handoff.turn_owner)?,
            PeerMessage::GameOutcome { winner } => check_seat(*winner)?,
            PeerMessage::Snapshot { .. } => {}
        }
        Ok(self)
    }
}

fn check_seat(player: PlayerId) -> Result<(), NetError> {
    if player.is_seat() {
        Ok(())
    } else {
        Err(NetError::UnknownSeat(player.0))
    }
}

pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, NetError> {
    bincode::serialize(value).map_err(|e| NetError::Encode(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, NetError> {
    bincode::deserialize(bytes).map_err(|e| NetError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_message_keeps_fields() {
        let msg = PeerMessage::Snapshot {
            sequence: 4,
            turn_token: TurnToken(9),
            snapshot: LedgerSnapshot {
                hand_count: 6,
                owned_formulas: vec!["H2O".into(), "NaCl".into()],
            },
        };
        let bytes = encode(&msg).unwrap();
        assert_eq!(decode::<PeerMessage>(&bytes).unwrap(), msg);
    }

    #[test]
    fn test_unknown_seat_is_rejected() {
        let handoff = TurnHandoff {
            turn_owner: PlayerId(7),
            turn_token: TurnToken(9),
        };
        assert_eq!(handoff.checked(), Err(NetError::UnknownSeat(7)));
        assert_eq!(
            PeerMessage::Handoff(handoff).checked(),
            Err(NetError::UnknownSeat(7))
        );
        assert_eq!(
            PeerMessage::GameOutcome {
                winner: PlayerId(2)
            }
            .checked(),
            Err(NetError::UnknownSeat(2))
        );

        let seated = TurnHandoff {
            turn_owner: PlayerId::SECOND,
            turn_token: TurnToken(9),
        };
        assert_eq!(seated.checked(), Ok(seated));
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let err = decode::<TurnHandoff>(&[0xff]).unwrap_err();
        assert!(matches!(err, NetError::Decode(_)));
    }
}
