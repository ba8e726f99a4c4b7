//! # Telecommand module
//!
//! This module provides telecommand functionality to the communications
//! interface. A telecommand is any instruction given to the drive executable,
//! most commonly an operator input sample.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Drive input telecommands
pub mod drive;

/// Raw gamepad state telecommands
pub mod pad;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{self, Value};
use thiserror::Error;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the drive executable by the
/// operator.
#[derive(Debug, Serialize, Deserialize)]
pub struct Tc {
    /// The type of the telecommand
    pub tc_type: TcType,

    /// The payload associated with this TC
    pub payload: TcPayload,
}

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

static TYPE_HAS_NO_PAYLOAD: [TcType; 4] = [
    TcType::None,
    TcType::Heartbeat,
    TcType::MakeSafe,
    TcType::MakeUnsafe,
];

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Telecommand types.
///
/// The type is used to identify the purpose of the telecommand, and should be
/// used by the executable's telecommand processor to determine where to send
/// the command.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone, Copy)]
pub enum TcType {
    None,
    Heartbeat,
    MakeSafe,
    MakeUnsafe,
    /// An already-normalised drive input, see [`drive::DriveInput`].
    Drive,
    /// A raw gamepad sample, see [`pad::PadState`].
    Pad,
    /// A gyro heading update, see [`drive::HeadingUpdate`].
    Heading,
}

/// Telecommand payload.
///
/// The payload only indicates which serialisation format the data is in. It
/// is up to the user to properly deserialise the data contained within it,
/// usually with [`Tc::parse_payload`].
#[derive(Debug, Serialize, Deserialize)]
pub enum TcPayload {
    None,
    Json(String),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("TC has an invalid type ({0})")]
    InvalidType(String),

    #[error("TC of type {0:?} is expected to have a payload but it doesn't")]
    MissingPayload(TcType),

    #[error("TC payload could not be deserialised: {0}")]
    InvalidPayload(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {
    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        // Parse the JSON string into a value
        let val: Value = match serde_json::from_str(json_str) {
            Ok(v) => v,
            Err(e) => return Err(TcParseError::InvalidJson(e)),
        };

        // Get the type of the TC
        let type_str = match val["type"].as_str() {
            Some(s) => s,
            None => {
                return Err(TcParseError::InvalidType(String::from(
                    "Expected \"type\" to be a string",
                )))
            }
        };
        let tc_type = match TcType::from_str(type_str) {
            Some(t) => t,
            None => {
                return Err(TcParseError::InvalidType(format!(
                    "{} is not a recognised TC type",
                    type_str
                )))
            }
        };

        // Get the payload. If it's null and the type does not have a payload
        // then an error is returned
        if val["payload"].is_null() {
            if TYPE_HAS_NO_PAYLOAD.contains(&tc_type) {
                return Ok(Tc {
                    tc_type,
                    payload: TcPayload::None,
                });
            }
            return Err(TcParseError::MissingPayload(tc_type));
        }

        Ok(Tc {
            tc_type,
            payload: TcPayload::Json(val["payload"].to_string()),
        })
    }

    /// Deserialise the payload of this TC into the given type.
    pub fn parse_payload<T: DeserializeOwned>(&self) -> Result<T, TcParseError> {
        match self.payload {
            TcPayload::Json(ref s) => {
                serde_json::from_str(s).map_err(TcParseError::InvalidPayload)
            }
            TcPayload::None => Err(TcParseError::MissingPayload(self.tc_type)),
        }
    }
}

impl TcType {
    fn from_str(s: &str) -> Option<Self> {
        match s {
            "NONE" => Some(TcType::None),
            "HEARTBEAT" => Some(TcType::Heartbeat),
            "SAFE" => Some(TcType::MakeSafe),
            "UNSAFE" => Some(TcType::MakeUnsafe),
            "DRIVE" => Some(TcType::Drive),
            "PAD" => Some(TcType::Pad),
            "HEADING" => Some(TcType::Heading),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::drive::DriveInput;
    use super::*;

    #[test]
    fn test_from_json_drive() {
        let tc = Tc::from_json(
            r#"{"type": "DRIVE", "payload": {"Cheesy": {"throttle": 0.5, "turn": -0.25, "quick_turn": true}}}"#,
        )
        .unwrap();

        assert_eq!(tc.tc_type, TcType::Drive);
        match tc.parse_payload::<DriveInput>().unwrap() {
            DriveInput::Cheesy {
                throttle,
                turn,
                quick_turn,
            } => {
                assert_eq!(throttle, 0.5);
                assert_eq!(turn, -0.25);
                assert!(quick_turn);
            }
            i => panic!("Unexpected input {:?}", i),
        }
    }

    #[test]
    fn test_from_json_no_payload() {
        let tc = Tc::from_json(r#"{"type": "SAFE"}"#).unwrap();
        assert_eq!(tc.tc_type, TcType::MakeSafe);
        assert!(matches!(tc.payload, TcPayload::None));
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            Tc::from_json("{not json"),
            Err(TcParseError::InvalidJson(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "WARP"}"#),
            Err(TcParseError::InvalidType(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "DRIVE"}"#),
            Err(TcParseError::MissingPayload(TcType::Drive))
        ));

        let tc = Tc::from_json(r#"{"type": "DRIVE", "payload": {"Hover": 1.0}}"#).unwrap();
        assert!(matches!(
            tc.parse_payload::<DriveInput>(),
            Err(TcParseError::InvalidPayload(_))
        ));
    }
}
