//! # Telecommand processor module
//!
//! The telecommand processor handles TCs coming from the script.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace, warn};

// Internal
use comms_if::tc::{
    drive::{DriveInput, HeadingUpdate},
    pad::PadState,
    Tc, TcType,
};
use drive_lib::data_store::{DataStore, SafeModeCause};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore to send commands to different modules.
pub(crate) fn exec(ds: &mut DataStore, tc: &Tc) {

    // Handle different Tcs
    match tc.tc_type {
        TcType::None => (),
        TcType::Heartbeat => trace!("Recieved Heartbeat"),
        TcType::MakeSafe => {
            debug!("Recieved MakeSafe command");
            ds.make_safe(SafeModeCause::MakeSafeTc);
        },
        TcType::MakeUnsafe => {
            debug!("Recieved MakeUnsafe command");
            if ds.make_unsafe(SafeModeCause::MakeSafeTc).is_err() {
                warn!(
                    "MakeUnsafe rejected, safe mode was caused by {:?}",
                    ds.safe_cause
                );
            }
        },
        TcType::Drive => match tc.parse_payload::<DriveInput>() {
            Ok(d) => ds.drive_ctrl_input.cmd = Some(d),
            Err(e) => warn!("Invalid Drive TC: {}", e)
        },
        TcType::Pad => match tc.parse_payload::<PadState>() {
            Ok(p) => {
                ds.pad.update_source(p);
                ds.pad_updated = true;
            },
            Err(e) => warn!("Invalid Pad TC: {}", e)
        },
        TcType::Heading => match tc.parse_payload::<HeadingUpdate>() {
            Ok(h) => ds.heading_deg = h.heading_deg,
            Err(e) => warn!("Invalid Heading TC: {}", e)
        }
    }

}

#[cfg(test)]
mod test {
    use super::*;

    fn exec_json(ds: &mut DataStore, json: &str) {
        exec(ds, &Tc::from_json(json).unwrap());
    }

    #[test]
    fn test_safe_unsafe() {
        let mut ds = DataStore::default();

        exec_json(&mut ds, r#"{"type": "SAFE"}"#);
        assert!(ds.safe);
        exec_json(&mut ds, r#"{"type": "UNSAFE"}"#);
        assert!(!ds.safe);
    }

    #[test]
    fn test_drive_and_heading() {
        let mut ds = DataStore::default();

        exec_json(
            &mut ds,
            r#"{"type": "DRIVE", "payload": {"Tank": {"left": 0.5, "right": 0.25}}}"#,
        );
        assert_eq!(
            ds.drive_ctrl_input.cmd,
            Some(DriveInput::Tank {
                left: 0.5,
                right: 0.25
            })
        );

        exec_json(&mut ds, r#"{"type": "HEADING", "payload": {"heading_deg": 45.0}}"#);
        assert_eq!(ds.heading_deg, 45.0);

        // Bad payloads are dropped
        exec_json(&mut ds, r#"{"type": "DRIVE", "payload": {"Spin": 1.0}}"#);
        assert_eq!(
            ds.drive_ctrl_input.cmd,
            Some(DriveInput::Tank {
                left: 0.5,
                right: 0.25
            })
        );
    }

    #[test]
    fn test_pad() {
        let mut ds = DataStore::default();

        exec_json(
            &mut ds,
            r#"{"type": "PAD", "payload": {"axes": [0.0, -1.0], "buttons": [true]}}"#,
        );
        assert!(ds.pad_updated);
        assert_eq!(ds.pad.left_y(), 1.0);
    }
}
