//! # Drive Executable Parameters
//!
//! This module provide parameters for the drive executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use util::logger::LogConfig;

use crate::input::{PadMapping, DEFAULT_DEADBAND};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveExecParams {
    /// Target period of one cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// How gamepad samples are turned into drive inputs. If `None` gamepad
    /// samples are ignored and only DRIVE telecommands move the robot.
    #[serde(default)]
    pub pad_mapping: Option<PadMapping>,

    /// Stick deadband of the gamepad.
    #[serde(default = "default_deadband")]
    pub pad_deadband: f64,

    /// Minimum time between two presses of the gamepad's safe button.
    ///
    /// Units: seconds
    #[serde(default = "default_debounce")]
    pub button_debounce_s: f64,

    /// Number of consecutive cycle overruns after which the drivetrain is made safe.
    pub max_consec_cycle_overruns: u64,

    /// Global and per-target log levels.
    #[serde(default)]
    pub log: LogConfig,
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn default_deadband() -> f64 {
    DEFAULT_DEADBAND
}

fn default_debounce() -> f64 {
    0.5
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        let p: DriveExecParams = util::params::parse(
            r#"
            cycle_period_s = 0.02
            pad_mapping = "Culver"
            max_consec_cycle_overruns = 10
            "#,
        )
        .unwrap();

        assert_eq!(p.cycle_period_s, 0.02);
        assert_eq!(p.pad_mapping, Some(PadMapping::Culver));
        assert_eq!(p.pad_deadband, DEFAULT_DEADBAND);
        assert_eq!(p.button_debounce_s, 0.5);
        assert_eq!(p.max_consec_cycle_overruns, 10);
        assert_eq!(p.log, LogConfig::default());

        let p: DriveExecParams =
            util::params::parse("cycle_period_s = 0.1\nmax_consec_cycle_overruns = 5").unwrap();
        assert_eq!(p.pad_mapping, None);
    }

    #[test]
    fn test_parse_log_targets() {
        let p: DriveExecParams = util::params::parse(
            r#"
            cycle_period_s = 0.02
            max_consec_cycle_overruns = 10

            [log]
            level = "Debug"

            [log.targets]
            "drive_lib::drive_ctrl::state" = "Info"
            "#,
        )
        .unwrap();

        let levels = p.log.levels().unwrap();
        assert_eq!(levels.min_level, util::logger::LevelFilter::Debug);
        assert_eq!(
            levels.targets,
            vec![(
                String::from("drive_lib::drive_ctrl::state"),
                util::logger::LevelFilter::Info
            )]
        );
    }
}
