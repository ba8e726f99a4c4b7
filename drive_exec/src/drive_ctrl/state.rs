//! Implementations for the DriveCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, trace};
use serde::Serialize;

// Internal
use super::{
    square_input, CulverDrive, DiffDrive, DiffOutput, DriveCtrlError, Params, SwerveDrive,
    TurnMode, MAX_OUTPUT,
};
use comms_if::{
    eqpt::drive::{DriveDems, ModuleDem},
    tc::drive::DriveInput,
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    module::State,
    params,
    session::Session,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive control module state
#[derive(Default)]
pub struct DriveCtrl {
    pub(crate) params: Params,

    diff: DiffDrive,
    culver: CulverDrive,
    swerve: SwerveDrive,

    /// The input being executed, recomputed every cycle until replaced.
    pub(crate) current_cmd: Option<DriveInput>,

    /// Time at which `current_cmd` was received.
    last_cmd_time_s: Option<f64>,

    /// Time of the last processing cycle.
    time_s: f64,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    pub(crate) output: Option<DriveDems>,
    arch_diff_output: Archiver,
    arch_swerve_output: Archiver,
}

/// Input data to Drive Control.
#[derive(Debug, Default, Clone, Copy)]
pub struct InputData {
    /// The operator input to be executed, or `None` if there is no new input
    /// on this cycle.
    pub cmd: Option<DriveInput>,

    /// If true the drivetrain must not move.
    pub safe: bool,

    /// Current time.
    ///
    /// Units: seconds since the start of the session
    pub time_s: f64,
}

/// Status report for DriveCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// The left side demand is at the limit of the actuation range.
    pub left_limited: bool,

    /// The right side demand is at the limit of the actuation range.
    pub right_limited: bool,

    /// The swerve module speeds were scaled down to fit the actuation range.
    pub swerve_normalised: bool,

    /// No input was received within the command timeout.
    pub cmd_timed_out: bool,

    /// The module is in safe mode.
    pub safe: bool,
}

/// Archive record of the status report.
#[derive(Serialize)]
struct ReportRecord {
    time_s: f64,
    left_limited: bool,
    right_limited: bool,
    swerve_normalised: bool,
    cmd_timed_out: bool,
    safe: bool,
}

/// Archive record of a differential output.
#[derive(Serialize)]
struct DiffRecord {
    time_s: f64,
    left: f64,
    right: f64,
}

/// Archive record of one swerve module's output.
#[derive(Serialize)]
struct SwerveRecord {
    time_s: f64,
    module: usize,
    speed: f64,
    angle_deg: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for DriveCtrl {
    const NAME: &'static str = "drive_ctrl";

    type InitData = &'static str;
    type InitError = DriveCtrlError;

    type InputData = InputData;
    type OutputData = DriveDems;
    type StatusReport = StatusReport;
    type ProcError = DriveCtrlError;

    /// Initialise the DriveCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>
    {
        // Load the parameters and build the engines from them
        let params: Params = params::load(init_data)?;
        *self = Self::from_params(params)?;

        session.save(&Self::session_path("params.json"), self.params.clone());

        // Initialise the archivers
        self.arch_report = Archiver::from_path(
            session, &Self::session_path("status_report.csv")
        )?;
        self.arch_diff_output = Archiver::from_path(
            session, &Self::session_path("diff_output.csv")
        )?;
        self.arch_swerve_output = Archiver::from_path(
            session, &Self::session_path("swerve_output.csv")
        )?;

        debug!(
            "DriveCtrl initialised with {} swerve modules",
            self.swerve.num_modules()
        );

        Ok(())
    }

    /// Perform cyclic processing of Drive Control.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        // Clear the status report
        self.report = StatusReport::default();
        self.time_s = input_data.time_s;

        // Check to see if there's a new command
        if let Some(cmd) = input_data.cmd {
            self.current_cmd = Some(cmd);
            self.last_cmd_time_s = Some(input_data.time_s);
        }

        self.report.cmd_timed_out = match self.last_cmd_time_s {
            Some(t) => input_data.time_s - t > self.params.cmd_timeout_s,
            None => false,
        };
        self.report.safe = input_data.safe;

        let cmd = if input_data.safe || self.report.cmd_timed_out {
            DriveInput::Stop
        }
        else {
            self.current_cmd.unwrap_or(DriveInput::Stop)
        };

        let output = self.calc_dems(cmd);

        trace!("DriveCtrl output: {:?}", output);

        self.output = Some(output.clone());

        Ok((output, self.report))
    }
}

impl Archived for DriveCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_report.serialise(ReportRecord {
            time_s: self.time_s,
            left_limited: self.report.left_limited,
            right_limited: self.report.right_limited,
            swerve_normalised: self.report.swerve_normalised,
            cmd_timed_out: self.report.cmd_timed_out,
            safe: self.report.safe,
        })?;

        match self.output {
            Some(DriveDems::Differential { left, right }) => {
                self.arch_diff_output.serialise(DiffRecord {
                    time_s: self.time_s,
                    left,
                    right,
                })?;
            }
            Some(DriveDems::Swerve { ref modules }) => {
                for (i, m) in modules.iter().enumerate() {
                    self.arch_swerve_output.serialise(SwerveRecord {
                        time_s: self.time_s,
                        module: i,
                        speed: m.speed,
                        angle_deg: m.angle_deg,
                    })?;
                }
            }
            None => (),
        }

        Ok(())
    }
}

impl DriveCtrl {
    /// Build the module from already loaded parameters.
    ///
    /// Archivers are left empty, so nothing is written to disk. Used when
    /// there is no session.
    pub fn from_params(params: Params) -> Result<Self, DriveCtrlError> {
        params.swerve.geometry.validate()?;

        Ok(Self {
            diff: DiffDrive::new(params.diff, params.curvature),
            culver: CulverDrive::new(params.culver),
            swerve: SwerveDrive::new(&params.swerve.geometry),
            params,
            ..Default::default()
        })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn num_swerve_modules(&self) -> usize {
        self.swerve.num_modules()
    }

    /// Calculate the demands for the given input.
    fn calc_dems(&mut self, cmd: DriveInput) -> DriveDems {
        let squared = self.params.diff.squared_inputs;
        let shape = |v: f64| if squared { square_input(v) } else { v };

        let diff_out = match cmd {
            DriveInput::Stop => {
                return match self.output {
                    Some(ref o) => o.stopped(),
                    None => DriveDems::default(),
                }
            }
            DriveInput::Swerve {
                strafe,
                throttle,
                rotation,
                gyro_deg,
            } => {
                let modules = self
                    .swerve
                    .calc(strafe, throttle, rotation, gyro_deg)
                    .iter()
                    .map(|wv| ModuleDem {
                        speed: wv.magnitude,
                        angle_deg: wv.angle,
                    })
                    .collect();
                self.report.swerve_normalised = self.swerve.is_normalised();

                return DriveDems::Swerve { modules };
            }
            DriveInput::Tank { left, right } => {
                DiffOutput::limited(shape(left), shape(right))
            }
            DriveInput::Cheesy {
                throttle,
                turn,
                quick_turn,
            } => self.diff.calc(
                shape(throttle),
                shape(turn),
                TurnMode::QuickTurn(quick_turn),
            ),
            DriveInput::CheesyThreshold { throttle, turn } => {
                self.diff
                    .calc(shape(throttle), shape(turn), TurnMode::ThresholdTurn)
            }
            DriveInput::Curvature { magnitude, curve } => {
                self.diff.calc_curvature(magnitude, curve)
            }
            DriveInput::Culver {
                throttle,
                x,
                y,
                quick_turn,
            } => self.culver.calc(throttle, x, y, quick_turn),
            DriveInput::CulverAlt { throttle, x, y } => {
                self.culver.calc_alt(throttle, x, y)
            }
        };

        self.report.left_limited = diff_out.left.abs() >= MAX_OUTPUT;
        self.report.right_limited = diff_out.right.abs() >= MAX_OUTPUT;

        DriveDems::Differential {
            left: diff_out.left,
            right: diff_out.right,
        }
    }
}
