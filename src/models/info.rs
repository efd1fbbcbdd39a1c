use thiserror::Error;

/// Why a decode call produced no symbol.
///
/// All of these are expected, caller-recoverable outcomes carried in
/// [`DecodeInfo`]; the library never panics for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Failure {
    /// Null/empty buffer or matrix
    #[error("invalid input (empty buffer or matrix)")]
    InvalidInput,
    /// Dimensions inconsistent with every supported symbology
    #[error("invalid size for any supported symbology")]
    InvalidSize,
    /// No candidate geometry found within the configured variant set
    #[error("no locator pattern found")]
    LocatorNotFound,
    /// Geometry found but grid sampling / orientation did not converge
    #[error("grid sampling failed")]
    SamplingFailed,
    /// Format/version/mask bits uncorrectable
    #[error("format info corrupt")]
    FormatInfoCorrupt,
    /// Codeword stream exceeded field correction capacity
    #[error("error correction failed")]
    ErrorCorrectionFailed,
    /// Corrected bitstream does not parse as a valid segment sequence
    #[error("segment decode error")]
    SegmentDecodeError,
    /// Deadline reached before any variant succeeded
    #[error("decode budget exceeded")]
    BudgetExceeded,
    /// A valid decode did not match the caller-specified symbology
    #[error("decoded symbology does not match expected")]
    ExpectedMismatch,
    /// Image rejected by the process-wide pixel/byte limits
    #[error("image exceeds configured size limits")]
    LimitExceeded,
}

impl Failure {
    /// How far along the pipeline this failure occurred; used to pick the
    /// most informative failure across retry variants.
    pub(crate) fn progress_rank(self) -> u8 {
        match self {
            Failure::InvalidInput => 0,
            Failure::LimitExceeded => 1,
            Failure::InvalidSize => 2,
            Failure::LocatorNotFound => 3,
            Failure::SamplingFailed => 4,
            Failure::FormatInfoCorrupt => 5,
            Failure::ErrorCorrectionFailed => 6,
            Failure::SegmentDecodeError => 7,
            Failure::ExpectedMismatch => 8,
            Failure::BudgetExceeded => 9,
        }
    }
}

/// Diagnostics produced by every decode call, success or failure.
#[derive(Debug, Clone, Copy)]
pub struct DecodeInfo {
    /// Failure reason; `None` means success
    pub failure: Option<Failure>,
    /// Confidence score in [0, 1]; 0 on any failure
    pub confidence: f32,
    /// Downscale factor applied before localization (1 = none)
    pub scale: u32,
    /// Number of candidate/variant attempts evaluated
    pub attempts: u32,
    /// Wall-clock time spent in the call
    pub elapsed: std::time::Duration,
}

impl DecodeInfo {
    /// Whether the decode succeeded
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub(crate) fn failed(failure: Failure) -> Self {
        Self {
            failure: Some(failure),
            confidence: 0.0,
            scale: 1,
            attempts: 0,
            elapsed: std::time::Duration::ZERO,
        }
    }

    pub(crate) fn success(confidence: f32) -> Self {
        Self {
            failure: None,
            confidence: confidence.clamp(0.0, 1.0),
            scale: 1,
            attempts: 0,
            elapsed: std::time::Duration::ZERO,
        }
    }
}

impl Default for DecodeInfo {
    fn default() -> Self {
        Self::failed(Failure::InvalidInput)
    }
}
