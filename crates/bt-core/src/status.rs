#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of running a node once.
///
/// `Running` is a real return value: a node may report it when its work is not finished
/// within the current call. None of the built-in leaves do, and no node carries `Running`
/// over into the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BtStatus {
    Running,
    Success,
    Failure,
}

impl BtStatus {
    /// Swap `Success` and `Failure`; `Running` is left untouched.
    pub fn invert(self) -> Self {
        match self {
            BtStatus::Running => BtStatus::Running,
            BtStatus::Success => BtStatus::Failure,
            BtStatus::Failure => BtStatus::Success,
        }
    }

    pub fn is_success(self) -> bool {
        self == BtStatus::Success
    }

    pub fn is_failure(self) -> bool {
        self == BtStatus::Failure
    }

    pub fn is_running(self) -> bool {
        self == BtStatus::Running
    }
}

impl From<bool> for BtStatus {
    fn from(value: bool) -> Self {
        if value {
            BtStatus::Success
        } else {
            BtStatus::Failure
        }
    }
}
