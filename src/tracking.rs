//! Maps camera tracking quality and session events to the status banner.

/// Why tracking is currently limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitedReason {
    ExcessiveMotion,
    InsufficientFeatures,
    Initializing,
    Relocalizing,
}

/// Raw tracking quality reported by the AR session for the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingQuality {
    Normal,
    NotAvailable,
    Limited(LimitedReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingStatus {
    NormalNoAnchors,
    NormalHasAnchors,
    Unavailable,
    LimitedExcessiveMotion,
    LimitedInsufficientFeatures,
    LimitedInitializing,
    LimitedRelocalizing,
    Interrupted,
    InterruptionEnded,
    Failed(String),
}

impl TrackingStatus {
    pub fn message(&self) -> String {
        let text = match self {
            TrackingStatus::NormalNoAnchors => {
                "Move the device around to detect horizontal surfaces."
            }
            TrackingStatus::NormalHasAnchors => "",
            TrackingStatus::Unavailable => "Tracking unavailable.",
            TrackingStatus::LimitedExcessiveMotion => {
                "Tracking limited - Move the device more slowly."
            }
            TrackingStatus::LimitedInsufficientFeatures => {
                "Tracking limited - Point the device at an area with visible surface detail, or improve lighting conditions."
            }
            TrackingStatus::LimitedInitializing => "Initializing AR session.",
            TrackingStatus::LimitedRelocalizing => "Relocalizing.",
            TrackingStatus::Interrupted => "Session was interrupted",
            TrackingStatus::InterruptionEnded => "Session interruption ended",
            TrackingStatus::Failed(reason) => return format!("Session failed: {reason}"),
        };

        text.to_string()
    }

    /// Whether the AR session has to be restarted with a tracking reset.
    pub fn requires_reset(&self) -> bool {
        matches!(
            self,
            TrackingStatus::InterruptionEnded | TrackingStatus::Failed(_)
        )
    }
}

/// Status text plus whether the banner should be shown at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub status: TrackingStatus,
    pub text: String,
    pub show_banner: bool,
}

impl From<TrackingStatus> for StatusMessage {
    fn from(status: TrackingStatus) -> Self {
        let text = status.message();
        Self {
            show_banner: !text.is_empty(),
            status,
            text,
        }
    }
}

pub fn classify(quality: TrackingQuality, has_anchors: bool) -> StatusMessage {
    let status = match quality {
        TrackingQuality::Normal if has_anchors => TrackingStatus::NormalHasAnchors,
        TrackingQuality::Normal => TrackingStatus::NormalNoAnchors,
        TrackingQuality::NotAvailable => TrackingStatus::Unavailable,
        TrackingQuality::Limited(LimitedReason::ExcessiveMotion) => {
            TrackingStatus::LimitedExcessiveMotion
        }
        TrackingQuality::Limited(LimitedReason::InsufficientFeatures) => {
            TrackingStatus::LimitedInsufficientFeatures
        }
        TrackingQuality::Limited(LimitedReason::Initializing) => {
            TrackingStatus::LimitedInitializing
        }
        TrackingQuality::Limited(LimitedReason::Relocalizing) => {
            TrackingStatus::LimitedRelocalizing
        }
    };

    status.into()
}

pub fn session_interrupted() -> StatusMessage {
    TrackingStatus::Interrupted.into()
}

pub fn session_interruption_ended() -> StatusMessage {
    TrackingStatus::InterruptionEnded.into()
}

pub fn session_failed(reason: impl Into<String>) -> StatusMessage {
    TrackingStatus::Failed(reason.into()).into()
}
