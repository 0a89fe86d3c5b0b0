//! XR session surface consumed by the app: the per-frame object and the VR entry button

/// Per-frame object handed to the animation loop while an immersive session runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XrFrame {
    /// Predicted display time of this frame in milliseconds
    pub predicted_display_time_ms: f64,
}

/// State of the "Enter VR" button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VrButtonState {
    /// The browser or device has no immersive-vr support
    NotSupported,
    /// Ready to request a session
    EnterVr,
    /// A session is running
    ExitVr,
}

/// The button mounted next to the canvas that enters and leaves immersive mode
#[derive(Debug, Clone)]
pub struct VrButton {
    state: VrButtonState,
}

impl VrButton {
    /// Create a button for a device with or without immersive support
    pub fn new(xr_supported: bool) -> Self {
        let state = if xr_supported {
            VrButtonState::EnterVr
        } else {
            log::warn!("Immersive VR is not supported; staying in inline mode");
            VrButtonState::NotSupported
        };
        Self { state }
    }

    /// Current state
    pub fn state(&self) -> VrButtonState {
        self.state
    }

    /// Caption shown on the button
    pub fn label(&self) -> &'static str {
        match self.state {
            VrButtonState::NotSupported => "VR NOT SUPPORTED",
            VrButtonState::EnterVr => "ENTER VR",
            VrButtonState::ExitVr => "EXIT VR",
        }
    }

    /// The XR runtime started a session
    pub fn session_started(&mut self) {
        if self.state != VrButtonState::NotSupported {
            log::info!("Immersive session started");
            self.state = VrButtonState::ExitVr;
        }
    }

    /// The XR runtime ended the session
    pub fn session_ended(&mut self) {
        if self.state != VrButtonState::NotSupported {
            log::info!("Immersive session ended");
            self.state = VrButtonState::EnterVr;
        }
    }

    /// Whether an immersive session is running
    pub fn in_session(&self) -> bool {
        self.state == VrButtonState::ExitVr
    }
}
