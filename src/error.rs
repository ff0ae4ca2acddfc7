//! Unified error type for flowmeter-ui.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for on-target logging when the `defmt`
//! feature is enabled.

/// Top-level error type used across the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Display controller
    /// SPI transfer to the LCD controller failed. The frame stays
    /// pending and is sent again on the next flush.
    Transport,

    /// The controller reset line could not be driven.
    Reset,

    // Collaborators
    /// The real-time clock refused a date/time record.
    Calendar,

    // Event plumbing
    /// The event channel was full and the event was dropped.
    ChannelFull,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Error::Transport => "display transport failed",
            Error::Reset => "display reset failed",
            Error::Calendar => "calendar commit failed",
            Error::ChannelFull => "event channel full",
        };
        f.write_str(msg)
    }
}
