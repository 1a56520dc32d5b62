//! Video-signal status as reported by the chip.
//!
//! [`VideoStatus`] is what a decoder produces. [`StatusSnapshot`] adds the
//! poll timestamp and is what gets rendered. Optional fields left unset by a
//! decoder serialize as an empty string, never as a guessed value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Whether a video signal is currently detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal
{
    /// A signal is locked (`yes`)
    Present,
    /// No signal (`no`)
    Absent,
    /// Fixed marker emitted by the diagnostic decoder
    Diagnostic,
}

impl Signal
{
    /// Map a "no signal" flag byte, where zero means a signal is present
    pub const fn from_flag(flag: u8) -> Self
    {
        if flag == 0 {
            Signal::Present
        } else {
            Signal::Absent
        }
    }

    /// Wire representation
    pub const fn as_str(self) -> &'static str
    {
        match self {
            Signal::Present => "yes",
            Signal::Absent => "no",
            Signal::Diagnostic => "fazantfazantfazant",
        }
    }
}

impl From<bool> for Signal
{
    fn from(present: bool) -> Self
    {
        if present {
            Signal::Present
        } else {
            Signal::Absent
        }
    }
}

/// Pixel colour encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colorspace
{
    /// RGB
    Rgb,
    /// YUV 4:2:2
    Y422,
    /// YUV 4:4:4
    Y444,
}

impl Colorspace
{
    /// Wire representation
    pub const fn as_str(self) -> &'static str
    {
        match self {
            Colorspace::Rgb => "RGB",
            Colorspace::Y422 => "Y422",
            Colorspace::Y444 => "Y444",
        }
    }
}

/// Input link format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat
{
    /// DVI (no audio, no infoframes)
    Dvi,
    /// HDMI
    Hdmi,
}

impl InputFormat
{
    /// Wire representation
    pub const fn as_str(self) -> &'static str
    {
        match self {
            InputFormat::Dvi => "DVI",
            InputFormat::Hdmi => "HDMI",
        }
    }
}

macro_rules! impl_wire_str {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl fmt::Display for $ty
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty
        {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err>
            {
                $(
                    if s == $ty::$variant.as_str() {
                        return Ok($ty::$variant);
                    }
                )+
                Err(format!("unknown {} value: {s:?}", stringify!($ty)))
            }
        }
    };
}

impl_wire_str!(Signal { Present, Absent, Diagnostic });
impl_wire_str!(Colorspace { Rgb, Y422, Y444 });
impl_wire_str!(InputFormat { Dvi, Hdmi });

/// Decoded video status, before the poller stamps it
///
/// Fields a decoder does not populate keep their zero value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStatus
{
    /// Active width in pixels
    pub width: u32,
    /// Active height in pixels (full frame, even for interlaced input)
    pub height: u32,
    /// Signal presence
    #[serde(with = "blank")]
    pub signal: Option<Signal>,
    /// Hardware frame counter, zero when the decoder has none
    #[serde(rename = "fid")]
    pub frame_id: u32,
    /// Pixel encoding
    #[serde(with = "blank")]
    pub colorspace: Option<Colorspace>,
    /// Input link format
    #[serde(with = "blank")]
    pub format: Option<InputFormat>,
}

/// One poll result: a decoded status plus the time the read started
///
/// ## Example
///
/// ```rust
/// use msprobe_core::types::{Signal, StatusSnapshot, VideoStatus};
///
/// let status = VideoStatus {
///     width: 1920,
///     height: 1080,
///     signal: Some(Signal::Present),
///     ..VideoStatus::default()
/// };
/// let snapshot = StatusSnapshot::new(1_700_000_000_000, status);
/// assert_eq!(snapshot.status.width, 1920);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot
{
    /// Milliseconds since the Unix epoch
    #[serde(rename = "time")]
    pub timestamp: i64,
    /// Decoded fields
    #[serde(flatten)]
    pub status: VideoStatus,
}

impl StatusSnapshot
{
    /// Pair a decoded status with its poll timestamp
    pub const fn new(timestamp: i64, status: VideoStatus) -> Self
    {
        StatusSnapshot { timestamp, status }
    }
}

/// Serde adapter writing `None` as `""`, as the downstream consumers expect
mod blank
{
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            Ok(None)
        } else {
            raw.parse().map(Some).map_err(D::Error::custom)
        }
    }
}
