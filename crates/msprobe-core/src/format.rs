//! Rendering snapshots as text or JSON.

use crate::error::ProbeResult;
use crate::types::StatusSnapshot;

/// How snapshots are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat
{
    /// `key: value` lines, one field per line
    #[default]
    Text,
    /// A single JSON object
    Json,
}

impl OutputFormat
{
    /// Pick the format from the `--json` flag
    pub const fn from_json_flag(json: bool) -> Self
    {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Render one snapshot
    ///
    /// Text output ends in a newline; JSON output does not.
    ///
    /// ## Errors
    ///
    /// Returns [`crate::error::ProbeError::Render`] if JSON serialization fails.
    pub fn render(self, snapshot: &StatusSnapshot) -> ProbeResult<String>
    {
        match self {
            OutputFormat::Text => Ok(render_text(snapshot)),
            OutputFormat::Json => Ok(serde_json::to_string(snapshot)?),
        }
    }
}

/// Render the line-oriented form
///
/// Every field is always present, in a fixed order, with empty values for
/// optional fields the decoder did not set.
///
/// ```rust
/// use msprobe_core::format::render_text;
/// use msprobe_core::types::StatusSnapshot;
///
/// let text = render_text(&StatusSnapshot::default());
/// assert_eq!(
///     text,
///     "time: 0\nwidth: 0\nheight: 0\nsignal: \nframeid: 0\ncolorspace: \nformat: \n"
/// );
/// ```
pub fn render_text(snapshot: &StatusSnapshot) -> String
{
    let status = &snapshot.status;
    format!(
        "time: {}\nwidth: {}\nheight: {}\nsignal: {}\nframeid: {}\ncolorspace: {}\nformat: {}\n",
        snapshot.timestamp,
        status.width,
        status.height,
        blank_or(status.signal.map(|s| s.as_str())),
        status.frame_id,
        blank_or(status.colorspace.map(|c| c.as_str())),
        blank_or(status.format.map(|f| f.as_str())),
    )
}

fn blank_or(value: Option<&'static str>) -> &'static str
{
    value.unwrap_or("")
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::types::{Colorspace, InputFormat, Signal, VideoStatus};

    fn sample() -> StatusSnapshot
    {
        StatusSnapshot::new(
            1_700_000_000_123,
            VideoStatus {
                width: 1920,
                height: 1080,
                signal: Some(Signal::Present),
                frame_id: 0,
                colorspace: Some(Colorspace::Y422),
                format: Some(InputFormat::Hdmi),
            },
        )
    }

    #[test]
    fn test_text_layout()
    {
        let text = render_text(&sample());
        assert_eq!(
            text,
            "time: 1700000000123\nwidth: 1920\nheight: 1080\nsignal: yes\nframeid: 0\ncolorspace: Y422\nformat: HDMI\n"
        );
    }

    #[test]
    fn test_text_leaves_unset_fields_blank()
    {
        let snapshot = StatusSnapshot::new(
            -5,
            VideoStatus {
                width: 42,
                height: 42,
                signal: Some(Signal::Diagnostic),
                ..VideoStatus::default()
            },
        );
        let text = OutputFormat::Text.render(&snapshot).unwrap();
        assert_eq!(
            text,
            "time: -5\nwidth: 42\nheight: 42\nsignal: fazantfazantfazant\nframeid: 0\ncolorspace: \nformat: \n"
        );
    }

    #[test]
    fn test_json_has_fixed_keys()
    {
        let json = OutputFormat::Json.render(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["colorspace", "fid", "format", "height", "signal", "time", "width"]);
        assert_eq!(object["time"], 1_700_000_000_123_i64);
        assert_eq!(object["signal"], "yes");
        assert!(!json.ends_with('\n'));
    }

    #[test]
    fn test_json_blank_fields()
    {
        let json = OutputFormat::Json.render(&StatusSnapshot::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["signal"], "");
        assert_eq!(value["colorspace"], "");
        assert_eq!(value["format"], "");
        assert_eq!(value["fid"], 0);
    }

    #[test]
    fn test_output_format_from_json_flag()
    {
        assert_eq!(OutputFormat::from_json_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::Text);
    }
}
