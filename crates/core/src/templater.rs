//! Renders the TwiML that tells the provider where to stream a connected call.

/// Builds connection instructions pointing the provider at the conversation pipeline.
#[derive(Debug, Clone, Default)]
pub struct Templater;

impl Templater {
    pub fn new() -> Self {
        Self
    }

    /// TwiML that opens a media stream to `wss://{base_url}/connect_call/{call_id}`.
    ///
    /// `base_url` is a bare host (and optional path), without scheme. `call_id`
    /// is percent-encoded as a single path segment.
    pub fn connection_twiml(&self, base_url: &str, call_id: &str) -> String {
        let url = format!(
            "wss://{}/connect_call/{}",
            base_url,
            urlencoding::encode(call_id)
        );
        format!(
            "<Response>\n    <Connect>\n        <Stream url=\"{}\" />\n    </Connect>\n</Response>",
            escape_xml_attr(&url)
        )
    }
}

fn escape_xml_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
