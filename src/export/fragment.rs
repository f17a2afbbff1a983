//! Spreadsheet clipboard fragment generation
//!
//! Builds the HTML clipboard payload that pastes into a spreadsheet as one
//! row of styled cells with the strip image floated over the first cell.
//!
//! The payload is `header + preamble + body + epilogue`. The header is a
//! `Version:1.0` descriptor whose four offsets point into the payload itself,
//! each written as exactly ten decimal digits.

use base64::Engine as _;

// ─────────────────────────────────────────────────────────────────────────────
// Payload Templates
// ─────────────────────────────────────────────────────────────────────────────

const HEADER_TEMPLATE: &str = "Version:1.0\r\nStartHTML:aaaaaaaaaa\r\nEndHTML:bbbbbbbbbb\r\n\
    StartFragment:cccccccccc\r\nEndFragment:dddddddddd\r\n";

const START_HTML_PLACEHOLDER: &str = "aaaaaaaaaa";
const END_HTML_PLACEHOLDER: &str = "bbbbbbbbbb";
const START_FRAGMENT_PLACEHOLDER: &str = "cccccccccc";
const END_FRAGMENT_PLACEHOLDER: &str = "dddddddddd";

/// Markup preceding the fragment, ending with the start marker.
pub const PREAMBLE: &str = "<html><body><!--StartFragment -->";

/// Markup following the fragment, starting with the end marker.
pub const EPILOGUE: &str = "<!--EndFragment --></body></html>";

/// Type marker spreadsheet software uses to float the image over the cells.
const FLOAT_IMAGE_TYPE: &str = "tencent-sheet-float-img";

// ─────────────────────────────────────────────────────────────────────────────
// Fragment
// ─────────────────────────────────────────────────────────────────────────────

/// Offsets written into the descriptor header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentOffsets {
    /// Start of the preamble (= header length)
    pub start_html: usize,
    /// Start of the table body, right after the start marker
    pub start_fragment: usize,
    /// Start of the end marker
    pub end_fragment: usize,
    /// Total payload length
    pub end_html: usize,
}

/// A built clipboard fragment. Computed on demand, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardFragment {
    header: String,
    body: String,
    offsets: FragmentOffsets,
}

impl ClipboardFragment {
    /// The descriptor block with its offsets filled in.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The table markup between the fragment markers.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn offsets(&self) -> FragmentOffsets {
        self.offsets
    }

    /// The complete payload handed to the clipboard.
    pub fn payload(&self) -> String {
        let mut payload = String::with_capacity(self.offsets.end_html);
        payload.push_str(&self.header);
        payload.push_str(PREAMBLE);
        payload.push_str(&self.body);
        payload.push_str(EPILOGUE);
        payload
    }
}

/// Build the clipboard fragment for one row of labelled cells.
///
/// `background_color` and `border_color` are hex colors without the leading
/// `#` and are used verbatim, as are the labels; callers are responsible for
/// passing well-formed values. The first cell embeds `image_png` as an
/// inline base64 PNG.
///
/// Offsets are UTF-8 byte positions, which equal character positions for
/// single-byte content.
pub fn build_html_fragment<S: AsRef<str>>(
    background_color: &str,
    border_color: &str,
    image_png: &[u8],
    labels: &[S],
) -> ClipboardFragment {
    let body = build_table(background_color, border_color, image_png, labels);

    let start_html = HEADER_TEMPLATE.len();
    let start_fragment = start_html + PREAMBLE.len();
    let end_fragment = start_fragment + body.len();
    let end_html = end_fragment + EPILOGUE.len();

    let header = HEADER_TEMPLATE
        .replace(START_HTML_PLACEHOLDER, &format_offset(start_html))
        .replace(END_HTML_PLACEHOLDER, &format_offset(end_html))
        .replace(START_FRAGMENT_PLACEHOLDER, &format_offset(start_fragment))
        .replace(END_FRAGMENT_PLACEHOLDER, &format_offset(end_fragment));

    ClipboardFragment {
        header,
        body,
        offsets: FragmentOffsets {
            start_html,
            start_fragment,
            end_fragment,
            end_html,
        },
    }
}

fn build_table<S: AsRef<str>>(
    background_color: &str,
    border_color: &str,
    image_png: &[u8],
    labels: &[S],
) -> String {
    let style = format!(
        "background-color:#{};font-size:10pt;border:.5pt solid #{};\
         vertical-align:bottom;text-align:center;mso-number-format: '@'",
        background_color, border_color
    );

    let mut html = String::from("<table><tr>");
    for (index, label) in labels.iter().enumerate() {
        html.push_str("<td style=\"");
        html.push_str(&style);
        html.push_str("\">");
        html.push_str(label.as_ref());
        if index == 0 {
            push_float_image(&mut html, image_png);
        }
        html.push_str("</td>");
    }
    html.push_str("</tr></table>");
    html
}

/// Append the floated image element. Attribute spacing is significant to
/// consumers; keep it byte-for-byte.
fn push_float_image(html: &mut String, image_png: &[u8]) {
    html.push_str("<img src=\"data:image/png;base64,");
    base64::engine::general_purpose::STANDARD.encode_string(image_png, html);
    html.push_str("\" type=\"");
    html.push_str(FLOAT_IMAGE_TYPE);
    html.push_str("\" width=250 height=50");
    html.push_str("style=\"width:250px;height:50px;margin:0\" data-clip =\"0px 0px 0px 0px\"/>");
}

fn format_offset(offset: usize) -> String {
    format!("{:010}", offset)
}

/// Read the fragment markup back out of a payload using its header offsets.
pub fn extract_fragment(payload: &str) -> Option<&str> {
    let start = header_value(payload, "StartFragment:")?;
    let end = header_value(payload, "EndFragment:")?;
    payload.get(start..end)
}

fn header_value(payload: &str, key: &str) -> Option<usize> {
    payload
        .lines()
        .take_while(|line| !line.starts_with('<'))
        .find_map(|line| line.strip_prefix(key))
        .and_then(|value| value.trim().parse().ok())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const STYLE: &str = "background-color:#ffe1b2;font-size:10pt;border:.5pt solid #000000;\
        vertical-align:bottom;text-align:center;mso-number-format: '@'";

    fn offset_field<'a>(header: &'a str, key: &str) -> &'a str {
        header
            .lines()
            .find_map(|line| line.strip_prefix(key))
            .expect("header field")
    }

    #[test]
    fn test_exact_body_for_two_labels() {
        let fragment = build_html_fragment("ffe1b2", "000000", b"PNG", &["AAA", "BBB"]);
        let expected = format!(
            "<table><tr><td style=\"{style}\">AAA<img src=\"data:image/png;base64,UE5H\" \
             type=\"tencent-sheet-float-img\" width=250 height=50style=\"width:250px;height:50px;margin:0\" \
             data-clip =\"0px 0px 0px 0px\"/></td><td style=\"{style}\">BBB</td></tr></table>",
            style = STYLE
        );
        assert_eq!(fragment.body(), expected);
    }

    #[test]
    fn test_only_first_cell_has_image() {
        let fragment = build_html_fragment("fff", "000", &[1, 2, 3], &["a", "b", "c"]);
        assert_eq!(fragment.body().matches("<img").count(), 1);
        assert_eq!(fragment.body().matches("<td ").count(), 3);
        assert!(fragment
            .body()
            .starts_with("<table><tr><td style=\"background-color:#fff;"));
    }

    #[test]
    fn test_no_labels_gives_empty_row() {
        let fragment = build_html_fragment("fff", "000", &[], &[] as &[&str]);
        assert_eq!(fragment.body(), "<table><tr></tr></table>");
    }

    #[test]
    fn test_offsets_are_cumulative() {
        let fragment = build_html_fragment("ffe1b2", "000000", b"image", &["AAA", "BBB"]);
        let offsets = fragment.offsets();

        assert_eq!(offsets.start_html, fragment.header().len());
        assert_eq!(offsets.start_fragment, fragment.header().len() + PREAMBLE.len());
        assert_eq!(offsets.end_fragment, offsets.start_fragment + fragment.body().len());
        assert_eq!(offsets.end_html, offsets.end_fragment + EPILOGUE.len());
        assert_eq!(offsets.end_html, fragment.payload().len());
    }

    #[test]
    fn test_header_fields_are_ten_digits() {
        let fragment = build_html_fragment("ffe1b2", "000000", b"image", &["AAA"]);
        let header = fragment.header();
        let offsets = fragment.offsets();

        for (key, value) in [
            ("StartHTML:", offsets.start_html),
            ("EndHTML:", offsets.end_html),
            ("StartFragment:", offsets.start_fragment),
            ("EndFragment:", offsets.end_fragment),
        ] {
            let field = offset_field(header, key);
            assert_eq!(field.len(), 10);
            assert!(field.chars().all(|c| c.is_ascii_digit()));
            assert_eq!(field.parse::<usize>().unwrap(), value);
        }
        assert!(header.starts_with("Version:1.0\r\nStartHTML:0000000105\r\n"));
        assert_eq!(header.len(), HEADER_TEMPLATE.len());
    }

    #[test]
    fn test_payload_layout() {
        let fragment = build_html_fragment("ffe1b2", "000000", b"x", &["AAA"]);
        let payload = fragment.payload();
        let offsets = fragment.offsets();

        assert_eq!(&payload[..offsets.start_html], fragment.header());
        assert_eq!(&payload[offsets.start_html..offsets.start_fragment], PREAMBLE);
        assert_eq!(
            &payload[offsets.start_fragment..offsets.end_fragment],
            fragment.body()
        );
        assert_eq!(&payload[offsets.end_fragment..], EPILOGUE);
    }

    #[test]
    fn test_multibyte_labels_use_byte_offsets() {
        let fragment = build_html_fragment("ffe1b2", "000000", b"x", &["水优衣", "怜"]);
        let payload = fragment.payload();
        assert_eq!(fragment.offsets().end_html, payload.len());
        assert_eq!(extract_fragment(&payload), Some(fragment.body()));
    }

    #[test]
    fn test_labels_and_colors_used_verbatim() {
        let fragment = build_html_fragment("red;x", "<b>", b"", &["<i>A&B</i>"]);
        assert!(fragment.body().contains("background-color:#red;x;"));
        assert!(fragment.body().contains("solid #<b>;"));
        assert!(fragment.body().contains("\"><i>A&B</i><img"));
    }

    #[test]
    fn test_base64_image_data() {
        let fragment = build_html_fragment("f", "0", &[0xff, 0x00, 0x10], &["A"]);
        assert!(fragment.body().contains("data:image/png;base64,/wAQ\""));
    }

    #[test]
    fn test_extract_fragment_roundtrip() {
        let fragment = build_html_fragment("ffe1b2", "000000", b"png", &["AAA", "BBB"]);
        assert_eq!(extract_fragment(&fragment.payload()), Some(fragment.body()));
        assert_eq!(extract_fragment("no header here"), None);
    }
}
