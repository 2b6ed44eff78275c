use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use harvest_logging::harvest_warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub text: String,
    pub encoding_label: String,
}

/// Decode a response body into UTF-8 using: BOM -> Content-Type charset ->
/// chardetng detection. Malformed sequences become U+FFFD; listings are
/// still usable with a few replaced characters in titles.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> DecodedBody {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(label) = content_type.and_then(charset_param) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return decode_with(bytes, encoding);
        }
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(['"', '\'']).to_string())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedBody {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        harvest_warn!(
            "Body contained malformed {} sequences; replaced them",
            encoding.name()
        );
    }
    DecodedBody {
        text: text.into_owned(),
        encoding_label: encoding.name().to_string(),
    }
}
