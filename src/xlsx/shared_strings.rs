use quick_xml::events::Event;
use quick_xml::Reader;

use super::XlsxError;

/// Parse `xl/sharedStrings.xml` into its string table.
///
/// Rich-text entries (`<r><t>..</t></r>` runs) are concatenated. Phonetic
/// runs (`<rPh>`) are not part of the displayed text and are dropped.
pub(super) fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>, XlsxError> {
    let mut reader = Reader::from_reader(xml);
    // <t xml:space="preserve"> keeps significant whitespace
    reader.config_mut().trim_text(false);

    let mut strings = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut phonetic_depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"rPh" => phonetic_depth += 1,
                b"t" => in_text = phonetic_depth == 0,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"si" {
                    strings.push(String::new());
                }
            }
            Ok(Event::Text(ref t)) => {
                if in_text {
                    if let Some(ref mut s) = current {
                        s.push_str(&t.unescape()?);
                    }
                }
            }
            Ok(Event::CData(ref t)) => {
                if in_text {
                    if let Some(ref mut s) = current {
                        s.push_str(std::str::from_utf8(&**t)?);
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"si" => {
                    if let Some(s) = current.take() {
                        strings.push(s);
                    }
                }
                b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}
