use quick_xml::events::BytesStart;

use super::XlsxError;

/// Read an attribute by its local name, ignoring any namespace prefix
/// (`r:id` matches `"id"`).
pub(super) fn get_attribute(e: &BytesStart, name: &str) -> Result<Option<String>, XlsxError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| XlsxError::XmlError(quick_xml::Error::from(e)))?;
        if attr.key.local_name().as_ref() == name.as_bytes() {
            let value = attr.unescape_value()?.into_owned();
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Read a required attribute
pub(super) fn require_attribute(
    e: &BytesStart,
    name: &str,
    element: &str,
) -> Result<String, XlsxError> {
    get_attribute(e, name)?.ok_or_else(|| {
        XlsxError::InvalidStructure(format!("<{}> is missing attribute '{}'", element, name))
    })
}
