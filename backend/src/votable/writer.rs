//! VOTable XML serialization.

use std::borrow::Cow;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{FieldSpec, Info, VoTableDocument};
use crate::error::VoTableError;

const VOTABLE_VERSION: &str = "1.4";
const VOTABLE_NAMESPACE: &str = "http://www.ivoa.net/xml/VOTable/v1.3";
pub(crate) const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const VOTABLE_SCHEMA_LOCATION: &str =
    "http://www.ivoa.net/xml/VOTable/v1.3 http://www.ivoa.net/xml/VOTable/v1.3";

pub(crate) type XmlWriter = Writer<Vec<u8>>;

/// Whether `c` may appear in an XML 1.0 document.
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// `text` without the characters XML 1.0 cannot carry, escaped or not.
pub(crate) fn xml_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&c| is_xml_char(c)).collect())
    }
}

pub(crate) fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), VoTableError> {
    writer
        .write_event(event)
        .map_err(|e| VoTableError::Xml(e.to_string()))
}

pub(crate) fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<(), VoTableError> {
    write(writer, Event::Start(BytesStart::new(name)))?;
    write(writer, Event::Text(BytesText::new(&xml_chars(text))))?;
    write(writer, Event::End(BytesEnd::new(name)))
}

fn write_info(writer: &mut XmlWriter, info: &Info) -> Result<(), VoTableError> {
    let mut start = BytesStart::new("INFO");
    start.push_attribute(("name", xml_chars(&info.name).as_ref()));
    start.push_attribute(("value", xml_chars(&info.value).as_ref()));
    match &info.content {
        Some(content) => {
            write(writer, Event::Start(start))?;
            write(writer, Event::Text(BytesText::new(&xml_chars(content))))?;
            write(writer, Event::End(BytesEnd::new("INFO")))
        }
        None => write(writer, Event::Empty(start)),
    }
}

fn write_field(writer: &mut XmlWriter, field: &FieldSpec) -> Result<(), VoTableError> {
    let mut start = BytesStart::new("FIELD");
    start.push_attribute(("name", field.name));
    start.push_attribute(("datatype", field.datatype.as_str()));
    if let Some(arraysize) = field.arraysize {
        start.push_attribute(("arraysize", arraysize));
    }
    start.push_attribute(("ucd", field.ucd));
    if let Some(utype) = field.utype {
        start.push_attribute(("utype", utype));
    }
    if let Some(unit) = field.unit {
        start.push_attribute(("unit", unit));
    }
    write(writer, Event::Empty(start))
}

fn write_rows(writer: &mut XmlWriter, document: &VoTableDocument) -> Result<(), VoTableError> {
    write(writer, Event::Start(BytesStart::new("DATA")))?;
    write(writer, Event::Start(BytesStart::new("TABLEDATA")))?;
    for row in &document.rows {
        write(writer, Event::Start(BytesStart::new("TR")))?;
        for cell in row {
            write_text_element(writer, "TD", &cell.render())?;
        }
        write(writer, Event::End(BytesEnd::new("TR")))?;
    }
    write(writer, Event::End(BytesEnd::new("TABLEDATA")))?;
    write(writer, Event::End(BytesEnd::new("DATA")))
}

impl VoTableDocument {
    /// Serialize to a VOTable XML string.
    ///
    /// The `DATA` element is left out entirely when there are no rows; the
    /// field schema is always written.
    pub fn to_xml(&self) -> Result<String, VoTableError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("VOTABLE");
        root.push_attribute(("version", VOTABLE_VERSION));
        root.push_attribute(("xmlns", VOTABLE_NAMESPACE));
        root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
        root.push_attribute(("xsi:schemaLocation", VOTABLE_SCHEMA_LOCATION));
        write(&mut writer, Event::Start(root))?;

        let mut resource = BytesStart::new("RESOURCE");
        resource.push_attribute(("type", "results"));
        write(&mut writer, Event::Start(resource))?;

        write_text_element(&mut writer, "DESCRIPTION", &self.description)?;
        for info in &self.infos {
            write_info(&mut writer, info)?;
        }

        write(&mut writer, Event::Start(BytesStart::new("TABLE")))?;
        for field in &self.fields {
            write_field(&mut writer, field)?;
        }
        if !self.is_empty() {
            write_rows(&mut writer, self)?;
        }
        write(&mut writer, Event::End(BytesEnd::new("TABLE")))?;

        write(&mut writer, Event::End(BytesEnd::new("RESOURCE")))?;
        write(&mut writer, Event::End(BytesEnd::new("VOTABLE")))?;

        let mut xml = String::from_utf8(writer.into_inner())?;
        xml.push('\n');
        Ok(xml)
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod writer_tests;
