//! Reads a VOTable back for assertions in unit tests.

use quick_xml::events::Event;
use quick_xml::Reader;

use super::writer::is_xml_char;

/// What a test needs to know about a serialized VOTable.
#[derive(Debug, Default)]
pub(crate) struct ParsedVoTable {
    pub declarations: usize,
    pub description: String,
    pub infos: Vec<(String, String)>,
    pub fields: Vec<String>,
    pub has_data: bool,
    pub rows: Vec<Vec<String>>,
}

impl ParsedVoTable {
    pub fn info(&self, name: &str) -> Option<&str> {
        self.infos
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn info_names(&self) -> Vec<&str> {
        self.infos.iter().map(|(n, _)| n.as_str()).collect()
    }
}

fn attr(e: &quick_xml::events::BytesStart<'_>, key: &str) -> String {
    e.try_get_attribute(key)
        .unwrap()
        .map(|a| a.unescape_value().unwrap().into_owned())
        .unwrap_or_default()
}

/// Parse `xml`, panicking if it is not well-formed.
///
/// The reader is lenient about characters, so those are checked up front.
pub(crate) fn parse(xml: &str) -> ParsedVoTable {
    if let Some((offset, c)) = xml.char_indices().find(|&(_, c)| !is_xml_char(c)) {
        panic!("character {:?} at byte {} is not allowed in XML", c, offset);
    }
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut parsed = ParsedVoTable::default();
    let mut in_description = false;
    let mut td_text: Option<String> = None;

    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Decl(_) => parsed.declarations += 1,
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"INFO" => {
                parsed.infos.push((attr(&e, "name"), attr(&e, "value")));
            }
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"FIELD" => {
                parsed.fields.push(attr(&e, "name"));
            }
            Event::Start(e) => match e.name().as_ref() {
                b"DESCRIPTION" => in_description = true,
                b"DATA" => parsed.has_data = true,
                b"TR" => parsed.rows.push(Vec::new()),
                b"TD" => td_text = Some(String::new()),
                _ => {}
            },
            Event::Text(t) => {
                let text = t.unescape().unwrap().into_owned();
                if in_description {
                    parsed.description = text;
                } else if let Some(cell) = td_text.as_mut() {
                    cell.push_str(&text);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"DESCRIPTION" => in_description = false,
                b"TD" => {
                    if let (Some(cell), Some(row)) = (td_text.take(), parsed.rows.last_mut()) {
                        row.push(cell);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    parsed
}
