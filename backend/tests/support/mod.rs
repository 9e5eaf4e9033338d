#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use quick_xml::events::Event;
use quick_xml::Reader;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to the process
/// environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

/// Every variable `ServiceConfig::apply_env_overrides` reads, unset.
pub const CLEAN_ENV: &[(&str, Option<&str>)] = &[
    ("HOST", None),
    ("PORT", None),
    ("VO_SERVER", None),
    ("ENGINE_KIND", None),
    ("ENGINE_URL", None),
    ("ENGINE_TIMEOUT_SECS", None),
];

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// The parts of a VOTable response the HTTP tests look at.
#[derive(Debug, Default)]
pub struct VoTableSummary {
    pub infos: Vec<(String, String)>,
    pub fields: Vec<String>,
    pub has_data: bool,
    pub rows: Vec<Vec<String>>,
}

impl VoTableSummary {
    pub fn info(&self, name: &str) -> Option<&str> {
        self.infos
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

fn attribute(e: &quick_xml::events::BytesStart<'_>, key: &str) -> String {
    e.try_get_attribute(key)
        .unwrap()
        .map(|a| a.unescape_value().unwrap().into_owned())
        .unwrap_or_default()
}

/// Whether `c` may appear in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Summarize a VOTable, panicking on malformed XML.
pub fn summarize_votable(xml: &str) -> VoTableSummary {
    if let Some((offset, c)) = xml.char_indices().find(|&(_, c)| !is_xml_char(c)) {
        panic!("character {:?} at byte {} is not allowed in XML", c, offset);
    }

    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut summary = VoTableSummary::default();
    let mut cell: Option<String> = None;
    loop {
        match reader.read_event().expect("well-formed XML") {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"INFO" => {
                summary.infos.push((attribute(&e, "name"), attribute(&e, "value")));
            }
            Event::Empty(e) if e.name().as_ref() == b"FIELD" => {
                summary.fields.push(attribute(&e, "name"));
            }
            Event::Start(e) => match e.name().as_ref() {
                b"DATA" => summary.has_data = true,
                b"TR" => summary.rows.push(Vec::new()),
                b"TD" => cell = Some(String::new()),
                _ => {}
            },
            Event::Text(t) => {
                if let Some(text) = cell.as_mut() {
                    text.push_str(&t.unescape().unwrap());
                }
            }
            Event::End(e) if e.name().as_ref() == b"TD" => {
                if let (Some(text), Some(row)) = (cell.take(), summary.rows.last_mut()) {
                    row.push(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }
    summary
}
