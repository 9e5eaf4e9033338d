//! VO Support Interfaces: availability and capabilities documents.

use std::sync::OnceLock;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::objobssap::OBJOBSSAP;
use super::obsloctap::OBSLOCTAP;
use crate::error::VoTableError;
use crate::votable::writer::{write, write_text_element, XmlWriter, XSI_NAMESPACE};

/// Media type of VOSI documents.
pub const VOSI_CONTENT_TYPE: &str = "application/xml";

const AVAILABILITY_NAMESPACE: &str = "http://www.ivoa.net/xml/VOSIAvailability/v1.0";
const CAPABILITIES_NAMESPACE: &str = "http://www.ivoa.net/xml/VOSICapabilities/v1.0";
const VODATASERVICE_NAMESPACE: &str = "http://www.ivoa.net/xml/VODataService/v1.1";

pub const OBJOBSSAP_PATH: &str = "/objobssap/query";
pub const OBSLOCTAP_PATH: &str = "/obsloctap/query";
pub const AVAILABILITY_PATH: &str = "/availability";
pub const CAPABILITIES_PATH: &str = "/capabilities";

static SERVICE_STARTED_AT: OnceLock<DateTime<Utc>> = OnceLock::new();

/// Record the process start time. Only the first call has an effect.
pub fn mark_service_start() -> DateTime<Utc> {
    *SERVICE_STARTED_AT.get_or_init(Utc::now)
}

/// Time the service came up.
pub fn service_started_at() -> DateTime<Utc> {
    mark_service_start()
}

fn finish(writer: XmlWriter) -> Result<String, VoTableError> {
    let mut xml = String::from_utf8(writer.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

/// VOSI availability document: always available, up since `up_since`.
pub fn availability_document(up_since: DateTime<Utc>) -> Result<String, VoTableError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("availability");
    root.push_attribute(("xmlns", AVAILABILITY_NAMESPACE));
    root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    write(&mut writer, Event::Start(root))?;
    write_text_element(&mut writer, "available", "true")?;
    write_text_element(
        &mut writer,
        "upSince",
        &up_since.to_rfc3339_opts(SecondsFormat::Micros, true),
    )?;
    write(&mut writer, Event::End(BytesEnd::new("availability")))?;

    finish(writer)
}

fn write_capability(
    writer: &mut XmlWriter,
    standard_id: &str,
    access_url: &str,
) -> Result<(), VoTableError> {
    let mut capability = BytesStart::new("capability");
    capability.push_attribute(("standardID", standard_id));
    write(writer, Event::Start(capability))?;

    let mut interface = BytesStart::new("interface");
    interface.push_attribute(("xsi:type", "vs:ParamHTTP"));
    interface.push_attribute(("role", "std"));
    write(writer, Event::Start(interface))?;

    let mut url = BytesStart::new("accessURL");
    url.push_attribute(("use", "full"));
    write(writer, Event::Start(url))?;
    write(writer, Event::Text(BytesText::new(access_url)))?;
    write(writer, Event::End(BytesEnd::new("accessURL")))?;

    write(writer, Event::End(BytesEnd::new("interface")))?;
    write(writer, Event::End(BytesEnd::new("capability")))
}

/// VOSI capabilities document for every endpoint under `base_url`.
pub fn capabilities_document(base_url: &str) -> Result<String, VoTableError> {
    let base = base_url.trim_end_matches('/');
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("vosi:capabilities");
    root.push_attribute(("xmlns:vosi", CAPABILITIES_NAMESPACE));
    root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    root.push_attribute(("xmlns:vs", VODATASERVICE_NAMESPACE));
    write(&mut writer, Event::Start(root))?;

    let capabilities = [
        (OBJOBSSAP.service_protocol, OBJOBSSAP_PATH),
        (OBSLOCTAP.service_protocol, OBSLOCTAP_PATH),
        ("ivo://ivoa.net/std/VOSI#availability", AVAILABILITY_PATH),
        ("ivo://ivoa.net/std/VOSI#capabilities", CAPABILITIES_PATH),
    ];
    for (standard_id, path) in capabilities {
        write_capability(&mut writer, standard_id, &format!("{}{}", base, path))?;
    }

    write(&mut writer, Event::End(BytesEnd::new("vosi:capabilities")))?;
    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_start_time_is_stable() {
        let first = mark_service_start();
        assert_eq!(mark_service_start(), first);
        assert_eq!(service_started_at(), first);
    }

    #[test]
    fn test_availability_document() {
        let up = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let xml = availability_document(up).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("xmlns=\"http://www.ivoa.net/xml/VOSIAvailability/v1.0\""));
        assert!(xml.contains("<available>true</available>"));
        assert!(xml.contains("<upSince>2024-01-02T03:04:05.000000Z</upSince>"));
    }

    #[test]
    fn test_capabilities_lists_every_endpoint() {
        let xml = capabilities_document("https://vo.example.org/").unwrap();
        assert!(xml.contains("standardID=\"ivo://ivoa.net/std/ObjObsSAP\""));
        assert!(xml.contains("standardID=\"ivo://ivoa.net/std/ObsLocTAP\""));
        assert!(xml.contains("standardID=\"ivo://ivoa.net/std/VOSI#availability\""));
        assert!(xml.contains("<accessURL use=\"full\">https://vo.example.org/objobssap/query</accessURL>"));
        assert!(xml.contains("https://vo.example.org/capabilities"));
        assert_eq!(xml.matches("<capability ").count(), 4);
    }
}
