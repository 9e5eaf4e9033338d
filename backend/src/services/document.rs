//! Assembly of the VOTable returned by a VO query.

use chrono::{DateTime, Utc};

use super::protocol::ProtocolDescriptor;
use crate::models::QueryParameters;
use crate::votable::{format_double, Cell, Info, VoTableDocument};

/// Format of the `REQUEST_DATE` INFO.
const REQUEST_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Build the response document for one query.
///
/// `position` is the protocol's rendering of `POS`; `rows` are already in
/// field order. `now` is the serialization time echoed as `REQUEST_DATE`.
pub fn build_document(
    descriptor: &ProtocolDescriptor,
    params: &QueryParameters,
    position: String,
    rows: Vec<Vec<Cell>>,
    query_url: &str,
    now: DateTime<Utc>,
) -> VoTableDocument {
    let mut doc = VoTableDocument::new(descriptor.description, descriptor.fields);

    doc.push_info(Info::new("QUERY_STATUS", "OK"));
    doc.push_info(Info::new("SERVICE_PROTOCOL", descriptor.service_protocol));
    doc.push_info(Info::new("REQUEST", query_url));
    doc.push_info(
        Info::new("REQUEST_DATE", now.format(REQUEST_DATE_FORMAT).to_string())
            .with_content("Query execution date"),
    );

    doc.push_info(Info::new("POS", position));
    let time = params.time();
    doc.push_info(Info::new(
        "TIME",
        format!("{}/{}", format_double(time.t_min.value()), format_double(time.t_max.value())),
    ));
    if params.min_obs().value() > 0.0 {
        doc.push_info(Info::new("MIN_OBS", format_double(params.min_obs().value())));
    }
    if let Some(max_rec) = params.max_rec() {
        doc.push_info(Info::new("MAXREC", max_rec.to_string()));
    }
    if let Some(upload) = params.upload() {
        doc.push_info(Info::new("UPLOAD", upload));
    }

    for row in rows {
        doc.push_row(row);
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SkyPosition, TimeRange};
    use crate::votable::FieldSpec;
    use chrono::TimeZone;

    const DESCRIPTOR: ProtocolDescriptor = ProtocolDescriptor {
        name: "Test",
        description: "Test protocol",
        service_protocol: "ivo://example/std/Test",
        fields: &[FieldSpec::double("t_start", "time.start", "d")],
    };

    fn params() -> QueryParameters {
        QueryParameters::new(SkyPosition::new(10.5, 20.3), TimeRange::new(60000.0, 60001.0))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
    }

    fn names(doc: &VoTableDocument) -> Vec<&str> {
        doc.infos.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_minimal_header_order() {
        let doc = build_document(&DESCRIPTOR, &params(), "10.5,20.3".into(), vec![], "https://q", now());
        assert_eq!(
            names(&doc),
            vec!["QUERY_STATUS", "SERVICE_PROTOCOL", "REQUEST", "REQUEST_DATE", "POS", "TIME"]
        );
        assert_eq!(doc.infos[1].value, "ivo://example/std/Test");
        assert_eq!(doc.infos[2].value, "https://q");
        assert_eq!(doc.infos[3].value, "2024-05-06T07:08:09Z");
        assert_eq!(doc.infos[5].value, "60000/60001");
        assert_eq!(doc.description, "Test protocol");
    }

    #[test]
    fn test_optional_infos_when_set() {
        let params = params()
            .with_min_obs(1500.0)
            .with_max_rec(Some(100))
            .with_upload(Some("test.xml".to_string()));
        let doc = build_document(&DESCRIPTOR, &params, "10.5,20.3".into(), vec![], "", now());
        assert_eq!(&names(&doc)[6..], &["MIN_OBS", "MAXREC", "UPLOAD"]);
        assert_eq!(doc.infos[6].value, "1500");
        assert_eq!(doc.infos[7].value, "100");
        assert_eq!(doc.infos[8].value, "test.xml");
    }

    #[test]
    fn test_zero_min_obs_not_echoed() {
        let doc = build_document(&DESCRIPTOR, &params().with_min_obs(0.0), "x".into(), vec![], "", now());
        assert!(!names(&doc).contains(&"MIN_OBS"));
    }

    #[test]
    fn test_maxrec_zero_is_echoed() {
        let doc = build_document(&DESCRIPTOR, &params().with_max_rec(Some(0)), "x".into(), vec![], "", now());
        assert!(names(&doc).contains(&"MAXREC"));
        assert!(doc.is_empty());
    }
}
