//! DS3 XML deserialization: decoding response documents.
//!
//! Each response type names its required root element through
//! [`Ds3Deserialize::ROOT_ELEMENT`]; [`from_xml`] rejects documents whose root
//! differs. Inside the root, unknown elements and attributes are logged and
//! skipped so newer servers can add fields without breaking older clients.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::warn;

use ds3_model::{
    Bucket, BulkObject, BulkObjectList, BulkResponse, GetBucketOutput, GetServiceOutput, Object,
    Owner,
};

use crate::error::XmlError;

/// Trait for decoding a DS3 response document.
pub trait Ds3Deserialize: Sized {
    /// Name the root element must have.
    const ROOT_ELEMENT: &'static str;

    /// Decode from the root element.
    ///
    /// The reader is positioned just after the root's start tag. `empty` is
    /// true when the root was self-closing, in which case there is no content
    /// to read.
    ///
    /// # Errors
    ///
    /// Returns `XmlError` if the XML is malformed or required fields are missing.
    fn deserialize_xml(
        root: &BytesStart<'_>,
        reader: &mut Reader<&[u8]>,
        empty: bool,
    ) -> Result<Self, XmlError>;
}

/// Decode a DS3 response document into a typed value.
///
/// Skips the declaration and any comments, checks the root element name, then
/// delegates to the type's `Ds3Deserialize` implementation.
pub fn from_xml<T: Ds3Deserialize>(xml: &[u8]) -> Result<T, XmlError> {
    let mut reader = Reader::from_reader(xml);

    loop {
        let (root, empty) = match reader.read_event()? {
            Event::Start(e) => (e, false),
            Event::Empty(e) => (e, true),
            Event::Eof => {
                return Err(XmlError::MissingElement("root element".to_string()));
            }
            // Skip declaration, comments, processing instructions, whitespace.
            _ => continue,
        };

        let name = local_name(&root)?;
        if name != T::ROOT_ELEMENT {
            return Err(XmlError::UnexpectedRoot {
                expected: T::ROOT_ELEMENT,
                found: name,
            });
        }
        let value = T::deserialize_xml(&root, &mut reader, empty)?;
        expect_end_of_document(&mut reader)?;
        return Ok(value);
    }
}

/// Require that nothing but whitespace, comments or processing instructions
/// follows the root element.
fn expect_end_of_document(reader: &mut Reader<&[u8]>) -> Result<(), XmlError> {
    loop {
        match reader.read_event()? {
            Event::Eof => return Ok(()),
            Event::Start(e) | Event::Empty(e) => {
                return Err(XmlError::UnexpectedElement(format!(
                    "'{}' after the root element",
                    local_name(&e)?
                )));
            }
            Event::End(e) => {
                return Err(XmlError::UnexpectedElement(format!(
                    "end tag '{}' after the root element",
                    String::from_utf8_lossy(e.local_name().as_ref())
                )));
            }
            Event::Text(e) if !e.iter().all(u8::is_ascii_whitespace) => {
                return Err(XmlError::ParseError(
                    "text after the root element".to_string(),
                ));
            }
            Event::CData(_) | Event::GeneralRef(_) => {
                return Err(XmlError::ParseError(
                    "content after the root element".to_string(),
                ));
            }
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Helper functions for reading common XML patterns
// ---------------------------------------------------------------------------

/// The local (unprefixed) name of an element.
fn local_name(e: &BytesStart<'_>) -> Result<String, XmlError> {
    let name = e.local_name();
    std::str::from_utf8(name.as_ref())
        .map(ToOwned::to_owned)
        .map_err(|e| XmlError::ParseError(e.to_string()))
}

/// Decoded `(local name, unescaped value)` pairs for every attribute.
fn attributes(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, XmlError> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.local_name().as_ref())
            .map_err(|e| XmlError::ParseError(e.to_string()))?
            .to_owned();
        let raw = std::str::from_utf8(&attr.value)
            .map_err(|e| XmlError::ParseError(e.to_string()))?;
        let value = quick_xml::escape::unescape(raw)
            .map_err(|e| XmlError::ParseError(e.to_string()))?
            .into_owned();
        attrs.push((key, value));
    }
    Ok(attrs)
}

/// Visit each child element of the current element until its end tag.
///
/// The callback receives the reader, the child's start tag and whether the
/// child was self-closing. It must consume the child's content (a
/// self-closing child has none). Text between children is ignored.
fn read_children<F>(
    reader: &mut Reader<&[u8]>,
    parent: &str,
    empty: bool,
    mut on_child: F,
) -> Result<(), XmlError>
where
    F: FnMut(&mut Reader<&[u8]>, &BytesStart<'_>, bool) -> Result<(), XmlError>,
{
    if empty {
        return Ok(());
    }

    loop {
        match reader.read_event()? {
            Event::Start(e) => on_child(reader, &e, false)?,
            Event::Empty(e) => on_child(reader, &e, true)?,
            Event::End(_) => return Ok(()),
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(format!(
                    "unexpected EOF in {parent}"
                )));
            }
            _ => {}
        }
    }
}

/// Read the text content of the current element and consume its end tag.
///
/// Returns `None` for a self-closing or empty element, so absent and empty
/// values are treated alike.
fn read_text_content(reader: &mut Reader<&[u8]>, empty: bool) -> Result<Option<String>, XmlError> {
    if empty {
        return Ok(None);
    }

    let mut text = String::new();
    loop {
        match reader.read_event()? {
            Event::Text(e) => {
                let decoded = e
                    .decode()
                    .map_err(|err| XmlError::ParseError(err.to_string()))?;
                text.push_str(&decoded);
            }
            Event::CData(e) => {
                text.push_str(&String::from_utf8_lossy(&e));
            }
            Event::GeneralRef(e) => {
                if let Some(ch) = e.resolve_char_ref()? {
                    text.push(ch);
                } else {
                    let entity = e
                        .decode()
                        .map_err(|err| XmlError::ParseError(err.to_string()))?;
                    let resolved = quick_xml::escape::resolve_predefined_entity(&entity)
                        .ok_or_else(|| XmlError::ParseError(format!("unknown entity: {entity}")))?;
                    text.push_str(resolved);
                }
            }
            Event::Start(_) => skip_element(reader, false)?,
            Event::End(_) => break,
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while reading text content".to_string(),
                ));
            }
            _ => {}
        }
    }

    Ok(if text.is_empty() { None } else { Some(text) })
}

/// Skip over an element and all its children.
fn skip_element(reader: &mut Reader<&[u8]>, empty: bool) -> Result<(), XmlError> {
    if empty {
        return Ok(());
    }

    let mut depth: u32 = 1;
    loop {
        match reader.read_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => {
                return Err(XmlError::UnexpectedElement(
                    "unexpected EOF while skipping element".to_string(),
                ));
            }
            _ => {}
        }
    }
}

/// Log and skip an element the decoder does not recognize.
fn skip_unknown(
    reader: &mut Reader<&[u8]>,
    parent: &str,
    name: &str,
    empty: bool,
) -> Result<(), XmlError> {
    warn!(parent, element = name, "Unknown XML element");
    skip_element(reader, empty)
}

/// Parse a base-10 unsigned integer from XML text.
///
/// Leniently takes the leading run of digits after optional whitespace and a
/// `+` sign, ignoring whatever follows. No digits yields 0 and overflow
/// saturates at `u64::MAX`.
fn parse_u64(s: &str) -> u64 {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    s.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(u64::from(digit - b'0'))
        })
}

/// Parse an optional integer element.
fn read_u64_content(reader: &mut Reader<&[u8]>, empty: bool) -> Result<Option<u64>, XmlError> {
    Ok(read_text_content(reader, empty)?.as_deref().map(parse_u64))
}

// ---------------------------------------------------------------------------
// Shared elements
// ---------------------------------------------------------------------------

fn deserialize_owner(reader: &mut Reader<&[u8]>, empty: bool) -> Result<Owner, XmlError> {
    let mut owner = Owner::default();

    read_children(reader, "Owner", empty, |reader, child, empty| {
        let name = local_name(child)?;
        match name.as_str() {
            "DisplayName" => owner.display_name = read_text_content(reader, empty)?,
            "ID" => owner.id = read_text_content(reader, empty)?,
            _ => skip_unknown(reader, "Owner", &name, empty)?,
        }
        Ok(())
    })?;

    Ok(owner)
}

fn deserialize_bucket(reader: &mut Reader<&[u8]>, empty: bool) -> Result<Bucket, XmlError> {
    let mut bucket = Bucket::default();

    read_children(reader, "Bucket", empty, |reader, child, empty| {
        let name = local_name(child)?;
        match name.as_str() {
            "Name" => bucket.name = read_text_content(reader, empty)?,
            "CreationDate" => bucket.creation_date = read_text_content(reader, empty)?,
            _ => skip_unknown(reader, "Bucket", &name, empty)?,
        }
        Ok(())
    })?;

    Ok(bucket)
}

fn deserialize_object(reader: &mut Reader<&[u8]>, empty: bool) -> Result<Object, XmlError> {
    let mut object = Object::default();

    read_children(reader, "Contents", empty, |reader, child, empty| {
        let name = local_name(child)?;
        match name.as_str() {
            "Key" => object.key = read_text_content(reader, empty)?,
            "ETag" => object.etag = read_text_content(reader, empty)?,
            "LastModified" => object.last_modified = read_text_content(reader, empty)?,
            "StorageClass" => object.storage_class = read_text_content(reader, empty)?,
            "Size" => object.size = read_u64_content(reader, empty)?,
            "Owner" => object.owner = Some(deserialize_owner(reader, empty)?),
            _ => skip_unknown(reader, "Contents", &name, empty)?,
        }
        Ok(())
    })?;

    Ok(object)
}

// ---------------------------------------------------------------------------
// Ds3Deserialize implementations for response documents
// ---------------------------------------------------------------------------

impl Ds3Deserialize for GetServiceOutput {
    const ROOT_ELEMENT: &'static str = "ListAllMyBucketsResult";

    fn deserialize_xml(
        _root: &BytesStart<'_>,
        reader: &mut Reader<&[u8]>,
        empty: bool,
    ) -> Result<Self, XmlError> {
        let mut output = GetServiceOutput::default();

        read_children(reader, Self::ROOT_ELEMENT, empty, |reader, child, empty| {
            let name = local_name(child)?;
            match name.as_str() {
                "Buckets" => read_children(reader, "Buckets", empty, |reader, child, empty| {
                    let name = local_name(child)?;
                    if name == "Bucket" {
                        output.buckets.push(deserialize_bucket(reader, empty)?);
                        Ok(())
                    } else {
                        skip_unknown(reader, "Buckets", &name, empty)
                    }
                })?,
                "Owner" => output.owner = Some(deserialize_owner(reader, empty)?),
                _ => skip_unknown(reader, Self::ROOT_ELEMENT, &name, empty)?,
            }
            Ok(())
        })?;

        Ok(output)
    }
}

impl Ds3Deserialize for GetBucketOutput {
    const ROOT_ELEMENT: &'static str = "ListBucketResult";

    fn deserialize_xml(
        _root: &BytesStart<'_>,
        reader: &mut Reader<&[u8]>,
        empty: bool,
    ) -> Result<Self, XmlError> {
        let mut output = GetBucketOutput::default();

        read_children(reader, Self::ROOT_ELEMENT, empty, |reader, child, empty| {
            let name = local_name(child)?;
            match name.as_str() {
                "Contents" => output.objects.push(deserialize_object(reader, empty)?),
                "CreationDate" => output.creation_date = read_text_content(reader, empty)?,
                "IsTruncated" => {
                    output.is_truncated =
                        read_text_content(reader, empty)?.as_deref() == Some("true");
                }
                "Marker" => output.marker = read_text_content(reader, empty)?,
                "MaxKeys" => output.max_keys = read_u64_content(reader, empty)?,
                "Name" => output.name = read_text_content(reader, empty)?,
                "Delimiter" => output.delimiter = read_text_content(reader, empty)?,
                "NextMarker" => output.next_marker = read_text_content(reader, empty)?,
                "Prefix" => output.prefix = read_text_content(reader, empty)?,
                _ => skip_unknown(reader, Self::ROOT_ELEMENT, &name, empty)?,
            }
            Ok(())
        })?;

        Ok(output)
    }
}

fn deserialize_bulk_object(
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
    empty: bool,
) -> Result<BulkObject, XmlError> {
    let mut name = None;
    let mut size = 0;

    for (key, value) in attributes(start)? {
        match key.as_str() {
            "Name" => name = Some(value),
            "Size" => size = parse_u64(&value),
            _ => warn!(element = "Object", attribute = %key, "Unknown XML attribute"),
        }
    }

    read_children(reader, "Object", empty, |reader, child, empty| {
        let child_name = local_name(child)?;
        skip_unknown(reader, "Object", &child_name, empty)
    })?;

    let name = name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| XmlError::MissingAttribute("Object/@Name".to_string()))?;

    Ok(BulkObject { name, size })
}

fn deserialize_bulk_object_list(
    start: &BytesStart<'_>,
    reader: &mut Reader<&[u8]>,
    empty: bool,
) -> Result<BulkObjectList, XmlError> {
    let mut list = BulkObjectList::default();

    for (key, value) in attributes(start)? {
        match key.as_str() {
            "ServerId" => list.server_id = Some(value),
            "ChunkNumber" => list.chunk_number = Some(parse_u64(&value)),
            _ => warn!(element = "Objects", attribute = %key, "Unknown XML attribute"),
        }
    }

    read_children(reader, "Objects", empty, |reader, child, empty| {
        let name = local_name(child)?;
        if name == "Object" {
            list.objects
                .push(deserialize_bulk_object(child, reader, empty)?);
            Ok(())
        } else {
            skip_unknown(reader, "Objects", &name, empty)
        }
    })?;

    Ok(list)
}

impl Ds3Deserialize for BulkResponse {
    const ROOT_ELEMENT: &'static str = crate::serialize::MASTER_OBJECT_LIST;

    fn deserialize_xml(
        root: &BytesStart<'_>,
        reader: &mut Reader<&[u8]>,
        empty: bool,
    ) -> Result<Self, XmlError> {
        let mut job_id = None;
        for (key, value) in attributes(root)? {
            if key == "JobId" {
                job_id = Some(value);
            } else {
                warn!(element = Self::ROOT_ELEMENT, attribute = %key, "Unknown XML attribute");
            }
        }

        let mut chunks = Vec::new();
        read_children(reader, Self::ROOT_ELEMENT, empty, |reader, child, empty| {
            let name = local_name(child)?;
            if name == "Objects" {
                chunks.push(deserialize_bulk_object_list(child, reader, empty)?);
                Ok(())
            } else {
                skip_unknown(reader, Self::ROOT_ELEMENT, &name, empty)
            }
        })?;

        let job_id = job_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| XmlError::MissingAttribute("MasterObjectList/@JobId".to_string()))?;

        Ok(BulkResponse { job_id, chunks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::bulk_request_xml;

    #[test]
    fn test_should_deserialize_service_listing() {
        let xml = b"<ListAllMyBucketsResult><Buckets><Bucket><Name>b1</Name>\
            <CreationDate>2024-01-01T00:00:00Z</CreationDate></Bucket></Buckets>\
            <Owner><DisplayName>alice</DisplayName><ID>1</ID></Owner></ListAllMyBucketsResult>";

        let output: GetServiceOutput = from_xml(xml).expect("deserialization should succeed");
        assert_eq!(output.buckets.len(), 1);
        assert_eq!(output.buckets[0].name.as_deref(), Some("b1"));
        assert_eq!(
            output.buckets[0].creation_date.as_deref(),
            Some("2024-01-01T00:00:00Z")
        );
        let owner = output.owner.expect("owner present");
        assert_eq!(owner.display_name.as_deref(), Some("alice"));
        assert_eq!(owner.id.as_deref(), Some("1"));
    }

    #[test]
    fn test_should_ignore_unknown_service_elements() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <ListAllMyBucketsResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
            <Region><Name>ignored</Name></Region>
            <Buckets>
                <Bucket><Name>first</Name><Tier/></Bucket>
                <Bucket><Name>second</Name></Bucket>
            </Buckets>
        </ListAllMyBucketsResult>"#;

        let output: GetServiceOutput = from_xml(xml).expect("deserialization should succeed");
        let names: Vec<_> = output
            .buckets
            .iter()
            .map(|b| b.name.as_deref().unwrap())
            .collect();
        assert_eq!(names, ["first", "second"]);
        assert!(output.buckets[1].creation_date.is_none());
        assert!(output.owner.is_none());
    }

    #[test]
    fn test_should_deserialize_bucket_listing() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <ListBucketResult>
            <Name>photos</Name>
            <Prefix>2024/</Prefix>
            <Marker></Marker>
            <MaxKeys>1000</MaxKeys>
            <Delimiter>/</Delimiter>
            <NextMarker>2024/b.jpg</NextMarker>
            <CreationDate>2024-01-01T00:00:00.000Z</CreationDate>
            <IsTruncated>true</IsTruncated>
            <Contents>
                <Key>2024/a.jpg</Key>
                <ETag>"abc123"</ETag>
                <LastModified>2024-02-01T10:00:00.000Z</LastModified>
                <StorageClass>STANDARD</StorageClass>
                <Size>2048</Size>
                <Owner><DisplayName>alice</DisplayName><ID>42</ID></Owner>
            </Contents>
            <Contents>
                <Key>2024/b.jpg</Key>
            </Contents>
        </ListBucketResult>"#;

        let output: GetBucketOutput = from_xml(xml).expect("deserialization should succeed");
        assert_eq!(output.name.as_deref(), Some("photos"));
        assert_eq!(output.prefix.as_deref(), Some("2024/"));
        assert!(output.marker.is_none());
        assert_eq!(output.max_keys, Some(1000));
        assert_eq!(output.delimiter.as_deref(), Some("/"));
        assert_eq!(output.next_marker.as_deref(), Some("2024/b.jpg"));
        assert!(output.is_truncated);
        assert_eq!(output.objects.len(), 2);

        let first = &output.objects[0];
        assert_eq!(first.key.as_deref(), Some("2024/a.jpg"));
        assert_eq!(first.etag.as_deref(), Some("\"abc123\""));
        assert_eq!(first.storage_class.as_deref(), Some("STANDARD"));
        assert_eq!(first.size, Some(2048));
        assert_eq!(
            first.owner.as_ref().and_then(|o| o.id.as_deref()),
            Some("42")
        );

        let second = &output.objects[1];
        assert_eq!(second.key.as_deref(), Some("2024/b.jpg"));
        assert!(second.etag.is_none());
        assert!(second.last_modified.is_none());
        assert!(second.storage_class.is_none());
        assert!(second.size.is_none());
        assert!(second.owner.is_none());
    }

    #[test]
    fn test_should_treat_non_literal_true_as_not_truncated() {
        for value in ["false", "TRUE", "1", ""] {
            let xml = format!("<ListBucketResult><IsTruncated>{value}</IsTruncated></ListBucketResult>");
            let output: GetBucketOutput = from_xml(xml.as_bytes()).unwrap();
            assert!(!output.is_truncated, "value {value:?}");
        }
        let output: GetBucketOutput = from_xml(b"<ListBucketResult/>").unwrap();
        assert!(!output.is_truncated);
        assert!(output.objects.is_empty());
    }

    #[test]
    fn test_should_decode_entities_in_text() {
        let xml = b"<ListBucketResult><Contents><Key>a &amp; b&#33;</Key></Contents></ListBucketResult>";
        let output: GetBucketOutput = from_xml(xml).unwrap();
        assert_eq!(output.objects[0].key.as_deref(), Some("a & b!"));
    }

    #[test]
    fn test_should_deserialize_bulk_response_in_chunk_order() {
        let xml = br#"<MasterObjectList JobId="J1">
            <Objects ChunkNumber="1" ServerId="srv-a"><Object Name="a" Size="10"/></Objects>
            <Objects ChunkNumber="2"><Object Name="b" Size="20"></Object></Objects>
        </MasterObjectList>"#;

        let response: BulkResponse = from_xml(xml).expect("deserialization should succeed");
        assert_eq!(response.job_id, "J1");
        assert_eq!(response.chunks.len(), 2);

        assert_eq!(response.chunks[0].chunk_number, Some(1));
        assert_eq!(response.chunks[0].server_id.as_deref(), Some("srv-a"));
        assert_eq!(response.chunks[0].objects, [BulkObject::new("a", 10)]);

        assert_eq!(response.chunks[1].chunk_number, Some(2));
        assert!(response.chunks[1].server_id.is_none());
        assert_eq!(response.chunks[1].objects, [BulkObject::new("b", 20)]);
    }

    #[test]
    fn test_should_recover_encoded_objects_from_echoed_response() {
        let request = BulkObjectList::from_entries([("x/1", 5), ("x/2", 0), ("y & z", 99)]);
        let encoded = bulk_request_xml(&request).unwrap();
        let echoed = std::str::from_utf8(&encoded)
            .unwrap()
            .replace("<MasterObjectList>", "<MasterObjectList JobId=\"J9\">");

        let response: BulkResponse = from_xml(echoed.as_bytes()).unwrap();
        assert_eq!(response.chunks.len(), 1);
        assert_eq!(response.chunks[0].objects, request.objects);
    }

    #[test]
    fn test_should_reject_bulk_response_without_job_id() {
        let xml = br#"<MasterObjectList><Objects><Object Name="a" Size="1"/></Objects></MasterObjectList>"#;
        let result: Result<BulkResponse, _> = from_xml(xml);
        assert!(matches!(result, Err(XmlError::MissingAttribute(_))));
    }

    #[test]
    fn test_should_read_leading_digits_of_malformed_numbers() {
        let xml = br#"<MasterObjectList JobId="J1"><Objects ChunkNumber="7x"><Object Name="a" Size=""/><Object Name="b" Size="big"/><Object Name="c" Size="1000abc"/></Objects></MasterObjectList>"#;
        let response: BulkResponse = from_xml(xml).unwrap();
        let chunk = &response.chunks[0];
        assert_eq!(chunk.chunk_number, Some(7));
        assert_eq!(chunk.objects[0].size, 0);
        assert_eq!(chunk.objects[1].size, 0);
        assert_eq!(chunk.objects[2].size, 1000);

        let xml = b"<ListBucketResult><Name>b</Name><MaxKeys>1000abc</MaxKeys>\
            <Contents><Key>k</Key><Size></Size></Contents>\
            <Contents><Key>k2</Key><Size> 42 </Size></Contents></ListBucketResult>";
        let output: GetBucketOutput = from_xml(xml).unwrap();
        assert_eq!(output.max_keys, Some(1000));
        assert_eq!(output.objects[1].size, Some(42));
    }

    #[test]
    fn test_should_saturate_oversized_numbers() {
        assert_eq!(parse_u64("99999999999999999999999"), u64::MAX);
        assert_eq!(parse_u64("+12"), 12);
        assert_eq!(parse_u64("-12"), 0);
    }

    #[test]
    fn test_should_reject_unexpected_root() {
        let result: Result<GetBucketOutput, _> = from_xml(b"<Foo><Name>x</Name></Foo>");
        match result {
            Err(XmlError::UnexpectedRoot { expected, found }) => {
                assert_eq!(expected, "ListBucketResult");
                assert_eq!(found, "Foo");
            }
            other => panic!("expected UnexpectedRoot, got {other:?}"),
        }
    }

    #[test]
    fn test_should_reject_documents_without_root() {
        let result: Result<GetServiceOutput, _> = from_xml(b"");
        assert!(matches!(result, Err(XmlError::MissingElement(_))));

        let result: Result<GetServiceOutput, _> = from_xml(b"not xml at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_should_reject_truncated_documents() {
        let result: Result<GetServiceOutput, _> =
            from_xml(b"<ListAllMyBucketsResult><Buckets><Bucket><Name>b1");
        assert!(result.is_err());
    }

    #[test]
    fn test_should_reject_content_after_the_root() {
        let result: Result<GetBucketOutput, _> =
            from_xml(b"<ListBucketResult><Name>b</Name></ListBucketResult><Foo/>");
        assert!(matches!(result, Err(XmlError::UnexpectedElement(_))));

        let result: Result<GetBucketOutput, _> =
            from_xml(b"<ListBucketResult><Name>b</Name></ListBucketResult></Bar>");
        assert!(result.is_err());

        let result: Result<GetBucketOutput, _> =
            from_xml(b"<ListBucketResult><Name>b</Name></ListBucketResult>trailing");
        assert!(matches!(result, Err(XmlError::ParseError(_))));
    }

    #[test]
    fn test_should_accept_whitespace_and_comments_after_the_root() {
        let output: GetBucketOutput =
            from_xml(b"<ListBucketResult><Name>b</Name></ListBucketResult>\n<!-- done -->\n")
                .unwrap();
        assert_eq!(output.name.as_deref(), Some("b"));
    }

    #[test]
    fn test_should_reject_mismatched_end_tags() {
        let result: Result<GetServiceOutput, _> =
            from_xml(b"<ListAllMyBucketsResult><Buckets></Owner></ListAllMyBucketsResult>");
        assert!(result.is_err());
    }
}
