//! Typed DS3 operations.
//!
//! Each operation dispatches a prebuilt [`Request`] and, for listing and bulk
//! calls, buffers the response body and decodes it. Transport failures are
//! returned as-is before any decode is attempted.

use std::io::{Cursor, Read, Write};

use ds3_model::{BulkResponse, GetBucketOutput, GetServiceOutput};
use ds3_xml::{Ds3Deserialize, bulk_request_xml, from_xml};
use tracing::debug;

use crate::client::Client;
use crate::dispatch::send;
use crate::error::Ds3Error;
use crate::request::Request;
use crate::transport::UploadBody;

impl Client {
    /// List all buckets visible to the caller.
    pub fn get_service(&self, request: &Request) -> Result<GetServiceOutput, Ds3Error> {
        self.fetch_xml(request, None)
    }

    /// List the objects of a bucket.
    pub fn get_bucket(&self, request: &Request) -> Result<GetBucketOutput, Ds3Error> {
        self.fetch_xml(request, None)
    }

    /// Download an object, streaming its bytes into `sink`.
    pub fn get_object(&self, request: &Request, sink: &mut dyn Write) -> Result<(), Ds3Error> {
        send(self, request, Some(sink), None)
    }

    /// Upload an object of `request.length()` bytes read from `source`.
    pub fn put_object(
        &self,
        request: &Request,
        source: Box<dyn Read + Send>,
    ) -> Result<(), Ds3Error> {
        send(
            self,
            request,
            None,
            Some(UploadBody::new(source, request.length())),
        )
    }

    /// Delete an object.
    pub fn delete_object(&self, request: &Request) -> Result<(), Ds3Error> {
        send(self, request, None, None)
    }

    /// Fetch an object's metadata. The body, if any, is discarded.
    pub fn head_object(&self, request: &Request) -> Result<(), Ds3Error> {
        send(self, request, None, None)
    }

    /// Create a bucket.
    pub fn put_bucket(&self, request: &Request) -> Result<(), Ds3Error> {
        send(self, request, None, None)
    }

    /// Delete an empty bucket.
    pub fn delete_bucket(&self, request: &Request) -> Result<(), Ds3Error> {
        send(self, request, None, None)
    }

    /// Start a bulk get or put job.
    ///
    /// The request's object list is encoded as a `MasterObjectList` and
    /// uploaded as the body. The reply lists the job id and the chunks the
    /// server assigned, in transfer order.
    pub fn bulk(&self, request: &Request) -> Result<BulkResponse, Ds3Error> {
        let objects = request
            .object_list()
            .filter(|objects| !objects.is_empty())
            .ok_or_else(|| {
                Ds3Error::MissingArgs("The bulk command requires a list of objects".to_owned())
            })?;

        let xml = bulk_request_xml(objects).map_err(|e| {
            Ds3Error::MissingArgs(format!("Cannot encode the bulk object list: {e}"))
        })?;
        let length = xml.len() as u64;
        debug!(objects = objects.len(), length, "Encoded bulk request");

        let request = request.clone().with_length(length);
        let body = UploadBody::new(Box::new(Cursor::new(xml)), length);
        self.fetch_xml(&request, Some(body))
    }

    fn fetch_xml<T: Ds3Deserialize>(
        &self,
        request: &Request,
        body: Option<UploadBody>,
    ) -> Result<T, Ds3Error> {
        let mut buffer: Vec<u8> = Vec::new();
        send(self, request, Some(&mut buffer), body)?;

        debug!(%request, length = buffer.len(), "Decoding response document");
        from_xml(&buffer).map_err(|e| Ds3Error::invalid_xml(&e, &buffer))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use ds3_auth::Credentials;
    use ds3_model::{BulkObjectList, HttpVerb};

    use super::*;
    use crate::error::ErrorKind;
    use crate::transport::TransportFailure;
    use crate::transport::scripted::ScriptedTransport;

    fn client(transport: Arc<ScriptedTransport>) -> Client {
        Client::new("http://localhost:8080", Credentials::new("id", "secret"))
            .unwrap()
            .with_transport(transport)
    }

    #[test]
    fn test_should_decode_service_listing() {
        let transport = ScriptedTransport::ok(
            b"<ListAllMyBucketsResult><Buckets><Bucket><Name>b1</Name>\
              <CreationDate>2024-01-01T00:00:00Z</CreationDate></Bucket></Buckets>\
              <Owner><DisplayName>alice</DisplayName><ID>1</ID></Owner></ListAllMyBucketsResult>",
        );
        let client = client(transport.clone());

        let output = client.get_service(&Request::get_service()).unwrap();

        assert_eq!(output.buckets.len(), 1);
        assert_eq!(output.buckets[0].name.as_deref(), Some("b1"));
        assert_eq!(
            output.owner.and_then(|o| o.display_name).as_deref(),
            Some("alice")
        );
        assert_eq!(transport.captured()[0].url, "http://localhost:8080/");
    }

    #[test]
    fn test_should_decode_bucket_listing_after_continue() {
        let transport = ScriptedTransport::replying(
            &[
                "HTTP/1.1 100 Continue\r\n",
                "\r\n",
                "HTTP/1.1 200 OK\r\n",
                "Content-Type: application/xml\r\n",
                "\r\n",
            ],
            b"<ListBucketResult><Name>photos</Name><IsTruncated>false</IsTruncated>\
              <Contents><Key>a.jpg</Key><Size>42</Size></Contents></ListBucketResult>",
        );
        let client = client(transport);

        let output = client.get_bucket(&Request::get_bucket("photos")).unwrap();

        assert_eq!(output.name.as_deref(), Some("photos"));
        assert!(!output.is_truncated);
        assert_eq!(output.objects.len(), 1);
        assert_eq!(output.objects[0].size, Some(42));
    }

    #[test]
    fn test_should_report_invalid_xml_with_raw_body() {
        let client = client(ScriptedTransport::ok(b"<Foo/>"));

        let error = client.get_bucket(&Request::get_bucket("b")).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InvalidXml);
        assert!(error.message().contains("ListBucketResult"));
        assert!(error.message().contains("<Foo/>"));
    }

    #[test]
    fn test_should_report_unparseable_body_as_invalid_xml() {
        let client = client(ScriptedTransport::ok(b"not xml at all"));

        let error = client.get_service(&Request::get_service()).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::InvalidXml);
        assert!(error.message().contains("not xml at all"));
    }

    #[test]
    fn test_should_return_transport_error_before_decoding() {
        let client = client(ScriptedTransport::failing(TransportFailure::Request(
            "connection refused".to_owned(),
        )));

        let error = client.get_service(&Request::get_service()).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::FailedRequest);
    }

    #[test]
    fn test_should_stream_object_to_sink() {
        let client = client(ScriptedTransport::ok(b"payload"));
        let mut sink = Vec::new();

        client
            .get_object(&Request::get_object("b", "k"), &mut sink)
            .unwrap();

        assert_eq!(sink, b"payload");
    }

    #[test]
    fn test_should_upload_object_body() {
        let transport = ScriptedTransport::ok(b"");
        let client = client(transport.clone());

        client
            .put_object(
                &Request::put_object("b", "k", 3),
                Box::new(Cursor::new(b"abc".to_vec())),
            )
            .unwrap();

        let exchange = &transport.captured()[0];
        assert_eq!(exchange.verb, HttpVerb::Put);
        assert_eq!(exchange.body.as_deref(), Some(&b"abc"[..]));
    }

    #[test]
    fn test_should_send_bodyless_requests() {
        let transport = ScriptedTransport::ok(b"");
        let client = client(transport.clone());

        client.put_bucket(&Request::put_bucket("b")).unwrap();
        client.delete_bucket(&Request::delete_bucket("b")).unwrap();
        client.delete_object(&Request::delete_object("b", "k")).unwrap();
        client.head_object(&Request::head_object("b", "k")).unwrap();

        let verbs: Vec<HttpVerb> = transport.captured().iter().map(|c| c.verb).collect();
        assert_eq!(
            verbs,
            [HttpVerb::Put, HttpVerb::Delete, HttpVerb::Delete, HttpVerb::Head]
        );
        assert!(transport.captured().iter().all(|c| c.body.is_none()));
    }

    #[test]
    fn test_should_run_bulk_put_and_keep_chunk_order() {
        let transport = ScriptedTransport::ok(
            br#"<MasterObjectList JobId="J1">
                 <Objects ChunkNumber="1" ServerId="s1"><Object Name="a" Size="10"/></Objects>
                 <Objects ChunkNumber="2" ServerId="s1"><Object Name="b" Size="20"/></Objects>
               </MasterObjectList>"#,
        );
        let client = client(transport.clone());
        let objects = BulkObjectList::from_entries([("a", 10), ("b", 20)]);

        let response = client.bulk(&Request::put_bulk("photos", objects)).unwrap();

        assert_eq!(response.job_id, "J1");
        assert_eq!(response.chunks.len(), 2);
        assert_eq!(response.chunks[0].chunk_number, Some(1));
        assert_eq!(response.chunks[0].objects[0].size, 10);
        assert_eq!(response.chunks[1].chunk_number, Some(2));
        assert_eq!(response.chunks[1].objects[0].size, 20);

        let exchange = &transport.captured()[0];
        assert_eq!(
            exchange.url,
            "http://localhost:8080/_rest_/bucket/photos?operation=start_bulk_put"
        );
        let body = String::from_utf8(exchange.body.clone().unwrap()).unwrap();
        assert!(body.contains(r#"<Object Name="a" Size="10"/>"#));
        assert!(body.contains(r#"<Object Name="b" Size="20"/>"#));
    }

    #[test]
    fn test_should_reject_bulk_without_objects() {
        let transport = ScriptedTransport::ok(b"");
        let client = client(transport.clone());

        let empty = client
            .bulk(&Request::get_bulk("b", BulkObjectList::default()))
            .unwrap_err();
        assert_eq!(empty.kind(), ErrorKind::MissingArgs);

        let missing = client
            .bulk(&Request::new(HttpVerb::Put, "/_rest_/bucket/b"))
            .unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::MissingArgs);

        assert!(transport.captured().is_empty());
    }

    #[test]
    fn test_should_return_bulk_transport_error_without_decoding() {
        let client = client(ScriptedTransport::failing(TransportFailure::Request(
            "timed out".to_owned(),
        )));
        let objects = BulkObjectList::from_entries([("a", 1)]);

        let error = client
            .bulk(&Request::get_bulk("b", objects))
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::FailedRequest);
    }
}
