//! Signed request dispatch.
//!
//! One call performs one HTTP exchange: resolve the URL, sign with the
//! current date, hand the exchange to the client's transport and let the
//! transport drive a fresh [`ResponseHeaderParser`]. The parsed status and
//! headers are logged and dropped when the call returns.

use std::io::{Read, Write};

use ds3_auth::{
    SignatureInput, authorization_header, canonicalize_amz_headers, http_date_now, sign,
};
use tracing::{debug, warn};

use crate::client::Client;
use crate::error::Ds3Error;
use crate::header::ResponseHeaderParser;
use crate::query::resolve_url;
use crate::request::Request;
use crate::transport::{HttpExchange, UploadBody};

/// Dispatch `request` through `client`.
///
/// Response body bytes are streamed into `read_sink` when one is given and
/// discarded otherwise. For PUT and POST, exactly `request.length()` bytes are
/// uploaded from `write_sink`; without a `write_sink` the request is sent with
/// no body. Other verbs never send a body.
///
/// Only transport-level failures are errors. A non-2xx status is logged and
/// the call still succeeds.
pub fn dispatch(
    client: &Client,
    request: &Request,
    read_sink: Option<&mut dyn Write>,
    write_sink: Option<Box<dyn Read + Send>>,
) -> Result<(), Ds3Error> {
    let body = write_sink.map(|reader| UploadBody::new(reader, request.length()));
    send(client, request, read_sink, body)
}

pub(crate) fn send(
    client: &Client,
    request: &Request,
    read_sink: Option<&mut dyn Write>,
    body: Option<UploadBody>,
) -> Result<(), Ds3Error> {
    if request.path().is_empty() {
        return Err(Ds3Error::MissingArgs(
            "The request path must not be empty".to_owned(),
        ));
    }

    let url = resolve_url(client.endpoint(), request.path(), request.query_params());
    let verb = request.verb();

    let date = http_date_now();
    let amz_headers = canonicalize_amz_headers(
        request
            .headers()
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str())),
    );
    let signature = sign(
        client.credentials().secret_key(),
        &SignatureInput::new(verb.as_str(), request.path(), &date).with_amz_headers(&amz_headers),
    )?;

    let mut headers: Vec<(String, String)> = request
        .headers()
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    headers.push((
        "Authorization".to_owned(),
        authorization_header(client.credentials(), &signature),
    ));
    headers.push(("Date".to_owned(), date));

    let body = match body {
        Some(body) if verb.accepts_body() => Some(body),
        Some(_) => {
            debug!(%verb, "Ignoring upload body for a verb that takes none");
            None
        }
        None => None,
    };

    debug!(%verb, url = %url, body_length = body.as_ref().map(|b| b.length), "Dispatching request");

    let exchange = HttpExchange {
        verb,
        url,
        headers,
        body,
        max_redirects: client.max_redirects(),
        proxy: client.proxy().map(str::to_owned),
    };

    let mut parser = ResponseHeaderParser::new();
    client.transport().perform(exchange, &mut parser, read_sink)?;

    match parser.status_code() {
        Some(code) if code >= 400 => warn!(
            %request,
            status_code = code,
            status_message = parser.status_message().unwrap_or_default(),
            "Request returned an error status"
        ),
        Some(code) => debug!(%request, status_code = code, "Request completed"),
        None => warn!(%request, "Response carried no status line"),
    }

    Ok(())
}
