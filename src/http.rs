//! Hand-built HTTP/1.1 responses.
//!
//! Every response this server ever emits is a 200. Malformed requests and
//! unmatched methods are answered by the default handler like any other
//! index traffic; a hardened rewrite would distinguish them, but test parity
//! with the original behavior requires absorbing them here.

/// JSON response: 200 OK with a CORS header so a UI served from another
/// origin during development can poll the API.
pub fn json_response(body: &str) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\n\
         Content-Type: application/json\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Content-Length: {}\r\n\
         \r\n",
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body.as_bytes());
    response
}

/// Opaque payload response (the presentation asset). No CORS header.
pub fn opaque_response(body: &[u8], content_type: &str) -> Vec<u8> {
    let mut response = format!(
        "HTTP/1.1 200 OK\r\n\
         Content-Type: {}\r\n\
         Content-Length: {}\r\n\
         \r\n",
        content_type,
        body.len()
    )
    .into_bytes();
    response.extend_from_slice(body);
    response
}
