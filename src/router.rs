//! Request routing by raw substring match.
//!
//! This is deliberately not a path parser. The raw request text is tested
//! against fixed markers in priority order; the first marker found anywhere
//! in the request wins, so `GET /foo/api/ping` routes to the ping handler.
//! Anything that is not a GET, and any GET with no marker, falls through to
//! the index page.

/// Closed set of handlers. The marker table below is the only dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Servers,
    Info,
    Ping,
    Download,
    Upload,
    Index,
}

/// Markers tested in priority order.
const ROUTES: &[(&str, Route)] = &[
    ("/api/servers", Route::Servers),
    ("/api/info", Route::Info),
    ("/api/ping", Route::Ping),
    ("/api/download", Route::Download),
    ("/api/upload", Route::Upload),
];

/// Select a handler for a raw request.
pub fn route(request: &str) -> Route {
    // Only GET is recognized; everything else is index traffic.
    if !request.contains("GET ") {
        return Route::Index;
    }

    for &(marker, handler) in ROUTES {
        if request.contains(marker) {
            return handler;
        }
    }

    Route::Index
}
