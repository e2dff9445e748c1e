pub mod header {
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
    pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";
    pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";
    pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "Access-Control-Request-Headers";
    pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "Access-Control-Request-Method";
    pub const ORIGIN: &str = "Origin";
    pub const VARY: &str = "Vary";

    pub const X_REQUESTED_WITH: &str = "X-Requested-With";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const ACCEPT: &str = "Accept";
    pub const AUTHORIZATION: &str = "Authorization";
    pub const CACHE_CONTROL: &str = "Cache-Control";
    pub const X_API_KEY: &str = "X-API-Key";

    pub const X_TOTAL_COUNT: &str = "X-Total-Count";
    pub const X_PAGE_COUNT: &str = "X-Page-Count";
    pub const X_RATE_LIMIT_REMAINING: &str = "X-Rate-Limit-Remaining";
}

pub mod method {
    pub const DELETE: &str = "DELETE";
    pub const GET: &str = "GET";
    pub const OPTIONS: &str = "OPTIONS";
    pub const PATCH: &str = "PATCH";
    pub const POST: &str = "POST";
    pub const PUT: &str = "PUT";
}

/// Origins trusted from process start.
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "http://localhost:5173",
    "https://your-deployed-app.netlify.app",
];

/// Domain whose `https` subdomains are trusted (preview deployments).
pub const DEFAULT_WILDCARD_DOMAIN: &str = "bolt.new";

/// Preflight cache lifetime in seconds (24 hours).
pub const DEFAULT_MAX_AGE_SECS: u64 = 86_400;

pub const VIOLATION_ERROR: &str = "CORS Policy Violation";
pub const VIOLATION_MESSAGE: &str = "This origin is not allowed to access this resource";
