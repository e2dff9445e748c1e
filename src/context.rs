/// Borrowed view of the request fields the gatekeeper looks at.
///
/// `origin` is `None` when the `Origin` header was not sent at all. A header
/// that was sent with an empty value is `Some("")` and is evaluated like any
/// other declared origin.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn is_preflight(&self) -> bool {
        self.method.eq_ignore_ascii_case(crate::constants::method::OPTIONS)
    }
}
