//! Split URI components and their browser-style views.

/// The components of a URI reference.
///
/// The five primary fields mirror the RFC 3986 grammar; the remaining
/// fields are sub-splits of `authority` computed at decode time. `None`
/// means the component's separator was not present in the source,
/// `Some("")` that it was present with an empty value. `path` always
/// participates in a split and is therefore a plain `String`.
///
/// Browser-URL-compatible views (`protocol`, `pathname`, `search`, `hash`,
/// `host`, …) are exposed as methods returning `""` for absent components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UriComponents {
    /// Scheme without the trailing `:` (e.g. `http`).
    pub scheme: Option<String>,
    /// Everything between `//` and the path (e.g. `user:pw@host:80`).
    pub authority: Option<String>,
    /// Path, possibly empty.
    pub path: String,
    /// Query without the leading `?`.
    pub query: Option<String>,
    /// Fragment without the leading `#`.
    pub fragment: Option<String>,
    /// `username[:password]` portion of the authority, without the `@`.
    pub userinfo: Option<String>,
    /// `hostname[:port]` portion of the authority.
    pub host: Option<String>,
    /// Host name alone, without the port.
    pub hostname: Option<String>,
    /// Port as written (not parsed to a number).
    pub port: Option<String>,
    /// Username portion of `userinfo`.
    pub username: Option<String>,
    /// Password portion of `userinfo`.
    pub password: Option<String>,
}

impl UriComponents {
    /// Build components from the five primary fields, computing the
    /// authority sub-splits the same way [`crate::decode`] does.
    ///
    /// This is the constructor to use when assembling a URI by hand; it
    /// keeps the derived fields consistent so that
    /// `decode(&encode(&c)) == c` holds for unambiguous inputs.
    pub fn from_parts(
        scheme: Option<String>,
        authority: Option<String>,
        path: String,
        query: Option<String>,
        fragment: Option<String>,
    ) -> Self {
        let mut components = Self { scheme, authority, path, query, fragment, ..Self::default() };
        components.split_authority();
        components
    }

    /// Recompute the derived fields from `authority`.
    pub(crate) fn split_authority(&mut self) {
        let Some(authority) = self.authority.as_deref() else {
            self.userinfo = None;
            self.host = None;
            self.hostname = None;
            self.port = None;
            self.username = None;
            self.password = None;
            return;
        };

        let (userinfo, host, hostname, port) = crate::codec::split_authority(authority);
        self.userinfo = userinfo;
        self.host = Some(host);
        self.hostname = Some(hostname);
        self.port = port;

        if let Some(userinfo) = self.userinfo.as_deref() {
            let (username, password) = crate::codec::split_userinfo(userinfo);
            self.username = Some(username);
            self.password = password;
        } else {
            self.username = None;
            self.password = None;
        }
    }

    /// Full recomposed URI string. Equivalent to [`crate::encode`].
    pub fn href(&self) -> String {
        crate::codec::encode(self)
    }

    /// Scheme, or `""` when absent.
    pub fn protocol(&self) -> &str {
        self.scheme.as_deref().unwrap_or("")
    }

    /// Path (always present, possibly empty).
    pub fn pathname(&self) -> &str {
        &self.path
    }

    /// Query, or `""` when absent.
    pub fn search(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }

    /// Fragment, or `""` when absent.
    pub fn hash(&self) -> &str {
        self.fragment.as_deref().unwrap_or("")
    }

    /// `hostname[:port]`, or `""` when there is no authority.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or("")
    }

    /// Host name without the port, or `""`.
    pub fn hostname(&self) -> &str {
        self.hostname.as_deref().unwrap_or("")
    }

    /// Port as written, or `""`.
    pub fn port(&self) -> &str {
        self.port.as_deref().unwrap_or("")
    }

    /// `username[:password]`, or `""`.
    pub fn userinfo(&self) -> &str {
        self.userinfo.as_deref().unwrap_or("")
    }

    /// Username, or `""`.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or("")
    }

    /// Password, or `""`.
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or("")
    }

    /// `scheme://host` when both are non-empty, otherwise `""`.
    pub fn origin(&self) -> String {
        match (self.scheme.as_deref(), self.host.as_deref()) {
            (Some(scheme), Some(host)) if !scheme.is_empty() && !host.is_empty() => {
                format!("{scheme}://{host}")
            },
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_computes_derived_fields() {
        let c = UriComponents::from_parts(
            Some("ftp".into()),
            Some("anonymous:guest@ftp.example.org:21".into()),
            "/pub".into(),
            None,
            None,
        );
        assert_eq!(c.username(), "anonymous");
        assert_eq!(c.password(), "guest");
        assert_eq!(c.hostname(), "ftp.example.org");
        assert_eq!(c.port(), "21");
        assert_eq!(c.host(), "ftp.example.org:21");
        assert_eq!(c.origin(), "ftp://ftp.example.org:21");
    }

    #[test]
    fn origin_requires_scheme_and_host() {
        let relative =
            UriComponents::from_parts(None, None, "/search".into(), None, None);
        assert_eq!(relative.origin(), "");

        let no_host = UriComponents::from_parts(
            Some("http".into()),
            Some(String::new()),
            String::new(),
            None,
            None,
        );
        assert_eq!(no_host.origin(), "");
    }

    #[test]
    fn views_default_to_empty() {
        let c = UriComponents::default();
        assert_eq!(c.protocol(), "");
        assert_eq!(c.pathname(), "");
        assert_eq!(c.search(), "");
        assert_eq!(c.hash(), "");
        assert_eq!(c.host(), "");
        assert_eq!(c.username(), "");
    }
}
