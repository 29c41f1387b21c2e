use crate::error::{InsertError, MatchError, UrlError};
use crate::params::Params;
use crate::path::clean_path;
use crate::tree::{Match, Node};

use http::{Method, StatusCode};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use std::collections::HashMap;

// Bytes escaped when a catch-all value is written back into a URL.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// A named parameter must stay within its segment.
const SEGMENT: &AsciiSet = &PATH.add(b'/');

/// A handler registered under a path pattern.
#[derive(Debug, Clone)]
pub struct Route<T> {
    pattern: String,
    name: Option<String>,
    handler: T,
}

impl<T> Route<T> {
    /// The pattern this route was registered with, ex: `/users/:id`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The name used for reverse routing, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The handler registered for this route.
    pub fn handler(&self) -> &T {
        &self.handler
    }
}

/// The outcome of routing a request, see [`Router::dispatch`].
#[derive(Debug)]
pub enum Dispatch<'r, 'p, T> {
    /// A route matched the method and path.
    Matched(Match<'r, 'p, &'r Route<T>>),
    /// The path matched after fixing a trailing slash, its case, or its
    /// superfluous elements. Clients should be sent to `location`.
    Redirect {
        location: String,
        status: StatusCode,
    },
    /// An automatic reply to an `OPTIONS` request.
    Options {
        allow: Vec<Method>,
        handler: Option<&'r T>,
    },
    /// The path exists for other methods only.
    MethodNotAllowed {
        allow: Vec<Method>,
        handler: Option<&'r T>,
    },
    NotFound { handler: Option<&'r T> },
}

/// Router is a container which can be used to dispatch requests to different
/// handlers via configurable routes.
///
/// Routes are registered per [`Method`] and matched in one radix tree per
/// method. Registration happens up front: once requests are being served the
/// router is only read, so it can be shared between threads freely.
///
/// ```rust
/// use routetree::{Dispatch, Router};
/// use http::Method;
///
/// let mut router = Router::default();
/// router.get("/home", "Welcome!");
/// router.get("/users/:id", "A User");
///
/// match router.dispatch(&Method::GET, "/users/978") {
///     Dispatch::Matched(matched) => {
///         assert_eq!(*matched.value.handler(), "A User");
///         assert_eq!(matched.params.get("id"), Some("978"));
///     }
///     _ => unreachable!(),
/// }
/// ```
pub struct Router<T> {
    trees: HashMap<Method, Node<Route<T>>>,
    names: HashMap<String, String>,
    max_params: usize,

    /// Enables automatic redirection if the current route can't be matched but a
    /// handler for the path with (without) the trailing slash exists.
    /// For example if `/foo/` is requested but a route only exists for `/foo`, the
    /// client is redirected to `/foo` with http status code 301 for `GET` requests
    /// and 308 for all other request methods.
    pub redirect_trailing_slash: bool,

    /// If enabled, the router tries to fix the current request path, if no
    /// handler is registered for it.
    /// First superfluous path elements like `../` or `//` are removed.
    /// Afterwards the router does a case-insensitive lookup of the cleaned path.
    /// If a handler can be found for this route, the router makes a redirection
    /// to the corrected path with status code 301 for `GET` requests and 308 for
    /// all other request methods.
    /// For example `/FOO` and `/..//Foo` could be redirected to `/foo`.
    /// `redirect_trailing_slash` is independent of this option.
    pub redirect_fixed_path: bool,

    /// If enabled, the router checks if another method is allowed for the
    /// current route, if the current request can not be routed.
    /// If this is the case, the request is answered with `MethodNotAllowed`.
    /// If no other method is allowed, the request is treated as not found.
    pub handle_method_not_allowed: bool,

    /// If enabled, the router automatically replies to `OPTIONS` requests.
    /// Custom `OPTIONS` handlers take priority over automatic replies.
    pub handle_options: bool,

    /// If enabled, parameter values are percent-decoded before they are
    /// handed out. Use it when routing on the raw, still escaped, request path.
    pub unescape_path_values: bool,

    /// An optional handler for automatic `OPTIONS` replies.
    pub global_options: Option<T>,

    /// An optional handler for requests no route matches.
    pub not_found: Option<T>,

    /// An optional handler for requests that only match under other methods.
    pub method_not_allowed: Option<T>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self {
            trees: HashMap::new(),
            names: HashMap::new(),
            max_params: 0,
            redirect_trailing_slash: true,
            redirect_fixed_path: true,
            handle_method_not_allowed: true,
            handle_options: true,
            unescape_path_values: false,
            global_options: None,
            not_found: None,
            method_not_allowed: None,
        }
    }
}

impl<T> Router<T> {
    /// Creates a router with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for the given method and path.
    ///
    /// # Panics
    ///
    /// Panics if the path is malformed or conflicts with an existing route.
    /// Route tables are static, so these are programming errors.
    pub fn handle(&mut self, method: Method, path: &str, handler: T) {
        if let Err(err) = self.try_handle(method, path, handler) {
            panic!("{}", err);
        }
    }

    /// Like [`handle`](Router::handle), also making the route available to
    /// [`url_for`](Router::url_for) under `name`.
    ///
    /// A name may be registered again, for another method, only if it is
    /// bound to the same path.
    pub fn handle_named(&mut self, method: Method, path: &str, name: &str, handler: T) {
        if let Err(err) = self.try_handle_named(method, path, name, handler) {
            panic!("{}", err);
        }
    }

    /// Registers a handler, returning an error instead of panicking.
    ///
    /// A failed registration may leave the tree for `method` partially
    /// restructured; the router should not be used to serve requests afterwards.
    pub fn try_handle(&mut self, method: Method, path: &str, handler: T) -> Result<(), InsertError> {
        self.insert(method, path, None, handler)
    }

    /// Named variant of [`try_handle`](Router::try_handle).
    pub fn try_handle_named(
        &mut self,
        method: Method,
        path: &str,
        name: &str,
        handler: T,
    ) -> Result<(), InsertError> {
        if let Some(existing) = self.names.get(name) {
            if existing != path {
                return Err(InsertError::DuplicateName {
                    name: name.to_owned(),
                    path: path.to_owned(),
                });
            }
        }

        self.insert(method, path, Some(name), handler)?;
        self.names.insert(name.to_owned(), path.to_owned());
        Ok(())
    }

    fn insert(&mut self, method: Method, path: &str, name: Option<&str>, handler: T) -> Result<(), InsertError> {
        let route = Route {
            pattern: path.to_owned(),
            name: name.map(str::to_owned),
            handler,
        };

        self.trees
            .entry(method.clone())
            .or_default()
            .insert(path, route)?;

        let params = path.bytes().filter(|&c| c == b':' || c == b'*').count();
        self.max_params = self.max_params.max(params);

        debug!("registered {} {}", method, path);
        Ok(())
    }

    /// Register a handler for `GET` requests.
    pub fn get(&mut self, path: &str, handler: T) {
        self.handle(Method::GET, path, handler);
    }

    /// Register a handler for `HEAD` requests.
    pub fn head(&mut self, path: &str, handler: T) {
        self.handle(Method::HEAD, path, handler);
    }

    /// Register a handler for `OPTIONS` requests.
    pub fn options(&mut self, path: &str, handler: T) {
        self.handle(Method::OPTIONS, path, handler);
    }

    /// Register a handler for `POST` requests.
    pub fn post(&mut self, path: &str, handler: T) {
        self.handle(Method::POST, path, handler);
    }

    /// Register a handler for `PUT` requests.
    pub fn put(&mut self, path: &str, handler: T) {
        self.handle(Method::PUT, path, handler);
    }

    /// Register a handler for `PATCH` requests.
    pub fn patch(&mut self, path: &str, handler: T) {
        self.handle(Method::PATCH, path, handler);
    }

    /// Register a handler for `DELETE` requests.
    pub fn delete(&mut self, path: &str, handler: T) {
        self.handle(Method::DELETE, path, handler);
    }

    /// Lookup allows the manual lookup of a route for a specific method and path.
    /// If the route is not found, the error carries a trailing slash
    /// recommendation.
    ///
    /// ```rust
    /// use routetree::Router;
    /// use http::Method;
    ///
    /// let mut router = Router::default();
    /// router.get("/home", "Welcome!");
    ///
    /// let res = router.lookup(&Method::GET, "/home").unwrap();
    /// assert_eq!(*res.value.handler(), "Welcome!");
    /// assert!(res.params.is_empty());
    /// ```
    pub fn lookup<'r, 'p>(
        &'r self,
        method: &Method,
        path: &'p str,
    ) -> Result<Match<'r, 'p, &'r Route<T>>, MatchError> {
        let tree = self.trees.get(method).ok_or(MatchError::new(false))?;

        let mut params = Params::with_capacity(self.max_params);
        let value = tree.find(path, &mut params, self.unescape_path_values)?;
        Ok(Match { value, params })
    }

    /// Finds the registered path matching `path` case-insensitively, optionally
    /// fixing a missing or superfluous trailing slash.
    pub fn path_ignore_case(&self, method: &Method, path: &str, fix_trailing_slash: bool) -> Option<String> {
        self.trees
            .get(method)?
            .path_ignore_case(path, fix_trailing_slash)
    }

    /// Returns a list of the allowed methods for a specific path, sorted by
    /// name. `*` asks for the methods the server supports at all.
    ///
    /// ```rust
    /// use routetree::Router;
    /// use http::Method;
    ///
    /// let mut router = Router::default();
    /// router.get("/products", "all products");
    /// router.post("/products", "product created");
    ///
    /// let allowed = router.allowed("/products");
    /// assert_eq!(allowed, [Method::GET, Method::OPTIONS, Method::POST]);
    /// ```
    pub fn allowed(&self, path: &str) -> Vec<Method> {
        let mut allowed: Vec<Method> = self
            .trees
            .iter()
            .filter(|(method, _)| **method != Method::OPTIONS)
            .filter(|(_, tree)| path == "*" || tree.at(path).is_ok())
            .map(|(method, _)| method.clone())
            .collect();

        if !allowed.is_empty() {
            allowed.push(Method::OPTIONS);
        }

        allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        allowed
    }

    /// Routes a request, applying the redirect, `OPTIONS`, method not allowed
    /// and not found policy configured on the router.
    pub fn dispatch<'r, 'p>(&'r self, method: &Method, path: &'p str) -> Dispatch<'r, 'p, T> {
        if let Some(tree) = self.trees.get(method) {
            let mut params = Params::with_capacity(self.max_params);

            match tree.find(path, &mut params, self.unescape_path_values) {
                Ok(value) => return Dispatch::Matched(Match { value, params }),
                Err(err) if *method != Method::CONNECT && path != "/" => {
                    let status = match *method {
                        // Moved Permanently, request with GET method
                        Method::GET => StatusCode::MOVED_PERMANENTLY,
                        // Permanent Redirect, request with same method
                        _ => StatusCode::PERMANENT_REDIRECT,
                    };

                    if err.tsr() && self.redirect_trailing_slash {
                        let location = match path.strip_suffix('/') {
                            Some(stripped) if !stripped.is_empty() => stripped.to_owned(),
                            _ => format!("{}/", path),
                        };

                        trace!("redirecting {} {} to {}", method, path, location);
                        return Dispatch::Redirect { location, status };
                    }

                    if self.redirect_fixed_path {
                        let cleaned = clean_path(path);
                        if let Some(location) = tree.path_ignore_case(&cleaned, self.redirect_trailing_slash) {
                            trace!("redirecting {} {} to fixed path {}", method, path, location);
                            return Dispatch::Redirect { location, status };
                        }
                    }
                }
                Err(_) => {}
            }
        }

        if *method == Method::OPTIONS && self.handle_options {
            let allow = self.allowed(path);
            if !allow.is_empty() {
                return Dispatch::Options {
                    allow,
                    handler: self.global_options.as_ref(),
                };
            }
        } else if self.handle_method_not_allowed {
            let allow = self.allowed(path);
            if !allow.is_empty() {
                trace!("{} not allowed for {}", method, path);
                return Dispatch::MethodNotAllowed {
                    allow,
                    handler: self.method_not_allowed.as_ref(),
                };
            }
        }

        trace!("no route for {} {}", method, path);
        Dispatch::NotFound {
            handler: self.not_found.as_ref(),
        }
    }

    /// Builds the URL of a named route, substituting its parameters.
    ///
    /// Named parameter values are escaped to stay within their segment, catch-all
    /// values may span several segments.
    ///
    /// ```rust
    /// use routetree::Router;
    /// use http::Method;
    ///
    /// let mut router = Router::default();
    /// router.handle_named(Method::GET, "/users/:id/files/*path", "user_file", ());
    ///
    /// let url = router.url_for("user_file", &[("id", "42"), ("path", "a b/c.txt")]).unwrap();
    /// assert_eq!(url, "/users/42/files/a%20b/c.txt");
    /// ```
    pub fn url_for(&self, name: &str, params: &[(&str, &str)]) -> Result<String, UrlError> {
        let pattern = self
            .names
            .get(name)
            .ok_or_else(|| UrlError::UnknownName(name.to_owned()))?;

        let mut url = String::with_capacity(pattern.len());
        let mut rest = pattern.as_str();

        while let Some(start) = rest.find(|c: char| c == ':' || c == '*') {
            url.push_str(&rest[..start]);

            let end = rest[start..].find('/').map_or(rest.len(), |i| start + i);
            let key = &rest[start + 1..end];

            let value = params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| *v)
                .ok_or_else(|| UrlError::MissingParam {
                    name: name.to_owned(),
                    param: key.to_owned(),
                })?;

            if rest[start..].starts_with('*') {
                // the pattern already holds the slash a catch-all value starts with
                let value = value.strip_prefix('/').unwrap_or(value);
                url.extend(utf8_percent_encode(value, PATH));
            } else {
                url.extend(utf8_percent_encode(value, SEGMENT));
            }

            rest = &rest[end..];
        }

        url.push_str(rest);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_params_tracks_widest_route() {
        let mut router = Router::new();
        router.get("/", 0);
        router.get("/:a/:b/*c", 1);
        router.post("/:a", 2);

        assert_eq!(router.max_params, 3);
    }

    #[test]
    fn failed_named_registration_keeps_name_free() {
        let mut router = Router::new();
        router.get("/users/:id", 0);

        let err = router
            .try_handle_named(Method::GET, "/users/:name", "user", 1)
            .unwrap_err();
        assert!(matches!(err, InsertError::WildcardConflict { .. }));
        assert!(!router.names.contains_key("user"));

        router.handle_named(Method::POST, "/users/:name", "user", 2);
        assert_eq!(router.url_for("user", &[("name", "ferris")]).unwrap(), "/users/ferris");
    }
}
