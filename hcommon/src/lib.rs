//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use hcommon::{ConfigOverrides, EndpointName, ResourceName};
//!
//! let resource = ResourceName::from("api");
//! let endpoint = EndpointName::new("http");
//! let mut overrides = ConfigOverrides::new();
//! overrides.insert("Publisher:RandomizePorts".to_string(), "true".to_string());
//!
//! assert_eq!(resource.as_str(), "api");
//! assert_eq!(endpoint.to_string(), "http");
//! assert_eq!(overrides.len(), 1);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use hcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Configuration maps and resource identifier newtypes.
    //!
    //! ```rust
    //! use hcommon::{ConfigOverrides, EndpointName, ResourceName};
    //!
    //! let resource = ResourceName::new("cache");
    //! let endpoint = EndpointName::from("tcp");
    //! let mut overrides = ConfigOverrides::new();
    //! overrides.insert("env".to_string(), "test".to_string());
    //!
    //! assert_eq!(resource.to_string(), "cache");
    //! assert_eq!(endpoint.as_str(), "tcp");
    //! ```

    use std::collections::BTreeMap;
    use std::fmt::{Display, Formatter};

    /// Ordered key/value configuration, keyed with `:` separated sections.
    pub type ConfigOverrides = BTreeMap<String, String>;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ResourceName(String);

    impl ResourceName {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }

        pub fn is_blank(&self) -> bool {
            self.0.trim().is_empty()
        }
    }

    impl Display for ResourceName {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for ResourceName {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for ResourceName {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }

    impl std::borrow::Borrow<str> for ResourceName {
        fn borrow(&self) -> &str {
            self.as_str()
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct EndpointName(String);

    impl EndpointName {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for EndpointName {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for EndpointName {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for EndpointName {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod names {
    //! Project name validation and sanitization.
    //!
    //! ```rust
    //! use hcommon::{is_project_name_valid, sanitize_project_name};
    //!
    //! let sanitized = sanitize_project_name("my-app host");
    //! assert_eq!(sanitized, "my_app_host");
    //! assert!(is_project_name_valid(&sanitized));
    //! ```

    fn is_allowed(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_' || ch == '.'
    }

    pub fn is_project_name_valid(name: &str) -> bool {
        !name.is_empty() && name.chars().all(is_allowed)
    }

    pub fn sanitize_project_name(name: &str) -> String {
        name.chars()
            .map(|ch| if is_allowed(ch) { ch } else { '_' })
            .collect()
    }
}

pub mod registry {
    //! Keyed lookup table shared by the service registry and resource catalog.
    //!
    //! ```rust
    //! use hcommon::Registry;
    //!
    //! let mut services = Registry::<&str, u16>::new();
    //! services.insert("db", 5432);
    //!
    //! assert_eq!(services.get("db"), Some(&5432));
    //! assert_eq!(services.len(), 1);
    //! ```

    use std::collections::HashMap;
    use std::ops::{Deref, DerefMut};

    #[derive(Debug, Clone)]
    pub struct Registry<K, V>(HashMap<K, V>);

    impl<K, V> Registry<K, V> {
        pub fn new() -> Self {
            Self(HashMap::new())
        }
    }

    impl<K, V> Default for Registry<K, V> {
        fn default() -> Self {
            Self::new()
        }
    }

    impl<K, V> Deref for Registry<K, V> {
        type Target = HashMap<K, V>;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl<K, V> DerefMut for Registry<K, V> {
        fn deref_mut(&mut self) -> &mut Self::Target {
            &mut self.0
        }
    }
}

pub use context::{ConfigOverrides, EndpointName, ResourceName};
pub use future::BoxFuture;
pub use names::{is_project_name_valid, sanitize_project_name};
pub use registry::Registry;

#[cfg(test)]
mod tests {
    use super::{EndpointName, Registry, ResourceName, is_project_name_valid, sanitize_project_name};

    #[test]
    fn id_newtypes_round_trip_strings() {
        let resource = ResourceName::new("api");
        let endpoint = EndpointName::from("https");

        assert_eq!(resource.as_str(), "api");
        assert_eq!(endpoint.as_str(), "https");
        assert_eq!(resource.to_string(), "api");
        assert!(ResourceName::from("  ").is_blank());
    }

    #[test]
    fn sanitize_replaces_disallowed_characters() {
        let cases = [
            ("validName", "validName"),
            ("valid_name", "valid_name"),
            ("valid.name", "valid.name"),
            ("valid_name_1", "valid_name_1"),
            ("invalid@name", "invalid_name"),
            ("invalid$name", "invalid_name"),
            ("invalid-name", "invalid_name"),
            ("invalid+name", "invalid_name"),
            ("invalid name", "invalid_name"),
            ("-invalidName", "_invalidName"),
            ("invalidName-", "invalidName_"),
            ("@invalidName", "_invalidName"),
            ("a@b$c-d e", "a_b_c_d_e"),
        ];

        for (input, expected) in cases {
            let sanitized = sanitize_project_name(input);
            assert_eq!(sanitized, expected, "input {input}");
            assert!(is_project_name_valid(&sanitized));
        }
    }

    #[test]
    fn validation_rejects_disallowed_characters() {
        for name in ["invalid@name", "invalid name", "-invalidName", "invalidName@", ""] {
            assert!(!is_project_name_valid(name), "name {name:?}");
        }
        assert!(is_project_name_valid("valid.name"));
    }

    #[test]
    fn registry_replaces_and_removes_by_borrowed_key() {
        let mut registry = Registry::<ResourceName, u32>::default();
        assert!(registry.is_empty());

        assert_eq!(registry.insert(ResourceName::from("api"), 1), None);
        assert_eq!(registry.insert(ResourceName::from("api"), 2), Some(1));
        assert!(registry.contains_key("api"));

        assert_eq!(registry.remove("api"), Some(2));
        assert!(registry.is_empty());
    }
}
