use url::Url;

use crate::MessagingError;

/// The parts of an event hub connection string this crate cares about.
///
/// ```rust
/// use hmessaging::ConnectionStringProperties;
///
/// let props = ConnectionStringProperties::parse(
///     "Endpoint=sb://shop.servicebus.windows.net/;SharedAccessKeyName=send;SharedAccessKey=k;EntityPath=orders",
/// )
/// .expect("well formed");
///
/// assert_eq!(props.endpoint.host_str(), Some("shop.servicebus.windows.net"));
/// assert_eq!(props.event_hub_name.as_deref(), Some("orders"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionStringProperties {
    pub endpoint: Url,
    pub event_hub_name: Option<String>,
    pub shared_access_key_name: Option<String>,
}

impl ConnectionStringProperties {
    pub fn parse(connection_string: &str) -> Result<Self, MessagingError> {
        let mut endpoint = None;
        let mut event_hub_name = None;
        let mut shared_access_key_name = None;

        for segment in connection_string.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let (key, value) = segment.split_once('=').ok_or_else(|| {
                MessagingError::malformed(format!(
                    "connection string segment '{segment}' is not a key=value pair"
                ))
            })?;
            let value = value.trim();

            match key.trim().to_ascii_lowercase().as_str() {
                "endpoint" => {
                    let url = Url::parse(value).map_err(|err| {
                        MessagingError::malformed(format!("endpoint '{value}' is not a URI: {err}"))
                    })?;
                    endpoint = Some(url);
                }
                "entitypath" if !value.is_empty() => event_hub_name = Some(value.to_string()),
                "sharedaccesskeyname" if !value.is_empty() => {
                    shared_access_key_name = Some(value.to_string())
                }
                _ => {}
            }
        }

        let endpoint = endpoint
            .ok_or_else(|| MessagingError::malformed("connection string has no Endpoint"))?;
        if endpoint.host_str().is_none_or(str::is_empty) {
            return Err(MessagingError::malformed(format!(
                "endpoint '{endpoint}' has no host"
            )));
        }

        Ok(Self {
            endpoint,
            event_hub_name,
            shared_access_key_name,
        })
    }

    pub fn host(&self) -> &str {
        self.endpoint.host_str().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MessagingErrorKind;

    #[test]
    fn keys_are_case_insensitive_and_unknown_keys_ignored() {
        let props = ConnectionStringProperties::parse(
            "endpoint=sb://local.servicebus.windows.net/; entitypath = hub ;UseDevelopmentEmulator=true",
        )
        .expect("parsed");

        assert_eq!(props.host(), "local.servicebus.windows.net");
        assert_eq!(props.event_hub_name.as_deref(), Some("hub"));
        assert_eq!(props.shared_access_key_name, None);
    }

    #[test]
    fn malformed_connection_strings_are_rejected() {
        for input in ["", "SharedAccessKey=k", "Endpoint=not a uri", "Endpoint"] {
            let error = ConnectionStringProperties::parse(input).expect_err(input);
            assert_eq!(error.kind, MessagingErrorKind::MalformedConnectionInfo, "{input}");
        }
    }
}
