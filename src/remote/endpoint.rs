use reqwest::Url;

use crate::error::{PreviewError, Result};
use crate::params::ParameterInputs;

/// Where pattern images are requested from.
#[derive(Clone, Debug)]
pub struct PatternEndpoint {
    base: Url,
}

impl PatternEndpoint {
    pub fn parse(server: &str) -> Result<Self> {
        let invalid = |reason: String| PreviewError::InvalidServerUrl {
            url: server.to_string(),
            reason,
        };

        let mut base = Url::parse(server).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base url".to_string()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self { base })
    }

    pub fn url_for(&self, inputs: &ParameterInputs) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("png");
        }
        url.query_pairs_mut()
            .clear()
            .extend_pairs(inputs.query_pairs());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_and_query(url: &Url) -> String {
        match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        }
    }

    #[test]
    fn request_shape() {
        let endpoint = PatternEndpoint::parse("http://127.0.0.1:8080").unwrap();
        let url = endpoint.url_for(&ParameterInputs::new("2", "3", "90", "0.5"));
        assert_eq!(path_and_query(&url), "/png?f=png&R=2&r=3&phi=90&t=0.5");
        assert_eq!(url.host_str(), Some("127.0.0.1"));
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn keeps_base_path() {
        let endpoint = PatternEndpoint::parse("http://example.com/coping").unwrap();
        let url = endpoint.url_for(&ParameterInputs::new("1", "1", "45", "0.1"));
        assert_eq!(path_and_query(&url), "/coping/png?f=png&R=1&r=1&phi=45&t=0.1");
    }

    #[test]
    fn escapes_stray_separators() {
        let endpoint = PatternEndpoint::parse("http://localhost").unwrap();
        let url = endpoint.url_for(&ParameterInputs::new("1&x=2", "1", "45", ""));
        assert_eq!(path_and_query(&url), "/png?f=png&R=1%26x%3D2&r=1&phi=45&t=");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            PatternEndpoint::parse("not a url"),
            Err(PreviewError::InvalidServerUrl { .. })
        ));
        assert!(PatternEndpoint::parse("mailto:someone@example.com").is_err());
    }
}
