//! Where gallery images come from.
//!
//! An [`ImageSource`] produces one image URL per call. Sources are shared by
//! the loader's worker threads, hence `Send + Sync`.
//!
//! - [`PlaceholderSource`] – deterministic `picsum.photos` URLs, never fails
//! - [`DogApiSource`] – random dog pictures from the dog.ceo JSON API,
//!   fetched through a pluggable [`BodyTransport`]

use serde::Deserialize;
use thiserror::Error;

/// Endpoint returning `{"message": "<image url>", "status": "success"}`.
pub const DOG_API_URL: &str = "https://dog.ceo/api/breeds/image/random";

/// Failure of a single image fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("api reported status {0:?}")]
    Status(String),
    #[error("worker for image {0} panicked or exited without a result")]
    Worker(usize),
}

/// Placeholder image URL for slot `index`.
pub fn placeholder_url(index: usize) -> String {
    format!("https://picsum.photos/id/{}/600/400/", index + 32)
}

/// Producer of image URLs.
pub trait ImageSource: Send + Sync {
    /// URL of the image for slot `index`.
    fn fetch(&self, index: usize) -> Result<String, FetchError>;
}

/// Always answers with [`placeholder_url`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderSource;

impl ImageSource for PlaceholderSource {
    fn fetch(&self, index: usize) -> Result<String, FetchError> {
        Ok(placeholder_url(index))
    }
}

/// Raw `GET url -> body` capability. The crate ships no HTTP client; hosts
/// plug theirs in here.
pub trait BodyTransport: Send + Sync {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Deserialize)]
struct DogApiResponse {
    message: String,
    status: String,
}

/// Decode a dog.ceo response body into the image URL it carries.
pub fn decode_dog_api(body: &str) -> Result<String, FetchError> {
    let response: DogApiResponse = serde_json::from_str(body)?;
    if response.status != "success" {
        return Err(FetchError::Status(response.status));
    }
    Ok(response.message)
}

/// Random dog pictures from [`DOG_API_URL`].
pub struct DogApiSource<T: BodyTransport> {
    transport: T,
    url: String,
}

impl<T: BodyTransport> DogApiSource<T> {
    pub fn new(transport: T) -> Self {
        DogApiSource {
            transport,
            url: DOG_API_URL.to_string(),
        }
    }

    /// Query a different endpoint with the same response shape.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

impl<T: BodyTransport> ImageSource for DogApiSource<T> {
    fn fetch(&self, _index: usize) -> Result<String, FetchError> {
        let body = self.transport.get(&self.url)?;
        decode_dog_api(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedTransport(&'static str);

    impl BodyTransport for CannedTransport {
        fn get(&self, url: &str) -> Result<String, FetchError> {
            assert_eq!(url, DOG_API_URL);
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_placeholder_urls_start_at_id_32() {
        assert_eq!(placeholder_url(0), "https://picsum.photos/id/32/600/400/");
        assert_eq!(
            PlaceholderSource.fetch(9).unwrap(),
            "https://picsum.photos/id/41/600/400/"
        );
    }

    #[test]
    fn test_dog_api_success() {
        let source = DogApiSource::new(CannedTransport(
            r#"{"message":"https://images.dog.ceo/breeds/husky/1.jpg","status":"success"}"#,
        ));
        assert_eq!(
            source.fetch(0).unwrap(),
            "https://images.dog.ceo/breeds/husky/1.jpg"
        );
    }

    #[test]
    fn test_dog_api_error_status() {
        let err = decode_dog_api(r#"{"message":"Breed not found","status":"error"}"#).unwrap_err();
        assert!(matches!(err, FetchError::Status(ref s) if s == "error"));
    }

    #[test]
    fn test_dog_api_malformed_body() {
        let err = decode_dog_api("<html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
