//! Image loading integration tests with a scripted transport.

use std::sync::atomic::{AtomicUsize, Ordering};

use carouselengine::resources::imagesource::{
    BodyTransport, DogApiSource, FetchError, placeholder_url,
};
use carouselengine::systems::imageloader::{FallbackPolicy, load_images};

/// Serves `count` good answers, then transport errors.
struct FlakyTransport {
    served: AtomicUsize,
    good: usize,
}

impl BodyTransport for FlakyTransport {
    fn get(&self, _url: &str) -> Result<String, FetchError> {
        let n = self.served.fetch_add(1, Ordering::SeqCst);
        if n < self.good {
            Ok(format!(
                r#"{{"message":"https://images.dog.ceo/breeds/pug/{}.jpg","status":"success"}}"#,
                n
            ))
        } else {
            Err(FetchError::Transport("timed out".into()))
        }
    }
}

fn source(good: usize) -> DogApiSource<FlakyTransport> {
    DogApiSource::new(FlakyTransport {
        served: AtomicUsize::new(0),
        good,
    })
}

#[test]
fn all_fetches_succeed() {
    let urls = load_images(&source(10), 10, FallbackPolicy::Placeholders);
    assert_eq!(urls.len(), 10);
    assert!(urls.iter().all(|u| u.starts_with("https://images.dog.ceo/")));
}

#[test]
fn one_failure_falls_back_to_placeholders() {
    let urls = load_images(&source(9), 10, FallbackPolicy::Placeholders);
    let expected: Vec<String> = (0..10).map(placeholder_url).collect();
    assert_eq!(urls, expected);
}

#[test]
fn drop_failed_keeps_only_loaded_images() {
    let urls = load_images(&source(2), 5, FallbackPolicy::DropFailed);
    assert_eq!(urls.len(), 2);
}
