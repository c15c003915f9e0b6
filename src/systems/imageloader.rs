//! Concurrent image URL loading with fallback.
//!
//! [`load_images`] asks an [`ImageSource`] for `count` URLs at once, one
//! worker thread per slot. Workers report `(index, result)` over a
//! crossbeam channel and the results are put back in slot order.
//! Fetch errors never escape: they are logged and handled by the
//! [`FallbackPolicy`]. A worker that panics counts as a failed slot.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crossbeam_channel::unbounded;
use log::{error, info};

use crate::resources::imagesource::{FetchError, ImageSource, placeholder_url};

/// What to return when some fetches failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Replace the whole batch with placeholder URLs.
    #[default]
    Placeholders,
    /// Keep the URLs that did load, in slot order.
    DropFailed,
}

/// Fetch `count` image URLs from `source`.
pub fn load_images(source: &dyn ImageSource, count: usize, policy: FallbackPolicy) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }

    let (tx, rx) = unbounded::<(usize, Result<String, FetchError>)>();
    std::thread::scope(|scope| {
        for index in 0..count {
            let tx = tx.clone();
            scope.spawn(move || {
                let result = catch_unwind(AssertUnwindSafe(|| source.fetch(index)))
                    .unwrap_or(Err(FetchError::Worker(index)));
                let _ = tx.send((index, result));
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<Result<String, FetchError>>> = (0..count).map(|_| None).collect();
    for (index, result) in rx.iter() {
        slots[index] = Some(result);
    }

    let results: Vec<Result<String, FetchError>> = slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.unwrap_or(Err(FetchError::Worker(index))))
        .collect();

    let failures = results.iter().filter(|r| r.is_err()).count();
    for (index, result) in results.iter().enumerate() {
        if let Err(e) = result {
            error!("image {} failed to load: {}", index, e);
        }
    }

    match (failures, policy) {
        (0, _) => {
            info!("loaded {} images", count);
            results.into_iter().flatten().collect()
        }
        (_, FallbackPolicy::Placeholders) => {
            info!(
                "{} of {} images failed, using placeholders",
                failures, count
            );
            (0..count).map(placeholder_url).collect()
        }
        (_, FallbackPolicy::DropFailed) => {
            info!("{} of {} images failed, dropping them", failures, count);
            results.into_iter().flatten().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::imagesource::PlaceholderSource;
    use std::time::Duration;

    /// Answers `img-{index}`, slower for low indices, failing on `fail_on`.
    struct SlowSource {
        fail_on: Option<usize>,
    }

    impl ImageSource for SlowSource {
        fn fetch(&self, index: usize) -> Result<String, FetchError> {
            std::thread::sleep(Duration::from_millis(((5 - index.min(5)) * 4) as u64));
            if Some(index) == self.fail_on {
                return Err(FetchError::Transport("connection reset".into()));
            }
            Ok(format!("img-{}", index))
        }
    }

    #[test]
    fn test_results_keep_slot_order() {
        let urls = load_images(&SlowSource { fail_on: None }, 5, FallbackPolicy::Placeholders);
        assert_eq!(urls, vec!["img-0", "img-1", "img-2", "img-3", "img-4"]);
    }

    #[test]
    fn test_any_failure_switches_to_placeholders() {
        let urls = load_images(&SlowSource { fail_on: Some(2) }, 4, FallbackPolicy::Placeholders);
        assert_eq!(urls.len(), 4);
        assert_eq!(urls[0], placeholder_url(0));
        assert_eq!(urls[3], placeholder_url(3));
    }

    #[test]
    fn test_drop_failed_keeps_successes() {
        let urls = load_images(&SlowSource { fail_on: Some(1) }, 3, FallbackPolicy::DropFailed);
        assert_eq!(urls, vec!["img-0", "img-2"]);
    }

    /// Panics while fetching `panic_on`, answers `img-{index}` otherwise.
    struct PanickingSource {
        panic_on: usize,
    }

    impl ImageSource for PanickingSource {
        fn fetch(&self, index: usize) -> Result<String, FetchError> {
            if index == self.panic_on {
                panic!("decoder blew up on image {}", index);
            }
            Ok(format!("img-{}", index))
        }
    }

    #[test]
    fn test_panicking_worker_falls_back_to_placeholders() {
        let urls = load_images(&PanickingSource { panic_on: 1 }, 3, FallbackPolicy::Placeholders);
        assert_eq!(urls, (0..3).map(placeholder_url).collect::<Vec<_>>());
    }

    #[test]
    fn test_panicking_worker_is_dropped() {
        let urls = load_images(&PanickingSource { panic_on: 0 }, 3, FallbackPolicy::DropFailed);
        assert_eq!(urls, vec!["img-1", "img-2"]);
    }

    #[test]
    fn test_zero_count_spawns_nothing() {
        assert!(load_images(&PlaceholderSource, 0, FallbackPolicy::Placeholders).is_empty());
    }
}
