//! Slide captions.

/// Titles picked for slides.
pub const DOG_BREEDS: [&str; 10] = [
    "Golden Retriever",
    "Labrador",
    "Husky",
    "Beagle",
    "Bulldog",
    "Poodle",
    "Rottweiler",
    "German Shepherd",
    "Dachshund",
    "Boxer",
];

/// Descriptions picked for slides.
pub const DOG_QUOTES: [&str; 10] = [
    "Man's best friend",
    "Loyal companion",
    "Faithful guardian",
    "Playful spirit",
    "Unconditional love",
    "Adventure buddy",
    "Happy tail wagger",
    "Furry family member",
    "Pure joy",
    "Life is better with dogs",
];

pub const CAPTION_SUBTITLE: &str = "Dog Gallery";

/// Text shown over one slide.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Caption {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
}

impl Caption {
    /// Random breed and quote. Title and description are drawn independently.
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Caption {
            title: DOG_BREEDS[rng.usize(..DOG_BREEDS.len())],
            subtitle: CAPTION_SUBTITLE,
            description: DOG_QUOTES[rng.usize(..DOG_QUOTES.len())],
        }
    }

    /// `count` random captions.
    pub fn batch(rng: &mut fastrand::Rng, count: usize) -> Vec<Self> {
        (0..count).map(|_| Caption::random(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_caption_uses_fixed_lists() {
        let mut rng = fastrand::Rng::with_seed(7);
        for caption in Caption::batch(&mut rng, 50) {
            assert!(DOG_BREEDS.contains(&caption.title));
            assert!(DOG_QUOTES.contains(&caption.description));
            assert_eq!(caption.subtitle, "Dog Gallery");
        }
    }

    #[test]
    fn test_same_seed_same_captions() {
        let a = Caption::batch(&mut fastrand::Rng::with_seed(42), 5);
        let b = Caption::batch(&mut fastrand::Rng::with_seed(42), 5);
        assert_eq!(a, b);
    }
}
