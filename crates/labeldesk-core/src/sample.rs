//! Sample source: the ordered, immutable items presented for labeling.

use crate::error::{LabelDeskError, Result};
use std::sync::Arc;

/// The ten product-review texts of the built-in demo session.
const DEMO_SAMPLES: [&str; 10] = [
    "Just received my order! The product quality exceeded expectations. Shipping was fast and packaging was excellent. Highly recommend this seller!",
    "Disappointed with the purchase. Item arrived damaged and customer support was unresponsive. Would not buy again.",
    "Average product. Does what it's supposed to do. Nothing special but gets the job done.",
    "Excellent customer service! Had an issue with my order and they resolved it immediately. Very professional team.",
    "Delivery took longer than expected but the product quality is good. Would order again but hope for faster shipping.",
    "This is a spam message with promotional content. Click here for free prizes!!!",
    "The interface is intuitive and easy to navigate. Setup was straightforward and documentation is comprehensive.",
    "Product stopped working after two weeks. Requesting refund. Very frustrating experience.",
    "Good value for money. The features meet my requirements and performance is satisfactory.",
    "Outstanding quality! Best purchase I've made this year. Fast delivery and great packaging.",
];

/// An ordered sequence of text items to annotate.
///
/// Items are identified by position; the display id is `index + 1`.
/// Cloning is cheap and never copies the texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSource {
    items: Arc<[String]>,
}

impl SampleSource {
    /// Creates a source from an ordered list of items.
    ///
    /// # Errors
    ///
    /// Returns [`LabelDeskError::EmptySampleSource`] when `items` is empty,
    /// since a cyclic cursor over zero items has no valid position.
    pub fn new<I, S>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(LabelDeskError::EmptySampleSource);
        }
        Ok(Self {
            items: items.into(),
        })
    }

    /// The built-in demo dataset of ten product reviews.
    pub fn demo() -> Self {
        Self {
            items: DEMO_SAMPLES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Number of items. Always at least one.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    /// Maps any index onto the source cyclically.
    pub fn wrap(&self, index: usize) -> usize {
        index % self.items.len()
    }

    /// Returns the item at `index` after wrapping.
    pub fn text(&self, index: usize) -> &str {
        &self.items[self.wrap(index)]
    }

    /// The 1-based display id for a position.
    pub fn display_id(&self, index: usize) -> u32 {
        (self.wrap(index) + 1) as u32
    }

    /// Iterates items in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}
