use crate::types::Segment;

pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<Segment>;
}

pub trait WordExtractor: Send + Sync {
    fn extract_words(&self, text: &str) -> Vec<String>;
}
