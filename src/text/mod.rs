pub mod vectorizer;

pub use vectorizer::Vectorizer;
