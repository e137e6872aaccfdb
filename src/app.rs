use crate::config::Config;
use crate::corpus::{load_bundled_corpus, load_corpus_from_file};
use crate::error::AppError;
use crate::models::rating::Rating;
use crate::resolver::DescriptionResolver;

// Cheap to clone; the corpus itself is shared.
#[derive(Clone)]
pub struct AppState {
    pub resolver: DescriptionResolver,
    pub default_rating: Rating,
}

/// Load everything the resolver needs. A configured corpus that cannot be
/// read or parsed is fatal; without one the bundled corpus is used.
pub async fn create_app(config: &Config) -> Result<AppState, AppError> {
    let corpus = match &config.corpus_path {
        Some(path) => load_corpus_from_file(path).await?,
        None => load_bundled_corpus().await?,
    };
    let resolver = DescriptionResolver::with_random(corpus, config.random_source());
    Ok(AppState {
        resolver,
        default_rating: config.default_rating,
    })
}
