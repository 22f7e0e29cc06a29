pub mod cache;
pub mod timeline;
pub mod types;

pub use cache::{get_cache_path, read_enrichment, remove_enrichment, write_enrichment};
pub use timeline::{timeline, TimelineItem, TimelineKind};
pub use types::{
    normalize_website_url, EnrichmentPayload, EnrichmentResult, SignalEngineOutput, Source,
};
