use crate::error::Result;
use crate::types::{Checklist, NameMatch};
use async_trait::async_trait;

/// Where the raw checklist comes from
#[async_trait]
pub trait SourcePort: Send + Sync {
    async fn load(&self) -> Result<Checklist>;
}

/// Taxonomic backbone lookup for a single scientific name
#[async_trait]
pub trait NameMatcherPort: Send + Sync {
    async fn match_name(&self, name: &str) -> Result<NameMatch>;
}

/// Receives the enriched checklist for write-back to the source sheet
#[async_trait]
pub trait SheetWriterPort: Send + Sync {
    async fn write(&self, headers: &[String], rows: &[Vec<String>]) -> Result<()>;
}
