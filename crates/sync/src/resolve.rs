//! Catalog lookups: knowledge-base name resolution and data-source listing.

use tracing::debug;

use kbsync_bedrock::KnowledgeBaseApi;
use kbsync_core::{DataSourceRef, KnowledgeBaseRef, SyncError};

/// Find the knowledge base whose name is exactly `name` (case-sensitive).
///
/// Pages are fetched until the first match; later pages are never requested.
/// If the catalog holds duplicate names the first one returned wins.
pub async fn find_knowledge_base<A>(api: &A, name: &str) -> Result<KnowledgeBaseRef, SyncError>
where
    A: KnowledgeBaseApi + ?Sized,
{
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = api.list_knowledge_bases(next_token.as_deref()).await?;
        pages += 1;
        next_token = page.next_token().map(str::to_string);

        if let Some(kb) = page.items.into_iter().find(|kb| kb.name == name) {
            debug!(name, id = %kb.id, pages, "Resolved knowledge base");
            return Ok(kb);
        }

        if next_token.is_none() {
            debug!(name, pages, "Knowledge base catalog exhausted");
            return Err(SyncError::NotFound {
                name: name.to_string(),
            });
        }
    }
}

/// Collect every data source of a knowledge base, in catalog order.
pub async fn list_data_sources<A>(
    api: &A,
    knowledge_base_id: &str,
) -> Result<Vec<DataSourceRef>, SyncError>
where
    A: KnowledgeBaseApi + ?Sized,
{
    let mut data_sources = Vec::new();
    let mut next_token: Option<String> = None;

    loop {
        let page = api
            .list_data_sources(knowledge_base_id, next_token.as_deref())
            .await?;
        next_token = page.next_token().map(str::to_string);
        data_sources.extend(page.items);

        if next_token.is_none() {
            break;
        }
    }

    if data_sources.is_empty() {
        return Err(SyncError::NoDataSources {
            knowledge_base_id: knowledge_base_id.to_string(),
        });
    }

    debug!(knowledge_base_id, count = data_sources.len(), "Enumerated data sources");
    Ok(data_sources)
}
