use anyhow::Context;

/// Result of running lookups over a list of ids, batch by batch.
#[derive(Debug)]
pub(crate) struct BatchedFetch {
    pub(crate) stories: Vec<crate::Story>,
    pub(crate) missing: Vec<i64>,
    pub(crate) batches: usize,
}

pub(crate) async fn get_top_story_ids(api_base: &str, limit: usize) -> anyhow::Result<Vec<i64>> {
    let response = crate::CLIENT
        .get(format!("{api_base}/topstories.json"))
        .send()
        .await
        .context("Failed to fetch top stories")?
        .error_for_status()
        .context("Failed to fetch top stories")?;

    let mut story_ids = response
        .json::<Vec<i64>>()
        .await
        .context("Failed to decode top story ids")?;

    story_ids.truncate(limit);

    Ok(story_ids)
}

pub(crate) async fn get_item(api_base: &str, id: i64) -> anyhow::Result<crate::Story> {
    let response = crate::CLIENT
        .get(format!("{api_base}/item/{id}.json"))
        .send()
        .await?
        .error_for_status()?;

    // Unknown ids come back as a literal `null`, which fails to decode here.
    Ok(response.json::<crate::Story>().await?)
}

/// Runs `lookup` for every id. Each batch of `batch_size` lookups is awaited
/// together before the next batch starts, and results keep the order of `ids`.
/// Failed lookups are logged and skipped.
pub(crate) async fn fetch_in_batches<F, Fut>(
    ids: &[i64],
    batch_size: usize,
    lookup: F,
) -> BatchedFetch
where
    F: Fn(i64) -> Fut,
    Fut: std::future::Future<Output = anyhow::Result<crate::Story>>,
{
    let mut fetched = BatchedFetch {
        stories: Vec::with_capacity(ids.len()),
        missing: Vec::new(),
        batches: 0,
    };

    for batch in ids.chunks(batch_size.max(1)) {
        let results = futures::future::join_all(batch.iter().map(|&id| lookup(id))).await;
        fetched.batches += 1;

        for (&id, result) in batch.iter().zip(results) {
            match result {
                Ok(story) => fetched.stories.push(story),
                Err(e) => {
                    tracing::error!(id = id, error =? e, "Error fetching story");
                    fetched.missing.push(id);
                }
            }
        }

        tracing::debug!(batch = fetched.batches, size = batch.len(), "Fetched batch");
    }

    fetched
}
