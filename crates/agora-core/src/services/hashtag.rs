use std::sync::Arc;

use crate::domain::{Hashtag, NewHashtag};
use crate::error::{DomainError, DomainResult, RepoError};
use crate::ports::HashtagRepository;

const ENTITY: &str = "Hashtag";

/// Hashtags. Names are normalised and unique.
#[derive(Clone)]
pub struct HashtagService {
    hashtags: Arc<dyn HashtagRepository>,
}

impl HashtagService {
    pub fn new(hashtags: Arc<dyn HashtagRepository>) -> Self {
        Self { hashtags }
    }

    pub async fn create(&self, name: &str) -> DomainResult<Hashtag> {
        let input = NewHashtag::parse(name)?;
        if self.hashtags.find_by_name(&input.name).await?.is_some() {
            return Err(duplicate(&input.name));
        }

        let taken = input.name.clone();
        let hashtag = self.hashtags.create(input).await.map_err(|e| match e {
            RepoError::Constraint(_) => duplicate(&taken),
            other => other.into(),
        })?;
        tracing::info!(hashtag_id = hashtag.id, name = %hashtag.name, "Hashtag created");
        Ok(hashtag)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Hashtag> {
        self.hashtags
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Hashtag>> {
        Ok(self.hashtags.find_all().await?)
    }

    /// Rename a hashtag. The new name must not belong to another hashtag.
    pub async fn update(&self, id: i64, name: &str) -> DomainResult<Hashtag> {
        let input = NewHashtag::parse(name)?;
        let mut hashtag = self.get(id).await?;

        if let Some(existing) = self.hashtags.find_by_name(&input.name).await? {
            if existing.id != id {
                return Err(duplicate(&input.name));
            }
        }

        let taken = input.name.clone();
        hashtag.name = input.name;
        let updated = self.hashtags.update(hashtag).await.map_err(|e| match e {
            RepoError::Constraint(_) => duplicate(&taken),
            other => DomainError::from_repo(other, ENTITY, id),
        })?;
        tracing::info!(hashtag_id = id, name = %updated.name, "Hashtag renamed");
        Ok(updated)
    }

    /// Delete a hashtag after unlinking it from every discussion.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.get(id).await?;
        self.hashtags
            .delete_cascade(id)
            .await
            .map_err(|e| DomainError::from_repo(e, ENTITY, id))?;
        tracing::info!(hashtag_id = id, "Hashtag deleted");
        Ok(())
    }
}

fn duplicate(name: &str) -> DomainError {
    DomainError::Duplicate {
        entity: ENTITY,
        message: format!("Hashtag '{name}' already exists"),
    }
}
