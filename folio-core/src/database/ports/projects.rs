use async_trait::async_trait;
use folio_model::{Project, ProjectID};

use crate::Result;

#[async_trait]
pub trait ProjectsRepository: Send + Sync {
    async fn get_project(&self, id: ProjectID) -> Result<Option<Project>>;
}
