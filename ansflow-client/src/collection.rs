//! Collection page model
//!
//! A [`ResourceTable`] holds the rows of one backend collection the way a
//! list page does: it loads them, and after every successful mutation it
//! throws its rows away and fetches the whole collection again. There is no
//! optimistic update, so the table never shows a row the backend does not
//! have.

use ansflow_core::Validate;
use ansflow_core::domain::ansible::{
    AnsibleCredential, AnsibleHost, AnsibleHostGroup, AnsibleInventory, AnsiblePlaybook,
};
use ansflow_core::domain::cicd::{AtomicStep, CicdTool};
use ansflow_core::domain::docker::{DockerCompose, DockerContainer, DockerImage, DockerRegistry};
use ansflow_core::domain::pipeline::Pipeline;
use ansflow_core::domain::project::Project;
use ansflow_core::dto::{ansible, cicd, docker, pipeline, project};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::AnsflowClient;
use crate::error::Result;

/// A record type served by a standard CRUD collection
///
/// The collection lives at `PATH`; single records at `PATH{id}/`.
pub trait Resource: DeserializeOwned {
    /// Collection path below the API base, with leading and trailing slash
    const PATH: &'static str;
    /// Human readable kind, used in logs and messages
    const KIND: &'static str;

    type Create: Serialize + Validate;
    type Update: Serialize + Validate;

    fn id(&self) -> i64;
    fn display_name(&self) -> &str;
}

macro_rules! impl_resource {
    ($ty:ty, $path:expr, $kind:literal, $create:ty, $update:ty, $name:ident $(,)?) => {
        impl Resource for $ty {
            const PATH: &'static str = $path;
            const KIND: &'static str = $kind;

            type Create = $create;
            type Update = $update;

            fn id(&self) -> i64 {
                self.id
            }

            fn display_name(&self) -> &str {
                &self.$name
            }
        }
    };
}

impl_resource!(
    CicdTool,
    crate::cicd::TOOLS,
    "tool",
    cicd::CreateCicdTool,
    cicd::UpdateCicdTool,
    name,
);
impl_resource!(
    AtomicStep,
    crate::cicd::ATOMIC_STEPS,
    "atomic step",
    cicd::CreateAtomicStep,
    cicd::UpdateAtomicStep,
    name,
);
impl_resource!(
    Pipeline,
    crate::pipelines::PIPELINES,
    "pipeline",
    pipeline::CreatePipeline,
    pipeline::UpdatePipeline,
    name,
);
impl_resource!(
    AnsibleInventory,
    crate::ansible::INVENTORIES,
    "inventory",
    ansible::CreateInventory,
    ansible::UpdateInventory,
    name,
);
impl_resource!(
    AnsiblePlaybook,
    crate::ansible::PLAYBOOKS,
    "playbook",
    ansible::CreatePlaybook,
    ansible::UpdatePlaybook,
    name,
);
impl_resource!(
    AnsibleCredential,
    crate::ansible::CREDENTIALS,
    "credential",
    ansible::CreateCredential,
    ansible::UpdateCredential,
    name,
);
impl_resource!(
    AnsibleHost,
    crate::ansible::HOSTS,
    "host",
    ansible::CreateHost,
    ansible::UpdateHost,
    hostname,
);
impl_resource!(
    AnsibleHostGroup,
    crate::ansible::HOST_GROUPS,
    "host group",
    ansible::CreateHostGroup,
    ansible::UpdateHostGroup,
    name,
);
impl_resource!(
    DockerRegistry,
    crate::docker::REGISTRIES,
    "registry",
    docker::CreateRegistry,
    docker::UpdateRegistry,
    name,
);
impl_resource!(
    DockerImage,
    crate::docker::IMAGES,
    "image",
    docker::CreateImage,
    docker::UpdateImage,
    name,
);
impl_resource!(
    DockerContainer,
    crate::docker::CONTAINERS,
    "container",
    docker::CreateContainer,
    docker::UpdateContainer,
    name,
);
impl_resource!(
    DockerCompose,
    crate::docker::COMPOSE,
    "compose project",
    docker::CreateCompose,
    docker::UpdateCompose,
    name,
);
impl_resource!(
    Project,
    crate::projects::PROJECTS,
    "project",
    project::CreateProject,
    project::UpdateProject,
    name,
);

/// The loaded rows of one collection
#[derive(Debug)]
pub struct ResourceTable<R: Resource> {
    client: AnsflowClient,
    rows: Vec<R>,
}

impl<R: Resource> ResourceTable<R> {
    /// An empty table; call [`load`](Self::load) to fill it
    pub fn new(client: AnsflowClient) -> Self {
        Self {
            client,
            rows: Vec::new(),
        }
    }

    /// Fetch the whole collection, replacing the current rows
    pub async fn load(&mut self) -> Result<&[R]> {
        self.rows = self.client.list(R::PATH).await?;
        debug!("Loaded {} {} rows", self.rows.len(), R::KIND);
        Ok(&self.rows)
    }

    /// Validate and create a record, then reload
    pub async fn create(&mut self, req: &R::Create) -> Result<R> {
        req.validate()?;
        let created: R = self.client.post(R::PATH, req).await?;
        info!("Created {} {} ({})", R::KIND, created.display_name(), created.id());
        self.load().await?;
        Ok(created)
    }

    /// Validate and update a record, then reload
    pub async fn update(&mut self, id: i64, req: &R::Update) -> Result<R> {
        req.validate()?;
        let updated: R = self.client.patch(&record_path::<R>(id), req).await?;
        info!("Updated {} {} ({})", R::KIND, updated.display_name(), id);
        self.load().await?;
        Ok(updated)
    }

    /// Delete a record, then reload
    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.client.delete(&record_path::<R>(id)).await?;
        info!("Deleted {} {}", R::KIND, id);
        self.load().await?;
        Ok(())
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&R> {
        self.rows.iter().find(|r| r.id() == id)
    }

    /// All rows whose name matches `name`, ignoring case
    pub fn find_by_name(&self, name: &str) -> Vec<&R> {
        self.rows
            .iter()
            .filter(|r| r.display_name().eq_ignore_ascii_case(name))
            .collect()
    }
}

fn record_path<R: Resource>(id: i64) -> String {
    format!("{}{}/", R::PATH, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_path() {
        assert_eq!(record_path::<DockerRegistry>(4), "/docker/registries/4/");
        assert_eq!(record_path::<AnsibleHostGroup>(9), "/ansible/host-groups/9/");
    }

    #[test]
    fn test_new_table_is_empty() {
        let table: ResourceTable<Project> = ResourceTable::new(AnsflowClient::with_client(
            "http://localhost:8000/api/v1",
            reqwest::Client::new(),
            crate::Session::in_memory(),
        ));
        assert!(table.is_empty());
        assert!(table.find_by_name("anything").is_empty());
    }
}
