//! Task resource client
//!
//! Mutations follow await-then-notify: a method resolves to exactly one of
//! a value or a typed error, only after the server's response. Validation
//! and the quota gate run locally and never reach the network.

use std::sync::Arc;

use tracing::instrument;

use meplus_core::{entitlement, quota};
use meplus_types::{Category, CreateTask, ListQuery, ListResponse, Plan, Task, TaskId, UpdateTask};

use crate::cache::{params_key, ResourceCache, ResourceTag};
use crate::gateway::RequestGateway;
use crate::usage::UsageClient;
use crate::{ClientError, Result};

/// Longest accepted task description.
const MAX_DESCRIPTION_LEN: usize = 4000;

/// Client for task operations.
#[derive(Clone)]
pub struct TaskClient {
    gateway: Arc<RequestGateway>,
    cache: Arc<ResourceCache>,
    usage: UsageClient,
}

impl TaskClient {
    pub(crate) fn new(gateway: Arc<RequestGateway>, cache: Arc<ResourceCache>) -> Self {
        let usage = UsageClient::new(gateway.clone(), cache.clone());
        Self {
            gateway,
            cache,
            usage,
        }
    }

    /// List tasks, served from cache until the Task tag is invalidated.
    #[instrument(skip(self, query), level = "debug")]
    pub async fn list(&self, query: &ListQuery) -> Result<Arc<ListResponse<Task>>> {
        let key = params_key(query)?;
        let gateway = self.gateway.clone();
        let query = query.clone();
        self.cache
            .get_or_fetch_tasks(&key, move || async move {
                gateway.get_with_query("/tasks", &query).await
            })
            .await
    }

    /// Fetch a single task.
    #[instrument(skip(self), level = "debug")]
    pub async fn get(&self, id: TaskId) -> Result<Task> {
        self.gateway.get(&format!("/tasks/{id}")).await
    }

    /// Generate a new task.
    ///
    /// Input is validated and the quota gate evaluated before dispatch: a
    /// Base plan at its task limit is rejected with a quota error and no
    /// network call is made. A successful creation invalidates the Task and
    /// Usage projections, since the backend counts it toward usage.
    #[instrument(skip(self, request), level = "debug")]
    pub async fn generate(&self, plan: Plan, request: &CreateTask) -> Result<Task> {
        validate_create(plan, request)?;

        let report = self.usage.report().await?;
        let verdict = quota::evaluate(&report.snapshot, &report.limits, plan);
        if verdict.tasks.exceeded {
            return Err(ClientError::QuotaExceeded(format!(
                "task generation limit reached ({}/{})",
                verdict.tasks.used, verdict.tasks.limit
            )));
        }

        let task: Task = self.gateway.post("/tasks", request).await?;
        self.cache.invalidate(ResourceTag::Task);
        self.cache.invalidate(ResourceTag::Usage);
        Ok(task)
    }

    /// Update an existing task.
    #[instrument(skip(self, changes), level = "debug")]
    pub async fn update(&self, id: TaskId, changes: &UpdateTask) -> Result<Task> {
        let task: Task = self.gateway.patch(&format!("/tasks/{id}"), changes).await?;
        self.cache.invalidate(ResourceTag::Task);
        Ok(task)
    }

    /// Delete a task.
    #[instrument(skip(self), level = "debug")]
    pub async fn delete(&self, id: TaskId) -> Result<()> {
        self.gateway.delete(&format!("/tasks/{id}")).await?;
        self.cache.invalidate(ResourceTag::Task);
        Ok(())
    }
}

impl std::fmt::Debug for TaskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskClient").finish()
    }
}

/// Reject bad input before it is dispatched.
fn validate_create(plan: Plan, request: &CreateTask) -> Result<()> {
    if request.title.trim().is_empty() {
        return Err(ClientError::Validation(
            "title must not be empty".to_string(),
        ));
    }
    if request.description.trim().is_empty() {
        return Err(ClientError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    if request.description.len() > MAX_DESCRIPTION_LEN {
        return Err(ClientError::Validation(format!(
            "description exceeds {MAX_DESCRIPTION_LEN} characters"
        )));
    }

    let category: Category = request
        .category
        .parse()
        .map_err(|_| ClientError::Validation(format!("unknown category: {}", request.category)))?;

    if !entitlement::is_category_accessible(category.as_str(), plan) {
        return Err(ClientError::Validation(format!(
            "category {category} requires the pro plan"
        )));
    }

    Ok(())
}
