use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, trace};
use unlink_core::{
    CreateOutcome, CreateParams, DeleteOutcome, DeleteParams, LogVisitOutcome, Registry,
    RegistryError, Repository, Shortcut, ShortcutRecord, StatisticsOutcome, StatisticsView,
    StorageError, UpdateOutcome, UpdateParams, Visit,
};

type Result<T> = std::result::Result<T, RegistryError>;

/// A concrete implementation of the `Registry` trait.
///
/// The service exclusively owns the lifecycle of every shortcut record;
/// the injected repository is a passive durable backing that enforces no
/// business rules. Ownership gating rides on the repository's
/// conditional writes, which are the linearization points for the
/// check-then-act sequences: when a conditional write does not apply,
/// one follow-up read splits "no such record" from "wrong owner".
#[derive(Debug, Clone)]
pub struct RegistryService<R> {
    repository: Arc<R>,
}

impl<R: Repository> RegistryService<R> {
    /// Creates a new `RegistryService` over the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// The transport layer validates first; the registry re-checks
    /// non-empty identifiers so a bypassed transport cannot persist
    /// unusable records.
    fn validate_field(name: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(RegistryError::InvalidInput(format!(
                "{} must not be empty",
                name
            )));
        }
        Ok(())
    }

    fn validate_shortcut(shortcut: &Shortcut) -> Result<()> {
        Self::validate_field("shortcut", shortcut.as_str())
    }
}

#[async_trait]
impl<R: Repository> Registry for RegistryService<R> {
    async fn create(&self, params: CreateParams) -> Result<CreateOutcome> {
        Self::validate_shortcut(&params.shortcut)?;
        Self::validate_field("target_url", &params.target_url)?;
        Self::validate_field("owner", &params.owner)?;

        let record = ShortcutRecord::new(params.shortcut, params.target_url, params.owner);
        let shortcut = record.shortcut.clone();

        match self.repository.insert(record).await {
            Ok(()) => {
                debug!(shortcut = %shortcut, "created shortcut");
                Ok(CreateOutcome::Created)
            }
            Err(StorageError::Conflict(_)) => {
                trace!(shortcut = %shortcut, "shortcut already taken");
                Ok(CreateOutcome::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn resolve(&self, shortcut: &Shortcut) -> Result<Option<StatisticsView>> {
        trace!(shortcut = %shortcut, "resolving shortcut");

        match self.repository.get(shortcut).await? {
            Some(record) => {
                debug!(shortcut = %shortcut, target_url = %record.target_url, "resolved shortcut");
                Ok(Some(record.into()))
            }
            None => {
                trace!(shortcut = %shortcut, "shortcut not found");
                Ok(None)
            }
        }
    }

    async fn log_visit(&self, shortcut: &Shortcut, visitor_ip: IpAddr) -> Result<LogVisitOutcome> {
        let appended = self
            .repository
            .push_visit(shortcut, Visit::now(visitor_ip))
            .await?;

        if appended {
            trace!(shortcut = %shortcut, visitor_ip = %visitor_ip, "logged visit");
            Ok(LogVisitOutcome::Logged)
        } else {
            Ok(LogVisitOutcome::NotFound)
        }
    }

    async fn update(&self, params: UpdateParams) -> Result<UpdateOutcome> {
        Self::validate_shortcut(&params.shortcut)?;
        Self::validate_field("target_url", &params.target_url)?;
        Self::validate_field("owner", &params.owner)?;

        let applied = self
            .repository
            .update_target(&params.shortcut, &params.owner, &params.target_url)
            .await?;
        if applied {
            debug!(shortcut = %params.shortcut, "updated target url");
            return Ok(UpdateOutcome::Updated);
        }

        // The conditional write did not apply; one read tells us why.
        match self.repository.get(&params.shortcut).await? {
            None => Ok(UpdateOutcome::NotFound),
            Some(_) => Ok(UpdateOutcome::WrongOwner),
        }
    }

    async fn delete(&self, params: DeleteParams) -> Result<DeleteOutcome> {
        Self::validate_shortcut(&params.shortcut)?;
        Self::validate_field("owner", &params.owner)?;

        let applied = self
            .repository
            .delete(&params.shortcut, &params.owner)
            .await?;
        if applied {
            debug!(shortcut = %params.shortcut, "deleted shortcut");
            return Ok(DeleteOutcome::Deleted);
        }

        match self.repository.get(&params.shortcut).await? {
            None => Ok(DeleteOutcome::NotFound),
            Some(_) => Ok(DeleteOutcome::WrongOwner),
        }
    }

    async fn exists(&self, shortcut: &Shortcut) -> Result<bool> {
        Ok(self.repository.exists(shortcut).await?)
    }

    async fn statistics(&self, shortcut: &Shortcut, owner: &str) -> Result<StatisticsOutcome> {
        Self::validate_field("owner", owner)?;

        let Some(record) = self.repository.get(shortcut).await? else {
            return Ok(StatisticsOutcome::NotFound);
        };

        if record.owner != owner {
            return Ok(StatisticsOutcome::WrongOwner);
        }

        Ok(StatisticsOutcome::Found(record.into()))
    }
}
