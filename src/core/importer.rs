use crate::adapters::json_store::JsonFileCustomerRepository;
use crate::adapters::local::ImportDirectory;
use crate::core::mapper::map_record;
use crate::core::profile::ImportProfile;
use crate::core::reader::{ReaderOptions, RowReader};
use crate::domain::model::{
    CustomerRecord, ImportSummary, RawRecord, RecordFailure, RecordOutcome, SaveKind,
    StoreContext, EMAIL_FIELD,
};
use crate::domain::ports::{ConfigProvider, CustomerRepository};
use crate::utils::error::{ImportError, Result};

/// Drives one import: profile dispatch, row reading, mapping and persistence.
///
/// Records are handled strictly in source order, one at a time. A failing
/// record is logged and collected in the summary; it never stops the run.
pub struct CustomerImporter<R: CustomerRepository, C: ConfigProvider> {
    repository: R,
    config: C,
}

impl<R: CustomerRepository, C: ConfigProvider> CustomerImporter<R, C> {
    pub fn new(repository: R, config: C) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns `Ok` whenever the record loop ran to the end, however many
    /// records failed. `Err` means the batch was aborted before the loop.
    pub async fn run(&self, profile: &str, source: &str) -> Result<ImportSummary> {
        let parsed = ImportProfile::parse(profile).inspect_err(|e| tracing::warn!("{}", e))?;
        let format = parsed.format;

        let context = self.config.store_context();
        let path = ImportDirectory::new(self.config.import_dir()).resolve(source);
        let options = ReaderOptions {
            delimiter: self.config.delimiter().inspect_err(|e| tracing::warn!("{}", e))?,
        };

        let reader = RowReader::open(&path, format, options).inspect_err(|e| {
            tracing::warn!("{} import aborted | {}", format, e);
        })?;

        tracing::info!(
            "{} import started: profile '{}', source {}",
            format,
            profile,
            path.display()
        );

        let mut summary = ImportSummary::new(profile, format);
        for (position, item) in reader.enumerate() {
            let outcome = self.import_one(position + 1, item, &context).await;
            if let RecordOutcome::Failed(failure) = &outcome {
                tracing::warn!("{} import failed | {}", format, failure);
            }
            summary.record(outcome);
        }

        tracing::info!(
            "{} import completed: {} created, {} updated, {} failed",
            format,
            summary.created,
            summary.updated,
            summary.failed()
        );

        Ok(summary)
    }

    async fn import_one(
        &self,
        index: usize,
        item: Result<RawRecord>,
        context: &StoreContext,
    ) -> RecordOutcome {
        let raw = match item {
            Ok(raw) => raw,
            Err(error) => {
                let line = match &error {
                    ImportError::MalformedRow { line, .. } => *line,
                    _ => None,
                };
                return RecordOutcome::Failed(RecordFailure {
                    index,
                    line,
                    email: None,
                    error,
                });
            }
        };

        let line = raw.line;
        let email_hint = raw
            .get(EMAIL_FIELD)
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string);

        let record = match map_record(raw, context) {
            Ok(record) => record,
            Err(error) => {
                return RecordOutcome::Failed(RecordFailure {
                    index,
                    line,
                    email: email_hint,
                    error,
                })
            }
        };

        match self.persist(&record).await {
            Ok(kind) => RecordOutcome::Saved(kind),
            Err(error) => RecordOutcome::Failed(RecordFailure {
                index,
                line,
                email: Some(record.email),
                error,
            }),
        }
    }

    /// Loads by email within the website scope, overwrites or creates, then saves.
    async fn persist(&self, record: &CustomerRecord) -> Result<SaveKind> {
        let existing = self
            .repository
            .find_by_email(&record.email, record.website_id)
            .await
            .map_err(|e| as_persistence_error(&record.email, e))?;

        let (mut customer, kind) = match existing {
            Some(customer) => (customer, SaveKind::Updated),
            None => (self.repository.create(), SaveKind::Created),
        };
        customer.apply(record);

        let saved = self
            .repository
            .save(customer)
            .await
            .map_err(|e| as_persistence_error(&record.email, e))?;

        tracing::debug!("customer {:?} saved ({:?}): {}", saved.id, kind, saved.email);
        Ok(kind)
    }
}

/// Opens the JSON customer store named by `config` and imports into it.
///
/// A store that cannot be opened fails the same way as any other batch error.
pub async fn import_into_store<C: ConfigProvider>(
    config: C,
    profile: &str,
    source: &str,
) -> Result<ImportSummary> {
    let repository = JsonFileCustomerRepository::open(config.customer_store_path())
        .inspect_err(|e| tracing::warn!("customer store unavailable | {}", e))?;
    CustomerImporter::new(repository, config)
        .run(profile, source)
        .await
}

/// Process exit code for a finished run.
///
/// A completed run exits 0, or 2 under `strict` when any record failed.
/// An aborted run exits with the code of its error's severity.
pub fn exit_code(result: &Result<ImportSummary>, strict: bool) -> i32 {
    match result {
        Ok(summary) if strict && !summary.is_clean() => 2,
        Ok(_) => 0,
        Err(e) => e.severity().exit_code(),
    }
}

fn as_persistence_error(email: &str, error: ImportError) -> ImportError {
    match error {
        ImportError::Persistence { .. } => error,
        other => ImportError::Persistence {
            email: email.to_string(),
            message: other.to_string(),
        },
    }
}
