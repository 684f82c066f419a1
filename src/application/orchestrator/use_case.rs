//! Build Orchestrator
//!
//! Drives every job through
//! `Pending -> Evaluating -> {Skipped | Compiling -> {Succeeded | Failed}}`.
//!
//! Jobs are independent, so the batch is fanned out on a bounded worker pool.
//! Within a job the steps are strictly sequential, and a record is written
//! only after the compiler succeeded.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path};
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::domain::entities::{BuildRecord, JobDefinition};
use crate::domain::ports::{BuildEvent, BuildEventSink, Compiler, NoopEventSink, StateStore};
use crate::domain::services::{
    ContentDigester, JobSet, ResolvedEntry, StaleReason, StalenessEvaluator, Verdict,
};
use crate::domain::value_objects::Style;
use crate::error::{ConfigError, JobError, StylesmithError, StylesmithResult};

use super::options::{BuildOptions, BuildSettings, CleanOptions};
use super::result::{
    AssetReference, BuildReport, CleanAction, CleanEntry, CleanReport, JobOutcome, JobReport,
    JobStatus, ListEntry, ListReport,
};

/// Number of digest hex digits used as cache-busting token
const CACHE_TOKEN_LEN: usize = 12;

pub struct BuildOrchestrator<S, C>
where
    S: StateStore,
    C: Compiler,
{
    jobs: JobSet,
    settings: BuildSettings,
    store: S,
    compiler: C,
    digester: ContentDigester,
    evaluator: StalenessEvaluator,
    events: Arc<dyn BuildEventSink>,
    pool: ThreadPool,
}

impl<S, C> BuildOrchestrator<S, C>
where
    S: StateStore,
    C: Compiler,
{
    pub fn new(jobs: JobSet, settings: BuildSettings, store: S, compiler: C) -> StylesmithResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(settings.concurrency.max(1))
            .thread_name(|idx| format!("stylesmith-worker-{}", idx))
            .build()
            .map_err(|e| StylesmithError::WorkerPool(e.to_string()))?;

        let digester = ContentDigester::new();
        Ok(Self {
            jobs,
            settings,
            store,
            compiler,
            digester,
            evaluator: StalenessEvaluator::new(digester),
            events: Arc::new(NoopEventSink),
            pool,
        })
    }

    pub fn with_event_sink(mut self, events: Arc<dyn BuildEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn jobs(&self) -> &JobSet {
        &self.jobs
    }

    pub fn settings(&self) -> &BuildSettings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Style a job is built with right now
    pub fn style_for(&self, job: &JobDefinition) -> Style {
        job.effective_style(self.settings.style_override, self.settings.default_style)
    }

    /// Build all jobs, or the named subset
    pub fn build(&self, options: &BuildOptions) -> BuildReport {
        let selected = self.jobs.select(options.names.as_deref());
        info!(jobs = selected.len(), force = options.force, "starting build");
        self.events.on_event(BuildEvent::Started {
            job_count: selected.len(),
            force: options.force,
        });

        let jobs: Vec<JobReport> = self.pool.install(|| {
            selected
                .entries()
                .par_iter()
                .map(|entry| self.run_entry(entry, options.force))
                .collect()
        });

        let report = BuildReport { jobs };
        info!(
            built = report.built(),
            skipped = report.skipped(),
            failed = report.failed(),
            "build finished"
        );
        self.events.on_event(BuildEvent::Completed {
            built: report.built(),
            skipped: report.skipped(),
            failed: report.failed(),
        });
        report
    }

    fn run_entry(&self, entry: &ResolvedEntry, force: bool) -> JobReport {
        let (name, result) = match entry {
            ResolvedEntry::Job(job) => (job.name().to_string(), self.run_job(job, force)),
            ResolvedEntry::Rejected(rejected) => (
                rejected.label.clone(),
                Err(JobError::Configuration(rejected.error.clone())),
            ),
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(job = %name, error = %err, "job failed");
                self.events.on_event(BuildEvent::Failed {
                    name: name.clone(),
                    kind: err.kind(),
                    error: err.to_string(),
                });
                JobOutcome::Failed(err)
            }
        };
        JobReport { name, outcome }
    }

    fn run_job(&self, job: &JobDefinition, force: bool) -> Result<JobOutcome, JobError> {
        self.events.on_event(BuildEvent::Evaluating {
            name: job.name().to_string(),
        });

        let style = self.style_for(job);
        let previous = self.store.get(job.name());
        let reason = match self.evaluator.evaluate(job, previous.as_ref(), style, force)? {
            Verdict::UpToDate { .. } => {
                debug!(job = job.name(), "up to date");
                self.events.on_event(BuildEvent::Skipped {
                    name: job.name().to_string(),
                });
                return Ok(JobOutcome::Skipped);
            }
            Verdict::Stale(reason) => reason,
        };

        // Digest is taken before compiling; an edit made mid-compile leaves
        // the older digest on record and the next build picks it up.
        let digest = match &reason {
            StaleReason::SourceChanged { current, .. } => current.clone(),
            _ => self.digester.digest(job.input_path())?,
        };
        let modified = self.digester.modified_time(job.input_path());

        info!(job = job.name(), %reason, %style, "compiling");
        self.events.on_event(BuildEvent::Compiling {
            name: job.name().to_string(),
            reason: reason.to_string(),
            style,
        });
        let compiled = match self
            .compiler
            .compile(job.input_path(), job.output_path(), style)
        {
            Ok(compiled) => compiled,
            Err(err) => {
                if matches!(err, JobError::Compilation { .. } | JobError::TimedOut { .. }) {
                    self.discard_output(job);
                }
                return Err(err);
            }
        };

        let record = BuildRecord::for_job(job, digest.clone(), style, modified);
        self.store.put(&record)?;

        self.events.on_event(BuildEvent::Succeeded {
            name: job.name().to_string(),
            output_path: job.output_path().to_path_buf(),
            digest: digest.clone(),
            compiler_output: compiled.output.clone(),
        });
        Ok(JobOutcome::Succeeded {
            reason,
            digest,
            compiler_output: compiled.output,
        })
    }

    /// Remove whatever a failed compiler left at the output path.
    ///
    /// The previous record stays, so the job must read as `OutputMissing`
    /// next time rather than pairing that record with a partial artifact.
    fn discard_output(&self, job: &JobDefinition) {
        match fs::remove_file(job.output_path()) {
            Ok(()) => debug!(job = job.name(), "discarded output of failed compile"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                job = job.name(),
                path = %job.output_path().display(),
                error = %e,
                "cannot discard output of failed compile"
            ),
        }
    }

    /// Status of every configured job. Never compiles, never writes state.
    pub fn list(&self) -> ListReport {
        let entries: Vec<ListEntry> = self.pool.install(|| {
            self.jobs
                .entries()
                .par_iter()
                .map(|entry| self.list_entry(entry))
                .collect()
        });
        ListReport { entries }
    }

    fn list_entry(&self, entry: &ResolvedEntry) -> ListEntry {
        let job = match entry {
            ResolvedEntry::Job(job) => job,
            ResolvedEntry::Rejected(rejected) => {
                return ListEntry {
                    name: rejected.label.clone(),
                    output_path: None,
                    style: None,
                    status: JobStatus::Invalid(rejected.error.clone()),
                    touched: false,
                }
            }
        };

        let style = self.style_for(job);
        let record = self.store.get(job.name());
        let status = match self.evaluator.evaluate(job, record.as_ref(), style, false) {
            Ok(Verdict::UpToDate { .. }) => JobStatus::UpToDate,
            Ok(Verdict::Stale(StaleReason::FirstBuild)) => JobStatus::NeverBuilt,
            Ok(Verdict::Stale(StaleReason::OutputMissing)) => JobStatus::OutputMissing,
            Ok(Verdict::Stale(StaleReason::StyleChanged { previous, current })) => {
                JobStatus::StyleChanged { previous, current }
            }
            Ok(Verdict::Stale(StaleReason::SourceChanged { previous, current })) => {
                JobStatus::SourceChanged { previous, current }
            }
            // Only produced when forced.
            Ok(Verdict::Stale(StaleReason::Forced)) => JobStatus::UpToDate,
            Err(err) => JobStatus::Unreadable(err),
        };

        let touched = status.is_up_to_date()
            && record
                .as_ref()
                .and_then(BuildRecord::source_modified_time)
                .zip(self.digester.modified_time(job.input_path()))
                .is_some_and(|(stored, live)| stored != live);

        ListEntry {
            name: job.name().to_string(),
            output_path: Some(job.output_path().to_path_buf()),
            style: Some(style),
            status,
            touched,
        }
    }

    /// Remove every recorded output and its record.
    ///
    /// A record is only deleted once its output is gone, so a failed removal
    /// can be retried by the next clean.
    pub fn clean(&self, options: &CleanOptions) -> StylesmithResult<CleanReport> {
        let mut records = self.store.list()?;
        records.sort_by(|a, b| a.name().cmp(b.name()));

        let entries = records
            .iter()
            .map(|record| CleanEntry {
                name: record.name().to_string(),
                output_path: record.output_path().to_path_buf(),
                action: self.clean_record(record, options.dry_run),
            })
            .collect();

        Ok(CleanReport {
            entries,
            dry_run: options.dry_run,
        })
    }

    fn clean_record(&self, record: &BuildRecord, dry_run: bool) -> CleanAction {
        let output = record.output_path();
        if dry_run {
            return if output.exists() {
                CleanAction::WouldRemove
            } else {
                CleanAction::WouldForget
            };
        }

        let action = match fs::remove_file(output) {
            Ok(()) => CleanAction::Removed,
            Err(e) if e.kind() == ErrorKind::NotFound => CleanAction::AlreadyAbsent,
            Err(e) => {
                warn!(job = record.name(), path = %output.display(), error = %e, "cannot remove output");
                return CleanAction::Failed(JobError::io(output, e));
            }
        };

        match self.store.delete(record.name()) {
            Ok(()) => {
                info!(job = record.name(), "cleaned");
                action
            }
            Err(e) => CleanAction::Failed(JobError::State(e)),
        }
    }

    /// Public path and cache-busting token for a job's output
    pub fn asset_reference(&self, name: &str) -> Result<AssetReference, JobError> {
        let job = match self.jobs.entries().iter().find(|entry| match entry {
            ResolvedEntry::Job(job) => job.name() == name,
            ResolvedEntry::Rejected(rejected) => rejected.label == name,
        }) {
            Some(ResolvedEntry::Job(job)) => job,
            Some(ResolvedEntry::Rejected(rejected)) => {
                return Err(JobError::Configuration(rejected.error.clone()))
            }
            None => {
                return Err(JobError::Configuration(ConfigError::UnknownJob {
                    name: name.to_string(),
                }))
            }
        };

        let cache_token = self
            .store
            .get(name)
            .map(|record| record.content_digest().short(CACHE_TOKEN_LEN).to_string());

        Ok(AssetReference {
            name: name.to_string(),
            public_path: public_path(
                &self.settings.public_url,
                &self.settings.root,
                job.output_path(),
            ),
            cache_token,
        })
    }
}

/// `public_url` joined with the output's location below `root`, `/`-separated.
///
/// Outputs outside the root are referenced by file name only.
pub fn public_path(public_url: &str, root: &Path, output: &Path) -> String {
    let relative = match output.strip_prefix(root).ok().and_then(below_root) {
        Some(parts) => parts,
        None => output
            .file_name()
            .map(|f| vec![f.to_string_lossy().into_owned()])
            .unwrap_or_default(),
    };

    let base = public_url.trim_end_matches('/');
    format!("{}/{}", base, relative.join("/"))
}

/// Lexically resolve `..` in a root-relative path; `None` if it climbs out
fn below_root(relative: &Path) -> Option<Vec<String>> {
    let mut parts: Vec<String> = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop()?;
            }
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts)
}
