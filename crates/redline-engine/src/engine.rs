use std::ops::Range;
use std::sync::Arc;

use redline_diff::{diff_documents, unified_text};
use redline_store::DocumentStore;
use redline_types::{ChangeBlock, ChangeDescriptor, Document, RangeError, UpdateMetadata};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::locks::{PairGuard, PairLocks};
use crate::names;
use crate::view::{ApplyOutcome, AssessmentView};

/// The revision review engine.
///
/// Owns the lifecycle of every revision pair behind a
/// [`DocumentStore`] gateway: baselines are seeded, updates proposed,
/// individual hunks committed or discarded, and converged pairs retired.
/// Mutating operations take the pair's exclusive slot for their whole
/// duration and fail with [`EngineError::Conflict`] when it is held;
/// read-only fetches never take the slot.
///
/// After every successful mutation the engine re-diffs the live pair and
/// persists the refreshed descriptor list, so fetched state is never stale.
#[derive(Clone)]
pub struct RevisionEngine {
    store: Arc<dyn DocumentStore>,
    locks: PairLocks,
    config: EngineConfig,
}

impl RevisionEngine {
    pub fn new(store: Arc<dyn DocumentStore>, config: EngineConfig) -> Self {
        Self {
            store,
            locks: PairLocks::new(),
            config,
        }
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    /// Fetch the review state of a pair.
    ///
    /// An absent `updated` document means the pair has converged: the view
    /// carries `updated_assessment = None` and an empty change list, and any
    /// leftover changes blob is not consulted.
    pub fn assessment(&self, service: &str) -> EngineResult<AssessmentView> {
        names::validate_service_name(service)?;
        let current = self.load_required(&names::current_name(service))?;

        let view = match self.store.load(&names::updated_name(service))? {
            Some(updated) => AssessmentView {
                current_assessment: current.to_text(),
                updated_assessment: Some(updated.to_text()),
                changes: self.read_changes(service)?,
            },
            None => AssessmentView {
                current_assessment: current.to_text(),
                updated_assessment: None,
                changes: Vec::new(),
            },
        };
        Ok(view)
    }

    /// The pair's provenance record. `NotFound` when none was ever written.
    pub fn metadata(&self, service: &str) -> EngineResult<UpdateMetadata> {
        names::validate_service_name(service)?;
        let name = names::metadata_name(service);
        let doc = self.load_required(&name)?;
        serde_json::from_str(&doc.to_text())
            .map_err(|source| EngineError::Serialization { name, source })
    }

    /// Render a unified diff between two stored documents, by full document
    /// name. Used for audit deltas between snapshots.
    pub fn snapshot_delta(&self, from_name: &str, to_name: &str) -> EngineResult<String> {
        let from = self.load_required(from_name)?;
        let to = self.load_required(to_name)?;
        Ok(unified_text(
            &from,
            &to,
            self.config.context_lines,
            from_name,
            to_name,
        ))
    }

    /// All known service names (those with a baseline document), sorted.
    pub fn services(&self) -> EngineResult<Vec<String>> {
        let suffix = format!("/{}", names::CURRENT_DOC);
        let stored = self.store.list("")?;
        Ok(stored
            .into_iter()
            .filter_map(|name| {
                name.strip_suffix(&suffix)
                    .filter(|service| !service.contains('/'))
                    .map(str::to_string)
            })
            .collect())
    }

    // -----------------------------------------------------------------------
    // Pair lifecycle
    // -----------------------------------------------------------------------

    /// Upsert the baseline text for a service.
    ///
    /// When a proposal is outstanding, the change list is recomputed against
    /// the new baseline; a proposal now equal to the baseline retires the
    /// pair. Returns the outstanding descriptors.
    pub fn save_baseline(&self, service: &str, text: &str) -> EngineResult<Vec<ChangeDescriptor>> {
        names::validate_service_name(service)?;
        let _slot = self.slot(service)?;

        let current = Document::from_text(text);
        self.store.save(&names::current_name(service), &current)?;
        tracing::info!(service, lines = current.len(), "baseline saved");

        match self.store.load(&names::updated_name(service))? {
            Some(updated) if updated == current => {
                self.retire(service)?;
                Ok(Vec::new())
            }
            Some(updated) => self.refresh_changes(service, &current, &updated),
            None => Ok(Vec::new()),
        }
    }

    /// Propose an updated text for a service with an existing baseline.
    ///
    /// A proposal equal to the baseline retires the pair and returns no
    /// descriptors. Otherwise the proposal is persisted together with the
    /// computed change list (and provenance, when given), and the
    /// descriptors are returned.
    pub fn propose_update(
        &self,
        service: &str,
        text: &str,
        metadata: Option<&UpdateMetadata>,
    ) -> EngineResult<Vec<ChangeDescriptor>> {
        names::validate_service_name(service)?;
        let _slot = self.slot(service)?;

        let current = self.load_required(&names::current_name(service))?;
        let updated = Document::from_text(text);

        if updated == current {
            self.retire(service)?;
            return Ok(Vec::new());
        }

        self.store.save(&names::updated_name(service), &updated)?;
        let descriptors = self.refresh_changes(service, &current, &updated)?;
        if let Some(metadata) = metadata {
            self.write_metadata(service, metadata)?;
        }
        tracing::info!(service, hunks = descriptors.len(), "update proposed");
        Ok(descriptors)
    }

    // -----------------------------------------------------------------------
    // Change application
    // -----------------------------------------------------------------------

    /// Commit one hunk: replace the descriptor's current-side range with its
    /// updated-side lines, then run the convergence check.
    ///
    /// Descriptors carry snapshot semantics and are validated against the
    /// live document lengths. When committing several hunks from one diff
    /// snapshot with repeated calls, issue them in descending
    /// `currentStartLine` order ([`redline_types::sort_bottom_up`]): a
    /// replacement shifts line numbers only at or after its own start, so
    /// working upward keeps the remaining descriptors valid. For a
    /// contiguous group, prefer [`RevisionEngine::accept_block`].
    pub fn accept_change(
        &self,
        service: &str,
        descriptor: ChangeDescriptor,
    ) -> EngineResult<ApplyOutcome> {
        names::validate_service_name(service)?;
        let _slot = self.slot(service)?;

        let (mut current, updated) = self.load_pair(service)?;
        descriptor.validate_against(current.len(), updated.len())?;

        let replacement = replacement_lines(&updated, descriptor.updated_range());
        current.splice(descriptor.current_range(), replacement);
        self.store.save(&names::current_name(service), &current)?;
        tracing::info!(service, ?descriptor, "change accepted");

        self.conclude_accept(service, &current, &updated)
    }

    /// Discard one hunk: replace the descriptor's updated-side range with
    /// its current-side lines.
    ///
    /// Never retires the pair, even when the rejection makes the two
    /// documents identical; an explicit
    /// [`RevisionEngine::check_convergence`] does that.
    pub fn reject_change(
        &self,
        service: &str,
        descriptor: ChangeDescriptor,
    ) -> EngineResult<ApplyOutcome> {
        names::validate_service_name(service)?;
        let _slot = self.slot(service)?;

        let (current, mut updated) = self.load_pair(service)?;
        descriptor.validate_against(current.len(), updated.len())?;

        let replacement = replacement_lines(&current, descriptor.current_range());
        updated.splice(descriptor.updated_range(), replacement);
        self.store.save(&names::updated_name(service), &updated)?;
        tracing::info!(service, ?descriptor, "change rejected");

        let descriptors = self.refresh_changes(service, &current, &updated)?;
        Ok(ApplyOutcome {
            converged: false,
            remaining: descriptors.len(),
        })
    }

    /// Commit a contiguous group of hunks as one bulk substitution of the
    /// block's envelope, then run the convergence check.
    ///
    /// The block must be non-empty, in bounds, and non-overlapping on both
    /// sides. Applying the envelope in one splice makes the operation atomic
    /// and immune to the index drift per-hunk application would suffer.
    pub fn accept_block(&self, service: &str, block: &ChangeBlock) -> EngineResult<ApplyOutcome> {
        names::validate_service_name(service)?;
        let _slot = self.slot(service)?;

        let (mut current, updated) = self.load_pair(service)?;
        block.validate_against(current.len(), updated.len())?;
        let Some(envelope) = block.envelope() else {
            return Err(EngineError::InvalidRange(RangeError::EmptyBlock));
        };

        let replacement = replacement_lines(&updated, envelope.updated_range());
        current.splice(envelope.current_range(), replacement);
        self.store.save(&names::current_name(service), &current)?;
        tracing::info!(service, hunks = block.len(), "block accepted");

        self.conclude_accept(service, &current, &updated)
    }

    /// Compare the pair line by line and retire it on equality.
    ///
    /// Returns `true` when the pair is converged (including when no `updated`
    /// document exists at all).
    pub fn check_convergence(&self, service: &str) -> EngineResult<bool> {
        names::validate_service_name(service)?;
        let _slot = self.slot(service)?;

        let current = self.load_required(&names::current_name(service))?;
        let Some(updated) = self.store.load(&names::updated_name(service))? else {
            return Ok(true);
        };
        if current == updated {
            self.retire(service)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn slot(&self, service: &str) -> EngineResult<PairGuard> {
        self.locks
            .acquire(service)
            .ok_or_else(|| EngineError::Conflict(service.to_string()))
    }

    fn load_required(&self, name: &str) -> EngineResult<Document> {
        self.store
            .load(name)?
            .ok_or_else(|| EngineError::NotFound(name.to_string()))
    }

    fn load_pair(&self, service: &str) -> EngineResult<(Document, Document)> {
        let current = self.load_required(&names::current_name(service))?;
        let updated = self.load_required(&names::updated_name(service))?;
        Ok((current, updated))
    }

    fn read_changes(&self, service: &str) -> EngineResult<Vec<ChangeDescriptor>> {
        let name = names::changes_name(service);
        let Some(doc) = self.store.load(&name)? else {
            return Ok(Vec::new());
        };
        let text = doc.to_text();
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|source| EngineError::Serialization { name, source })
    }

    fn write_changes(&self, service: &str, descriptors: &[ChangeDescriptor]) -> EngineResult<()> {
        let name = names::changes_name(service);
        let json = serde_json::to_string(descriptors).map_err(|source| {
            EngineError::Serialization {
                name: name.clone(),
                source,
            }
        })?;
        self.store.save(&name, &Document::from_text(&json))
            .map_err(EngineError::from)
    }

    fn write_metadata(&self, service: &str, metadata: &UpdateMetadata) -> EngineResult<()> {
        let name = names::metadata_name(service);
        let json =
            serde_json::to_string(metadata).map_err(|source| EngineError::Serialization {
                name: name.clone(),
                source,
            })?;
        self.store.save(&name, &Document::from_text(&json))
            .map_err(EngineError::from)
    }

    /// Re-diff the live pair and persist the refreshed descriptor list.
    fn refresh_changes(
        &self,
        service: &str,
        current: &Document,
        updated: &Document,
    ) -> EngineResult<Vec<ChangeDescriptor>> {
        let descriptors = diff_documents(current, updated, self.config.context_lines).descriptors();
        self.write_changes(service, &descriptors)?;
        tracing::debug!(service, hunks = descriptors.len(), "change list refreshed");
        Ok(descriptors)
    }

    /// Post-accept convergence check: retire on equality, refresh the
    /// persisted change list otherwise.
    fn conclude_accept(
        &self,
        service: &str,
        current: &Document,
        updated: &Document,
    ) -> EngineResult<ApplyOutcome> {
        if current == updated {
            self.retire(service)?;
            return Ok(ApplyOutcome {
                converged: true,
                remaining: 0,
            });
        }
        let descriptors = self.refresh_changes(service, current, updated)?;
        Ok(ApplyOutcome {
            converged: false,
            remaining: descriptors.len(),
        })
    }

    /// Delete the pair's review blobs. `updated` goes first: once it is
    /// absent the pair reads as converged and a leftover changes blob is
    /// inert.
    fn retire(&self, service: &str) -> EngineResult<()> {
        self.store.delete(&names::updated_name(service))?;
        self.store.delete(&names::changes_name(service))?;
        tracing::info!(service, "pair retired");
        Ok(())
    }
}

impl std::fmt::Debug for RevisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevisionEngine")
            .field("config", &self.config)
            .finish()
    }
}

fn replacement_lines(source: &Document, range: Range<usize>) -> Vec<String> {
    source
        .slice(range)
        .expect("range validated against live length")
        .to_vec()
}
