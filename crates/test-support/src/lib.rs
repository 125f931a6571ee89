//! Fake collaborators for tests across the marginal workspace:
//! a scripted draw source, a fixed-margin model capability, an
//! in-memory data layer (pool + annotator), and a collecting export
//! target.
//!
//! Everything here is test-only; fixtures panic on misuse rather than
//! returning errors where a panic makes the failing test clearer.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

use marginal_core::errors::{AnnotationError, MarginalError, MarginalResult, ScoringError};
use marginal_core::instance::{Instance, InstanceId, Label, LabeledInstance, ModelHandle};
use marginal_core::models::{CoefficientMap, CoefficientReport};
use marginal_core::traits::{IAnnotator, ICandidatePool, IDrawSource, IExportTarget, IModel};

/// Draw source that replays a fixed script of uniform draws.
///
/// # Panics
/// Panics when the script runs out — a test asking for more draws than
/// it provided is a broken test.
pub struct ScriptedDraws {
    draws: VecDeque<f64>,
}

impl ScriptedDraws {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }
}

impl IDrawSource for ScriptedDraws {
    fn next_draw(&mut self) -> f64 {
        self.draws
            .pop_front()
            .expect("ScriptedDraws exhausted: test provided too few draws")
    }
}

/// Model capability with scripted per-instance margins.
///
/// `fit` hands out sequentially-numbered handles and records the size
/// of each labeled set it saw; `score` looks the margin up by instance
/// id regardless of the handle.
pub struct FixedMarginModel {
    margins: HashMap<InstanceId, f64>,
    coefficients: Option<CoefficientMap>,
    expected_dims: Option<usize>,
    fail_fit: AtomicBool,
    fit_count: AtomicU32,
    fit_sizes: Mutex<Vec<usize>>,
}

impl FixedMarginModel {
    pub fn new(margins: impl IntoIterator<Item = (u64, f64)>) -> Self {
        Self {
            margins: margins
                .into_iter()
                .map(|(id, m)| (InstanceId(id), m))
                .collect(),
            coefficients: None,
            expected_dims: None,
            fail_fit: AtomicBool::new(false),
            fit_count: AtomicU32::new(0),
            fit_sizes: Mutex::new(Vec::new()),
        }
    }

    /// Make every trained model expose these coefficients.
    pub fn with_coefficients(mut self, coefficients: CoefficientMap) -> Self {
        self.coefficients = Some(coefficients);
        self
    }

    /// Reject instances whose feature count differs from `dims`.
    pub fn with_expected_dims(mut self, dims: usize) -> Self {
        self.expected_dims = Some(dims);
        self
    }

    /// Make the next `fit` calls fail.
    pub fn fail_fit(&self) {
        self.fail_fit.store(true, Ordering::SeqCst);
    }

    /// Number of `fit` calls so far.
    pub fn fit_count(&self) -> u32 {
        self.fit_count.load(Ordering::SeqCst)
    }

    /// Labeled-set sizes seen by each `fit` call, in order.
    pub fn fit_sizes(&self) -> Vec<usize> {
        self.fit_sizes.lock().unwrap().clone()
    }
}

impl IModel for FixedMarginModel {
    fn fit(&self, labeled: &[LabeledInstance]) -> MarginalResult<ModelHandle> {
        if self.fail_fit.load(Ordering::SeqCst) {
            return Err(MarginalError::FitFailed {
                iter_num: 0,
                message: "scripted fit failure".to_string(),
            });
        }
        self.fit_sizes.lock().unwrap().push(labeled.len());
        let n = self.fit_count.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ModelHandle::new(format!("model-{n}")))
    }

    fn score(&self, _handle: &ModelHandle, instance: &Instance) -> MarginalResult<f64> {
        if let Some(expected) = self.expected_dims {
            if instance.features.len() != expected {
                return Err(ScoringError::DimensionMismatch {
                    instance_id: instance.id,
                    expected,
                    actual: instance.features.len(),
                }
                .into());
            }
        }
        self.margins
            .get(&instance.id)
            .copied()
            .ok_or_else(|| {
                ScoringError::ScoreFailed {
                    instance_id: instance.id,
                    message: "no scripted margin".to_string(),
                }
                .into()
            })
    }

    fn coefficients(&self, _handle: &ModelHandle) -> MarginalResult<Option<CoefficientMap>> {
        Ok(self.coefficients.clone())
    }
}

/// In-memory data layer playing both the candidate pool and the
/// annotation collaborator: annotating a batch removes the instances
/// from the pool and returns their scripted labels.
pub struct InMemoryDataLayer {
    pool: Mutex<Vec<Instance>>,
    labels: HashMap<InstanceId, Label>,
    fail_annotation: AtomicBool,
}

impl InMemoryDataLayer {
    /// Build from `(id, features, label)` triples; pool order is the
    /// iteration order given here.
    pub fn new(rows: impl IntoIterator<Item = (u64, Vec<f64>, &'static str)>) -> Self {
        let mut pool = Vec::new();
        let mut labels = HashMap::new();
        for (id, features, label) in rows {
            pool.push(Instance::new(id, features));
            labels.insert(InstanceId(id), Label::new(label));
        }
        Self {
            pool: Mutex::new(pool),
            labels,
            fail_annotation: AtomicBool::new(false),
        }
    }

    /// Make subsequent `annotate` calls fail.
    pub fn fail_annotation(&self) {
        self.fail_annotation.store(true, Ordering::SeqCst);
    }

    /// Let `annotate` succeed again.
    pub fn restore_annotation(&self) {
        self.fail_annotation.store(false, Ordering::SeqCst);
    }

    /// Instances still unlabeled.
    pub fn pool_len(&self) -> usize {
        self.pool.lock().unwrap().len()
    }
}

impl ICandidatePool for InMemoryDataLayer {
    fn candidates(&self) -> MarginalResult<Vec<Instance>> {
        Ok(self.pool.lock().unwrap().clone())
    }
}

impl IAnnotator for InMemoryDataLayer {
    fn annotate(&self, batch: &[InstanceId]) -> MarginalResult<Vec<LabeledInstance>> {
        if self.fail_annotation.load(Ordering::SeqCst) {
            return Err(AnnotationError::Unavailable {
                message: "scripted annotation outage".to_string(),
            }
            .into());
        }
        let mut pool = self.pool.lock().unwrap();
        let mut labeled = Vec::with_capacity(batch.len());
        for id in batch {
            let pos = pool.iter().position(|inst| inst.id == *id);
            let (instance, label) = match (pos, self.labels.get(id)) {
                (Some(pos), Some(label)) => (pool.remove(pos), label.clone()),
                _ => {
                    return Err(AnnotationError::PartialLabels {
                        requested: batch.len(),
                        returned: labeled.len(),
                    }
                    .into())
                }
            };
            labeled.push(LabeledInstance { instance, label });
        }
        Ok(labeled)
    }
}

/// Export target that collects everything it is given.
#[derive(Default)]
pub struct CollectingExport {
    pub models: Vec<(usize, ModelHandle)>,
    pub timing_header: Vec<String>,
    pub timing_rows: Vec<Vec<f64>>,
    pub coefficient_report: Option<CoefficientReport>,
}

impl CollectingExport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IExportTarget for CollectingExport {
    fn export_model(&mut self, fold_id: usize, handle: &ModelHandle) -> MarginalResult<()> {
        self.models.push((fold_id, handle.clone()));
        Ok(())
    }

    fn export_timings(&mut self, header: &[String], rows: &[Vec<f64>]) -> MarginalResult<()> {
        self.timing_header = header.to_vec();
        self.timing_rows = rows.to_vec();
        Ok(())
    }

    fn export_coefficients(&mut self, report: &CoefficientReport) -> MarginalResult<()> {
        self.coefficient_report = Some(report.clone());
        Ok(())
    }
}
