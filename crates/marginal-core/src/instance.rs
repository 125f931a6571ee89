//! Candidate instances, labels, and the opaque trained-model handle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a data instance, assigned by the external data
/// layer. The core never derives meaning from the value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for InstanceId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Ground-truth class label returned by the annotation collaborator.
/// Free-form so the core stays agnostic of binary vs. multiclass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label(pub String);

impl Label {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unlabeled candidate instance: identifier plus feature vector,
/// both owned by the external data layer and treated as read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    pub features: Vec<f64>,
}

impl Instance {
    pub fn new(id: impl Into<InstanceId>, features: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            features,
        }
    }
}

/// An instance together with its ground-truth label, as merged into the
/// labeled set after annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledInstance {
    pub instance: Instance,
    pub label: Label,
}

/// Opaque handle to a trained model held by the model capability.
///
/// The core stores and forwards handles (one per fold in monitoring)
/// but never inspects model structure beyond the capability's
/// fit/score/coefficients operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelHandle(pub String);

impl ModelHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_id_display_and_from() {
        let id: InstanceId = 42u64.into();
        assert_eq!(id.to_string(), "42");
        assert_eq!(id, InstanceId(42));
    }

    #[test]
    fn instance_serde_roundtrip() {
        let inst = Instance::new(7u64, vec![0.5, -1.25]);
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, inst);
    }
}
