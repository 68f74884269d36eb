use crate::query::{
    evaluator::{EvaluationOptions, QuerySource, TrackingMode},
    predicate::Lambda,
    spec::{IncludeHint, KeySelector, OrderDirection},
};
use derive_more::IntoIterator;
use sha2::{Digest, Sha256};
use std::{convert::Infallible, fmt, marker::PhantomData};

///
/// QueryStage
/// One recorded call against a query source.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QueryStage {
    Options {
        tracking: TrackingMode,
        split_query: bool,
        tag: Option<String>,
    },
    Filter(String),
    Include(String),
    OrderBy {
        key: String,
        direction: OrderDirection,
    },
    ThenBy {
        key: String,
        direction: OrderDirection,
    },
    Skip(u32),
    Take(u32),
}

impl QueryStage {
    const fn tag(&self) -> u8 {
        match self {
            Self::Options { .. } => 0x01,
            Self::Filter(_) => 0x02,
            Self::Include(_) => 0x03,
            Self::OrderBy { .. } => 0x04,
            Self::ThenBy { .. } => 0x05,
            Self::Skip(_) => 0x06,
            Self::Take(_) => 0x07,
        }
    }
}

impl fmt::Display for QueryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Options {
                tracking,
                split_query,
                tag,
            } => write!(
                f,
                "options(tracking={tracking:?}, split_query={split_query}, tag={})",
                tag.as_deref().unwrap_or("-")
            ),
            Self::Filter(criteria) => write!(f, "filter({criteria})"),
            Self::Include(hint) => write!(f, "include({hint})"),
            Self::OrderBy { key, direction } => write!(f, "order_by({key}, {direction})"),
            Self::ThenBy { key, direction } => write!(f, "then_by({key}, {direction})"),
            Self::Skip(count) => write!(f, "skip({count})"),
            Self::Take(count) => write!(f, "take({count})"),
        }
    }
}

///
/// QueryFingerprint
/// Stable SHA-256 digest of a recorded stage sequence.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct QueryFingerprint([u8; 32]);

impl QueryFingerprint {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn as_hex(&self) -> String {
        let mut out = String::with_capacity(64);
        for byte in self.0 {
            use std::fmt::Write as _;
            let _ = write!(out, "{byte:02x}");
        }
        out
    }
}

impl fmt::Display for QueryFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_hex())
    }
}

///
/// QueryExplain
///
/// Ordered record of the calls an evaluation made. Parameter names are
/// part of the rendered criteria, so two evaluations of the same
/// specification explain identically.
///

#[derive(Clone, Debug, Default, Eq, IntoIterator, PartialEq)]
pub struct QueryExplain {
    #[into_iterator(owned, ref)]
    stages: Vec<QueryStage>,
}

impl QueryExplain {
    #[must_use]
    pub fn stages(&self) -> &[QueryStage] {
        &self.stages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Rendered stages, one per line.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.stages.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn fingerprint(&self) -> QueryFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(b"queryfp:v1");
        for stage in &self.stages {
            hasher.update([stage.tag()]);
            write_str(&mut hasher, &stage.to_string());
        }

        let digest = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        QueryFingerprint(out)
    }
}

impl fmt::Display for QueryExplain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stage) in self.stages.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{stage}")?;
        }
        Ok(())
    }
}

fn write_str(hasher: &mut Sha256, value: &str) {
    let len = u32::try_from(value.len()).unwrap_or(u32::MAX);
    hasher.update(len.to_be_bytes());
    hasher.update(value.as_bytes());
}

///
/// ExplainSource
///
/// Query source that executes nothing and records every call it receives.
///

pub struct ExplainSource<E> {
    stages: Vec<QueryStage>,
    _marker: PhantomData<fn(&E)>,
}

impl<E> ExplainSource<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stages: Vec::new(),
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn finish(self) -> QueryExplain {
        QueryExplain {
            stages: self.stages,
        }
    }

    fn push(mut self, stage: QueryStage) -> Result<Self, Infallible> {
        self.stages.push(stage);
        Ok(self)
    }
}

impl<E> Default for ExplainSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> QuerySource<E> for ExplainSource<E> {
    type Error = Infallible;

    fn apply_options(self, options: &EvaluationOptions) -> Result<Self, Self::Error> {
        self.push(QueryStage::Options {
            tracking: options.tracking,
            split_query: options.split_query,
            tag: options.tag.clone(),
        })
    }

    fn filter(self, criteria: &Lambda<E>) -> Result<Self, Self::Error> {
        self.push(QueryStage::Filter(criteria.body().to_string()))
    }

    fn include(self, hint: IncludeHint<'_>) -> Result<Self, Self::Error> {
        self.push(QueryStage::Include(hint.to_string()))
    }

    fn order_by(self, key: &KeySelector<E>, direction: OrderDirection) -> Result<Self, Self::Error> {
        self.push(QueryStage::OrderBy {
            key: key.lambda().body().to_string(),
            direction,
        })
    }

    fn then_by(self, key: &KeySelector<E>, direction: OrderDirection) -> Result<Self, Self::Error> {
        self.push(QueryStage::ThenBy {
            key: key.lambda().body().to_string(),
            direction,
        })
    }

    fn skip(self, count: u32) -> Result<Self, Self::Error> {
        self.push(QueryStage::Skip(count))
    }

    fn take(self, count: u32) -> Result<Self, Self::Error> {
        self.push(QueryStage::Take(count))
    }
}
