//! Error types for [`TreeMerger`].
//!
//! These never reach the host: a failed merge is logged and the view the
//! host passed in is rendered as-is.
//!
//! [`TreeMerger`]: super::TreeMerger

use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

use crate::types::channel::ChannelId;

/// The view handed to the merger does not have the shape it expects.
#[derive(Debug)]
pub struct MergeError {
    /// Type of error that occurred.
    kind: MergeErrorType,
    /// Source of the error, if there is any.
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl MergeError {
    pub(super) const fn missing_category(category: Option<ChannelId>) -> Self {
        Self {
            kind: MergeErrorType::MissingCategory { category },
            source: None,
        }
    }

    /// Immutable reference to the type of error that occurred.
    #[must_use = "retrieving the type has no effect if left unused"]
    pub const fn kind(&self) -> &MergeErrorType {
        &self.kind
    }

    /// Consume the error, returning the owned error type and the source error.
    #[must_use = "consuming the error into its parts has no effect if left unused"]
    pub fn into_parts(self) -> (MergeErrorType, Option<Box<dyn Error + Send + Sync>>) {
        (self.kind, self.source)
    }
}

impl Display for MergeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.kind {
            MergeErrorType::MissingCategory {
                category: Some(category),
            } => {
                f.write_str("view has no bucket for category ")?;
                Display::fmt(category, f)
            }
            MergeErrorType::MissingCategory { category: None } => {
                f.write_str("view has no bucket for uncategorized channels")
            }
        }
    }
}

impl Error for MergeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn Error + 'static))
    }
}

/// Type of [`MergeError`] that occurred.
#[derive(Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum MergeErrorType {
    /// A hidden channel belongs under a category the view has no bucket
    /// for. `None` is the uncategorized bucket.
    MissingCategory { category: Option<ChannelId> },
}
