//! Safety policy for the AWS CLI passthrough.

pub mod classifier;

pub use classifier::{
    CommandClassifier, CommandPolicy, DenyListClassifier, ReadOnlyVerbClassifier, DENIED_TOKENS,
};
