// ── Identifier types ──
//
// Import and task ids are assigned by the remote service and are only
// unique within their parent. Transform keys are assigned locally.

use std::fmt;

use serde::Serialize;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Id of an import session, unique across the session list.
    ImportId
);

id_type!(
    /// Id of a task, unique within its import.
    TaskId
);

id_type!(
    /// Stable key of a transform within its chain.
    ///
    /// Keys survive deletions of sibling transforms; the positional index
    /// the service expects is derived from the key when a request is built.
    TransformKey
);
