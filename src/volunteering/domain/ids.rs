//! Identifier newtypes for the volunteering domain.
//!
//! Each aggregate gets its own UUID wrapper so organization, volunteer, task
//! and signup identifiers cannot be mixed up at call sites. All four are
//! random v4 UUIDs and serialize as bare UUID strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $noun:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", $noun, " identifier.")]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Wraps a stored ", $noun, " UUID.")]
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

uuid_id!(
    /// Identifies a registered organization: the owner of tasks and the
    /// root of the organization cascade.
    OrganizationId,
    "organization"
);

uuid_id!(
    /// Identifies a registered volunteer. Deleting the volunteer removes
    /// every signup keyed by this id.
    VolunteerId,
    "volunteer"
);

uuid_id!(
    /// Identifies a task. Listed in its owner's task collection and
    /// referenced by every signup for the task.
    TaskId,
    "task"
);

uuid_id!(
    /// Identifies one signup row. The (task, volunteer) pair is the
    /// business key; this id is what withdrawal by id and cascades delete
    /// by.
    SignupId,
    "signup"
);
