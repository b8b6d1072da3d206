//! Concrete records managed by the console.

/// Declares a closed, labelled enumeration usable as a record status or a filter attribute.
///
/// Labels are the variant names; they are what filters compare against and what
/// the HTTP provider sends over the wire.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const LABELS: &'static [&'static str] = &[$(stringify!($variant)),+];
        }

        impl $crate::record::StatusEnum for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::record::StatusEnum::label(self))
            }
        }
    };
}

mod audit_log;
mod comment;
mod post;
mod user;

pub use audit_log::{AuditAction, AuditLog, AuditOutcome};
pub use comment::{Comment, CommentStatus};
pub use post::{POST_CATEGORIES, Post, PostStatus};
pub use user::{Role, User, UserStatus};
