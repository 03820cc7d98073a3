//! Resource kinds and the capability matrix.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SNOWFLAKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{17,20}$").expect("snowflake pattern is valid"));

static INVITE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{2,32}$").expect("invite code pattern is valid"));

/// The four reconciliation verbs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    /// Read remote state and compare it with the desired spec.
    Observe,
    /// Create the remote entity.
    Create,
    /// Modify the remote entity.
    Update,
    /// Remove the remote entity.
    Delete,
}

/// Whether a kind can be created through the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreateSupport {
    /// Create issues a remote call.
    Supported,
    /// The entity exists independently; Create is refused locally.
    Forbidden,
}

/// Whether a kind can be modified through the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateSupport {
    /// Update issues a partial modify call.
    Supported,
    /// Only the identity the credentials belong to can be modified.
    SelfOnly,
    /// The entity is immutable; Update succeeds without a call.
    NoOp,
    /// No modify endpoint exists; Update is refused locally.
    Forbidden,
}

/// What Delete does for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteSupport {
    /// Delete issues a remote call; an already-absent entity counts as deleted.
    Remote,
    /// No delete endpoint exists; Delete only stops local tracking.
    Untrack,
}

/// One row of the capability matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// Create support
    pub create: CreateSupport,
    /// Update support
    pub update: UpdateSupport,
    /// Delete support
    pub delete: DeleteSupport,
}

impl Capabilities {
    const FULL: Self = Self {
        create: CreateSupport::Supported,
        update: UpdateSupport::Supported,
        delete: DeleteSupport::Remote,
    };

    /// Whether `operation` is carried out (remotely or as a deliberate no-op)
    /// rather than refused.
    pub fn permits(&self, operation: Operation) -> bool {
        match operation {
            Operation::Observe => true,
            Operation::Create => self.create == CreateSupport::Supported,
            Operation::Update => self.update != UpdateSupport::Forbidden,
            Operation::Delete => true,
        }
    }
}

/// Shape a correlation ID must have before it is trusted as a remote identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdShape {
    /// Numeric snowflake (17 to 20 ASCII digits).
    Snowflake,
    /// Short alphanumeric invite code.
    InviteCode,
}

impl IdShape {
    /// Check whether `candidate` has this shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use steward_core::IdShape;
    ///
    /// assert!(IdShape::Snowflake.matches("175928847299117063"));
    /// assert!(!IdShape::Snowflake.matches("my-webhook"));
    /// assert!(IdShape::InviteCode.matches("aBc12XyZ"));
    /// assert!(!IdShape::InviteCode.matches("my-invite"));
    /// ```
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::Snowflake => SNOWFLAKE.is_match(candidate),
            Self::InviteCode => INVITE_CODE.is_match(candidate),
        }
    }
}

/// Every Discord entity kind steward manages.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum ResourceKind {
    /// Guild (server)
    Guild,
    /// Guild channel
    Channel,
    /// Guild role
    Role,
    /// Channel webhook
    Webhook,
    /// Channel invite
    Invite,
    /// Guild member
    Member,
    /// User account
    User,
    /// OAuth2 application
    Application,
    /// Guild integration
    Integration,
}

impl ResourceKind {
    /// The capability matrix row for this kind.
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Self::Guild | Self::Channel | Self::Role | Self::Webhook => Capabilities::FULL,
            Self::Invite => Capabilities {
                create: CreateSupport::Supported,
                update: UpdateSupport::NoOp,
                delete: DeleteSupport::Remote,
            },
            Self::Member => Capabilities {
                create: CreateSupport::Forbidden,
                update: UpdateSupport::Supported,
                delete: DeleteSupport::Remote,
            },
            Self::User | Self::Application => Capabilities {
                create: CreateSupport::Forbidden,
                update: UpdateSupport::SelfOnly,
                delete: DeleteSupport::Untrack,
            },
            Self::Integration => Capabilities {
                create: CreateSupport::Forbidden,
                update: UpdateSupport::Forbidden,
                delete: DeleteSupport::Remote,
            },
        }
    }

    /// Shape of this kind's correlation ID.
    pub fn id_shape(&self) -> IdShape {
        match self {
            Self::Invite => IdShape::InviteCode,
            _ => IdShape::Snowflake,
        }
    }

    /// Why the remote system refuses `operation` for this kind.
    pub fn refusal_reason(&self, operation: Operation) -> &'static str {
        match (self, operation) {
            (Self::Member, Operation::Create) => {
                "members join a guild through an invite or OAuth2 flow"
            }
            (Self::User, Operation::Create) => "user accounts exist independently of steward",
            (Self::Application, Operation::Create) => {
                "applications are registered through the developer portal"
            }
            (Self::Integration, Operation::Create) => {
                "integrations are installed by the service that owns them"
            }
            (Self::Integration, Operation::Update) => {
                "the remote API exposes no modify endpoint for integrations"
            }
            _ => "the remote API does not offer this operation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn snowflake_shape() {
        assert!(IdShape::Snowflake.matches("41771983423143937"));
        assert!(IdShape::Snowflake.matches("1234567890123456789"));
        assert!(!IdShape::Snowflake.matches("C1"));
        assert!(!IdShape::Snowflake.matches(""));
        assert!(!IdShape::Snowflake.matches("12345678901234567x"));
        assert!(!IdShape::Snowflake.matches("123456789012345678901"));
    }

    #[test]
    fn invite_code_shape() {
        assert!(IdShape::InviteCode.matches("discord"));
        assert!(IdShape::InviteCode.matches("Xq4z9Pt"));
        assert!(!IdShape::InviteCode.matches("x"));
        assert!(!IdShape::InviteCode.matches("has space"));
        assert!(!IdShape::InviteCode.matches("my-invite"));
    }

    #[test]
    fn matrix_matches_documented_table() {
        let full = [
            ResourceKind::Guild,
            ResourceKind::Channel,
            ResourceKind::Role,
            ResourceKind::Webhook,
        ];
        for kind in full {
            assert_eq!(kind.capabilities(), Capabilities::FULL, "{kind}");
        }

        let invite = ResourceKind::Invite.capabilities();
        assert_eq!(invite.create, CreateSupport::Supported);
        assert_eq!(invite.update, UpdateSupport::NoOp);

        let member = ResourceKind::Member.capabilities();
        assert_eq!(member.create, CreateSupport::Forbidden);
        assert_eq!(member.update, UpdateSupport::Supported);
        assert_eq!(member.delete, DeleteSupport::Remote);

        for kind in [ResourceKind::User, ResourceKind::Application] {
            let caps = kind.capabilities();
            assert_eq!(caps.create, CreateSupport::Forbidden);
            assert_eq!(caps.update, UpdateSupport::SelfOnly);
            assert_eq!(caps.delete, DeleteSupport::Untrack);
        }

        let integration = ResourceKind::Integration.capabilities();
        assert!(!integration.permits(Operation::Create));
        assert!(!integration.permits(Operation::Update));
        assert!(integration.permits(Operation::Delete));
    }

    #[test]
    fn only_invites_use_codes() {
        for kind in ResourceKind::iter() {
            let expected = if kind == ResourceKind::Invite {
                IdShape::InviteCode
            } else {
                IdShape::Snowflake
            };
            assert_eq!(kind.id_shape(), expected);
        }
    }
}
