//! The security policy contract.

use docguard_core::{Access, Acp, Document, Principal};

/// A pluggable access rule consulted before the ACL.
///
/// Implementations must return [`Access::Unknown`] whenever their
/// precondition does not apply so that later policies, and finally the ACL,
/// get a say.
///
/// # Example
///
/// ```
/// use docguard_core::{Access, Acp, Document, Principal};
/// use docguard_policy::SecurityPolicy;
///
/// /// The creator of a document can do anything with it.
/// struct CreatorPolicy;
///
/// impl SecurityPolicy for CreatorPolicy {
///     fn check_permission(
///         &self,
///         doc: &dyn Document,
///         _merged_acp: &Acp,
///         principal: &Principal,
///         _permission: &str,
///         _resolved_permissions: &[String],
///         _additional_principals: &[String],
///     ) -> Access {
///         match doc.property("dc:creator").and_then(|v| v.as_str()) {
///             Some(creator) if creator == principal.name => Access::Grant,
///             _ => Access::Unknown,
///         }
///     }
/// }
/// ```
pub trait SecurityPolicy: Send + Sync {
    /// Decide on `permission` for `principal` on `doc`.
    ///
    /// `resolved_permissions` is the requested permission expanded with its
    /// compound groups and `Everything`; `additional_principals` is the
    /// principal expanded with its groups and `Everyone`.
    fn check_permission(
        &self,
        doc: &dyn Document,
        merged_acp: &Acp,
        principal: &Principal,
        permission: &str,
        resolved_permissions: &[String],
        additional_principals: &[String],
    ) -> Access;

    /// Whether this policy may ever return a decisive answer for
    /// `permission`. Defaults to `true`.
    fn is_restricting_permission(&self, _permission: &str) -> bool {
        true
    }
}
