//! Precedence evaluation over a fixed snapshot of user, grants and time.
//!
//! Rules are applied in strict order and the first match wins:
//!
//! 1. inactive user: deny
//! 2. super-role held as primary role or assignment: allow (`admin`)
//! 3. non-expired direct override for the name: its `granted` flag (`direct`)
//! 4. `granted = true` role grant for the name: allow (`role`)
//! 5. default deny

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::{Decision, PermissionName, RolePermissionGrant, UserAccessProfile, UserPermissionGrant};

/// Immutable inputs of one resolution, captured at a single instant.
#[derive(Debug, Clone)]
pub struct AccessSnapshot {
    subject: Option<UserAccessProfile>,
    direct_grants: HashMap<PermissionName, UserPermissionGrant>,
    role_granted: BTreeSet<PermissionName>,
    duplicate_direct_grants: Vec<PermissionName>,
    evaluated_at: DateTime<Utc>,
}

impl AccessSnapshot {
    /// Snapshot for a user that does not exist in the client scope.
    #[must_use]
    pub fn unknown_subject(evaluated_at: DateTime<Utc>) -> Self {
        Self {
            subject: None,
            direct_grants: HashMap::new(),
            role_granted: BTreeSet::new(),
            duplicate_direct_grants: Vec::new(),
            evaluated_at,
        }
    }

    /// Builds a snapshot from the loaded profile and grant rows.
    ///
    /// Direct grants inactive at `evaluated_at` are dropped. When more than one
    /// active direct grant targets the same name, the most recently updated row
    /// wins (ties broken by the greater association id) and the name is
    /// reported through [`AccessSnapshot::duplicate_direct_grants`].
    #[must_use]
    pub fn new(
        subject: UserAccessProfile,
        user_grants: Vec<UserPermissionGrant>,
        role_grants: Vec<RolePermissionGrant>,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        let mut direct_grants: HashMap<PermissionName, UserPermissionGrant> = HashMap::new();
        let mut duplicates = BTreeSet::new();

        for grant in user_grants
            .into_iter()
            .filter(|grant| grant.user_id == subject.id && grant.is_active_at(evaluated_at))
        {
            match direct_grants.get(&grant.permission_name) {
                Some(current) => {
                    duplicates.insert(grant.permission_name.clone());
                    if (grant.updated_at, grant.id) > (current.updated_at, current.id) {
                        direct_grants.insert(grant.permission_name.clone(), grant);
                    }
                }
                None => {
                    direct_grants.insert(grant.permission_name.clone(), grant);
                }
            }
        }

        let role_granted = role_grants
            .into_iter()
            .filter(|grant| grant.granted)
            .map(|grant| grant.permission_name)
            .collect();

        Self {
            subject: Some(subject),
            direct_grants,
            role_granted,
            duplicate_direct_grants: duplicates.into_iter().collect(),
            evaluated_at,
        }
    }

    /// Returns the instant every check in this snapshot is evaluated at.
    #[must_use]
    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }

    /// Returns the loaded subject, if the user exists.
    #[must_use]
    pub fn subject(&self) -> Option<&UserAccessProfile> {
        self.subject.as_ref()
    }

    /// Names that had more than one active direct grant row.
    #[must_use]
    pub fn duplicate_direct_grants(&self) -> &[PermissionName] {
        self.duplicate_direct_grants.as_slice()
    }

    /// Evaluates one permission name.
    #[must_use]
    pub fn evaluate(&self, permission: &PermissionName) -> Decision {
        let Some(subject) = self.subject.as_ref() else {
            return Decision::deny();
        };

        if !subject.is_active {
            return Decision::deny();
        }

        // The super-role outranks direct revocations so that a stale per-user
        // override can never lock an administrator out.
        if subject.holds_admin_role() {
            return Decision::admin();
        }

        if let Some(grant) = self.direct_grants.get(permission) {
            return Decision::direct(grant.granted);
        }

        if self.role_granted.contains(permission) {
            return Decision::role();
        }

        Decision::deny()
    }

    /// Evaluates every name against this snapshot.
    #[must_use]
    pub fn evaluate_all<'a>(
        &self,
        permissions: impl IntoIterator<Item = &'a PermissionName>,
    ) -> BTreeMap<PermissionName, Decision> {
        permissions
            .into_iter()
            .map(|permission| (permission.clone(), self.evaluate(permission)))
            .collect()
    }
}
