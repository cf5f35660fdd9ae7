use super::*;

impl CatalogService {
    /// Returns the startup catalog seed.
    #[must_use]
    pub fn seed(&self) -> &CatalogSeed {
        self.seed.as_ref()
    }

    /// Installs the catalog seed into one client.
    ///
    /// Existing permissions and roles are left untouched, and default grants
    /// are only written for roles created by this call, so re-seeding never
    /// reverts an administrator's later changes. A role whose defaults fail to
    /// store is deleted again, so the next call recreates it in full.
    pub async fn seed_client(&self, client_id: &ClientId) -> AppResult<CatalogSeedReport> {
        let mut report = CatalogSeedReport::default();

        for entry in self.seed.expanded_permissions()? {
            if self
                .catalog_repository
                .find_permission_by_name(client_id, &entry.name)
                .await?
                .is_some()
            {
                continue;
            }

            let permission = Permission::new(PermissionId::new(), entry.name, entry.label, true)?;
            self.catalog_repository
                .create_permission(client_id, permission)
                .await?;
            report.created_permissions += 1;
        }

        for entry in &self.seed.roles {
            if self
                .catalog_repository
                .find_role(client_id, &RoleLookup::Name(entry.name.clone()))
                .await?
                .is_some()
            {
                continue;
            }

            let role = Role::new(
                RoleId::new(),
                entry.name.clone(),
                entry.label.as_str(),
                entry.level,
                true,
            )?;
            let role_id = role.id();
            self.catalog_repository.create_role(client_id, role).await?;

            // A role only counts as seeded once its defaults are stored.
            match self.seed_role_grants(client_id, entry, role_id).await {
                Ok(created) => {
                    report.created_roles += 1;
                    report.created_role_grants += created;
                }
                Err(error) => {
                    warn!(
                        %client_id,
                        role = %entry.name,
                        error = %error,
                        "rolling back partially seeded role"
                    );
                    self.catalog_repository.delete_role(client_id, role_id).await?;
                    return Err(error);
                }
            }
        }

        info!(
            %client_id,
            created_permissions = report.created_permissions,
            created_roles = report.created_roles,
            created_role_grants = report.created_role_grants,
            "seeded client catalog"
        );

        Ok(report)
    }

    async fn seed_role_grants(
        &self,
        client_id: &ClientId,
        entry: &RoleSeed,
        role_id: RoleId,
    ) -> AppResult<usize> {
        let mut created = 0;
        for name in self.seed.role_grants(entry)? {
            let permission = self.get_permission(client_id, &name).await?;
            self.grant_repository
                .upsert_role_grant(client_id, role_id, permission.id(), true)
                .await?;
            created += 1;
        }
        Ok(created)
    }
}
