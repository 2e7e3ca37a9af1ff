use chrono::{Duration, Utc};

use super::MemoryStore;
use crate::models::{
    ComponentGroupCollapsed, ComponentStatus, NewComponent, NewComponentGroup, NewSchedule,
    ResourceVisibility, ScheduleComponentLink,
};
use crate::repository::{Repository, RepositoryResult};

impl MemoryStore {
    /// Populate an empty store with a small status page
    pub async fn seed_demo(self: &std::sync::Arc<Self>) -> RepositoryResult<()> {
        let groups = self.component_groups();
        let schedules = self.schedules();

        let platform = groups
            .create(NewComponentGroup {
                name: "Platform".into(),
                order: 1,
                collapsed: ComponentGroupCollapsed::CollapsedUnlessIncident,
                visible: ResourceVisibility::Guest,
                components: Vec::new(),
            })
            .await?;
        let internal = groups
            .create(NewComponentGroup {
                name: "Internal tools".into(),
                order: 2,
                collapsed: ComponentGroupCollapsed::Collapsed,
                visible: ResourceVisibility::Authenticated,
                components: Vec::new(),
            })
            .await?;

        let api = self
            .insert_component(NewComponent::named("API").in_group(platform.id))
            .await;
        let web = self
            .insert_component(NewComponent::named("Website").in_group(platform.id))
            .await;
        let database = self
            .insert_component(
                NewComponent::named("Database")
                    .in_group(platform.id)
                    .with_status(ComponentStatus::PerformanceIssues),
            )
            .await;
        self.insert_component(NewComponent::named("CI runners").in_group(internal.id))
            .await;

        let operator = self.insert_user("Operator", "ops@example.com").await;
        let now = Utc::now();

        let upgrade = schedules
            .create(NewSchedule {
                name: "Database upgrade".into(),
                message: "Primary failover to the new major version.".into(),
                scheduled_at: now + Duration::days(2),
                completed_at: Some(now + Duration::days(2) + Duration::hours(1)),
                user_id: Some(operator.id),
                components: vec![
                    ScheduleComponentLink {
                        component_id: database.id,
                        component_status: ComponentStatus::MajorOutage,
                    },
                    ScheduleComponentLink {
                        component_id: api.id,
                        component_status: ComponentStatus::PartialOutage,
                    },
                ],
            })
            .await?;
        self.insert_update(upgrade.id, "Window confirmed.", Some(operator.id))
            .await?;

        schedules
            .create(NewSchedule {
                name: "CDN certificate rotation".into(),
                message: "Brief TLS handshake errors are possible.".into(),
                scheduled_at: now - Duration::days(7),
                completed_at: Some(now - Duration::days(7) + Duration::minutes(30)),
                user_id: None,
                components: vec![ScheduleComponentLink {
                    component_id: web.id,
                    component_status: ComponentStatus::PerformanceIssues,
                }],
            })
            .await?;

        tracing::info!("Seeded demo status page");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{FetchPlan, Pagination};

    #[tokio::test]
    async fn test_seed_demo_populates_both_collections() {
        let store = MemoryStore::new();
        store.seed_demo().await.unwrap();

        let groups = store
            .component_groups()
            .find_all(&[], &[], Pagination::new(0, 10), &FetchPlan::none().with("components"))
            .await
            .unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].components.loaded().map(Vec::len), Some(3));

        let schedules = store
            .schedules()
            .find_all(&[], &[], Pagination::new(0, 10), &FetchPlan::none())
            .await
            .unwrap();
        assert_eq!(schedules.len(), 2);
    }
}
