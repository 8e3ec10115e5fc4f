use actix_web::web;
use std::sync::Arc;

use crate::modules::import_export::application::ports::incoming::use_cases::ExportDocumentsUseCase;
use crate::modules::migration::application::domain::MigrationRegistry;
use crate::modules::migration::application::ports::incoming::use_cases::MigrateDocumentUseCase;
use crate::modules::schema::application::domain::policies::SchemaPolicy;
use crate::{build_app_state, AppState};

/// Builds an `AppState` backed by the real services. Use cases whose failure
/// paths are hard to reach with real input can be swapped for stubs.
pub struct TestAppStateBuilder {
    policy: SchemaPolicy,
    migrate_document: Option<Arc<dyn MigrateDocumentUseCase + Send + Sync>>,
    export_documents: Option<Arc<dyn ExportDocumentsUseCase + Send + Sync>>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::with_policy(SchemaPolicy::new())
    }
}

impl TestAppStateBuilder {
    pub fn with_policy(policy: SchemaPolicy) -> Self {
        Self {
            policy,
            migrate_document: None,
            export_documents: None,
        }
    }

    pub fn with_migrate_document(
        mut self,
        uc: impl MigrateDocumentUseCase + Send + Sync + 'static,
    ) -> Self {
        self.migrate_document = Some(Arc::new(uc));
        self
    }

    pub fn with_export_documents(
        mut self,
        uc: impl ExportDocumentsUseCase + Send + Sync + 'static,
    ) -> Self {
        self.export_documents = Some(Arc::new(uc));
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let registry = MigrationRegistry::with_defaults(self.policy.version_ordering);
        let mut state = build_app_state(Arc::new(registry), &self.policy);

        if let Some(uc) = self.migrate_document {
            state.migration.migrate = uc;
        }
        if let Some(uc) = self.export_documents {
            state.transfer.export = uc;
        }

        web::Data::new(state)
    }
}
