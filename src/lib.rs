//! Vue single-file component language server core.

use std::path::Path;
use std::sync::{OnceLock, RwLock};

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService};
use tracing::{debug, info};

pub mod dependency;
mod document;
pub mod error;
pub mod logging;
mod lsp;
pub mod regions;
pub mod settings;

pub use dependency::{Dependency, DependencyRegistry, RuntimeDependency};
pub use document::{DocumentState, DocumentStore, LineIndex, TextDocument};
pub use error::Error;
pub use lsp::{folding_ranges, hover_at_position};
pub use regions::{
    BlockScanner, DefaultLanguages, DocumentRegions, EmbeddedRegion, LanguageId, LanguageRange,
    RegionScanner, RegionType, ScanResult, HOST_LANGUAGE,
};
pub use settings::{discover_settings, load_settings, Settings};

pub struct Backend {
    client: Client,
    documents: DocumentStore,
    defaults: OnceLock<DefaultLanguages>,
    dependencies: RwLock<DependencyRegistry>,
}

impl Backend {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            documents: DocumentStore::new(),
            defaults: OnceLock::new(),
            dependencies: RwLock::new(DependencyRegistry::new()),
        }
    }

    fn defaults(&self) -> DefaultLanguages {
        self.defaults.get().copied().unwrap_or_default()
    }

    /// Record the workspace defaults. Only the first `initialize` wins.
    fn set_defaults(&self, defaults: DefaultLanguages) -> bool {
        match self.defaults.set(defaults) {
            Ok(()) => true,
            Err(rejected) => {
                debug!(?rejected, "default languages already set, keeping the first");
                false
            }
        }
    }

    /// Rescan a document after it was opened or changed.
    fn on_document_change(&self, uri: Url, text: String, version: i32) {
        let state = self.documents.open(uri.clone(), text, version, self.defaults());
        debug!(
            %uri,
            version,
            languages = ?state.regions.languages_in_document(),
            "document updated"
        );
    }

    fn load_dependencies(&self, root: &Path) {
        let mut registry = match self.dependencies.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        registry.load_workspace(root);
        for dep in registry.loaded() {
            if let RuntimeDependency::Loaded { name, version, .. } = dep {
                info!(%name, %version, "using workspace dependency");
            }
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let workspace_root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .and_then(|f| f.uri.to_file_path().ok())
            .or_else(|| {
                #[allow(deprecated)]
                params.root_uri.as_ref()?.to_file_path().ok()
            });

        let defaults = match &workspace_root {
            Some(root) => {
                let (settings, settings_dir) = settings::discover_settings(root);
                debug!(dir = %settings_dir.display(), "resolved settings directory");
                self.load_dependencies(root);
                settings.default_languages()
            }
            None => DefaultLanguages::default(),
        };
        self.set_defaults(defaults);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("vue language server initialized");
        self.client
            .log_message(MessageType::INFO, "Vue language server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.on_document_change(
            params.text_document.uri,
            params.text_document.text,
            params.text_document.version,
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // We use FULL sync, so there's exactly one change with the full text
        if let Some(change) = params.content_changes.into_iter().next() {
            self.on_document_change(
                params.text_document.uri,
                change.text,
                params.text_document.version,
            );
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.documents.close(&params.text_document.uri);
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(state) = self.documents.get(uri) else {
            return Ok(None);
        };
        Ok(lsp::hover_at_position(&state, position))
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        let Some(state) = self.documents.get(&params.text_document.uri) else {
            return Ok(None);
        };
        Ok(Some(lsp::folding_ranges(&state)))
    }
}

pub fn create_service() -> (LspService<Backend>, tower_lsp::ClientSocket) {
    LspService::new(Backend::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_can_be_created() {
        let (_service, _socket) = create_service();
    }

    #[test]
    fn second_defaults_are_ignored() {
        let (service, _socket) = create_service();
        let backend = service.inner();
        let pug = DefaultLanguages {
            template: LanguageId::Pug,
            ..DefaultLanguages::default()
        };

        assert!(backend.set_defaults(pug));
        assert!(!backend.set_defaults(DefaultLanguages::default()));
        assert_eq!(backend.defaults().template, LanguageId::Pug);
    }
}
