//! Per-run context
//!
//! Built once per test run and passed to whatever needs it: the client, the
//! router and the substituted managers all come from here. Nothing is global,
//! so two runs in one process do not share state.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::config::ConcolicConfig;
use crate::errors::Result;
use crate::features::data_access::ModelRegistry;
use crate::features::dispatch::{FormParser, SymClient, SymbolicFormParser, UrlEncodedParser};
use crate::features::mutation::{DiagnosticRegistry, MutationEngine, MutationLog, MutationSink};
use crate::features::routing::{ViewMap, VirtualRouter};
use crate::features::symbolic::{SampleLibrary, SymbolicLibrary};
use crate::features::value_bridge::SymbolicBridge;

pub struct ConcolicContext {
    run_id: Uuid,
    config: ConcolicConfig,
    bridge: SymbolicBridge,
    views: Arc<ViewMap>,
    models: ModelRegistry,
    engine: Arc<MutationEngine>,
    parser: Arc<dyn FormParser>,
}

impl fmt::Debug for ConcolicContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcolicContext")
            .field("run_id", &self.run_id)
            .field("views", &self.views)
            .field("models", &self.models.model_names())
            .finish_non_exhaustive()
    }
}

impl ConcolicContext {
    pub fn builder(config: ConcolicConfig) -> ConcolicContextBuilder {
        ConcolicContextBuilder::new(config)
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn config(&self) -> &ConcolicConfig {
        &self.config
    }

    pub fn bridge(&self) -> &SymbolicBridge {
        &self.bridge
    }

    pub fn views(&self) -> &Arc<ViewMap> {
        &self.views
    }

    /// Mutation-aware managers
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub fn engine(&self) -> &Arc<MutationEngine> {
        &self.engine
    }

    pub fn parser(&self) -> &Arc<dyn FormParser> {
        &self.parser
    }

    /// Fresh router over the run's view map
    pub fn router(&self) -> VirtualRouter {
        VirtualRouter::new(self.views.clone())
    }

    /// Client wired to this run's parser, router and managers
    pub fn new_client(&self) -> SymClient {
        SymClient::new(
            self.bridge.clone(),
            self.parser.clone(),
            Arc::new(self.router()),
            self.models.clone(),
            self.config.client.clone(),
        )
    }
}

/// Collects the collaborators of a run
pub struct ConcolicContextBuilder {
    config: ConcolicConfig,
    library: Option<Arc<dyn SymbolicLibrary>>,
    views: ViewMap,
    models: ModelRegistry,
    sink: Option<Arc<dyn MutationSink>>,
    parser: Option<Arc<dyn FormParser>>,
}

impl ConcolicContextBuilder {
    pub fn new(config: ConcolicConfig) -> Self {
        Self {
            config,
            library: None,
            views: ViewMap::default(),
            models: ModelRegistry::new(),
            sink: None,
            parser: None,
        }
    }

    /// Symbolic-value library (default: an empty `SampleLibrary`)
    pub fn library(mut self, library: Arc<dyn SymbolicLibrary>) -> Self {
        self.library = Some(library);
        self
    }

    pub fn views(mut self, views: ViewMap) -> Self {
        self.views = views;
        self
    }

    /// Plain managers; they are substituted during `build`
    pub fn models(mut self, models: ModelRegistry) -> Self {
        self.models = models;
        self
    }

    /// Mutation report consumer (default: a `MutationLog`)
    pub fn sink(mut self, sink: Arc<dyn MutationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Underlying form parser; token restoration is layered on top
    /// (default: `UrlEncodedParser`)
    pub fn parser(mut self, parser: Arc<dyn FormParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    pub fn build(self) -> Result<ConcolicContext> {
        self.config.validate()?;

        let library = self
            .library
            .unwrap_or_else(|| Arc::new(SampleLibrary::new()));
        let bridge = SymbolicBridge::new(self.config.bridge.tag.clone(), library);

        let sink = self.sink.unwrap_or_else(|| Arc::new(MutationLog::new()));
        let engine = Arc::new(MutationEngine::new(
            self.config.mutation.clone(),
            sink,
            Arc::new(DiagnosticRegistry::new()),
        ));
        let models = self.models.substitute(&engine);

        let parser: Arc<dyn FormParser> = match self.parser {
            Some(inner) => Arc::new(SymbolicFormParser::new(inner, bridge.clone())),
            None => Arc::new(SymbolicFormParser::new(UrlEncodedParser, bridge.clone())),
        };

        let run_id = Uuid::new_v4();
        tracing::info!(
            "concolic run {} ready: {} views, {} models",
            run_id,
            self.views.len(),
            models.len()
        );

        Ok(ConcolicContext {
            run_id,
            config: self.config,
            bridge,
            views: Arc::new(self.views),
            models,
            engine,
            parser,
        })
    }
}
