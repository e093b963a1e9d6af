//! SPA navigation controller.
//!
//! One [`Controller`] per page. It owns the tracked regions, the sticky
//! element handle and the preload cache, and drives every navigation
//! through the state machine:
//!
//! ```text
//! Idle -> Validating -> Fetching -> Swapping -> Finalizing -> Idle
//!                                                    (any) -> Aborted
//! ```
//!
//! # Modules
//!
//! - `error` - `NavError`
//! - `interceptor` - Link binding and event routing
//! - `outcome` - `NavReport` / `NavOutcome`
//! - `preload` - Hover preload cache
//! - `run` - Per-run state trace

mod error;
mod interceptor;
mod outcome;
mod preload;
mod run;

pub use error::NavError;
pub use interceptor::{ClickEvent, ClickOutcome, NavigationInterceptor};
pub use outcome::{NavOutcome, NavReport};
pub use preload::{PRELOAD_CAPACITY, PreloadCache};

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use url::Url;

use crate::config::{Concurrency, ConfigError, NavConfig};
use crate::core::{NavState, NavigationRequest, PopLocation, document_key, is_same_origin, resolve};
use crate::dom::{Document, NodeId, SharedDocument};
use crate::fetch::{FetchedPage, PageFetcher, Transport};
use crate::host::{Finished, Window};
use crate::scripts::ScriptReattacher;
use crate::swap::{ReconcileError, TrackedRegion, reconcile};
use crate::{debug, log};
use run::Run;

pub struct Controller<W, T> {
    window: W,
    fetcher: PageFetcher<T>,
    document: SharedDocument,
    config: NavConfig,
    interceptor: NavigationInterceptor,
    reattacher: ScriptReattacher,
    /// Resolved once by `start`; containers never change afterwards.
    regions: Vec<TrackedRegion>,
    /// Last known sticky element.
    sticky: Mutex<Option<NodeId>>,
    /// Latest run number handed out.
    generation: AtomicU64,
    preloads: PreloadCache,
}

impl<W: Window, T: Transport> Controller<W, T> {
    pub fn new(
        window: W,
        transport: T,
        document: SharedDocument,
        config: NavConfig,
    ) -> Result<Self, ConfigError> {
        let specs = config.region_specs()?;
        let links = config.link_selector()?;
        let interceptor = NavigationInterceptor::new(links, config.preload.enable);
        let fetcher = PageFetcher::new(transport, specs, config.fetch.timeout());

        Ok(Self {
            window,
            fetcher,
            document,
            config,
            interceptor,
            reattacher: ScriptReattacher::new(),
            regions: Vec::new(),
            sticky: Mutex::new(None),
            generation: AtomicU64::new(0),
            preloads: PreloadCache::default(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn window(&self) -> &W {
        &self.window
    }

    #[inline]
    pub fn transport(&self) -> &T {
        self.fetcher.transport()
    }

    #[inline]
    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    #[inline]
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    #[inline]
    pub fn regions(&self) -> &[TrackedRegion] {
        &self.regions
    }

    #[inline]
    pub fn interceptor(&self) -> &NavigationInterceptor {
        &self.interceptor
    }

    pub fn sticky(&self) -> Option<NodeId> {
        *self.sticky.lock()
    }

    // =========================================================================
    // Startup
    // =========================================================================

    /// Resolve tracked regions, remember the sticky element and the scripts
    /// that already ran, and bind links.
    ///
    /// Must run before any navigation; until then every request falls back
    /// with [`NavError::NotStarted`].
    pub fn start(&mut self) {
        let location = self.window.location();
        let mut doc = self.document.lock();
        let root = doc.root();

        self.regions = self
            .fetcher
            .regions()
            .iter()
            .filter_map(|spec| match doc.query(root, &spec.selector) {
                Some(container) => Some(TrackedRegion {
                    name: spec.name.clone(),
                    selector: spec.selector.clone(),
                    container,
                    primary: spec.primary,
                }),
                None => {
                    debug!("nav"; "region `{}` ({}) not on this page", spec.name, spec.selector);
                    None
                }
            })
            .collect();

        *self.sticky.lock() = self.sticky_id().and_then(|id| doc.element_by_id(id));
        self.reattacher.seed(&doc, &location);

        if self.config.spa {
            let bound = self.interceptor.bind(&mut doc, root, &location);
            debug!("nav"; "tracking {} regions, {} links", self.regions.len(), bound);
        }
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// Route a click; `None` means the host should run its default action.
    pub async fn click(&self, target: NodeId, event: ClickEvent) -> Option<NavReport> {
        let outcome = {
            let doc = self.document.lock();
            self.interceptor.handle_click(&doc, target, &event)
        };
        match outcome {
            ClickOutcome::Navigate(request) => Some(self.navigate(request).await),
            ClickOutcome::Default => None,
        }
    }

    /// History traversal.
    pub async fn pop(&self, location: PopLocation) -> NavReport {
        let request = self.interceptor.handle_pop(&location);
        self.navigate(request).await
    }

    /// Pointer rests on `target`; preload its link if bound for it.
    pub async fn hover(&self, target: NodeId) -> bool {
        let href = {
            let doc = self.document.lock();
            self.interceptor.handle_hover(&doc, target)
        };
        match href {
            Some(href) => self.preload(&href).await,
            None => false,
        }
    }

    /// Fetch a same-origin page after the preload delay and keep it for the
    /// next navigation to it.
    pub async fn preload(&self, target: &str) -> bool {
        if !self.config.spa || !self.config.preload.enable {
            return false;
        }
        let location = self.window.location();
        let Ok(url) = resolve(&location, target) else {
            return false;
        };
        if !is_same_origin(&location, &url) {
            return false;
        }
        let key = document_key(&url);
        if self.preloads.contains(&key) {
            return true;
        }

        tokio::time::sleep(self.config.preload.delay()).await;
        match self.fetcher.fetch(&url).await {
            Ok(page) => {
                debug!("nav"; "preloaded {}", key);
                self.preloads.insert(key, page);
                true
            }
            Err(err) => {
                debug!("nav"; "preload failed: {}", err);
                false
            }
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Run one navigation to completion.
    pub async fn navigate(&self, request: NavigationRequest) -> NavReport {
        let mut run = Run::new(self.generation.fetch_add(1, Ordering::SeqCst) + 1);

        run.enter(NavState::Validating);
        let url = match self.validate(&request.target) {
            Ok(url) => url,
            Err(err) => return self.abort(run, &request.target, err),
        };

        run.enter(NavState::Fetching);
        let page = match self.load(&url).await {
            Ok(page) => page,
            Err(err) => return self.abort(run, &request.target, err),
        };

        if self.is_stale(&run) {
            return self.supersede(run);
        }

        run.enter(NavState::Swapping);
        let finished = match self.swap(&page) {
            Ok(finished) => finished,
            Err(err) => return self.abort(run, &request.target, err.into()),
        };
        if request.should_push_history {
            self.window.push_state(&url);
        } else {
            self.window.replace_state(&url);
        }

        run.enter(NavState::Finalizing);
        self.settle(finished).await;
        if self.is_stale(&run) {
            return self.supersede(run);
        }

        let scripts = {
            let mut doc = self.document.lock();
            let scripts = self.reattacher.reattach(&mut doc, &page);
            let root = doc.root();
            self.interceptor
                .rebind(&mut doc, root, &self.window.location());
            scripts
        };

        // Scripts run after the current task, in discovery order
        tokio::task::yield_now().await;
        for src in &scripts {
            self.window.run_script(src);
        }

        run.enter(NavState::Idle);
        run.finish(NavOutcome::Completed { url })
    }

    fn validate(&self, target: &str) -> Result<Url, NavError> {
        if !self.config.spa {
            return Err(NavError::Disabled);
        }
        if self.regions.is_empty() {
            return Err(NavError::NotStarted);
        }

        let location = self.window.location();
        let url = resolve(&location, target).map_err(|source| NavError::InvalidTarget {
            target: target.to_string(),
            source,
        })?;
        if !is_same_origin(&location, &url) {
            return Err(NavError::OriginMismatch(url));
        }
        if self.config.transition.is_enabled() && !self.window.supports_view_transitions() {
            return Err(NavError::UnsupportedFeature);
        }
        Ok(url)
    }

    /// Preloaded page if any, otherwise a fresh fetch.
    async fn load(&self, url: &Url) -> Result<FetchedPage, NavError> {
        let page = match self.preloads.take(&document_key(url)) {
            Some(page) => {
                debug!("nav"; "using preloaded {}", url);
                page
            }
            None => self.fetcher.fetch(url).await?,
        };

        match self.fetcher.regions().iter().find(|spec| spec.primary) {
            Some(primary) if page.region(&primary.name).is_none() => {
                Err(NavError::MissingRegion(primary.name.clone()))
            }
            _ => Ok(page),
        }
    }

    /// Run the DOM update, inside the view transition when enabled.
    fn swap(&self, page: &FetchedPage) -> Result<Finished, ReconcileError> {
        if !self.config.transition.is_enabled() {
            return self.apply_locked(page).map(|()| Finished::ready());
        }

        let mut ran = false;
        let mut result = Ok(());
        let duration = self.config.transition.duration();
        let finished = self.window.start_view_transition(duration, &mut || {
            ran = true;
            result = self.apply_locked(page);
        });
        if !ran {
            debug!("nav"; "host skipped the update callback, applying directly");
            result = self.apply_locked(page);
        }
        result.map(|()| finished)
    }

    /// The document lock is held for the whole update and nothing else.
    fn apply_locked(&self, page: &FetchedPage) -> Result<(), ReconcileError> {
        let mut doc = self.document.lock();
        self.apply(&mut doc, page)
    }

    /// The synchronous update block.
    fn apply(&self, doc: &mut Document, page: &FetchedPage) -> Result<(), ReconcileError> {
        if !page.title.is_empty() {
            doc.set_title(&page.title);
        }

        let sticky_id = self.sticky_id();
        for region in &self.regions {
            if let Some(fragment) = page.region(&region.name) {
                reconcile(doc, region.container, fragment, sticky_id)?;
            }
        }

        self.rehome_sticky(doc);
        Ok(())
    }

    /// Track the sticky element after a swap, moving it home if it ended up
    /// detached.
    fn rehome_sticky(&self, doc: &mut Document) {
        let Some(id) = self.sticky_id() else {
            return;
        };
        let mut sticky = self.sticky.lock();

        if let Some(current) = doc.element_by_id(id) {
            *sticky = Some(current);
            return;
        }

        let home = self
            .regions
            .iter()
            .find(|region| region.name == self.config.sticky_home);
        if let (Some(node), Some(home)) = (*sticky, home)
            && doc.is_alive(node)
            && doc.append_child(home.container, node)
        {
            debug!("nav"; "sticky element returned to `{}`", home.name);
        }
    }

    /// Wait for the transition to settle; failures only get logged.
    async fn settle(&self, finished: Finished) {
        let result = match self.config.transition.timeout() {
            Some(limit) => match tokio::time::timeout(limit, finished.wait()).await {
                Ok(result) => result,
                Err(_) => {
                    log!("nav"; "view transition did not finish within {}ms", limit.as_millis());
                    return;
                }
            },
            None => finished.wait().await,
        };
        if let Err(err) = result {
            log!("nav"; "{}", err);
        }
    }

    fn sticky_id(&self) -> Option<&str> {
        Some(self.config.sticky.as_str()).filter(|id| !id.is_empty())
    }

    fn is_stale(&self, run: &Run) -> bool {
        self.config.concurrency == Concurrency::Latest
            && self.generation.load(Ordering::SeqCst) != run.generation
    }

    fn supersede(&self, mut run: Run) -> NavReport {
        run.enter(NavState::Aborted);
        debug!("nav"; "#{} superseded", run.generation);
        run.finish(NavOutcome::Superseded)
    }

    /// Single recovery path: full navigation, unless the document was
    /// already touched.
    fn abort(&self, mut run: Run, target: &str, err: NavError) -> NavReport {
        run.enter(NavState::Aborted);

        let err = match err {
            NavError::Reconcile(reason) => {
                log!("error"; "swap abandoned: {}", reason);
                return run.finish(NavOutcome::Abandoned(reason));
            }
            other => other,
        };

        debug_assert!(err.falls_back());
        log!("nav"; "full navigation to {}: {}", target, err);
        self.window.assign(target);
        run.finish(NavOutcome::FellBack {
            target: target.to_string(),
            reason: err,
        })
    }
}
