//! In-memory host and transport for tests.

use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use url::Url;

use crate::fetch::{FetchRequest, Response, Transport, TransportError};
use crate::host::{FinishSignal, Finished, Window};

pub const ORIGIN: &str = "https://example.com";

pub fn url(path: &str) -> Url {
    Url::parse(ORIGIN).unwrap().join(path).unwrap()
}

/// Standard page layout used across controller tests.
pub fn page(title: &str, main: &str) -> String {
    page_with(title, main, "")
}

/// Standard layout with extra markup at the end of `<body>`.
pub fn page_with(title: &str, main: &str, tail: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>{title}</title></head>
<body>
<header><nav><a href="/">Home</a><a href="/about/">About</a><a href="/blog/">Blog</a></nav></header>
<main>{main}</main>
<footer><p>{title} footer</p></footer>
{tail}
</body>
</html>"#
    )
}

// ============================================================================
// FakeWindow
// ============================================================================

/// How the fake view transition settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishMode {
    Immediate,
    Fail,
    /// Keep the signal forever (exercises the transition timeout).
    Hold,
    Drop,
}

#[derive(Debug)]
pub struct WindowState {
    pub location: Url,
    pub pushed: Vec<Url>,
    pub replaced: Vec<Url>,
    pub assigned: Vec<String>,
    pub scripts: Vec<Url>,
    pub transitions: usize,
    pub durations: Vec<Duration>,
    pub supports_transitions: bool,
    pub finish: FinishMode,
    held: Vec<FinishSignal>,
}

#[derive(Debug)]
pub struct FakeWindow {
    state: Mutex<WindowState>,
}

impl FakeWindow {
    pub fn at(path: &str) -> Self {
        Self {
            state: Mutex::new(WindowState {
                location: url(path),
                pushed: Vec::new(),
                replaced: Vec::new(),
                assigned: Vec::new(),
                scripts: Vec::new(),
                transitions: 0,
                durations: Vec::new(),
                supports_transitions: true,
                finish: FinishMode::Immediate,
                held: Vec::new(),
            }),
        }
    }

    pub fn without_transitions(self) -> Self {
        self.state.lock().supports_transitions = false;
        self
    }

    pub fn finishing(self, mode: FinishMode) -> Self {
        self.state.lock().finish = mode;
        self
    }

    pub fn pushed(&self) -> Vec<Url> {
        self.state.lock().pushed.clone()
    }

    pub fn replaced(&self) -> Vec<Url> {
        self.state.lock().replaced.clone()
    }

    pub fn assigned(&self) -> Vec<String> {
        self.state.lock().assigned.clone()
    }

    pub fn scripts(&self) -> Vec<Url> {
        self.state.lock().scripts.clone()
    }

    pub fn transitions(&self) -> usize {
        self.state.lock().transitions
    }

    /// Durations requested for each transition.
    pub fn durations(&self) -> Vec<Duration> {
        self.state.lock().durations.clone()
    }

    /// Finished signals never sent.
    pub fn held(&self) -> usize {
        self.state.lock().held.len()
    }
}

impl Window for FakeWindow {
    fn location(&self) -> Url {
        self.state.lock().location.clone()
    }

    fn push_state(&self, url: &Url) {
        let mut state = self.state.lock();
        state.pushed.push(url.clone());
        state.location = url.clone();
    }

    fn replace_state(&self, url: &Url) {
        let mut state = self.state.lock();
        state.replaced.push(url.clone());
        state.location = url.clone();
    }

    fn assign(&self, target: &str) {
        self.state.lock().assigned.push(target.to_string());
    }

    fn supports_view_transitions(&self) -> bool {
        self.state.lock().supports_transitions
    }

    fn start_view_transition(&self, duration: Duration, update: &mut dyn FnMut()) -> Finished {
        let mode = {
            let mut state = self.state.lock();
            state.transitions += 1;
            state.durations.push(duration);
            state.finish
        };
        update();

        let (signal, finished) = Finished::channel();
        match mode {
            FinishMode::Immediate => signal.finish(),
            FinishMode::Fail => signal.fail("skipped"),
            FinishMode::Hold => self.state.lock().held.push(signal),
            FinishMode::Drop => drop(signal),
        }
        finished
    }

    fn run_script(&self, src: &Url) {
        self.state.lock().scripts.push(src.clone());
    }
}

// ============================================================================
// FakeTransport
// ============================================================================

#[derive(Debug, Clone)]
struct Route {
    delay: Option<Duration>,
    result: Result<Response, TransportError>,
}

/// Serves canned responses keyed by path; unknown paths get a 404.
#[derive(Debug, Default)]
pub struct FakeTransport {
    routes: Mutex<FxHashMap<String, Route>>,
    requests: Mutex<Vec<Url>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, path: &str, html: impl Into<String>) -> Self {
        self.route(path, None, Ok(Response::html(html)))
    }

    pub fn with_delayed_page(self, path: &str, delay: Duration, html: impl Into<String>) -> Self {
        self.route(path, Some(delay), Ok(Response::html(html)))
    }

    pub fn with_response(self, path: &str, response: Response) -> Self {
        self.route(path, None, Ok(response))
    }

    pub fn with_failure(self, path: &str, reason: &str) -> Self {
        self.route(path, None, Err(TransportError(reason.to_string())))
    }

    fn route(
        self,
        path: &str,
        delay: Option<Duration>,
        result: Result<Response, TransportError>,
    ) -> Self {
        self.routes
            .lock()
            .insert(path.to_string(), Route { delay, result });
        self
    }

    /// Every URL requested so far.
    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().clone()
    }
}

impl Transport for FakeTransport {
    async fn get(&self, request: &FetchRequest) -> Result<Response, TransportError> {
        self.requests.lock().push(request.url.clone());
        let route = self.routes.lock().get(request.url.path()).cloned();

        match route {
            Some(Route { delay, result }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Ok(Response::html("").with_status(404)),
        }
    }
}
