//! Scene transitions with background loading
//!
//! A request spawns a worker thread that loads the scene asset and posts the
//! result back over a channel. The frame loop drains that channel with
//! [`SceneTransitions::poll`]. While a load is in flight new requests are
//! rejected. Every request gets a fresh token, and completions carrying any
//! token other than the pending one are discarded.

use crossbeam::channel::{unbounded, Receiver, Sender};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use strider_core::{Result, StriderError};
use strider_scene::{import_character, load_scene, CharacterAsset, SceneDescriptor, SceneGraph};

/// Monotonic id of one scene load request
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct RequestToken(pub u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Loads scene and character assets. Called from worker threads.
pub trait AssetLoader: Send + Sync {
    fn load_scene(&self, path: &str) -> Result<SceneGraph>;

    fn load_character(&self, path: &str) -> Result<CharacterAsset>;
}

/// Filesystem loader for TOML scenes and glTF/GLB assets
#[derive(Debug, Clone, Default)]
pub struct SceneAssetLoader {
    /// Directory relative asset paths are resolved against
    pub root: Option<PathBuf>,
}

impl SceneAssetLoader {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        // Web-style absolute asset paths ("/models/x.gltf") are root-relative
        let trimmed = path.trim_start_matches('/');
        match &self.root {
            Some(root) => root.join(trimmed),
            None => PathBuf::from(path),
        }
    }
}

impl AssetLoader for SceneAssetLoader {
    fn load_scene(&self, path: &str) -> Result<SceneGraph> {
        load_scene(self.resolve(path))
    }

    fn load_character(&self, path: &str) -> Result<CharacterAsset> {
        import_character(self.resolve(path))
    }
}

/// Which way to step through the scene list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Next,
    Previous,
}

/// A finished load for the current request
#[derive(Debug)]
pub struct LoadCompletion {
    pub token: RequestToken,
    /// Index into the scene list
    pub index: usize,
    pub result: Result<SceneGraph>,
}

/// Ordered scene list, active index, and the in-flight load
pub struct SceneTransitions {
    scenes: Vec<SceneDescriptor>,
    active: usize,
    /// Token and target index of the load in flight
    pending: Option<(RequestToken, usize)>,
    next_token: u64,
    /// Stale tokens skipped by `wait`, handed out by the next `take_stale`
    stale: Vec<RequestToken>,
    loader: Arc<dyn AssetLoader>,
    sender: Sender<LoadCompletion>,
    receiver: Receiver<LoadCompletion>,
}

impl SceneTransitions {
    pub fn new(scenes: Vec<SceneDescriptor>, loader: Arc<dyn AssetLoader>) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            scenes,
            active: 0,
            pending: None,
            next_token: 1,
            stale: Vec::new(),
            loader,
            sender,
            receiver,
        }
    }

    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_scene(&self) -> Option<&SceneDescriptor> {
        self.scenes.get(self.active)
    }

    pub fn scene(&self, index: usize) -> Option<&SceneDescriptor> {
        self.scenes.get(index)
    }

    /// Busy flag: true while a load is in flight
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Target index of the load in flight
    pub fn pending_index(&self) -> Option<usize> {
        self.pending.map(|(_, index)| index)
    }

    pub fn loader(&self) -> &Arc<dyn AssetLoader> {
        &self.loader
    }

    /// Load the scene at `index`
    pub fn request_index(&mut self, index: usize) -> Result<RequestToken> {
        if self.is_loading() {
            return Err(StriderError::TransitionRejected(
                "a scene is already loading".into(),
            ));
        }
        let scene = self.scenes.get(index).ok_or_else(|| {
            StriderError::TransitionRejected(format!(
                "scene index {} out of range ({} scenes)",
                index,
                self.scenes.len()
            ))
        })?;

        let token = RequestToken(self.next_token);
        self.next_token += 1;
        self.pending = Some((token, index));

        log::info!("Loading scene '{}' ({}) as {}", scene.name, scene.asset_path, token);

        let loader = Arc::clone(&self.loader);
        let sender = self.sender.clone();
        let path = scene.asset_path.clone();
        thread::spawn(move || {
            let result = loader.load_scene(&path);
            // Receiver gone means the session was dropped; nothing to report to
            let _ = sender.send(LoadCompletion {
                token,
                index,
                result,
            });
        });

        Ok(token)
    }

    /// Step to the next or previous scene, wrapping around the list
    pub fn request(&mut self, direction: TransitionDirection) -> Result<RequestToken> {
        let len = self.scenes.len();
        if len == 0 {
            return Err(StriderError::TransitionRejected("no scenes configured".into()));
        }
        let target = match direction {
            TransitionDirection::Next => (self.active + 1) % len,
            TransitionDirection::Previous => (self.active + len - 1) % len,
        };
        self.request_index(target)
    }

    /// Abandon the load in flight. Its completion will be discarded.
    pub fn cancel(&mut self) {
        if let Some((token, _)) = self.pending.take() {
            log::info!("Cancelled scene load {}", token);
        }
    }

    /// Drain finished loads without blocking.
    ///
    /// Returns the completion of the current request, if it arrived, plus the
    /// tokens of any stale completions that were dropped.
    pub fn poll(&mut self) -> (Option<LoadCompletion>, Vec<RequestToken>) {
        let mut current = None;
        while let Ok(completion) = self.receiver.try_recv() {
            match self.accept(completion) {
                Ok(done) => current = Some(done),
                Err(token) => self.stale.push(token),
            }
        }
        (current, self.take_stale())
    }

    /// Tokens of stale completions dropped since the last call
    pub fn take_stale(&mut self) -> Vec<RequestToken> {
        std::mem::take(&mut self.stale)
    }

    /// Block up to `timeout` for the current request to finish.
    /// Stale completions received meanwhile are kept for [`Self::take_stale`].
    pub fn wait(&mut self, timeout: Duration) -> Option<LoadCompletion> {
        let deadline = std::time::Instant::now() + timeout;
        while self.is_loading() {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(completion) => match self.accept(completion) {
                    Ok(done) => return Some(done),
                    Err(token) => self.stale.push(token),
                },
                Err(_) => return None,
            }
        }
        None
    }

    /// `Ok` for the pending request's completion, `Err(token)` for a stale one
    fn accept(
        &mut self,
        completion: LoadCompletion,
    ) -> std::result::Result<LoadCompletion, RequestToken> {
        match self.pending {
            Some((token, _)) if token == completion.token => {
                self.pending = None;
                match &completion.result {
                    Ok(_) => self.active = completion.index,
                    Err(e) => log::error!("Scene load {} failed: {}", completion.token, e),
                }
                Ok(completion)
            }
            _ => {
                log::debug!("Discarding stale scene load {}", completion.token);
                Err(completion.token)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Loader that serves empty in-memory scenes and fails on "missing*" paths
    struct MemoryLoader;

    impl AssetLoader for MemoryLoader {
        fn load_scene(&self, path: &str) -> Result<SceneGraph> {
            if path.starts_with("missing") {
                return Err(StriderError::asset_load(path, "not found"));
            }
            Ok(SceneGraph::new(path))
        }

        fn load_character(&self, path: &str) -> Result<CharacterAsset> {
            Err(StriderError::asset_load(path, "no characters here"))
        }
    }

    fn transitions() -> SceneTransitions {
        SceneTransitions::new(
            vec![
                SceneDescriptor::new("Comisaria", "comisaria"),
                SceneDescriptor::new("Forest", "forest"),
                SceneDescriptor::new("Broken", "missing"),
            ],
            Arc::new(MemoryLoader),
        )
    }

    #[test]
    fn next_wraps_and_becomes_active_on_completion() {
        let mut t = transitions();
        t.request(TransitionDirection::Next).unwrap();
        assert!(t.is_loading());
        assert_eq!(t.pending_index(), Some(1));

        let done = t.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(done.index, 1);
        assert_eq!(done.result.unwrap().name, "forest");
        assert_eq!(t.active_index(), 1);
        assert!(!t.is_loading());
    }

    #[test]
    fn previous_wraps_to_last_scene() {
        let mut t = transitions();
        t.request(TransitionDirection::Previous).unwrap();
        let done = t.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(done.index, 2);
    }

    #[test]
    fn busy_flag_rejects_second_request() {
        let mut t = transitions();
        t.request(TransitionDirection::Next).unwrap();
        let err = t.request(TransitionDirection::Next).unwrap_err();
        assert!(matches!(err, StriderError::TransitionRejected(_)));
        t.wait(Duration::from_secs(5));
        assert!(t.request(TransitionDirection::Next).is_ok());
    }

    #[test]
    fn failed_load_keeps_active_scene_and_clears_busy() {
        let mut t = transitions();
        t.request_index(2).unwrap();
        let done = t.wait(Duration::from_secs(5)).unwrap();
        assert!(done.result.is_err());
        assert_eq!(t.active_index(), 0);
        assert!(!t.is_loading());
    }

    #[test]
    fn cancelled_load_is_discarded_as_stale() {
        let mut t = transitions();
        let first = t.request_index(1).unwrap();
        t.cancel();
        let second = t.request_index(0).unwrap();
        assert!(second > first);

        let done = t.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(done.token, second);
        assert_eq!(t.active_index(), 0);

        // The first completion may land before or after the second one;
        // either way it never becomes current and its token is reported once.
        thread::sleep(Duration::from_millis(50));
        let (current, stale) = t.poll();
        assert!(current.is_none());
        assert_eq!(stale, vec![first]);
        assert!(t.take_stale().is_empty());
    }

    #[test]
    fn wait_keeps_stale_tokens_it_skips() {
        let mut t = transitions();
        let first = t.request_index(1).unwrap();
        t.cancel();
        // Let the cancelled load land in the channel before the new request
        thread::sleep(Duration::from_millis(50));
        let second = t.request_index(0).unwrap();

        let done = t.wait(Duration::from_secs(5)).unwrap();
        assert_eq!(done.token, second);
        assert_eq!(t.take_stale(), vec![first]);
    }

    #[test]
    fn empty_scene_list_rejects_requests() {
        let mut t = SceneTransitions::new(Vec::new(), Arc::new(MemoryLoader));
        assert!(t.request(TransitionDirection::Next).is_err());
    }

    #[test]
    fn loader_resolves_web_paths_against_root() {
        let loader = SceneAssetLoader::with_root("/srv/static");
        assert_eq!(
            loader.resolve("/models/comisaria/scene.gltf"),
            PathBuf::from("/srv/static/models/comisaria/scene.gltf")
        );
        assert_eq!(
            SceneAssetLoader::default().resolve("scenes/a.toml"),
            PathBuf::from("scenes/a.toml")
        );
    }
}
