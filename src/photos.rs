//! Host-owned photo list.
//!
//! The upload side of the app owns the actual files; the scene only sees the
//! ordered URL list and, once known, each image's pixel size. A version
//! counter lets the frame loop resync ornaments only when something changed.

#[derive(Clone, Debug, Default)]
pub struct PhotoList {
    urls: Vec<String>,
    dimensions: Vec<(String, u32, u32)>,
    version: u64,
}

impl PhotoList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn push(&mut self, url: impl Into<String>) {
        self.urls.push(url.into());
        self.version += 1;
    }

    /// Remove every entry with this URL. Returns whether anything changed.
    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.urls.len();
        self.urls.retain(|u| u != url);
        let changed = self.urls.len() != before;
        if changed {
            self.version += 1;
        }
        changed
    }

    /// Replace the whole list, e.g. after re-fetching it from the server.
    pub fn replace(&mut self, urls: Vec<String>) {
        if urls != self.urls {
            self.urls = urls;
            self.version += 1;
        }
    }

    /// Queue an image size report for the scene to pick up.
    pub fn report_dimensions(&mut self, url: impl Into<String>, width: u32, height: u32) {
        self.dimensions.push((url.into(), width, height));
    }

    pub fn take_dimensions(&mut self) -> Vec<(String, u32, u32)> {
        std::mem::take(&mut self.dimensions)
    }
}
