#![allow(dead_code)]

use std::{
    cell::RefCell,
    io::Cursor,
    path::Path,
    rc::Rc,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use image::{ImageFormat, RgbaImage};
use lazyimg::{
    Coordinator, DefaultTransport, ElementId, ImageElement, LazyOptions, LoadError,
    ResourceLoader, Transport,
};
use tempfile::TempDir;
use url::Url;

pub const LOADING: &str = "loading.gif";
pub const ERROR: &str = "error.png";

pub struct Img {
    id: ElementId,
    shown: RefCell<Vec<String>>,
}

impl Img {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            id: ElementId::next(),
            shown: RefCell::new(Vec::new()),
        })
    }

    pub fn src(&self) -> String {
        self.shown.borrow().last().cloned().unwrap_or_default()
    }

    pub fn renders(&self) -> usize {
        self.shown.borrow().len()
    }
}

impl ImageElement for Img {
    fn id(&self) -> ElementId {
        self.id
    }

    fn set_src(&self, src: &str) {
        self.shown.borrow_mut().push(src.to_owned());
    }
}

/// Counts every fetch that reaches the network layer.
#[derive(Clone, Default)]
pub struct Counting {
    inner: DefaultTransport,
    pub fetches: Arc<AtomicUsize>,
}

impl Counting {
    pub fn count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Transport for Counting {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(url)
    }
}

pub fn write_png(path: &Path) {
    let mut bytes = Vec::new();
    RgbaImage::new(4, 4)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    std::fs::write(path, bytes).unwrap();
}

/// A site root holding `photo.png`, `a.png`, `b.png` and an undecodable
/// `broken.png`.
pub struct Site {
    pub root: TempDir,
    pub transport: Counting,
}

impl Site {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        for name in ["photo.png", "a.png", "b.png"] {
            write_png(&root.path().join(name));
        }
        std::fs::write(root.path().join("broken.png"), b"definitely not a png").unwrap();
        Self {
            root,
            transport: Counting::default(),
        }
    }

    pub fn loader(&self) -> ResourceLoader {
        let base = Url::from_directory_path(self.root.path()).unwrap();
        ResourceLoader::new(self.transport.clone(), move |src: &str| {
            base.join(src).map_err(|source| LoadError::InvalidUrl {
                src: src.to_owned(),
                source,
            })
        })
    }

    pub fn coordinator(&self) -> Coordinator {
        Coordinator::new(&LazyOptions::new(LOADING, ERROR), self.loader())
    }
}
