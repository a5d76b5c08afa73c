#![warn(clippy::all)]

use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
    rc::Rc,
};

use clap::ArgMatches;
use lazyimg::{
    Coordinator, DefaultTransport, ElementId, ImageElement, LazyOptions, LoadError, LoadState,
    OriginResolver, Rect, ResourceLoader, cli,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use url::Url;

const APP_NAME: &str = "lazyimg";
const PAGE_WIDTH: f32 = 1100.0;

/// One image on the simulated page. Logs every source it is asked to show.
struct PageImage {
    id: ElementId,
    name: String,
    src: String,
    shown: RefCell<String>,
}

impl PageImage {
    fn new(name: String, src: String) -> Rc<Self> {
        Rc::new(Self {
            id: ElementId::next(),
            name,
            src,
            shown: RefCell::new(String::new()),
        })
    }
}

impl ImageElement for PageImage {
    fn id(&self) -> ElementId {
        self.id
    }

    fn set_src(&self, src: &str) {
        let label = if src.starts_with("data:") {
            "<embedded image>"
        } else {
            src
        };
        info!("{} shows {label}", self.name);
        *self.shown.borrow_mut() = src.to_owned();
    }
}

/// Url every page image is addressed relative to: the configured origin, or
/// the image directory itself.
fn page_base(options: &LazyOptions, dir: &Path) -> Result<Url, LoadError> {
    if let Some(origin) = &options.origin {
        let mut base = Url::parse(origin).map_err(|source| LoadError::InvalidUrl {
            src: origin.clone(),
            source,
        })?;
        base.set_path("/");
        base.set_query(None);
        base.set_fragment(None);
        return Ok(base);
    }

    let dir = fs::canonicalize(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    Url::from_directory_path(&dir).map_err(|_| LoadError::NotAbsolute(dir))
}

fn loader_for(options: &LazyOptions, dir: &Path) -> Result<ResourceLoader, LoadError> {
    if let Some(origin) = &options.origin {
        let resolver = OriginResolver::parse(origin)?;
        return Ok(ResourceLoader::new(DefaultTransport::new(), resolver));
    }

    let base = page_base(options, dir)?;
    Ok(ResourceLoader::new(DefaultTransport::new(), move |src: &str| {
        base.join(src).map_err(|source| LoadError::InvalidUrl {
            src: src.to_owned(),
            source,
        })
    }))
}

/// Absolute source for a file name, percent-encoded so names containing `#`,
/// `?` or `%` stay a single path segment.
fn source_for(base: &Url, name: &str) -> Result<String, LoadError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| LoadError::UnsupportedScheme(base.scheme().to_owned()))?
        .pop_if_empty()
        .push(name);
    Ok(url.into())
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut list: Vec<PathBuf> = entries
        .flatten()
        .filter(|entry| entry.file_type().map(|kind| kind.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| image::ImageFormat::from_path(path).is_ok())
        .collect();

    list.sort_by(|a, b| {
        lexical_sort::natural_lexical_cmp(&a.to_string_lossy(), &b.to_string_lossy())
    });
    Ok(list)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

fn check(options: &LazyOptions, src: &str) -> ExitCode {
    let loader = match loader_for(options, Path::new(".")) {
        Ok(loader) => loader,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match pollster::block_on(loader.fetch(src)) {
        Ok(()) => {
            info!("{src} loaded");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{src} failed to load: {err}");
            ExitCode::FAILURE
        }
    }
}

fn browse(options: &LazyOptions, dir: &Path, matches: &ArgMatches) -> Result<(), LoadError> {
    let viewport_height = *matches.get_one::<u32>("VIEWPORT_HEIGHT").unwrap_or(&720) as f32;
    let item_height = *matches.get_one::<u32>("ITEM_HEIGHT").unwrap_or(&240) as f32;
    let step = *matches.get_one::<u32>("STEP").unwrap_or(&360) as f32;

    let loader = loader_for(options, dir)?;
    let base = page_base(options, dir)?;
    let mut lazy = Coordinator::new(options, loader);

    let mut page = Vec::new();
    for (index, path) in list_images(dir)?.into_iter().enumerate() {
        let Some(name) = file_name(&path) else {
            continue;
        };
        let src = source_for(&base, &name)?;
        let element = PageImage::new(name, src);
        lazy.add(&element, &element.src);
        lazy.set_bounds(
            element.id(),
            Rect::from_xywh(0.0, index as f32 * item_height, PAGE_WIDTH, item_height),
        );
        page.push(element);
    }

    if page.is_empty() {
        info!("no images in {}", dir.display());
        return Ok(());
    }

    let page_height = page.len() as f32 * item_height;
    let mut top = 0.0;
    loop {
        info!("viewport at {top}px");
        lazy.set_viewport(Rect::from_xywh(0.0, top, PAGE_WIDTH, viewport_height));
        lazy.run_until_idle();
        if top + viewport_height >= page_height {
            break;
        }
        top += step;
    }

    let loaded = page
        .iter()
        .filter(|element| *element.shown.borrow() == element.src)
        .count();
    let failed = page
        .iter()
        .filter(|element| lazy.state(element.id()) == Some(LoadState::Error))
        .count();
    info!(
        "{loaded} of {} images loaded, {failed} failed, {} fetches",
        page.len(),
        lazy.dispatched()
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = cli::get_clap_command().get_matches();

    let mut options: LazyOptions = confy::load(APP_NAME, None).unwrap_or_default();
    if let Some(loading) = matches.get_one::<String>("LOADING") {
        options.loading = loading.clone();
    }
    if let Some(error) = matches.get_one::<String>("ERROR") {
        options.error = error.clone();
    }
    if let Some(origin) = matches.get_one::<String>("ORIGIN") {
        options.origin = Some(origin.clone());
    }

    if matches.get_flag("SAVE_CONFIG") {
        if let Err(err) = confy::store(APP_NAME, None, &options) {
            error!("could not store config: {err}");
        }
    }

    if let Some(src) = matches.get_one::<String>("CHECK") {
        return check(&options, src);
    }

    let Some(dir) = matches.get_one::<String>("DIR") else {
        error!("no directory given");
        return ExitCode::FAILURE;
    };

    match browse(&options, Path::new(dir), &matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
